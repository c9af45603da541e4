use egui::{PointerButton, Pos2};
use hecs::Entity;

use crate::{
    CursorCapture, GameMode,
    feedback::{FeedbackMessage, FeedbackQueue, Severity},
    input::{Action, InputEvent},
    interaction,
    math::proximity::nearest,
    placement::{PlacementController, PlacementOutcome},
    state::{player::Player, session::SessionState, world::World},
    ui::{
        map::MapView,
        panels::{PanelAction, Panels},
    },
};

/// The parts of the game a routed event may touch
pub struct Frame<'a> {
    pub world: &'a mut World,
    pub player: &'a mut Player,
    pub feedback: &'a mut FeedbackQueue,
    /// Used to project clicks onto the water
    pub view: &'a MapView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    BuildingMenu,
    ShipInventory,
}

/// What happened to an input event
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Nobody wanted the event
    Dropped,
    ModeChanged {
        mode: GameMode,
        cursor: CursorCapture,
    },
    SwitchShip(usize),
    PanelToggled {
        panel: Panel,
        open: bool,
    },
    BuildingInteractionOpened(Entity),
    BuildingInteractionClosed,
    NoBuildingNearby,
    Interacted(Option<Severity>),
    /// A click handled by one of the open panels
    PanelClicked(PanelAction),
    Placement(PlacementOutcome),
    PlacementCancelled,
    /// A panel is open so the click was swallowed
    ClickConsumed,
    CameraLook((f32, f32)),
}

/// Owns the session's mode and panel state, and decides where every input event goes
pub struct ModeRouter {
    session: SessionState,
    placement: PlacementController,
    panels: Panels,
    building_menu_radius: f32,
}

impl ModeRouter {
    pub fn new(panels: Panels, building_menu_radius: f32) -> Self {
        assert!(building_menu_radius >= 0.);
        Self {
            session: SessionState::default(),
            placement: PlacementController::default(),
            panels,
            building_menu_radius,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut Panels {
        &mut self.panels
    }

    pub fn route(&mut self, event: InputEvent, frame: &mut Frame) -> RoutingDecision {
        let decision = match event {
            // Pause is the only action that works outside of Playing
            InputEvent::Action(action)
                if self.session.playing() || action == Action::TogglePause =>
            {
                self.route_action(action, frame)
            }
            InputEvent::PointerDown { pos, button }
                if self.session.playing() && self.session.ui.any_panel_active() =>
            {
                self.route_click(pos, button, frame)
            }
            InputEvent::PointerMotion { delta } if self.session.camera_look_enabled() => {
                frame.player.handle_mouse_movement(delta);
                RoutingDecision::CameraLook(delta)
            }
            _ => RoutingDecision::Dropped,
        };

        match &decision {
            RoutingDecision::Dropped => log::trace!("Dropped {event:?}"),
            RoutingDecision::CameraLook(_) => {}
            decision => log::debug!("{event:?} -> {decision:?}"),
        }
        decision
    }

    /// The only way in and out of the pause screen
    fn toggle_pause(&mut self) -> RoutingDecision {
        self.session.mode.toggle();
        log::info!("Game mode: {:?}", self.session.mode);

        RoutingDecision::ModeChanged {
            mode: self.session.mode,
            cursor: self.session.cursor(),
        }
    }

    fn route_action(&mut self, action: Action, frame: &mut Frame) -> RoutingDecision {
        let ui = &mut self.session.ui;
        match action {
            Action::TogglePause => self.toggle_pause(),
            Action::SwitchShip(index) => {
                frame.player.switch_ship(index);
                RoutingDecision::SwitchShip(index)
            }
            Action::ToggleBuildingMenu => {
                ui.building_menu_open ^= true;
                RoutingDecision::PanelToggled {
                    panel: Panel::BuildingMenu,
                    open: ui.building_menu_open,
                }
            }
            Action::ToggleShipInventory => {
                ui.ship_inventory_open ^= true;
                RoutingDecision::PanelToggled {
                    panel: Panel::ShipInventory,
                    open: ui.ship_inventory_open,
                }
            }
            Action::NearbyBuildingMenu => {
                if ui.building_interaction.take().is_some() {
                    return RoutingDecision::BuildingInteractionClosed;
                }

                let buildings = frame.world.buildings().map(|(entity, _, pos)| (entity, pos));
                match nearest(buildings, &frame.player.position, self.building_menu_radius) {
                    Some((building, _)) => {
                        ui.building_interaction = Some(building);
                        RoutingDecision::BuildingInteractionOpened(building)
                    }
                    None => {
                        frame
                            .feedback
                            .push(FeedbackMessage::warning("no building nearby"));
                        RoutingDecision::NoBuildingNearby
                    }
                }
            }
            Action::Interact => {
                let message = interaction::resolve(frame.player, frame.world);
                let severity = message.as_ref().map(|m| m.severity);
                if let Some(message) = message {
                    frame.feedback.push(message);
                }
                RoutingDecision::Interacted(severity)
            }
        }
    }

    /// A click while some panel is active. The panel under the pointer gets it first, then
    /// placement mode. Either way the world never sees it.
    fn route_click(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        frame: &mut Frame,
    ) -> RoutingDecision {
        if let Some(action) = self.panels.handle_mouse_click(&self.session.ui, pos, button) {
            self.apply_panel_action(action, frame);
            return RoutingDecision::PanelClicked(action);
        }

        if !self.session.ui.building_mode {
            return RoutingDecision::ClickConsumed;
        }

        match button {
            PointerButton::Primary => {
                let target = frame.view.screen_to_world(pos);
                let outcome = self
                    .placement
                    .click(&mut self.session.ui, frame.world, target);
                frame.feedback.push(outcome.feedback());
                RoutingDecision::Placement(outcome)
            }
            PointerButton::Secondary => {
                self.placement.cancel(&mut self.session.ui);
                frame
                    .feedback
                    .push(FeedbackMessage::info("placement cancelled"));
                RoutingDecision::PlacementCancelled
            }
            _ => RoutingDecision::ClickConsumed,
        }
    }

    fn apply_panel_action(&mut self, action: PanelAction, frame: &mut Frame) {
        let ui = &mut self.session.ui;
        match action {
            PanelAction::Nothing => {}
            PanelAction::SelectBuilding(building_type) => {
                self.placement.select(ui, building_type);
                frame
                    .feedback
                    .push(FeedbackMessage::info(format!("placing {building_type}")));
            }
            PanelAction::CloseBuildingMenu => ui.building_menu_open = false,
            PanelAction::SelectShip(index) => frame.player.switch_ship(index),
            PanelAction::CloseShipInventory => ui.ship_inventory_open = false,
            PanelAction::CloseBuildingInteraction => ui.building_interaction = None,
        }
    }
}
