use egui::{PointerButton, Pos2, Rect, pos2, vec2};
use enum_map::Enum;

use crate::{
    data::{building::BuildingType, ship::SHIP_DATA},
    state::session::UiFlags,
};

const PANEL_WIDTH: f32 = 260.;
const HEADER_HEIGHT: f32 = 32.;
pub const ROW_HEIGHT: f32 = 28.;
pub const PADDING: f32 = 8.;
const MARGIN: f32 = 20.;

/// What a click on a panel asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Click landed on the panel but not on anything clickable
    Nothing,
    SelectBuilding(BuildingType),
    CloseBuildingMenu,
    SelectShip(usize),
    CloseShipInventory,
    CloseBuildingInteraction,
}

/// Screen rectangles of one panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub frame: Rect,
    pub title: Rect,
    pub rows: Vec<Rect>,
    pub close: Rect,
}

impl PanelLayout {
    fn new(min: Pos2, rows: usize, body_height: f32) -> Self {
        let height =
            HEADER_HEIGHT + body_height + (rows + 1) as f32 * ROW_HEIGHT + PADDING * 2.;
        let frame = Rect::from_min_size(min, vec2(PANEL_WIDTH, height));
        let title = Rect::from_min_size(frame.min, vec2(PANEL_WIDTH, HEADER_HEIGHT));

        let rows_top = frame.min.y + HEADER_HEIGHT + body_height;
        let inner_width = PANEL_WIDTH - PADDING * 2.;
        let rows = (0..rows)
            .map(|i| {
                Rect::from_min_size(
                    pos2(frame.min.x + PADDING, rows_top + i as f32 * ROW_HEIGHT),
                    vec2(inner_width, ROW_HEIGHT - 2.),
                )
            })
            .collect::<Vec<_>>();

        let close = Rect::from_min_size(
            pos2(frame.min.x + PADDING, frame.max.y - PADDING - ROW_HEIGHT),
            vec2(inner_width, ROW_HEIGHT - 2.),
        );

        Self {
            frame,
            title,
            rows,
            close,
        }
    }

    /// Index of the row under `pos`
    fn row_at(&self, pos: Pos2) -> Option<usize> {
        self.rows.iter().position(|r| r.contains(pos))
    }
}

/// Where the panels sit on screen and which control a click hits
#[derive(Debug, Clone)]
pub struct Panels {
    screen: Rect,
}

impl Panels {
    pub fn new(screen: Rect) -> Self {
        Self { screen }
    }

    pub fn resize(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    /// Left side, one row per building type
    pub fn build_menu(&self) -> PanelLayout {
        PanelLayout::new(
            self.screen.min + vec2(MARGIN, MARGIN * 4.),
            BuildingType::iter().count(),
            0.,
        )
    }

    /// Right side, one row per ship plus room for the cargo list
    pub fn ship_inventory(&self) -> PanelLayout {
        PanelLayout::new(
            pos2(
                self.screen.max.x - MARGIN - PANEL_WIDTH,
                self.screen.min.y + MARGIN * 4.,
            ),
            SHIP_DATA.len(),
            ROW_HEIGHT * 5.,
        )
    }

    /// Bottom centre, building details and a close button
    pub fn building_interaction(&self) -> PanelLayout {
        let body = ROW_HEIGHT * 4.;
        let height = HEADER_HEIGHT + body + ROW_HEIGHT + PADDING * 2.;
        PanelLayout::new(
            pos2(
                self.screen.center().x - PANEL_WIDTH / 2.,
                self.screen.max.y - MARGIN - height,
            ),
            0,
            body,
        )
    }

    /// Route a click to the open panel under the pointer.
    ///
    /// `None` means no open panel was hit. Only the primary button presses controls.
    pub fn handle_mouse_click(
        &self,
        ui: &UiFlags,
        pos: Pos2,
        button: PointerButton,
    ) -> Option<PanelAction> {
        let primary = button == PointerButton::Primary;

        if ui.building_interaction_open() {
            let layout = self.building_interaction();
            if layout.frame.contains(pos) {
                return Some(if primary && layout.close.contains(pos) {
                    PanelAction::CloseBuildingInteraction
                } else {
                    PanelAction::Nothing
                });
            }
        }

        if ui.ship_inventory_open {
            let layout = self.ship_inventory();
            if layout.frame.contains(pos) {
                if !primary {
                    return Some(PanelAction::Nothing);
                }
                if layout.close.contains(pos) {
                    return Some(PanelAction::CloseShipInventory);
                }
                return Some(
                    layout
                        .row_at(pos)
                        .map_or(PanelAction::Nothing, PanelAction::SelectShip),
                );
            }
        }

        if ui.building_menu_open {
            let layout = self.build_menu();
            if layout.frame.contains(pos) {
                if !primary {
                    return Some(PanelAction::Nothing);
                }
                if layout.close.contains(pos) {
                    return Some(PanelAction::CloseBuildingMenu);
                }
                return Some(layout.row_at(pos).map_or(PanelAction::Nothing, |i| {
                    PanelAction::SelectBuilding(BuildingType::from_usize(i))
                }));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use egui::{PointerButton, Rect, pos2};

    use super::{PanelAction, Panels};
    use crate::{data::building::BuildingType, state::session::UiFlags};

    fn panels() -> Panels {
        Panels::new(Rect::from_min_max(pos2(0., 0.), pos2(1600., 900.)))
    }

    #[test]
    fn test_closed_panels_ignore_clicks() {
        let panels = panels();
        let pos = panels.build_menu().rows[0].center();
        assert_eq!(
            panels.handle_mouse_click(&UiFlags::default(), pos, PointerButton::Primary),
            None
        );
    }

    #[test]
    fn test_build_menu_rows() {
        let panels = panels();
        let ui = UiFlags {
            building_menu_open: true,
            ..Default::default()
        };
        let layout = panels.build_menu();

        BuildingType::iter().enumerate().for_each(|(i, building_type)| {
            assert_eq!(
                panels.handle_mouse_click(&ui, layout.rows[i].center(), PointerButton::Primary),
                Some(PanelAction::SelectBuilding(building_type))
            );
        });
        assert_eq!(
            panels.handle_mouse_click(&ui, layout.close.center(), PointerButton::Primary),
            Some(PanelAction::CloseBuildingMenu)
        );
        assert_eq!(
            panels.handle_mouse_click(&ui, layout.title.center(), PointerButton::Primary),
            Some(PanelAction::Nothing)
        );
        assert_eq!(
            panels.handle_mouse_click(&ui, layout.rows[0].center(), PointerButton::Secondary),
            Some(PanelAction::Nothing)
        );
    }

    #[test]
    fn test_ship_inventory_rows() {
        let panels = panels();
        let ui = UiFlags {
            ship_inventory_open: true,
            ..Default::default()
        };
        let layout = panels.ship_inventory();
        assert_eq!(
            panels.handle_mouse_click(&ui, layout.rows[2].center(), PointerButton::Primary),
            Some(PanelAction::SelectShip(2))
        );
    }

    #[test]
    fn test_panels_do_not_overlap() {
        let panels = panels();
        let frames = [
            panels.build_menu().frame,
            panels.ship_inventory().frame,
            panels.building_interaction().frame,
        ];
        for (i, a) in frames.iter().enumerate() {
            assert!(panels.screen().contains_rect(*a));
            for b in &frames[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }
}
