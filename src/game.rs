use std::time::{Duration, Instant};

use egui::Rect;

use crate::{
    GameMode,
    config::GameConfig,
    feedback::FeedbackQueue,
    input::{InputEvent, MovementInput},
    math::WorldPos,
    router::{Frame, ModeRouter, RoutingDecision},
    state::{
        player::{EYE_HEIGHT, Player},
        session::SessionState,
        world::World,
    },
    ui::{map::MapView, panels::Panels},
};

/// Measures frame deltas against a target frame rate
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    interval: Duration,
    max_delta: Duration,
}

impl FrameClock {
    pub fn new(interval: Duration, max_delta: Duration) -> Self {
        Self {
            last: None,
            interval,
            max_delta,
        }
    }

    /// Start a new frame, returning the time since the last one. The first frame is zero
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt.min(self.max_delta)
    }

    /// When the next frame is due
    pub fn next_frame(&self) -> Option<Instant> {
        self.last.map(|last| last + self.interval)
    }

    pub fn frame_due(&self, now: Instant) -> bool {
        self.next_frame().is_none_or(|next| now >= next)
    }
}

/// Holds state information about the game independent of the rendering
pub struct Game {
    pub config: GameConfig,
    pub world: World,
    pub player: Player,
    pub feedback: FeedbackQueue,
    /// Held movement keys
    pub movement: MovementInput,
    router: ModeRouter,
    clock: FrameClock,
    screen: Rect,
}

impl Game {
    /// A new session in a freshly generated world
    pub fn new(config: GameConfig, screen: Rect) -> Self {
        let world = World::generate(config.world_size, config.world_seed);
        Self::with_world(config, world, screen)
    }

    /// A new session with the player in the middle of `world`
    pub fn with_world(config: GameConfig, world: World, screen: Rect) -> Self {
        let centre = world.size / 2.;
        let mut player = Player::new(
            WorldPos::new(centre, EYE_HEIGHT, centre),
            config.interaction_radius,
            config.mouse_sensitivity,
        );
        player.refresh_nearby(&world);

        Self {
            feedback: FeedbackQueue::new(config.feedback_lifetime, config.feedback_capacity),
            router: ModeRouter::new(Panels::new(screen), config.building_menu_radius),
            clock: FrameClock::new(config.frame_interval(), config.max_frame_delta),
            movement: MovementInput::default(),
            world,
            player,
            screen,
            config,
        }
    }

    pub fn session(&self) -> &SessionState {
        self.router.session()
    }

    pub fn router(&self) -> &ModeRouter {
        &self.router
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The map as it's currently drawn, centred on the player
    pub fn view(&self) -> MapView {
        MapView::new(self.screen, self.player.position, self.config.map_scale)
    }

    pub fn resize(&mut self, screen: Rect) {
        self.screen = screen;
        self.router.panels_mut().resize(screen);
    }

    /// Route one input event
    pub fn handle_event(&mut self, event: InputEvent) -> RoutingDecision {
        let view = self.view();
        let mut frame = Frame {
            world: &mut self.world,
            player: &mut self.player,
            feedback: &mut self.feedback,
            view: &view,
        };
        let decision = self.router.route(event, &mut frame);

        if let RoutingDecision::ModeChanged { mode, .. } = decision
            && mode != GameMode::Playing
        {
            self.movement.release_all();
        }

        decision
    }

    /// Advance the simulation. Everything uses the same `dt`
    pub fn update(&mut self, dt: Duration) {
        if !self.session().playing() {
            return;
        }

        self.player
            .move_player(dt, &self.movement, self.world.size);
        self.world.update(dt);
        self.player.refresh_nearby(&self.world);
        self.feedback.tick(dt);
    }

    /// Start a new frame at `now` and update with its delta time
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = self.clock.tick(now);
        self.update(dt);
        dt
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use egui::{Rect, pos2};

    use super::{FrameClock, Game};
    use crate::{
        GameMode,
        config::GameConfig,
        data::{building::BuildingType, resource::ResourceType},
        feedback::FeedbackMessage,
        input::{Action, InputEvent, MovementInput},
        math::WorldPos,
        state::world::World,
    };

    fn game() -> Game {
        Game::with_world(
            GameConfig::default(),
            World::new(1000.),
            Rect::from_min_max(pos2(0., 0.), pos2(1600., 900.)),
        )
    }

    #[test]
    fn test_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new(Duration::from_millis(16), Duration::from_millis(250));
        let start = Instant::now();
        assert_eq!(clock.tick(start), Duration::ZERO);
        assert_eq!(clock.tick(start + Duration::from_millis(20)), Duration::from_millis(20));
    }

    #[test]
    fn test_clock_clamps_long_frames() {
        let mut clock = FrameClock::new(Duration::from_millis(16), Duration::from_millis(250));
        let start = Instant::now();
        clock.tick(start);
        assert_eq!(clock.tick(start + Duration::from_secs(5)), Duration::from_millis(250));
    }

    #[test]
    fn test_clock_frame_due() {
        let mut clock = FrameClock::new(Duration::from_millis(16), Duration::from_millis(250));
        let start = Instant::now();
        assert!(clock.frame_due(start));
        clock.tick(start);
        assert!(!clock.frame_due(start + Duration::from_millis(10)));
        assert!(clock.frame_due(start + Duration::from_millis(16)));
        assert_eq!(clock.next_frame(), Some(start + Duration::from_millis(16)));
    }

    #[test]
    fn test_update_uses_one_delta() {
        let mut world = World::new(1000.);
        let platform =
            world.spawn_building(BuildingType::OilPlatform, WorldPos::on_plane(100., 100.));
        let mut game = Game::with_world(
            GameConfig::default(),
            world,
            Rect::from_min_max(pos2(0., 0.), pos2(1600., 900.)),
        );
        game.feedback.push(FeedbackMessage::info("hello"));
        game.movement = MovementInput {
            forward: true,
            ..Default::default()
        };

        game.update(Duration::from_secs(2));

        // Scout speed is 40
        assert!((game.player.position.0.x - 580.).abs() < 1e-3);
        assert_eq!(
            game.world.storage(platform).unwrap().items[ResourceType::Oil],
            2
        );
        assert_eq!(game.feedback.latest().unwrap().remaining, Duration::from_secs(1));
    }

    #[test]
    fn test_paused_freezes_simulation() {
        let mut game = game();
        game.feedback.push(FeedbackMessage::info("hello"));
        game.handle_event(InputEvent::Action(Action::TogglePause));
        assert_eq!(game.session().mode, GameMode::Paused);

        let pos = game.player.position;
        game.movement.forward = true;
        game.update(Duration::from_secs(2));

        assert_eq!(game.player.position, pos);
        assert_eq!(game.feedback.len(), 1);
    }

    #[test]
    fn test_pausing_releases_movement() {
        let mut game = game();
        game.movement.forward = true;
        game.handle_event(InputEvent::Action(Action::TogglePause));
        assert_eq!(game.movement, MovementInput::default());
    }

    #[test]
    fn test_update_refreshes_nearby() {
        let mut game = game();
        assert!(game.player.nearby_objects.is_empty());

        game.world
            .spawn_building(BuildingType::Market, WorldPos::on_plane(505., 500.));
        game.update(Duration::from_millis(16));
        assert_eq!(game.player.nearby_objects.len(), 1);
    }
}
