use egui::{
    Align2, Color32, Context, CornerRadius, FontId, LayerId, Painter, Pos2, Rect, Stroke,
    StrokeKind, Vec2, pos2,
};

use super::Drawable;
use crate::{
    data::{building::BuildingType, resource::ResourceType},
    math::WorldPos,
    placement::PlacementPhase,
    state::{player::Player, world::World},
};

/// Top-down view of the water around the player, north up
#[derive(Debug, Clone, Copy)]
pub struct MapView {
    pub screen: Rect,
    /// World position shown in the middle of the screen
    pub centre: WorldPos,
    /// Pixels per distance unit
    pub scale: f32,
}

impl MapView {
    pub fn new(screen: Rect, centre: WorldPos, scale: f32) -> Self {
        assert!(scale > 0.);
        Self {
            screen,
            centre,
            scale,
        }
    }

    pub fn world_to_screen(&self, pos: &WorldPos) -> Pos2 {
        let offset = pos.planar() - self.centre.planar();
        self.screen.center() + Vec2::new(offset.x, offset.y) * self.scale
    }

    /// Project a screen position onto the water plane
    pub fn screen_to_world(&self, pos: Pos2) -> WorldPos {
        let offset = (pos - self.screen.center()) / self.scale;
        WorldPos::on_plane(self.centre.0.x + offset.x, self.centre.0.z + offset.y)
    }

    pub fn is_visible(&self, pos: &WorldPos, margin: f32) -> bool {
        self.screen
            .expand(margin)
            .contains(self.world_to_screen(pos))
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(
            Rect::from_min_max(pos2(0., 0.), pos2(1600., 900.)),
            WorldPos::on_plane(0., 0.),
            1.,
        )
    }
}

const DEPOSIT_RADIUS: f32 = 3.;
const PLAYER_ARROW_LENGTH: f32 = 20.;

fn deposit_colour(resource: ResourceType) -> Color32 {
    match resource {
        ResourceType::Oil => Color32::from_rgb(20, 20, 20),
        ResourceType::Cobalt => Color32::from_rgb(40, 80, 200),
        // Processed goods never lie on the sea floor
        ResourceType::Fuel | ResourceType::RefinedCobalt => Color32::GRAY,
    }
}

/// The world seen from above, drawn behind every other UI layer
pub struct WorldMap<'a> {
    pub view: &'a MapView,
    pub world: &'a World,
    pub player: &'a Player,
    pub placement: PlacementPhase,
}

impl WorldMap<'_> {
    fn draw_reticle(&self, painter: &Painter, building_type: BuildingType, pointer: Pos2) {
        let pos = self.view.screen_to_world(pointer);
        let colour = if self.world.can_place(building_type, &pos) {
            Color32::GREEN
        } else {
            Color32::RED
        };

        let half = building_type.data().footprint * self.view.scale;
        painter.rect_stroke(
            Rect::from_center_size(pointer, Vec2::splat(half * 2.)),
            CornerRadius::ZERO,
            Stroke::new(2., colour),
            StrokeKind::Outside,
        );
    }
}

impl Drawable for WorldMap<'_> {
    fn show_window(&self, ctx: &Context) {
        let painter = ctx.layer_painter(LayerId::background());
        let view = self.view;

        // Edge of the world
        let bounds = Rect::from_two_pos(
            view.world_to_screen(&WorldPos::on_plane(0., 0.)),
            view.world_to_screen(&WorldPos::on_plane(self.world.size, self.world.size)),
        );
        painter.rect_stroke(
            bounds,
            CornerRadius::ZERO,
            Stroke::new(1., Color32::from_white_alpha(60)),
            StrokeKind::Outside,
        );

        self.world
            .deposits()
            .filter(|(_, _, pos)| view.is_visible(pos, DEPOSIT_RADIUS))
            .for_each(|(_, resource, pos)| {
                painter.circle_filled(
                    view.world_to_screen(&pos),
                    DEPOSIT_RADIUS * view.scale,
                    deposit_colour(resource),
                );
            });

        self.world
            .buildings()
            .for_each(|(_, building_type, pos)| {
                let data = building_type.data();
                let half = data.footprint * view.scale;
                if !view.is_visible(&pos, half) {
                    return;
                }

                let centre = view.world_to_screen(&pos);
                let [r, g, b] = data.colour;
                painter.rect_filled(
                    Rect::from_center_size(centre, Vec2::splat(half * 2.)),
                    CornerRadius::same(2),
                    Color32::from_rgb(r, g, b),
                );
                painter.text(
                    centre + Vec2::new(0., half + 2.),
                    Align2::CENTER_TOP,
                    data.name,
                    FontId::proportional(12.),
                    Color32::WHITE,
                );
            });

        // Player and their reach
        let centre = view.world_to_screen(&self.player.position);
        painter.circle_stroke(
            centre,
            self.player.interaction_radius * view.scale,
            Stroke::new(1., Color32::from_white_alpha(40)),
        );
        let forward = self.player.forward();
        painter.arrow(
            centre,
            Vec2::new(forward.x, forward.z) * PLAYER_ARROW_LENGTH,
            Stroke::new(2., Color32::WHITE),
        );
        painter.circle_filled(centre, 4., Color32::WHITE);

        if let PlacementPhase::Selecting(building_type) = self.placement
            && let Some(pointer) = ctx.input(|i| i.pointer.latest_pos())
        {
            self.draw_reticle(&painter, building_type, pointer);
        }
    }
}
