use egui::{
    Align2, Color32, Context, CornerRadius, FontId, Id, LayerId, Order, Painter, Stroke,
    StrokeKind, Vec2,
};
use hecs::Entity;

use super::{
    Drawable,
    panels::{PADDING, PanelLayout, ROW_HEIGHT},
};
use crate::{
    data::{building::BuildingType, resource::ResourceType},
    state::{player::Player, world::World},
};

const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(20, 28, 40, 230);
const ROW_FILL: Color32 = Color32::from_rgb(45, 60, 80);
const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(70, 110, 150);

fn panel_layer() -> LayerId {
    LayerId::new(Order::Foreground, Id::new("panels"))
}

/// Frame, title, body text, clickable rows and a close button
fn paint_panel(
    painter: &Painter,
    layout: &PanelLayout,
    title: &str,
    body: &[String],
    rows: &[String],
    highlighted: Option<usize>,
) {
    painter.rect_filled(layout.frame, CornerRadius::same(6), PANEL_FILL);
    painter.rect_stroke(
        layout.frame,
        CornerRadius::same(6),
        Stroke::new(1., Color32::from_white_alpha(80)),
        StrokeKind::Inside,
    );
    painter.text(
        layout.title.center(),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(18.),
        Color32::WHITE,
    );

    body.iter().enumerate().for_each(|(i, line)| {
        painter.text(
            layout.title.left_bottom() + Vec2::new(PADDING, i as f32 * ROW_HEIGHT),
            Align2::LEFT_TOP,
            line,
            FontId::proportional(14.),
            Color32::LIGHT_GRAY,
        );
    });

    layout.rows.iter().zip(rows).enumerate().for_each(|(i, (rect, label))| {
        let fill = if highlighted == Some(i) {
            HIGHLIGHT_FILL
        } else {
            ROW_FILL
        };
        painter.rect_filled(*rect, CornerRadius::same(3), fill);
        painter.text(
            rect.left_center() + Vec2::new(PADDING, 0.),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(15.),
            Color32::WHITE,
        );
    });

    painter.rect_filled(layout.close, CornerRadius::same(3), ROW_FILL);
    painter.text(
        layout.close.center(),
        Align2::CENTER_CENTER,
        "Close",
        FontId::proportional(15.),
        Color32::WHITE,
    );
}

/// Pick a building type to place
pub struct BuildMenu {
    pub layout: PanelLayout,
    pub pending: Option<BuildingType>,
}

impl Drawable for BuildMenu {
    fn show_window(&self, ctx: &Context) {
        let rows = BuildingType::iter().map(|b| b.to_string()).collect::<Vec<_>>();
        let highlighted = self
            .pending
            .and_then(|p| BuildingType::iter().position(|b| b == p));

        paint_panel(
            &ctx.layer_painter(panel_layer()),
            &self.layout,
            "Build",
            &[],
            &rows,
            highlighted,
        );
    }
}

/// Fleet overview and the active ship's hold
pub struct ShipInventory<'a> {
    pub layout: PanelLayout,
    pub player: &'a Player,
}

impl ShipInventory<'_> {
    fn body(&self) -> Vec<String> {
        let ship = self.player.ship();
        ResourceType::iter()
            .map(|r| format!("{r}: {}", ship.cargo[r]))
            .chain([format!("Credits: {}", self.player.credits)])
            .collect()
    }

    fn rows(&self) -> Vec<String> {
        self.player
            .ships
            .iter()
            .enumerate()
            .map(|(i, ship)| {
                let data = ship.ship_type.data();
                format!(
                    "{}  {}  {}/{}",
                    i + 1,
                    data.name,
                    ship.cargo_total(),
                    data.cargo_capacity
                )
            })
            .collect()
    }
}

impl Drawable for ShipInventory<'_> {
    fn show_window(&self, ctx: &Context) {
        paint_panel(
            &ctx.layer_painter(panel_layer()),
            &self.layout,
            "Ships",
            &self.body(),
            &self.rows(),
            Some(self.player.active_ship),
        );
    }
}

/// Details of the building picked with the nearby building key
pub struct BuildingDetails<'a> {
    pub layout: PanelLayout,
    pub world: &'a World,
    pub building: Entity,
}

impl BuildingDetails<'_> {
    fn body(&self) -> Option<(String, Vec<String>)> {
        let (building_type, pos) = self.world.building(self.building)?;
        let mut body = vec![
            building_type.data().description.to_string(),
            format!("At ({:.0}, {:.0})", pos.0.x, pos.0.z),
        ];

        if let Some(storage) = self.world.storage(self.building) {
            let stock = ResourceType::iter()
                .filter(|r| storage.items[*r] > 0)
                .map(|r| format!("{r} {}", storage.items[r]))
                .collect::<Vec<_>>();
            body.push(if stock.is_empty() {
                "Empty".to_string()
            } else {
                format!("Stock: {}", stock.join(", "))
            });
        }
        Some((building_type.to_string(), body))
    }
}

impl Drawable for BuildingDetails<'_> {
    fn show_window(&self, ctx: &Context) {
        let Some((title, body)) = self.body() else {
            log::warn!("Building {:?} is gone", self.building);
            return;
        };
        paint_panel(
            &ctx.layer_painter(panel_layer()),
            &self.layout,
            &title,
            &body,
            &[],
            None,
        );
    }
}

/// Full screen dim with a centred heading and hint
fn paint_overlay(ctx: &Context, alpha: u8, heading: &str, hint: &str) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("overlay")));
    let screen = ctx.screen_rect();

    painter.rect_filled(screen, CornerRadius::ZERO, Color32::from_black_alpha(alpha));
    painter.text(
        screen.center(),
        Align2::CENTER_BOTTOM,
        heading,
        FontId::proportional(48.),
        Color32::WHITE,
    );
    painter.text(
        screen.center() + Vec2::new(0., 12.),
        Align2::CENTER_TOP,
        hint,
        FontId::proportional(18.),
        Color32::LIGHT_GRAY,
    );
}

pub struct PauseOverlay;

impl Drawable for PauseOverlay {
    fn show_window(&self, ctx: &Context) {
        paint_overlay(ctx, 140, "Paused", "Press Escape to resume");
    }
}

pub struct MenuScreen;

impl Drawable for MenuScreen {
    fn show_window(&self, ctx: &Context) {
        paint_overlay(ctx, 230, "Oil Frontier", "Press Escape to start");
    }
}

#[cfg(test)]
mod tests {
    use egui::{Rect, pos2};

    use super::{BuildingDetails, ShipInventory};
    use crate::{
        data::{building::BuildingType, resource::ResourceType},
        math::WorldPos,
        state::{player::Player, world::World},
        ui::panels::Panels,
    };

    fn panels() -> Panels {
        Panels::new(Rect::from_min_max(pos2(0., 0.), pos2(1600., 900.)))
    }

    #[test]
    fn test_ship_rows_match_layout() {
        let mut player = Player::new(WorldPos::new(0., 1.8, 0.), 15., 1.);
        player.ships[1].cargo[ResourceType::Oil] = 30;
        let inventory = ShipInventory {
            layout: panels().ship_inventory(),
            player: &player,
        };

        let rows = inventory.rows();
        assert_eq!(rows.len(), inventory.layout.rows.len());
        assert_eq!(rows[1], "2  Freighter  30/100");
        assert_eq!(inventory.body().last().unwrap(), "Credits: 0");
    }

    #[test]
    fn test_building_details_show_stock() {
        let mut world = World::new(1000.);
        let platform =
            world.spawn_building(BuildingType::OilPlatform, WorldPos::on_plane(100., 200.));
        world.storage_mut(platform).unwrap().items[ResourceType::Oil] = 7;
        let market = world.spawn_building(BuildingType::Market, WorldPos::on_plane(300., 200.));

        let details = |building| BuildingDetails {
            layout: panels().building_interaction(),
            world: &world,
            building,
        };

        let (title, body) = details(platform).body().unwrap();
        assert_eq!(title, "Oil Platform");
        assert_eq!(body[1], "At (100, 200)");
        assert_eq!(body[2], "Stock: Oil 7");

        // No storage line for buildings that don't hold anything
        let (_, body) = details(market).body().unwrap();
        assert_eq!(body.len(), 2);
    }
}
