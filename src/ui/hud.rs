use egui::{
    Align2, Color32, Context, CornerRadius, FontId, Id, LayerId, Order, Pos2, Rect, Stroke, Vec2,
    pos2,
};

use super::Drawable;
use crate::{
    data::resource::ResourceType,
    feedback::{FeedbackQueue, Severity},
    placement::PlacementPhase,
    state::player::Player,
};

const LINE_HEIGHT: f32 = 18.;
const HUD_WIDTH: f32 = 220.;

pub fn severity_colour(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => Color32::from_rgb(220, 220, 220),
        Severity::Success => Color32::from_rgb(90, 220, 90),
        Severity::Warning => Color32::from_rgb(240, 200, 60),
        Severity::Error => Color32::from_rgb(240, 80, 70),
    }
}

fn hud_layer(name: &str) -> LayerId {
    LayerId::new(Order::Middle, Id::new(name))
}

/// Active ship, cargo and credits in the top left
pub struct Hud<'a> {
    pub player: &'a Player,
    pub placement: PlacementPhase,
}

impl Hud<'_> {
    fn lines(&self) -> Vec<String> {
        let ship = self.player.ship();
        let data = ship.ship_type.data();

        let mut lines = vec![
            format!(
                "[{}] {}  {}/{}",
                self.player.active_ship + 1,
                data.name,
                ship.cargo_total(),
                data.cargo_capacity
            ),
            format!("Credits: {}", self.player.credits),
        ];
        lines.extend(
            ResourceType::iter()
                .filter(|r| ship.cargo[*r] > 0)
                .map(|r| format!("  {r}: {}", ship.cargo[r])),
        );
        if let PlacementPhase::Selecting(building_type) = self.placement {
            lines.push(format!("Placing {building_type}"));
        }
        lines
    }
}

impl Drawable for Hud<'_> {
    fn show_window(&self, ctx: &Context) {
        let painter = ctx.layer_painter(hud_layer("hud"));
        let lines = self.lines();

        let frame = Rect::from_min_size(
            pos2(10., 10.),
            Vec2::new(HUD_WIDTH, LINE_HEIGHT * lines.len() as f32 + 12.),
        );
        painter.rect_filled(frame, CornerRadius::same(4), Color32::from_black_alpha(160));

        lines.iter().enumerate().for_each(|(i, line)| {
            painter.text(
                frame.min + Vec2::new(8., 6. + i as f32 * LINE_HEIGHT),
                Align2::LEFT_TOP,
                line,
                FontId::monospace(14.),
                Color32::WHITE,
            );
        });
    }
}

/// Recent messages stacked under the top of the screen, newest last
pub struct FeedbackList<'a> {
    pub feedback: &'a FeedbackQueue,
}

impl Drawable for FeedbackList<'_> {
    fn show_window(&self, ctx: &Context) {
        let painter = ctx.layer_painter(hud_layer("feedback"));
        let top = ctx.screen_rect().center_top() + Vec2::new(0., 16.);

        self.feedback.iter().enumerate().for_each(|(i, message)| {
            let pos = top + Vec2::new(0., i as f32 * (LINE_HEIGHT + 6.));
            let galley = painter.layout_no_wrap(
                message.text.clone(),
                FontId::proportional(16.),
                severity_colour(message.severity),
            );
            let rect = Align2::CENTER_TOP
                .anchor_size(pos, galley.size())
                .expand2(Vec2::new(8., 2.));

            painter.rect_filled(rect, CornerRadius::same(4), Color32::from_black_alpha(160));
            painter.galley(rect.min + Vec2::new(8., 2.), galley, Color32::WHITE);
        });
    }
}

/// Crosshair standing in for the hidden system cursor while panels are in use
pub struct Pointer {
    pub pos: Option<Pos2>,
}

impl Drawable for Pointer {
    fn show_window(&self, ctx: &Context) {
        let Some(pos) = self.pos else {
            return;
        };
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("pointer")));
        let stroke = Stroke::new(2., Color32::WHITE);
        painter.line_segment([pos - Vec2::X * 6., pos + Vec2::X * 6.], stroke);
        painter.line_segment([pos - Vec2::Y * 6., pos + Vec2::Y * 6.], stroke);
    }
}
