//! Interactive placement overlay implemented with egui/eframe
//!
//! The overlay draws both monitors as proportionally scaled boxes and maps
//! key input onto [`PlacementSession`] transitions. All geometry decisions
//! live in the session; this module is presentation and input routing.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use eframe::{egui, NativeOptions};
use tracing::info;

use crate::clipboard;
use crate::geometry::RelativePosition;
use crate::monitor::MonitorAttributes;
use crate::session::{Decision, PlacementSession};

/// Fraction of the screen width given to the larger monitor box
const BOX_FRACTION: f32 = 0.12;
const BOX_GAP: f32 = 20.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgba_premultiplied(13, 13, 26, 224);
const BOX_FILL: egui::Color32 = egui::Color32::from_rgb(38, 38, 51);
const CURRENT_BORDER: egui::Color32 = egui::Color32::from_rgb(102, 204, 102);
const NEW_BORDER: egui::Color32 = egui::Color32::from_rgb(51, 204, 255);
const WARNING: egui::Color32 = egui::Color32::from_rgb(230, 140, 60);
const TEXT_BRIGHT: egui::Color32 = egui::Color32::from_rgb(230, 230, 230);
const TEXT_DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 160);

/// Run the overlay session. `Some(decision)` on confirm, `None` on cancel.
pub fn run_picker(
    current: MonitorAttributes,
    new_mon: MonitorAttributes,
) -> Result<Option<Decision>> {
    let result: Arc<Mutex<Option<Decision>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&result);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("Monitor Picker"),
        ..Default::default()
    };

    eframe::run_native(
        "monitor-picker",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PickerApp::new(
                PlacementSession::new(current, new_mon),
                slot,
            )))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch picker window: {err}"))?;

    let decision = result
        .lock()
        .map_err(|_| anyhow!("Picker result lock poisoned"))?
        .take();
    Ok(decision)
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyInput {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    shift: bool,
    ctrl: bool,
    scale_up: bool,
    scale_down: bool,
    copy: bool,
    confirm: bool,
    cancel: bool,
}

struct PickerApp {
    session: PlacementSession,
    result: Arc<Mutex<Option<Decision>>>,
    copied: bool,
}

impl PickerApp {
    fn new(session: PlacementSession, result: Arc<Mutex<Option<Decision>>>) -> Self {
        info!(
            current = %session.current().name,
            new = %session.new_monitor().name,
            "Picker session started"
        );
        Self {
            session,
            result,
            copied: false,
        }
    }

    fn read_keys(ctx: &egui::Context) -> KeyInput {
        ctx.input(|i| KeyInput {
            up: i.key_pressed(egui::Key::ArrowUp),
            down: i.key_pressed(egui::Key::ArrowDown),
            left: i.key_pressed(egui::Key::ArrowLeft),
            right: i.key_pressed(egui::Key::ArrowRight),
            shift: i.modifiers.shift,
            ctrl: i.modifiers.ctrl,
            scale_up: i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
            scale_down: i.key_pressed(egui::Key::Minus),
            copy: i.key_pressed(egui::Key::C),
            confirm: i.key_pressed(egui::Key::Enter),
            cancel: i.key_pressed(egui::Key::Escape),
        })
    }

    fn handle_keys(&mut self, keys: KeyInput, ctx: &egui::Context) {
        if keys.cancel {
            info!("Placement cancelled");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if keys.confirm {
            let decision = self.session.decide();
            info!(directive = %decision.new_line, "Placement confirmed");
            if let Ok(mut slot) = self.result.lock() {
                *slot = Some(decision);
            }
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let adjusting = keys.shift || keys.ctrl;
        let arrows = [
            (keys.right, RelativePosition::Right),
            (keys.left, RelativePosition::Left),
            (keys.down, RelativePosition::Below),
            (keys.up, RelativePosition::Above),
        ];
        for (pressed, direction) in arrows {
            if !pressed {
                continue;
            }
            if adjusting {
                if let Some(sign) = offset_sign(self.session.position(), direction) {
                    self.session.nudge_offset(sign, keys.ctrl);
                }
            } else {
                self.session.set_position(direction);
            }
        }

        if keys.scale_up {
            self.session.adjust_scale(1);
        }
        if keys.scale_down {
            self.session.adjust_scale(-1);
        }
        if keys.copy {
            clipboard::copy_text(&self.session.decide().command);
            self.copied = true;
        }
    }

    fn draw(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let cur = self.session.current();
        let new_mon = self.session.new_monitor();

        // Boxes proportional to native resolution; the larger monitor gets
        // BOX_FRACTION of the screen width.
        let max_native = [cur.width, cur.height, new_mon.width, new_mon.height]
            .into_iter()
            .max()
            .unwrap_or(1) as f32;
        let px_per_native = rect.width() * BOX_FRACTION / max_native;
        let cur_size = egui::vec2(
            cur.width as f32 * px_per_native,
            cur.height as f32 * px_per_native,
        );
        let new_size = egui::vec2(
            new_mon.width as f32 * px_per_native,
            new_mon.height as f32 * px_per_native,
        );

        // One logical pixel of offset spans `scale` native pixels of the
        // anchor; converting with it makes snap offsets line box edges up.
        let shift =
            self.session.offset() as f32 * cur.scale.as_float() as f32 * px_per_native;

        let center = rect.center();
        let position = self.session.position();
        let (cur_center, new_center) = match position {
            RelativePosition::Right => {
                let span = cur_size.x + BOX_GAP + new_size.x;
                (
                    egui::pos2(center.x - span / 2.0 + cur_size.x / 2.0, center.y),
                    egui::pos2(center.x + span / 2.0 - new_size.x / 2.0, center.y + shift),
                )
            }
            RelativePosition::Left => {
                let span = new_size.x + BOX_GAP + cur_size.x;
                (
                    egui::pos2(center.x + span / 2.0 - cur_size.x / 2.0, center.y),
                    egui::pos2(center.x - span / 2.0 + new_size.x / 2.0, center.y + shift),
                )
            }
            RelativePosition::Below => {
                let span = cur_size.y + BOX_GAP + new_size.y;
                (
                    egui::pos2(center.x, center.y - span / 2.0 + cur_size.y / 2.0),
                    egui::pos2(center.x + shift, center.y + span / 2.0 - new_size.y / 2.0),
                )
            }
            RelativePosition::Above => {
                let span = new_size.y + BOX_GAP + cur_size.y;
                (
                    egui::pos2(center.x, center.y + span / 2.0 - cur_size.y / 2.0),
                    egui::pos2(center.x + shift, center.y - span / 2.0 + new_size.y / 2.0),
                )
            }
        };

        let cur_rect = egui::Rect::from_center_size(cur_center, cur_size);
        let new_rect = egui::Rect::from_center_size(new_center, new_size);
        draw_monitor_box(painter, cur_rect, cur, CURRENT_BORDER, "Current");
        draw_monitor_box(painter, new_rect, new_mon, NEW_BORDER, "New");

        // Direction arrow in the gap between the boxes
        let midpoint = cur_rect.center().lerp(new_rect.center(), 0.5);
        painter.text(
            midpoint,
            egui::Align2::CENTER_CENTER,
            position.arrow(),
            egui::FontId::proportional(28.0),
            TEXT_DIM,
        );

        self.draw_status(painter, rect);
    }

    fn draw_status(&self, painter: &egui::Painter, rect: egui::Rect) {
        let mut status = format!("Position: {}", self.session.position().label());
        if self.session.offset() != 0 {
            status.push_str(&format!("    Offset: {} px", self.session.offset()));
        }
        status.push_str(&format!("    Scale: {}", self.session.new_monitor().scale));
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - 70.0),
            egui::Align2::CENTER_CENTER,
            status,
            egui::FontId::proportional(20.0),
            TEXT_BRIGHT,
        );

        if self.session.overlaps_anchor() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 100.0),
                egui::Align2::CENTER_CENTER,
                "Monitors overlap",
                egui::FontId::proportional(18.0),
                WARNING,
            );
        }

        if self.copied {
            painter.text(
                egui::pos2(rect.center().x, rect.top() + 40.0),
                egui::Align2::CENTER_CENTER,
                "Copied apply command to clipboard",
                egui::FontId::proportional(16.0),
                TEXT_DIM,
            );
        }

        let hint = "Arrows position  \u{b7}  Shift+arrows offset  \u{b7}  Ctrl+arrows fine  \u{b7}  \
                    +/- scale  \u{b7}  C copy  \u{b7}  Enter confirm  \u{b7}  Esc cancel";
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - 40.0),
            egui::Align2::CENTER_CENTER,
            hint,
            egui::FontId::proportional(16.0),
            TEXT_DIM,
        );
    }
}

fn draw_monitor_box(
    painter: &egui::Painter,
    rect: egui::Rect,
    mon: &MonitorAttributes,
    border: egui::Color32,
    tag: &str,
) {
    painter.rect_filled(rect, egui::CornerRadius::same(4), BOX_FILL);
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(4),
        egui::Stroke::new(2.5, border),
        egui::StrokeKind::Inside,
    );

    painter.text(
        egui::pos2(rect.center().x, rect.top() - 10.0),
        egui::Align2::CENTER_CENTER,
        tag,
        egui::FontId::proportional(13.0),
        border,
    );

    let font = |size: f32| egui::FontId::proportional(size.min(rect.width() * 0.09));
    painter.text(
        egui::pos2(rect.center().x, rect.top() + rect.height() * 0.35),
        egui::Align2::CENTER_CENTER,
        format!("{}x{}@{}Hz", mon.width, mon.height, mon.refresh_hz),
        font(14.0),
        TEXT_BRIGHT,
    );
    painter.text(
        egui::pos2(rect.center().x, rect.top() + rect.height() * 0.55),
        egui::Align2::CENTER_CENTER,
        &mon.name,
        font(13.0),
        TEXT_BRIGHT,
    );
    let (lw, lh) = mon.logical_size();
    painter.text(
        egui::pos2(rect.center().x, rect.top() + rect.height() * 0.78),
        egui::Align2::CENTER_CENTER,
        format!("scale {}  \u{b7}  {}x{} logical", mon.scale, lw, lh),
        font(11.0),
        TEXT_DIM,
    );
}

/// Offset direction for an arrow key, if it is perpendicular to the
/// placement axis. Screen-down and screen-right are positive.
fn offset_sign(position: RelativePosition, arrow: RelativePosition) -> Option<i32> {
    match (position.is_horizontal(), arrow) {
        (true, RelativePosition::Below) => Some(1),
        (true, RelativePosition::Above) => Some(-1),
        (false, RelativePosition::Right) => Some(1),
        (false, RelativePosition::Left) => Some(-1),
        _ => None,
    }
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keys = Self::read_keys(ctx);
        self.handle_keys(keys, ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND))
            .show(ctx, |ui| {
                self.draw(ui);
            });
    }
}
