use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use egui::Window;

use super::Drawable;

/// Collects diagnostic lines over a frame and shows them in a collapsed window
pub struct DebugWindow {
    lines: Mutex<Vec<String>>,
}

impl DebugWindow {
    fn lines(&self) -> MutexGuard<'_, Vec<String>> {
        // A panic mid-frame only loses debug text
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_line(&self, line: &str) {
        self.lines().push(line.to_string());
    }

    pub fn extend(&self, lines: impl IntoIterator<Item = String>) {
        self.lines().extend(lines);
    }

    pub fn clear(&self) {
        self.lines().clear();
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines().clone()
    }
}

pub static DEBUG_WINDOW: LazyLock<DebugWindow> = LazyLock::new(|| DebugWindow {
    lines: Default::default(),
});

impl Drawable for DebugWindow {
    fn show_window(&self, ctx: &egui::Context) {
        let lines = self.snapshot();
        Window::new("Debug").default_open(false).show(ctx, |ui| {
            lines.iter().for_each(|t| {
                ui.label(t);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::DebugWindow;

    #[test]
    fn test_collects_and_clears() {
        let window = DebugWindow {
            lines: Default::default(),
        };
        window.add_line("fps: 60");
        window.extend(["dt: 16ms".to_string()]);
        assert_eq!(window.snapshot(), ["fps: 60", "dt: 16ms"]);

        window.clear();
        assert!(window.snapshot().is_empty());
    }
}
