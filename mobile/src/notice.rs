// Transient bottom-of-screen notices, the in-app stand-in for Android toasts.

use eframe::egui;
use egui_i18n::tr;

/// Matches `Toast.LENGTH_SHORT`.
pub const NOTICE_DURATION_SECS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    AppNotFound,
    ShareFailed,
}

impl NoticeKind {
    pub fn text(self) -> String {
        match self {
            NoticeKind::AppNotFound => tr!("notice-app-not-found"),
            NoticeKind::ShareFailed => tr!("notice-share-failed"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Notices {
    active: Option<(NoticeKind, f64)>,
}

impl Notices {
    /// Replaces any notice still on screen.
    pub fn show(&mut self, kind: NoticeKind, now: f64) {
        tracing::debug!("Showing notice {:?}", kind);
        self.active = Some((kind, now));
    }

    pub fn current(&self, now: f64) -> Option<NoticeKind> {
        self.active
            .filter(|(_, shown_at)| now - shown_at < NOTICE_DURATION_SECS)
            .map(|(kind, _)| kind)
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let Some(kind) = self.current(now) else {
            self.active = None;
            return;
        };

        egui::Area::new(egui::Id::new("launcher_notice"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .corner_radius(16.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(kind.text());
                    });
            });

        // Keep repainting so the notice disappears on time without input.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_short_duration() {
        let mut notices = Notices::default();
        assert_eq!(notices.current(0.0), None);

        notices.show(NoticeKind::AppNotFound, 10.0);
        assert_eq!(notices.current(10.0), Some(NoticeKind::AppNotFound));
        assert_eq!(notices.current(11.9), Some(NoticeKind::AppNotFound));
        assert_eq!(notices.current(12.0), None);
    }

    #[test]
    fn test_new_notice_replaces_old() {
        let mut notices = Notices::default();
        notices.show(NoticeKind::AppNotFound, 1.0);
        notices.show(NoticeKind::ShareFailed, 1.5);
        assert_eq!(notices.current(3.2), Some(NoticeKind::ShareFailed));
    }
}
