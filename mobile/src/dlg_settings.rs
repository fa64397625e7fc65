pub use crate::dlg_settings_stt::*;
use crate::{LogLevel, Settings};
use eframe::egui;
use egui_i18n::tr;
use egui_material3::dialog;
use std::cell::Cell;

impl DlgSettings {
    pub fn open_with(&mut self, settings: &Settings) {
        self.draft = settings.clone();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Renders the dialog. Returns the edited settings when Save is pressed.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Settings> {
        if !self.open {
            return None;
        }

        let save_clicked = Cell::new(false);
        let draft = &mut self.draft;

        dialog("settings_dialog", &tr!("settings"), &mut self.open)
            .content(|ui| {
                ui.set_width(300.0);
                ui.label(tr!("log-level"));
                ui.horizontal_wrapped(|ui| {
                    let current = LogLevel::parse(&draft.log_level).unwrap_or_default();
                    for level in LogLevel::ALL {
                        if ui.selectable_label(current == level, level.name()).clicked() {
                            draft.log_level = level.name().to_string();
                        }
                    }
                });
                ui.add_space(8.0);
                ui.checkbox(&mut draft.show_logs, tr!("show-logs"));
                ui.checkbox(&mut draft.show_package_id, tr!("show-package-id"));
            })
            .action(tr!("close"), || {})
            .primary_action(tr!("save"), || {
                save_clicked.set(true);
            })
            .show(ctx);

        if save_clicked.get() {
            self.open = false;
            return Some(self.draft.clone());
        }
        None
    }
}
