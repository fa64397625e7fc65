pub use crate::dlg_app_actions_stt::*;
use crate::models::AppRecord;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::{dialog, MaterialButton};
use std::cell::Cell;

impl AppAction {
    pub fn label(self) -> String {
        match self {
            AppAction::AppInfo => tr!("app-info"),
            AppAction::ShareApk => tr!("share-apk"),
        }
    }
}

impl DlgAppActions {
    pub fn open_for(&mut self, index: usize, record: &AppRecord) {
        self.target = Some(ActionTarget {
            index,
            name: record.name().to_string(),
            package_id: record.package_id().to_string(),
        });
        self.open = true;
    }

    /// The same two actions are offered for every app.
    pub fn actions(&self) -> &'static [AppAction] {
        &APP_ACTIONS
    }

    pub fn reset(&mut self) {
        self.open = false;
        self.target = None;
    }

    /// Renders the menu. Returns the chosen action and its target; the menu
    /// is already closed when this returns `Some`.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(AppAction, ActionTarget)> {
        if !self.open {
            return None;
        }
        let Some(target) = self.target.clone() else {
            self.open = false;
            return None;
        };

        let chosen = Cell::new(None);
        let actions = self.actions();

        dialog("app_actions_dialog", &target.name, &mut self.open)
            .content(|ui| {
                ui.set_width(280.0);
                ui.label(egui::RichText::new(&target.package_id).small().weak());
                ui.add_space(8.0);
                for &action in actions {
                    let button = MaterialButton::filled(action.label());
                    if ui.add_sized([ui.available_width(), 40.0], button).clicked() {
                        chosen.set(Some(action));
                    }
                    ui.add_space(4.0);
                }
            })
            .action(tr!("close"), || {})
            .show(ctx);

        match chosen.get() {
            Some(action) => {
                self.reset();
                Some((action, target))
            }
            None => {
                if !self.open {
                    self.target = None;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppIcon;

    #[test]
    fn test_every_record_gets_exactly_two_actions() {
        let mut dlg = DlgAppActions::default();
        for (i, (name, pkg)) in [("Mail", "org.example.mail"), ("", "a.b")].iter().enumerate() {
            dlg.open_for(i, &AppRecord::new(*name, *pkg, AppIcon::default()));
            assert!(dlg.open);
            assert_eq!(
                dlg.actions(),
                &[AppAction::AppInfo, AppAction::ShareApk]
            );
        }
    }

    #[test]
    fn test_open_for_remembers_target() {
        let mut dlg = DlgAppActions::default();
        dlg.open_for(4, &AppRecord::new("Mail", "org.example.mail", AppIcon::default()));

        let target = dlg.target.clone().unwrap();
        assert_eq!(target.index, 4);
        assert_eq!(target.name, "Mail");
        assert_eq!(target.package_id, "org.example.mail");

        dlg.reset();
        assert!(!dlg.open);
        assert!(dlg.target.is_none());
    }
}
