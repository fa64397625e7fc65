pub use crate::launcher_app_stt::*;

use eframe::egui;
use eframe::egui::Context;
use egui_i18n::tr;
use egui_material3::theme::{load_fonts, load_themes, setup_local_theme, update_window_background};
use egui_material3::MaterialButton;

use crate::apk_share;
use crate::app_enumerator::load_sorted_apps;
use crate::app_list::{AppList, RowEvent};
use crate::dlg_app_actions::{ActionTarget, AppAction, DlgAppActions};
use crate::dlg_settings::DlgSettings;
use crate::launch_dispatcher::{self, LaunchOutcome};
use crate::launcher_platform::LauncherPlatform;
use crate::log_capture;
use crate::notice::{NoticeKind, Notices};
use crate::{Config, LogLevel, Settings};

/// Initialize common app components (log capture level, i18n).
/// Call this early in main() before creating the app.
pub fn init_common() {
    if let Ok(config) = Config::new() {
        if let Ok(settings) = config.load_settings() {
            if let Some(level) = LogLevel::parse(&settings.log_level) {
                log_capture::set_capture_level(level);
            }
        }
    }

    if let Err(e) = crate::init_i18n() {
        log::error!("{:#}", e);
    }
}

/// Initialize egui context with theme and image loaders.
/// Call this in the eframe app creation callback.
pub fn init_egui(ctx: &Context) {
    setup_local_theme(None);
    egui_extras::install_image_loaders(ctx);
    load_fonts(ctx);
    load_themes();
    update_window_background(ctx);
}

#[cfg(target_os = "android")]
fn default_platform() -> Box<dyn LauncherPlatform> {
    Box::new(crate::android_platform::AndroidPlatform)
}

#[cfg(not(target_os = "android"))]
fn default_platform() -> Box<dyn LauncherPlatform> {
    Box::new(crate::launcher_platform::DesktopPlatform)
}

impl Default for LauncherApp {
    fn default() -> Self {
        log::info!("OS: {}", std::env::consts::OS);
        log::info!("Architecture: {}", std::env::consts::ARCH);

        let config = match Config::new() {
            Ok(config) => Some(config),
            Err(e) => {
                log::error!("Config not available: {:#}", e);
                None
            }
        };
        let settings = config
            .as_ref()
            .and_then(|cfg| cfg.load_settings().ok())
            .unwrap_or_default();

        Self::new(default_platform(), config, settings)
    }
}

impl LauncherApp {
    pub fn new(
        platform: Box<dyn LauncherPlatform>,
        config: Option<Config>,
        settings: Settings,
    ) -> Self {
        let mut app_list = AppList::default();
        app_list.show_package_id = settings.show_package_id;

        Self {
            platform,
            config,
            settings,
            app_list,
            action_menu: DlgAppActions::default(),
            settings_dialog: DlgSettings::default(),
            notices: Notices::default(),
            load_error: None,
            first_update_done: false,
            was_focused: true,
        }
    }

    /// Re-reads the launchable apps from the platform.
    pub fn refresh(&mut self) {
        match load_sorted_apps(self.platform.as_ref()) {
            Ok(records) => {
                tracing::info!("Loaded {} launchable apps", records.len());
                self.app_list.set_records(records);
                self.load_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to enumerate apps: {:#}", e);
                self.app_list.set_records(Vec::new());
                self.load_error = Some(format!("{:#}", e));
            }
        }
        self.retarget_action_menu();
    }

    // List indices shift on refresh; follow the package or drop the menu.
    fn retarget_action_menu(&mut self) {
        let Some(target) = self.action_menu.target.as_mut() else {
            return;
        };
        match self.app_list.position_of(&target.package_id) {
            Some(index) => target.index = index,
            None => self.action_menu.reset(),
        }
    }

    pub fn launch(&mut self, index: usize, now: f64) -> LaunchOutcome {
        let Some(record) = self.app_list.get(index) else {
            return LaunchOutcome::NotFound;
        };
        let outcome = launch_dispatcher::launch(self.platform.as_ref(), record);
        if outcome == LaunchOutcome::NotFound {
            self.notices.show(NoticeKind::AppNotFound, now);
        }
        outcome
    }

    pub fn open_action_menu(&mut self, index: usize) {
        if let Some(record) = self.app_list.get(index) {
            self.action_menu.open_for(index, record);
        }
    }

    pub fn handle_row_event(&mut self, event: RowEvent, now: f64) {
        match event {
            RowEvent::Launch(index) => {
                self.launch(index, now);
            }
            RowEvent::OpenMenu(index) => self.open_action_menu(index),
        }
    }

    pub fn run_action(&mut self, action: AppAction, target: &ActionTarget, now: f64) {
        match action {
            AppAction::AppInfo => {
                if let Err(e) = self.platform.open_app_details(&target.package_id) {
                    tracing::error!(
                        "Failed to open app details for {}: {:#}",
                        target.package_id,
                        e
                    );
                }
            }
            AppAction::ShareApk => {
                let result = match self.config.as_ref() {
                    Some(config) => apk_share::share_apk(
                        self.platform.as_ref(),
                        &config.cache_dir,
                        &target.package_id,
                        apk_share::SHARE_CHOOSER_TITLE,
                    ),
                    None => Err(anyhow::anyhow!("Cache directory unavailable")),
                };
                if let Err(e) = result {
                    tracing::error!("Failed to share APK of {}: {:?}", target.package_id, e);
                    self.notices.show(NoticeKind::ShareFailed, now);
                }
            }
        }
    }

    /// Applies edited settings: log level, panel visibility and row layout
    /// take effect immediately, then the settings are persisted.
    pub fn apply_settings(&mut self, settings: Settings) {
        log_capture::update_tracing_level(&settings.log_level.to_lowercase());
        self.app_list.show_package_id = settings.show_package_id;
        self.settings = settings;

        match self.config.as_ref() {
            Some(config) => {
                if let Err(e) = config.save_settings(&self.settings) {
                    tracing::error!("Failed to save settings: {:#}", e);
                }
            }
            None => tracing::error!("Config not available, cannot save settings"),
        }
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        let mut refresh_clicked = false;
        let mut settings_clicked = false;
        let count = self.app_list.len();
        let text_filter = &mut self.app_list.text_filter;

        let mut controls = |ui: &mut egui::Ui,
                            refresh_clicked: &mut bool,
                            settings_clicked: &mut bool| {
            ui.add(
                egui::TextEdit::singleline(&mut *text_filter)
                    .hint_text(tr!("filter-apps"))
                    .desired_width(220.0),
            );
            if ui.add(MaterialButton::outlined(tr!("refresh"))).clicked() {
                *refresh_clicked = true;
            }
            if ui.add(MaterialButton::outlined(tr!("settings"))).clicked() {
                *settings_clicked = true;
            }
        };

        if crate::is_mobile(ui.ctx()) {
            ui.heading(tr!("app-title"));
            ui.label(tr!("app-count", { count: count }));
            ui.horizontal(|ui| controls(ui, &mut refresh_clicked, &mut settings_clicked));
        } else {
            ui.horizontal(|ui| {
                ui.heading(tr!("app-title"));
                ui.label(tr!("app-count", { count: count }));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    controls(ui, &mut refresh_clicked, &mut settings_clicked)
                });
            });
        }

        if refresh_clicked {
            self.refresh();
        }
        if settings_clicked {
            self.settings_dialog.open_with(&self.settings);
        }
    }

    fn logs_ui(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new(tr!("logs")).show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(200.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            ui.monospace(log_capture::captured_logs());
                        });
                });
            });
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let now = ui.ctx().input(|i| i.time);

        self.toolbar_ui(ui);
        ui.separator();

        if let Some(error) = &self.load_error {
            let error_color = ui.visuals().error_fg_color;
            ui.colored_label(error_color, tr!("load-failed"));
            ui.label(egui::RichText::new(error).small().weak());
            return;
        }

        if let Some(event) = self.app_list.ui(ui) {
            self.handle_row_event(event, now);
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enumerate on the first frame, once the Android context is ready.
        if !self.first_update_done {
            self.first_update_done = true;
            self.refresh();
        }

        // Returning from a launched app or the settings screen.
        let focused = ctx.input(|i| i.viewport().focused).unwrap_or(true);
        if focused && !self.was_focused {
            log::debug!("Regained focus, refreshing app list");
            self.refresh();
        }
        self.was_focused = focused;

        if self.settings.show_logs {
            self.logs_ui(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        if let Some((action, target)) = self.action_menu.show(ctx) {
            let now = ctx.input(|i| i.time);
            self.run_action(action, &target, now);
        }

        if let Some(settings) = self.settings_dialog.show(ctx) {
            self.apply_settings(settings);
        }

        self.notices.ui(ctx);
    }
}
