use eframe::egui;

#[cfg(target_os = "android")]
mod android_activity;
#[cfg(target_os = "android")]
mod android_packagemanager;
#[cfg(target_os = "android")]
mod android_platform;

pub mod apk_share;
pub mod app_enumerator;
pub mod app_list;
pub mod app_list_stt;
pub mod dlg_app_actions;
pub mod dlg_app_actions_stt;
pub mod dlg_settings;
pub mod dlg_settings_stt;
pub mod launch_dispatcher;
pub mod launcher_platform;
pub mod log_capture;
pub mod log_forward;
pub mod models;
pub mod notice;

#[cfg(test)]
mod fake_platform;

// Export modules for external use
pub use launcher_app::LauncherApp as GuiApp;
pub mod launcher_app;
pub mod launcher_app_stt;

#[cfg(target_os = "android")]
mod main_android;

use anyhow::{Context, Result};
#[cfg(not(target_os = "android"))]
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Android application id of the launcher APK.
pub const APP_ID: &str = "bidhan.acharya.launcher";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Name stored in `Settings::log_level`.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn parse(level: &str) -> Option<Self> {
        match level.to_ascii_uppercase().as_str() {
            "ERROR" => Some(LogLevel::Error),
            "WARN" => Some(LogLevel::Warn),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "TRACE" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Lower is more severe.
    pub fn priority(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub show_logs: bool,
    #[serde(default = "default_true")]
    pub show_package_id: bool,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "Error".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_logs: false,
            show_package_id: true,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        #[cfg(target_os = "android")]
        {
            let data_dir = PathBuf::from("/data/data").join(APP_ID);
            let config_dir = data_dir.join("files");
            let cache_dir = data_dir.join("cache");

            log::info!(
                "Android config paths - config_dir: {:?}, cache_dir: {:?}",
                config_dir,
                cache_dir
            );

            match fs::create_dir_all(&config_dir) {
                Ok(()) => log::info!("Successfully created config_dir: {:?}", config_dir),
                Err(e) => log::error!(
                    "Failed to create config_dir: {:?} - Error: {}",
                    config_dir,
                    e
                ),
            }
            match fs::create_dir_all(&cache_dir) {
                Ok(()) => log::info!("Successfully created cache_dir: {:?}", cache_dir),
                Err(e) => log::error!("Failed to create cache_dir: {:?} - Error: {}", cache_dir, e),
            }

            Ok(Config {
                config_dir,
                cache_dir,
            })
        }

        #[cfg(not(target_os = "android"))]
        {
            let proj_dirs = ProjectDirs::from("bidhan", "acharya", "launcher")
                .context("Failed to get project directories")?;

            Self::from_dirs(
                proj_dirs.config_dir().to_path_buf(),
                proj_dirs.cache_dir().to_path_buf(),
            )
        }
    }

    /// Builds a config rooted at explicit directories, creating them if needed.
    pub fn from_dirs(config_dir: PathBuf, cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config dir {:?}", config_dir))?;
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {:?}", cache_dir))?;

        Ok(Config {
            config_dir,
            cache_dir,
        })
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let settings_path = self.config_dir.join("settings.txt");

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents =
            fs::read_to_string(&settings_path).context("Failed to read settings file")?;

        let settings: Settings =
            serde_json::from_str(&contents).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let settings_path = self.config_dir.join("settings.txt");

        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&settings_path, json).context("Failed to write settings file")?;

        tracing::info!("Settings saved to {:?}", settings_path);
        Ok(())
    }
}

pub fn init_i18n() -> Result<()> {
    let en_us = String::from_utf8_lossy(include_bytes!("../assets/languages/fluent/en-US.ftl"));

    egui_i18n::load_translations_from_text("en-US", en_us)
        .map_err(|e| anyhow::anyhow!("Failed to load en-US translations: {:?}", e))?;

    egui_i18n::set_language("en-US");
    egui_i18n::set_fallback("en-US");
    Ok(())
}

/// Detect narrow screens so the toolbar can stack vertically on phones.
pub fn is_mobile(ctx: &egui::Context) -> bool {
    let screen_size = ctx.screen_rect().size();
    screen_size.x < 600.0
}
