use android_activity::AndroidApp;
use eframe::NativeOptions;

use crate::launcher_app::{self, LauncherApp};
use crate::log_capture;
use crate::log_forward::LogForwardLayer;
use crate::Config;

// Android entry point
#[no_mangle]
pub fn android_main(app: AndroidApp) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::reload;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    // Try to load user's log level from settings, default to ERROR if not found
    let log_level = Config::new()
        .and_then(|config| config.load_settings())
        .map(|settings| settings.log_level.to_lowercase())
        .unwrap_or_else(|_| "error".to_string());

    let env_filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("error"));
    let (filter, reload_handle) = reload::Layer::new(env_filter);

    log_capture::set_reload_fn(move |level: &str| {
        let new_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("error"));
        if let Err(e) = reload_handle.reload(new_filter) {
            log::error!("Failed to reload log filter: {}", e);
        }
    });

    // `init()` installs LogTracer as the global `log` logger, so a later
    // `android_logger::init_once` would be ignored. Logcat is fed by a layer
    // instead, and `log` records reach it through LogTracer.
    let logcat = android_logger::AndroidLogger::new(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Trace)
            .with_tag("Launcher"),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(LogForwardLayer::new(logcat))
        .with(log_capture::LogCaptureLayer)
        .init();

    // The reloadable filter decides; LogTracer only takes its level from
    // whatever was active during `init()`.
    log::set_max_level(log::LevelFilter::Trace);

    launcher_app::init_common();

    log::info!("Logcat forwarding initialized");

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC OCCURRED: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic location: {}:{}", location.file(), location.line());
        }
        log::error!("{}", std::backtrace::Backtrace::force_capture());
    }));

    let options = NativeOptions {
        android_app: Some(app),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    match eframe::run_native(
        "Launcher",
        options,
        Box::new(|cc| {
            launcher_app::init_egui(&cc.egui_ctx);
            Ok(Box::<LauncherApp>::default())
        }),
    ) {
        Ok(_) => {
            log::info!("LauncherApp exited successfully");
        }
        Err(e) => {
            log::error!("LauncherApp failed: {}", e);
        }
    }
}
