use eframe::egui;
use minimal_launcher::launcher_app::{self, LauncherApp};

fn main() -> eframe::Result<()> {
    // Initialize tracing subscriber for structured logging with log capture and reload support
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::reload;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    // Try to load user's log level from settings, default to "error" if not found
    let log_level = minimal_launcher::Config::new()
        .and_then(|config| config.load_settings())
        .map(|settings| settings.log_level.to_lowercase())
        .unwrap_or_else(|_| "error".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let (filter, reload_handle) = reload::Layer::new(env_filter);

    minimal_launcher::log_capture::set_reload_fn(move |level: &str| {
        let new_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("error"));
        if let Err(e) = reload_handle.reload(new_filter) {
            eprintln!("Failed to reload log filter: {}", e);
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(minimal_launcher::log_capture::LogCaptureLayer)
        .init();

    // The reloadable filter decides; see `main_android`.
    log::set_max_level(log::LevelFilter::Trace);

    launcher_app::init_common();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launcher",
        options,
        Box::new(|cc| {
            launcher_app::init_egui(&cc.egui_ctx);
            Ok(Box::<LauncherApp>::default())
        }),
    )
}
