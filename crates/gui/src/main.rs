mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::play`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use block_studio_lib::play;
pub use block_studio_lib::state;
pub use block_studio_lib::validation;

use app::BlockStudioApp;
use state::scene::persistence::{FileProjectStore, ProjectStore};
use state::{AppSettings, EditorSession};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "block_studio=info,block_studio_lib=info".into()),
        )
        .init();

    let settings = AppSettings::load();
    let session = initial_session(&settings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Block Studio")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "block-studio",
        native_options,
        Box::new(move |cc| Ok(Box::new(BlockStudioApp::new(cc, settings, session)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Session for `--project <key>` if that project exists, otherwise a new one
fn initial_session(settings: &AppSettings) -> EditorSession {
    let Some(key) = parse_project_arg() else {
        return EditorSession::new_project(settings);
    };

    let store = match FileProjectStore::in_data_dir() {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Cannot open project store: {e}");
            return EditorSession::new_project(settings);
        }
    };

    match store.load(&key) {
        Ok(Some(objects)) => {
            tracing::info!("Opened project {key} ({} objects)", objects.len());
            EditorSession::new(key, shared::SceneDescription::new(objects), settings)
        }
        Ok(None) => {
            tracing::info!("Project {key} not found, starting it from the default scene");
            EditorSession::new(key, shared::SceneDescription::default_scene(), settings)
        }
        Err(e) => {
            tracing::error!("Failed to load project {key}: {e}");
            EditorSession::new_project(settings)
        }
    }
}

fn parse_project_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--project" {
            return args.next();
        }
        if let Some(key) = arg.strip_prefix("--project=") {
            return Some(key.to_string());
        }
    }
    None
}
