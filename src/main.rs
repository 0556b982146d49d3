// UFO Frontend - Main Entry Point
//
// Opens the configured asset archive and shows the cursor over a test
// scene with post-processing applied.

use ufo_frontend::display::run_frontend;
use ufo_frontend::frontend::{FrontendConfig, CONFIG_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("UFO Frontend v{}", env!("CARGO_PKG_VERSION"));

    let config = FrontendConfig::load_or_default(CONFIG_FILE);
    log::info!(
        "Assets: {} (cursor {}, palette {} #{})",
        config.assets.archive.display(),
        config.assets.cursor,
        config.assets.palette,
        config.assets.palette_index
    );

    run_frontend(&config)?;

    log::info!("Window closed.");
    Ok(())
}
