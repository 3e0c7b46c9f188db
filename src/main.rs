//! Imports a translation file into the workspace's translation artifact.
//!
//! Usage: `translation-directory [FILE]`. Without a file the artifact is only
//! created (if missing) and loaded.

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use translation_directory::config::ConfigManager;
use translation_directory::import::ImportFile;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    match run(&paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Loads settings and the artifact, then imports and saves `paths`.
async fn run(paths: &[String]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(std::env::current_dir()?))?;

    let mut directory = config_manager.open_directory();
    if directory.gateway().ensure_artifact().await? {
        tracing::info!(path = %directory.gateway().path().display(), "Created translation artifact");
    }
    directory.load().await?;
    tracing::info!(entries = directory.entries().len(), "Translations loaded");

    if paths.is_empty() {
        return Ok(());
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let text = tokio::fs::read_to_string(path).await?;
        let name = Path::new(path).file_name().map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
        files.push(ImportFile::from_text(name, &text)?);
    }

    directory.import_files(files)?;
    directory.save().await?;
    Ok(())
}
