//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    DirectorySettings,
};

/// Name of the configuration file looked up in the workspace root
pub(super) const CONFIG_FILE_NAME: &str = ".translation-directory.json";

/// ワークスペースから設定を読み込む
///
/// `.translation-directory.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<DirectorySettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: DirectorySettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
