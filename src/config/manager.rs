//! ワークスペースの設定と、それが指す翻訳アーティファクトを管理する

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    DirectorySettings,
    loader,
};
use crate::directory::TranslationDirectory;
use crate::gateway::FileGateway;

/// Validated settings of one workspace.
///
/// Hosts resolve the artifact and open the directory through the manager so
/// that the settings file is the single source for languages, separator and
/// artifact layout.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定（常にバリデーション済み）
    current_settings: DirectorySettings,

    /// 設定を読み込んだワークスペースのルート
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `workspace_root` の `.translation-directory.json` を読み込む
    ///
    /// ファイルが無ければデフォルト設定を使う。読み込みかバリデーションに失敗した
    /// 場合、現在の設定とワークスペースルートは変更されない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_default(),
            None => DirectorySettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            workspace = ?workspace_root,
            languages = settings.languages.len(),
            artifact = %settings.artifact.path,
            "Settings loaded"
        );
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &DirectorySettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// Gateway for the configured artifact.
    ///
    /// `artifact.path` is resolved against the workspace root; without one it
    /// stays relative to the process's working directory.
    #[must_use]
    pub fn file_gateway(&self) -> FileGateway {
        let root = self.workspace_root().unwrap_or_else(|| Path::new(""));
        FileGateway::from_settings(root, &self.current_settings)
    }

    /// Directory over the configured artifact, not loaded yet.
    #[must_use]
    pub fn open_directory(&self) -> TranslationDirectory<FileGateway> {
        TranslationDirectory::new(self.file_gateway(), &self.current_settings)
    }
}
