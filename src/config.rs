use crate::error::{PlateDetectError, Result};
use plate_detect_common::api::{ApiConfig, API_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// APIベースURL（例: http://localhost:8000/api）
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlateDetectError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("plate-detect"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// セッション保存先
    pub fn session_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session"))
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        self.api_url = Some(url);
        self.save()
    }

    /// API設定を決定: フラグ > 環境変数 > 設定ファイル > デフォルト
    pub fn resolve_api(&self, flag: Option<&str>) -> ApiConfig {
        let env = std::env::var(API_URL_ENV).ok();
        resolve_api_url(flag, env.as_deref(), self.api_url.as_deref())
    }
}

pub fn resolve_api_url(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> ApiConfig {
    let chosen = [flag, env, file]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty());
    ApiConfig::from_env_value(chosen)
}
