//! 配置管理
//!
//! 从 TOML 文件和 `VITALS_` 前缀的环境变量加载监测配置。
//! 体温偏差固定为常量，不在配置范围内。

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;
use vitals_core::{Result, VitalsError};

use crate::repository::FilePatientRepository;

/// 监测配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MonitorConfig {
    /// 患者名册文件（JSON）
    pub roster_path: Option<PathBuf>,
    /// 日志过滤规则，格式同 `RUST_LOG`
    pub log_filter: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl MonitorConfig {
    /// 从文件加载配置
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(config_path))
            .add_source(
                Environment::with_prefix("VITALS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| VitalsError::Config(e.to_string()))?;

        let config: MonitorConfig = settings
            .try_deserialize()
            .map_err(|e| VitalsError::Config(format!("Failed to deserialize configuration: {}", e)))?;
        config.validate()?;

        info!("Configuration loaded successfully from: {}", config_path.display());
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(VitalsError::Config("log_filter cannot be empty".to_string()));
        }
        Ok(())
    }

    /// 打开配置中的患者名册
    pub fn open_repository(&self) -> Result<FilePatientRepository> {
        let path = self
            .roster_path
            .as_ref()
            .ok_or_else(|| VitalsError::Config("roster_path is not set".to_string()))?;
        FilePatientRepository::open(path)
    }
}
