//! 错误定义模块

use thiserror::Error;

/// 生命体征系统统一错误类型
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("患者未找到: {0}")]
    PatientNotFound(String),

    #[error("患者已存在: {0}")]
    DuplicatePatient(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VitalsError {
    /// 是否为患者未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, VitalsError::PatientNotFound(_))
    }
}

/// 生命体征系统统一结果类型
pub type Result<T> = std::result::Result<T, VitalsError>;
