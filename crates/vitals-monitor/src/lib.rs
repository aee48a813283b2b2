//! # 生命体征监测模块
//!
//! 根据患者的个人基线判断新的测量读数是否异常，包括：
//! - 患者查询：按标识符获取患者记录及基线健康信息
//! - 告警发送：读数异常时发送一次告警消息
//! - 体征检查：血压精确匹配，体温允许 ±1.5 ℃ 偏差
//! - 配置加载：患者名册路径与日志过滤规则

pub mod alert;
pub mod config;
pub mod medical;
pub mod repository;

// 重新导出主要类型
pub use alert::{LogAlertService, MemoryAlertService, SendAlertService};
pub use self::config::MonitorConfig;
pub use medical::{
    alert_message, is_blood_pressure_normal, is_temperature_normal, MedicalService,
    MedicalServiceImpl, TEMPERATURE_TOLERANCE,
};
pub use repository::{FilePatientRepository, InMemoryPatientRepository, PatientInfoRepository};
