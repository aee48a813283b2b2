//! # Vitals
//!
//! 患者生命体征监测：将新读数与个人基线比较，异常时发送告警。

pub use vitals_core::{BloodPressure, HealthInfo, PatientInfo, Reading, Result, VitalsError};
pub use vitals_monitor::{
    InMemoryPatientRepository, LogAlertService, MedicalService, MedicalServiceImpl, MonitorConfig,
};
