//! 生命体征监测演示程序
//!
//! 展示检查引擎的核心流程：
//! - 患者基线加载（内存或配置中的名册文件）
//! - 血压与体温检查
//! - 未知患者的错误处理
//!
//! 用法：`cargo run --example monitor_demo [config.toml]`

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use vitals_core::{BloodPressure, HealthInfo, PatientInfo, Reading};
use vitals_monitor::{
    InMemoryPatientRepository, LogAlertService, MedicalService, MedicalServiceImpl,
    MemoryAlertService, MonitorConfig, PatientInfoRepository, SendAlertService,
};

/// 同时写日志并保留记录的告警发送器
struct DemoAlerts {
    log: LogAlertService,
    memory: MemoryAlertService,
}

impl SendAlertService for DemoAlerts {
    fn send(&self, message: &str) {
        self.log.send(message);
        self.memory.send(message);
    }
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    info!("启动生命体征监测演示");

    let repository: Arc<dyn PatientInfoRepository> = match &config.roster_path {
        Some(_) => Arc::new(config.open_repository()?),
        None => Arc::new(sample_repository()?),
    };
    let alerts = Arc::new(DemoAlerts {
        log: LogAlertService,
        memory: MemoryAlertService::new(),
    });
    let service = MedicalServiceImpl::new(repository, alerts.clone());

    let checks = [
        ("1", Reading::BloodPressure(BloodPressure::new(120, 60))),
        ("1", Reading::BloodPressure(BloodPressure::new(110, 70))),
        ("1", Reading::Temperature(Decimal::new(365, 1))),
        ("1", Reading::Temperature(Decimal::new(380, 1))),
        ("2", Reading::Temperature(Decimal::new(365, 1))),
        ("404", Reading::Temperature(Decimal::new(365, 1))),
    ];

    for (patient_id, reading) in checks {
        match service.check(patient_id, reading) {
            Ok(()) => info!("患者 {} 的 {} 检查完成", patient_id, reading.kind()),
            Err(e) => warn!("无法评估患者 {}: {}", patient_id, e),
        }
    }

    info!("演示完成，共发送 {} 条告警", alerts.memory.len());
    Ok(())
}

/// 示例患者基线
fn sample_repository() -> Result<InMemoryPatientRepository> {
    let birthday = NaiveDate::from_ymd_opt(1991, 7, 12)
        .ok_or_else(|| anyhow::anyhow!("invalid birthday"))?;

    let repository = InMemoryPatientRepository::with_patients(vec![
        PatientInfo::new(
            "1",
            "Ivan",
            "Ivanov",
            birthday,
            HealthInfo::new(Decimal::new(365, 1), BloodPressure::new(120, 60)),
        ),
        PatientInfo::new(
            "2",
            "Ivan",
            "Petrov",
            birthday,
            HealthInfo::new(Decimal::new(385, 1), BloodPressure::new(120, 60)),
        ),
    ])?;
    Ok(repository)
}
