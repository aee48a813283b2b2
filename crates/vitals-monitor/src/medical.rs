//! 生命体征检查
//!
//! 每次检查都是一次独立的同步事务：查询患者、与基线比较、
//! 读数异常时发送一次告警。检查过程不会修改患者数据。

use rust_decimal::Decimal;
use tracing::{debug, info};
use vitals_core::{BloodPressure, HealthInfo, Reading, Result, VitalSign, VitalsError};

use crate::alert::SendAlertService;
use crate::repository::PatientInfoRepository;

/// 体温允许偏差（±1.5 ℃，含边界）
pub const TEMPERATURE_TOLERANCE: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// 生成告警消息
pub fn alert_message(patient_id: &str) -> String {
    format!("Warning, patient with id: {}, need help", patient_id)
}

/// 血压必须与基线完全一致
pub fn is_blood_pressure_normal(baseline: BloodPressure, reading: BloodPressure) -> bool {
    baseline == reading
}

/// 体温在 [基线 - 1.5, 基线 + 1.5] 区间内视为正常
///
/// 区间端点超出 `Decimal` 表示范围时，该侧不设限。
pub fn is_temperature_normal(baseline: Decimal, reading: Decimal) -> bool {
    let above_low = baseline
        .checked_sub(TEMPERATURE_TOLERANCE)
        .map_or(true, |low| reading >= low);
    let below_high = baseline
        .checked_add(TEMPERATURE_TOLERANCE)
        .map_or(true, |high| reading <= high);
    above_low && below_high
}

/// 生命体征检查服务
pub trait MedicalService {
    /// 检查血压，患者不存在时返回 [`VitalsError::PatientNotFound`]
    fn check_blood_pressure(&self, patient_id: &str, reading: BloodPressure) -> Result<()>;

    /// 检查体温，患者不存在时返回 [`VitalsError::PatientNotFound`]
    fn check_temperature(&self, patient_id: &str, reading: Decimal) -> Result<()>;

    /// 按读数类型分派检查
    fn check(&self, patient_id: &str, reading: Reading) -> Result<()> {
        match reading {
            Reading::BloodPressure(value) => self.check_blood_pressure(patient_id, value),
            Reading::Temperature(value) => self.check_temperature(patient_id, value),
        }
    }
}

/// 基于患者仓库和告警服务的检查实现
#[derive(Debug, Clone)]
pub struct MedicalServiceImpl<R, A> {
    repository: R,
    alert_service: A,
}

impl<R, A> MedicalServiceImpl<R, A>
where
    R: PatientInfoRepository,
    A: SendAlertService,
{
    pub fn new(repository: R, alert_service: A) -> Self {
        Self {
            repository,
            alert_service,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn alert_service(&self) -> &A {
        &self.alert_service
    }

    /// 查询基线并判断，异常时只发送一次告警
    fn evaluate(
        &self,
        patient_id: &str,
        vital: VitalSign,
        is_normal: impl FnOnce(&HealthInfo) -> bool,
    ) -> Result<()> {
        let patient = self
            .repository
            .get_by_id(patient_id)
            .ok_or_else(|| VitalsError::PatientNotFound(patient_id.to_string()))?;

        let normal = is_normal(patient.health_info());
        debug!(patient_id, vital = %vital, normal, "Vital sign evaluated");

        if !normal {
            info!(patient_id, vital = %vital, "Abnormal reading, sending alert");
            self.alert_service.send(&alert_message(patient_id));
        }

        Ok(())
    }
}

impl<R, A> MedicalService for MedicalServiceImpl<R, A>
where
    R: PatientInfoRepository,
    A: SendAlertService,
{
    fn check_blood_pressure(&self, patient_id: &str, reading: BloodPressure) -> Result<()> {
        self.evaluate(patient_id, VitalSign::BloodPressure, |baseline| {
            is_blood_pressure_normal(baseline.blood_pressure(), reading)
        })
    }

    fn check_temperature(&self, patient_id: &str, reading: Decimal) -> Result<()> {
        self.evaluate(patient_id, VitalSign::Temperature, |baseline| {
            is_temperature_normal(baseline.normal_temperature(), reading)
        })
    }
}
