//! 核心数据模型定义

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 血压（收缩压/舒张压）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BloodPressure {
    high: i32, // 收缩压
    low: i32,  // 舒张压
}

impl BloodPressure {
    pub fn new(high: i32, low: i32) -> Self {
        Self { high, low }
    }

    /// 收缩压
    pub fn high(&self) -> i32 {
        self.high
    }

    /// 舒张压
    pub fn low(&self) -> i32 {
        self.low
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.high, self.low)
    }
}

/// 患者基线健康信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthInfo {
    normal_temperature: Decimal, // 摄氏度
    blood_pressure: BloodPressure,
}

impl HealthInfo {
    pub fn new(normal_temperature: Decimal, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }

    /// 基线体温
    pub fn normal_temperature(&self) -> Decimal {
        self.normal_temperature
    }

    /// 基线血压
    pub fn blood_pressure(&self) -> BloodPressure {
        self.blood_pressure
    }
}

/// 患者基本信息
///
/// 创建后不可变，引擎只读取其中的基线数据。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientInfo {
    id: String,
    name: String,
    surname: String,
    birthday: NaiveDate,
    health_info: HealthInfo,
}

impl PatientInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        birthday: NaiveDate,
        health_info: HealthInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            birthday,
            health_info,
        }
    }

    /// 返回携带新标识符的副本
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self { id: id.into(), ..self }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn health_info(&self) -> &HealthInfo {
        &self.health_info
    }
}

/// 生命体征类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VitalSign {
    BloodPressure,
    Temperature,
}

impl VitalSign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodPressure => "blood_pressure",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次测量读数，仅在一次检查期间存在
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    BloodPressure(BloodPressure),
    Temperature(Decimal),
}

impl Reading {
    pub fn kind(&self) -> VitalSign {
        match self {
            Self::BloodPressure(_) => VitalSign::BloodPressure,
            Self::Temperature(_) => VitalSign::Temperature,
        }
    }
}

impl From<BloodPressure> for Reading {
    fn from(value: BloodPressure) -> Self {
        Self::BloodPressure(value)
    }
}

impl From<Decimal> for Reading {
    fn from(value: Decimal) -> Self {
        Self::Temperature(value)
    }
}
