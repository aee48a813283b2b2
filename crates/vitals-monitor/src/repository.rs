//! 患者信息仓库
//!
//! 引擎只通过 [`PatientInfoRepository::get_by_id`] 读取患者记录，
//! 未找到时返回 `None`，由调用方决定如何处理。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};
use vitals_core::utils::{generate_patient_id, is_valid_patient_id};
use vitals_core::{PatientInfo, Result, VitalsError};

/// 患者查询特征
pub trait PatientInfoRepository: Send + Sync {
    /// 按标识符获取患者记录，不存在时返回 `None`
    fn get_by_id(&self, id: &str) -> Option<PatientInfo>;
}

impl<T: PatientInfoRepository + ?Sized> PatientInfoRepository for Arc<T> {
    fn get_by_id(&self, id: &str) -> Option<PatientInfo> {
        (**self).get_by_id(id)
    }
}

type PatientMap = HashMap<String, PatientInfo>;

/// 插入新记录，空标识符时自动生成
fn insert_patient(patients: &mut PatientMap, patient: PatientInfo) -> Result<String> {
    let patient = if patient.id().is_empty() {
        patient.with_id(generate_patient_id())
    } else {
        patient
    };

    if !is_valid_patient_id(patient.id()) {
        return Err(VitalsError::Storage(format!(
            "Invalid patient id: {:?}",
            patient.id()
        )));
    }
    if patients.contains_key(patient.id()) {
        return Err(VitalsError::DuplicatePatient(patient.id().to_string()));
    }

    let id = patient.id().to_string();
    patients.insert(id.clone(), patient);
    Ok(id)
}

/// 替换已有记录，返回旧记录
fn replace_patient(patients: &mut PatientMap, patient: PatientInfo) -> Result<PatientInfo> {
    match patients.get_mut(patient.id()) {
        Some(existing) => Ok(std::mem::replace(existing, patient)),
        None => Err(VitalsError::PatientNotFound(patient.id().to_string())),
    }
}

fn remove_patient(patients: &mut PatientMap, id: &str) -> Result<PatientInfo> {
    patients
        .remove(id)
        .ok_or_else(|| VitalsError::PatientNotFound(id.to_string()))
}

/// 内存患者仓库
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    patients: RwLock<PatientMap>,
}

impl InMemoryPatientRepository {
    /// 创建空仓库
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用预置患者创建仓库
    pub fn with_patients(patients: impl IntoIterator<Item = PatientInfo>) -> Result<Self> {
        let repository = Self::new();
        for patient in patients {
            repository.add(patient)?;
        }
        Ok(repository)
    }

    /// 添加患者，返回其标识符
    pub fn add(&self, patient: PatientInfo) -> Result<String> {
        let mut patients = self.patients.write().unwrap_or_else(|e| e.into_inner());
        let id = insert_patient(&mut patients, patient)?;
        debug!("Patient {} added to in-memory repository", id);
        Ok(id)
    }

    /// 更新患者记录
    pub fn update(&self, patient: PatientInfo) -> Result<PatientInfo> {
        let mut patients = self.patients.write().unwrap_or_else(|e| e.into_inner());
        replace_patient(&mut patients, patient)
    }

    /// 删除患者记录
    pub fn remove(&self, id: &str) -> Result<PatientInfo> {
        let mut patients = self.patients.write().unwrap_or_else(|e| e.into_inner());
        remove_patient(&mut patients, id)
    }

    pub fn len(&self) -> usize {
        self.patients.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PatientInfoRepository for InMemoryPatientRepository {
    fn get_by_id(&self, id: &str) -> Option<PatientInfo> {
        let patients = self.patients.read().unwrap_or_else(|e| e.into_inner());
        patients.get(id).cloned()
    }
}

/// 基于 JSON 文件的患者仓库
///
/// 打开时加载整个文件，查询走内存；每次修改先写入同目录下的临时文件，
/// 再重命名覆盖原文件。写文件失败时内存中的数据保持不变。
#[derive(Debug)]
pub struct FilePatientRepository {
    path: PathBuf,
    patients: RwLock<PatientMap>,
}

impl FilePatientRepository {
    /// 打开患者文件，文件不存在时从空仓库开始
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut patients = PatientMap::new();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let records: Vec<PatientInfo> = serde_json::from_str(&content)?;
            for record in records {
                // 文件中的记录必须已有标识符，否则每次打开都会生成新的标识符
                if record.id().is_empty() {
                    return Err(VitalsError::Storage(format!(
                        "Patient record without id in {}",
                        path.display()
                    )));
                }
                insert_patient(&mut patients, record)?;
            }
            info!(
                "Loaded {} patients from {}",
                patients.len(),
                path.display()
            );
        } else {
            info!(
                "Patient file {} not found, starting empty",
                path.display()
            );
        }

        Ok(Self {
            path,
            patients: RwLock::new(patients),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 添加患者，返回其标识符
    pub fn add(&self, patient: PatientInfo) -> Result<String> {
        self.modify(|patients| insert_patient(patients, patient))
    }

    /// 更新患者记录
    pub fn update(&self, patient: PatientInfo) -> Result<PatientInfo> {
        self.modify(|patients| replace_patient(patients, patient))
    }

    /// 删除患者记录
    pub fn remove(&self, id: &str) -> Result<PatientInfo> {
        self.modify(|patients| remove_patient(patients, id))
    }

    pub fn len(&self) -> usize {
        self.patients.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 在副本上执行修改，写盘成功后再替换内存数据
    fn modify<T>(&self, op: impl FnOnce(&mut PatientMap) -> Result<T>) -> Result<T> {
        let mut patients = self.patients.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = patients.clone();
        let result = op(&mut updated)?;

        self.persist(&updated)?;
        *patients = updated;
        Ok(result)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, patients: &PatientMap) -> Result<()> {
        let mut records: Vec<&PatientInfo> = patients.values().collect();
        records.sort_by(|a, b| a.id().cmp(b.id()));

        // 先写临时文件再重命名，避免留下写了一半的名册
        let content = serde_json::to_string_pretty(&records)?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(
            "Persisted {} patients to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl PatientInfoRepository for FilePatientRepository {
    fn get_by_id(&self, id: &str) -> Option<PatientInfo> {
        let patients = self.patients.read().unwrap_or_else(|e| e.into_inner());
        patients.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use vitals_core::{BloodPressure, HealthInfo};

    fn patient(id: &str, temperature: Decimal) -> PatientInfo {
        PatientInfo::new(
            id,
            "Ivan",
            "Petrov",
            NaiveDate::from_ymd_opt(1991, 7, 12).unwrap(),
            HealthInfo::new(temperature, BloodPressure::new(120, 60)),
        )
    }

    #[test]
    fn test_in_memory_lookup() {
        let repo = InMemoryPatientRepository::with_patients(vec![
            patient("1", Decimal::new(365, 1)),
            patient("2", Decimal::new(385, 1)),
        ])
        .unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get_by_id("2").unwrap().surname(), "Petrov");
        assert!(repo.get_by_id("3").is_none());
        assert!(repo.get_by_id("").is_none());
    }

    #[test]
    fn test_in_memory_generates_id() {
        let repo = InMemoryPatientRepository::new();
        let id = repo.add(patient("", Decimal::new(365, 1))).unwrap();

        assert!(!id.is_empty());
        assert_eq!(repo.get_by_id(&id).unwrap().id(), id);
    }

    #[test]
    fn test_in_memory_duplicate_and_invalid() {
        let repo = InMemoryPatientRepository::new();
        repo.add(patient("1", Decimal::new(365, 1))).unwrap();

        let result = repo.add(patient("1", Decimal::new(370, 1)));
        assert!(matches!(result, Err(VitalsError::DuplicatePatient(id)) if id == "1"));

        let result = repo.add(patient(" 7", Decimal::new(370, 1)));
        assert!(matches!(result, Err(VitalsError::Storage(_))));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_in_memory_update_and_remove() {
        let repo = InMemoryPatientRepository::new();
        repo.add(patient("1", Decimal::new(365, 1))).unwrap();

        let previous = repo.update(patient("1", Decimal::new(370, 1))).unwrap();
        assert_eq!(previous.health_info().normal_temperature(), Decimal::new(365, 1));
        assert_eq!(
            repo.get_by_id("1").unwrap().health_info().normal_temperature(),
            Decimal::new(370, 1)
        );

        assert!(repo.update(patient("9", Decimal::new(370, 1))).unwrap_err().is_not_found());

        repo.remove("1").unwrap();
        assert!(repo.is_empty());
        assert!(repo.remove("1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_file_repository_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");

        {
            let repo = FilePatientRepository::open(&path).unwrap();
            assert!(repo.is_empty());
            repo.add(patient("1", Decimal::new(365, 1))).unwrap();
            repo.add(patient("2", Decimal::new(385, 1))).unwrap();
            repo.remove("2").unwrap();
        }

        let repo = FilePatientRepository::open(&path).unwrap();
        assert_eq!(repo.path(), path.as_path());
        assert_eq!(repo.len(), 1);
        assert!(!dir.path().join("patients.json.tmp").exists());
        let stored = repo.get_by_id("1").unwrap();
        assert_eq!(stored.health_info().normal_temperature(), Decimal::new(365, 1));
        assert_eq!(stored.health_info().blood_pressure(), BloodPressure::new(120, 60));
        assert!(repo.get_by_id("2").is_none());
    }

    #[test]
    fn test_file_repository_failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("patients.json");

        let repo = FilePatientRepository::open(&path).unwrap();
        let result = repo.add(patient("1", Decimal::new(365, 1)));

        assert!(matches!(result, Err(VitalsError::Io(_))));
        assert!(repo.get_by_id("1").is_none());
    }

    #[test]
    fn test_file_repository_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FilePatientRepository::open(&path);
        assert!(matches!(result, Err(VitalsError::Serialization(_))));
    }

    #[test]
    fn test_file_repository_rejects_record_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        let records = vec![patient("", Decimal::new(365, 1))];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let result = FilePatientRepository::open(&path);
        assert!(matches!(result, Err(VitalsError::Storage(_))));
    }

    #[test]
    fn test_file_repository_generated_id_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");

        let id = {
            let repo = FilePatientRepository::open(&path).unwrap();
            repo.add(patient("", Decimal::new(365, 1))).unwrap()
        };

        for _ in 0..2 {
            let repo = FilePatientRepository::open(&path).unwrap();
            assert_eq!(repo.get_by_id(&id).unwrap().id(), id);
        }
    }
}
