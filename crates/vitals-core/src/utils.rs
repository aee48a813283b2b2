//! 通用工具函数

use uuid::Uuid;

/// 生成唯一的患者标识符
pub fn generate_patient_id() -> String {
    Uuid::new_v4().to_string()
}

/// 验证患者标识符格式
pub fn is_valid_patient_id(id: &str) -> bool {
    !id.is_empty() && id.trim() == id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_patient_id() {
        let id = generate_patient_id();
        assert!(is_valid_patient_id(&id));
        assert_ne!(id, generate_patient_id());
    }

    #[test]
    fn test_is_valid_patient_id() {
        assert!(is_valid_patient_id("1"));
        assert!(is_valid_patient_id("PAT-0001"));
        assert!(!is_valid_patient_id(""));
        assert!(!is_valid_patient_id(" 1"));
        assert!(!is_valid_patient_id("1\n"));
    }
}
