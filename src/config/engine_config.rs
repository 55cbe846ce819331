// ==========================================
// PO 审核系统 - 引擎运行配置
// ==========================================
// 职责: 一次运行的全部可调参数 (安全库存 / 码垛模式 / 码垛约束)
// 红线: 配置为显式不可变值, 随调用链传递, 不使用进程级全局状态;
//       并发运行各持各的配置, 互不干扰
// ==========================================

use serde::{Deserialize, Serialize};

use crate::config::packing_profile::PackingConstraints;
use crate::domain::types::PackMode;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// EngineConfig - 引擎运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 安全库存 (件), 统一应用于全部 SKU, 默认 0
    #[serde(default)]
    pub safety_stock: i64,

    /// 码垛模式, 默认单品码垛
    #[serde(default)]
    pub pack_mode: PackMode,

    /// 码垛约束
    #[serde(default)]
    pub packing: PackingConstraints,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验整套配置; 任何一项非法即拒绝整次运行
    pub fn validate(&self) -> EngineResult<()> {
        if self.safety_stock < 0 {
            return Err(EngineError::config_invalid(
                "safety_stock",
                format!("安全库存不得为负数, 实际 {}", self.safety_stock),
            ));
        }
        self.packing.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.safety_stock, 0);
        assert_eq!(config.pack_mode, PackMode::SingleSku);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_safety_stock_rejected() {
        let config = EngineConfig {
            safety_stock: -1,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("safety_stock"));
    }

    #[test]
    fn test_invalid_packing_propagates() {
        let config = EngineConfig {
            packing: PackingConstraints {
                max_pallet_weight_lbs: 0.0,
                ..PackingConstraints::default()
            },
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"safety_stock": 50, "pack_mode": "mixed_fill"}"#).unwrap();
        assert_eq!(config.safety_stock, 50);
        assert_eq!(config.pack_mode, PackMode::MixedFill);
        assert_eq!(config.packing, PackingConstraints::default());
    }
}
