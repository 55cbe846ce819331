// ==========================================
// PO 审核系统 - 码垛约束配置
// ==========================================
// 职责: 垛位物理上限 (堆叠高度 / 总重 / 空托盘自重)
// 红线: 约束非法时整体拒绝运行, 不得带病计算
// 默认值: 高度 68 in / 总重 2500 lbs / 托盘自重 40 lbs
// ==========================================

use serde::{Deserialize, Serialize};

use crate::engine::error::{EngineError, EngineResult};

pub const DEFAULT_MAX_STACK_HEIGHT_IN: f64 = 68.0;
pub const DEFAULT_MAX_PALLET_WEIGHT_LBS: f64 = 2500.0;
pub const DEFAULT_PALLET_TARE_WEIGHT_LBS: f64 = 40.0;

// ==========================================
// PackingConstraints - 码垛约束
// ==========================================
// 由运营方按场地外部配置, 运行期间不可变
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingConstraints {
    /// 最大堆叠高度 (英寸)
    #[serde(default = "default_max_stack_height")]
    pub max_stack_height_in: f64,

    /// 垛位最大总重 (磅), 含托盘自重
    #[serde(default = "default_max_pallet_weight")]
    pub max_pallet_weight_lbs: f64,

    /// 空托盘自重 (磅), 开垛即计入总重
    #[serde(default = "default_pallet_tare_weight")]
    pub pallet_tare_weight_lbs: f64,
}

fn default_max_stack_height() -> f64 {
    DEFAULT_MAX_STACK_HEIGHT_IN
}
fn default_max_pallet_weight() -> f64 {
    DEFAULT_MAX_PALLET_WEIGHT_LBS
}
fn default_pallet_tare_weight() -> f64 {
    DEFAULT_PALLET_TARE_WEIGHT_LBS
}

impl Default for PackingConstraints {
    fn default() -> Self {
        Self {
            max_stack_height_in: DEFAULT_MAX_STACK_HEIGHT_IN,
            max_pallet_weight_lbs: DEFAULT_MAX_PALLET_WEIGHT_LBS,
            pallet_tare_weight_lbs: DEFAULT_PALLET_TARE_WEIGHT_LBS,
        }
    }
}

impl PackingConstraints {
    /// 校验约束合法性
    ///
    /// # 规则
    /// 1. 三项均须为有限正数
    /// 2. 托盘自重必须小于最大总重 (否则没有任何载荷空间)
    pub fn validate(&self) -> EngineResult<()> {
        if !self.max_stack_height_in.is_finite() || self.max_stack_height_in <= 0.0 {
            return Err(EngineError::config_invalid(
                "max_stack_height_in",
                format!("必须为有限正数, 实际 {}", self.max_stack_height_in),
            ));
        }
        if !self.max_pallet_weight_lbs.is_finite() || self.max_pallet_weight_lbs <= 0.0 {
            return Err(EngineError::config_invalid(
                "max_pallet_weight_lbs",
                format!("必须为有限正数, 实际 {}", self.max_pallet_weight_lbs),
            ));
        }
        if !self.pallet_tare_weight_lbs.is_finite() || self.pallet_tare_weight_lbs <= 0.0 {
            return Err(EngineError::config_invalid(
                "pallet_tare_weight_lbs",
                format!("必须为有限正数, 实际 {}", self.pallet_tare_weight_lbs),
            ));
        }
        if self.pallet_tare_weight_lbs >= self.max_pallet_weight_lbs {
            return Err(EngineError::config_invalid(
                "pallet_tare_weight_lbs",
                format!(
                    "托盘自重 {} 不得大于等于最大总重 {}",
                    self.pallet_tare_weight_lbs, self.max_pallet_weight_lbs
                ),
            ));
        }
        Ok(())
    }

    /// 载荷余量上限 (扣除托盘自重)
    pub fn payload_limit_lbs(&self) -> f64 {
        self.max_pallet_weight_lbs - self.pallet_tare_weight_lbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let constraints = PackingConstraints::default();
        assert_eq!(constraints.max_stack_height_in, 68.0);
        assert_eq!(constraints.max_pallet_weight_lbs, 2500.0);
        assert_eq!(constraints.pallet_tare_weight_lbs, 40.0);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let constraints: PackingConstraints = serde_json::from_str("{}").unwrap();
        assert_eq!(constraints, PackingConstraints::default());
    }

    #[test]
    fn test_validate_rejects_zero_height() {
        let constraints = PackingConstraints {
            max_stack_height_in: 0.0,
            ..PackingConstraints::default()
        };
        let err = constraints.validate().unwrap_err();
        assert!(err.to_string().contains("max_stack_height_in"));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let constraints = PackingConstraints {
            max_pallet_weight_lbs: -1.0,
            ..PackingConstraints::default()
        };
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tare_at_limit() {
        let constraints = PackingConstraints {
            pallet_tare_weight_lbs: 2500.0,
            ..PackingConstraints::default()
        };
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn test_payload_limit() {
        let constraints = PackingConstraints::default();
        assert_eq!(constraints.payload_limit_lbs(), 2460.0);
    }
}
