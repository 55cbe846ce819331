// ==========================================
// PO 审核系统 - 领域类型定义
// ==========================================
// 依据: 对账与码垛引擎设计 - 分类体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::i18n;

// ==========================================
// 库存判定状态 (Stock Status)
// ==========================================
// 红线: 三档判定, 顺序评估, 首个命中即返回
// 序列化格式: SCREAMING_SNAKE_CASE (与导出报表一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Ok,                // 主仓足量
    MainShortTransfer, // 主仓不足, 副仓可补
    OutOfStock,        // 主副合计仍不足
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Ok => write!(f, "OK"),
            StockStatus::MainShortTransfer => write!(f, "MAIN_SHORT_TRANSFER"),
            StockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
        }
    }
}

impl StockStatus {
    /// 本地化显示名称
    pub fn title(&self) -> String {
        match self {
            StockStatus::Ok => i18n::t("status.ok"),
            StockStatus::MainShortTransfer => i18n::t("status.main_short_transfer"),
            StockStatus::OutOfStock => i18n::t("status.out_of_stock"),
        }
    }
}

// ==========================================
// 价格比对结果 (Price Check)
// ==========================================
// 规则: |订单价 - 系统价| > 0.01 判为不一致, 恰好 0.01 判为一致
// 系统价缺失时跳过比对, 不计为不一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceCheck {
    Match,    // 价格一致
    Mismatch, // 价格不一致
    Skipped,  // 缺少比对依据, 跳过
}

impl fmt::Display for PriceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceCheck::Match => write!(f, "MATCH"),
            PriceCheck::Mismatch => write!(f, "MISMATCH"),
            PriceCheck::Skipped => write!(f, "SKIPPED"),
        }
    }
}

impl PriceCheck {
    /// 本地化显示名称
    pub fn title(&self) -> String {
        match self {
            PriceCheck::Match => i18n::t("price.match"),
            PriceCheck::Mismatch => i18n::t("price.mismatch"),
            PriceCheck::Skipped => i18n::t("price.skipped"),
        }
    }
}

// ==========================================
// 母子单分摊比对结果 (Mismatch Kind)
// ==========================================
// diff = 子单合计 - 母单合计
// 分类: 0 → MATCH, >0 → OVER, <0 → UNDER, 仅子单出现 → EXTRA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MismatchKind {
    Match, // 分摊一致
    Over,  // 子单合计超出母单
    Under, // 子单合计少于母单 (含仅母单出现)
    Extra, // 仅子单出现, 母单无此 SKU
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::Match => write!(f, "MATCH"),
            MismatchKind::Over => write!(f, "OVER"),
            MismatchKind::Under => write!(f, "UNDER"),
            MismatchKind::Extra => write!(f, "EXTRA"),
        }
    }
}

impl MismatchKind {
    /// 本地化显示名称
    pub fn title(&self) -> String {
        match self {
            MismatchKind::Match => i18n::t("mismatch.match"),
            MismatchKind::Over => i18n::t("mismatch.over"),
            MismatchKind::Under => i18n::t("mismatch.under"),
            MismatchKind::Extra => i18n::t("mismatch.extra"),
        }
    }
}

// ==========================================
// 码垛模式 (Pack Mode)
// ==========================================
// 用途: 码垛策略入口, 单品码垛为默认策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackMode {
    SingleSku,
    MixedFill,
}

impl PackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackMode::SingleSku => "single_sku",
            PackMode::MixedFill => "mixed_fill",
        }
    }

    /// 本地化显示名称
    pub fn title(&self) -> String {
        match self {
            PackMode::SingleSku => i18n::t("pack.single_sku"),
            PackMode::MixedFill => i18n::t("pack.mixed_fill"),
        }
    }
}

impl Default for PackMode {
    fn default() -> Self {
        PackMode::SingleSku
    }
}

impl std::str::FromStr for PackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single_sku" | "single-sku" => Ok(PackMode::SingleSku),
            "mixed_fill" | "mixed-fill" | "mixed" => Ok(PackMode::MixedFill),
            other => Err(format!("未知码垛模式: {}", other)),
        }
    }
}

// ==========================================
// 码垛违规类型 (Pack Violation Type)
// ==========================================
// 用于标识码垛过程中无法落垛的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackViolationType {
    OversizedCarton, // 单箱尺寸/重量超出垛位上限
}

impl fmt::Display for PackViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackViolationType::OversizedCarton => write!(f, "OVERSIZED_CARTON"),
        }
    }
}
