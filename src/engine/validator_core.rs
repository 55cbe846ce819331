// ==========================================
// PO 审核系统 - Validator Core 纯函数库
// ==========================================
// 职责: 提供三档库存判定、调拨量计算、价格比对的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::types::{PriceCheck, StockStatus};

/// 价格比对容差 (美元), 差值绝对值不超过该容差即视为一致 (含边界)
pub const PRICE_TOLERANCE: f64 = 0.01;

// 浮点边界保护: |diff| 恰为 0.01 时不得因二进制表示误差被误判
const PRICE_EPSILON: f64 = 1e-9;

// ==========================================
// StockClassification - 库存判定结论
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockClassification {
    pub status: StockStatus,
    pub required_qty: i64,
    /// 需从 SUB 仓调拨的件数
    pub transfer_from_sub: i64,
    /// 调拨后仍然无法满足的件数
    pub remaining_shortage: i64,
}

// ==========================================
// ValidatorCore - 纯函数工具类
// ==========================================
pub struct ValidatorCore;

impl ValidatorCore {
    /// 三档库存判定
    ///
    /// # 规则 (首条命中即返回)
    /// 需求量 = 订购量 + 安全库存:
    /// 1. MAIN ≥ 需求量 → OK, 无调拨无缺口
    /// 2. MAIN + SUB ≥ 需求量 → MAIN_SHORT_TRANSFER,
    ///    调拨量 = 需求量 - MAIN (收口不超过 SUB)
    /// 3. 其他 → OUT_OF_STOCK, SUB 全部调出,
    ///    缺口 = 需求量 - MAIN - SUB
    ///
    /// # 边界
    /// - 订购量 0 且安全库存 0 按规则 1 判 OK
    /// - 快照中缺失的 SKU 由调用方以 0/0 库存传入, 走规则 3
    ///
    /// # 返回
    /// - (StockClassification, Vec<String>): 结论 + 判定依据
    pub fn classify_stock(
        ordered_qty: i64,
        main_stock: i64,
        sub_stock: i64,
        safety_stock: i64,
    ) -> (StockClassification, Vec<String>) {
        let mut reasons = Vec::new();
        let demand = ordered_qty + safety_stock;

        if safety_stock > 0 {
            reasons.push(format!(
                "SAFETY_STOCK: demand = ordered {} + safety {} = {}",
                ordered_qty, safety_stock, demand
            ));
        }

        // 规则 1: MAIN 仓直接满足
        if main_stock >= demand {
            reasons.push(format!("OK: main={} >= demand={}", main_stock, demand));
            return (
                StockClassification {
                    status: StockStatus::Ok,
                    required_qty: ordered_qty,
                    transfer_from_sub: 0,
                    remaining_shortage: 0,
                },
                reasons,
            );
        }

        // 规则 2: MAIN+SUB 联合满足
        if main_stock + sub_stock >= demand {
            let transfer = (demand - main_stock).min(sub_stock);
            reasons.push(format!(
                "MAIN_SHORT_TRANSFER: main={} < demand={}, transfer {} from sub",
                main_stock, demand, transfer
            ));
            return (
                StockClassification {
                    status: StockStatus::MainShortTransfer,
                    required_qty: ordered_qty,
                    transfer_from_sub: transfer,
                    remaining_shortage: 0,
                },
                reasons,
            );
        }

        // 规则 3: 联合库存仍不足, SUB 全部调出
        let remaining_shortage = demand - main_stock - sub_stock;
        reasons.push(format!(
            "OUT_OF_STOCK: main={} + sub={} < demand={}, shortage={}",
            main_stock, sub_stock, demand, remaining_shortage
        ));
        (
            StockClassification {
                status: StockStatus::OutOfStock,
                required_qty: ordered_qty,
                transfer_from_sub: sub_stock,
                remaining_shortage,
            },
            reasons,
        )
    }

    /// 价格比对
    ///
    /// # 规则
    /// 1. 任一侧价格缺失 → SKIPPED (缺价不算差异)
    /// 2. |po - catalog| ≤ 0.01 (含边界) → MATCH
    /// 3. 否则 → MISMATCH, 附人读差异说明
    ///
    /// # 返回
    /// - (PriceCheck, Option<String>): 结论 + 差异说明
    pub fn compare_price(
        po_price: Option<f64>,
        catalog_price: Option<f64>,
    ) -> (PriceCheck, Option<String>) {
        let (Some(po), Some(catalog)) = (po_price, catalog_price) else {
            return (PriceCheck::Skipped, None);
        };

        let diff = (po - catalog).abs();
        if diff <= PRICE_TOLERANCE + PRICE_EPSILON {
            (PriceCheck::Match, None)
        } else {
            (
                PriceCheck::Mismatch,
                Some(format!("PO: ${:.2} vs System: ${:.2}", po, catalog)),
            )
        }
    }
}
