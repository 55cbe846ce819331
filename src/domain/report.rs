// ==========================================
// PO 审核系统 - 审核报告领域模型
// ==========================================
// 职责: 一次完整审核的全部产出 (行级校验 / 对账差异 / 码垛结果 / 汇总)
// 红线: 报告内容与装载/遍历顺序无关, 相同输入序列化结果逐字节一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::order::{Destination, FieldIssue};
use crate::domain::pallet::PalletAssignment;
use crate::domain::types::{MismatchKind, PriceCheck, StockStatus};

// ==========================================
// LineValidation - 单行校验结果
// ==========================================
// 保留行级全部判定依据, 供人工复核追溯
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineValidation {
    pub order_no: String,
    pub sku: String,
    pub destination: Destination,

    // ===== 库存判定输入 =====
    pub required_qty: i64,
    pub main_stock: i64,
    pub sub_stock: i64,
    pub total_stock: i64,

    // ===== 库存判定结论 =====
    pub status: StockStatus,
    pub transfer_from_sub: i64,
    pub remaining_shortage: i64,

    // ===== 价格比对 =====
    pub po_unit_price: Option<f64>,
    pub catalog_unit_price: Option<f64>,
    pub price_check: PriceCheck,

    // ===== 判定依据链 (人读) =====
    pub reasons: Vec<String>,
}

// ==========================================
// AllocationMismatch - 母子单对账差异行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationMismatch {
    pub sku: String,
    pub parent_qty: i64,
    pub child_qty: i64,
    /// 子单合计 - 母单合计
    pub diff: i64,
    pub parent_amount: Option<f64>,
    pub child_amount: Option<f64>,
    pub kind: MismatchKind,
    /// 子单按目的地的数量分布 (键序即输出序)
    pub by_destination: BTreeMap<String, i64>,
}

// ==========================================
// DcRollup - 按目的地的校验汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DcRollup {
    pub line_count: usize,
    pub ok_count: usize,
    pub transfer_count: usize,
    pub out_of_stock_count: usize,
    pub total_units: i64,
    pub total_shortage: i64,
}

// ==========================================
// ValidationSummary - 库存校验汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub ok_count: usize,
    pub transfer_count: usize,
    pub out_of_stock_count: usize,
    pub price_mismatch_count: usize,
    pub total_units: i64,
    pub total_shortage: i64,
    pub total_transfer_from_sub: i64,
    /// 按目的地汇总 (键序即输出序)
    pub by_destination: BTreeMap<String, DcRollup>,
    /// 缺货行 (SKU 升序)
    pub shortage_lines: Vec<ShortageLine>,
}

// ==========================================
// ShortageLine - 缺货明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageLine {
    pub sku: String,
    pub destination: Destination,
    pub required_qty: i64,
    pub shortage: i64,
}

impl ValidationSummary {
    /// 从行级结果聚合汇总
    pub fn from_lines(lines: &[LineValidation]) -> Self {
        let mut summary = Self::default();
        for line in lines {
            match line.status {
                StockStatus::Ok => summary.ok_count += 1,
                StockStatus::MainShortTransfer => summary.transfer_count += 1,
                StockStatus::OutOfStock => summary.out_of_stock_count += 1,
            }
            if line.price_check == PriceCheck::Mismatch {
                summary.price_mismatch_count += 1;
            }
            summary.total_units += line.required_qty;
            summary.total_shortage += line.remaining_shortage;
            summary.total_transfer_from_sub += line.transfer_from_sub;

            let rollup = summary
                .by_destination
                .entry(line.destination.as_str().to_string())
                .or_default();
            rollup.line_count += 1;
            match line.status {
                StockStatus::Ok => rollup.ok_count += 1,
                StockStatus::MainShortTransfer => rollup.transfer_count += 1,
                StockStatus::OutOfStock => rollup.out_of_stock_count += 1,
            }
            rollup.total_units += line.required_qty;
            rollup.total_shortage += line.remaining_shortage;

            if line.remaining_shortage > 0 {
                summary.shortage_lines.push(ShortageLine {
                    sku: line.sku.clone(),
                    destination: line.destination.clone(),
                    required_qty: line.required_qty,
                    shortage: line.remaining_shortage,
                });
            }
        }
        summary
            .shortage_lines
            .sort_by(|a, b| a.sku.cmp(&b.sku).then_with(|| a.destination.cmp(&b.destination)));
        summary
    }
}

// ==========================================
// ReportTotals - 报告顶层计数
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTotals {
    /// 参与对账的 SKU 总数 (母子单并集)
    pub total_skus: usize,
    /// 存在数量差异的 SKU 数
    pub mismatched_skus: usize,
    /// 全部目的地垛数合计
    pub total_pallets: usize,
    /// 缺货件数合计
    pub total_shortage_units: i64,
}

// ==========================================
// Report - 一次审核的完整产出
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub line_validations: Vec<LineValidation>,
    pub mismatches: Vec<AllocationMismatch>,
    pub assignments: Vec<PalletAssignment>,
    pub summary: ValidationSummary,
    pub totals: ReportTotals,
    /// 字段级解析告警 (入口收口阶段产出)
    pub warnings: Vec<FieldIssue>,
}

impl Report {
    /// 空输入对应的空报告 (各计数为 0, 非错误)
    pub fn empty() -> Self {
        Self::default()
    }
}
