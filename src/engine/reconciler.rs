// ==========================================
// PO 审核系统 - 母子单对账引擎
// ==========================================
// 职责: 母单与子单按 SKU 聚合比对, 产出差异分类
// 红线: 输出按 SKU 升序, 与输入顺序无关; 相同输入逐字节一致
// ==========================================

use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::domain::order::OrderLine;
use crate::domain::report::AllocationMismatch;
use crate::domain::types::MismatchKind;

// ==========================================
// SideTotals - 单侧 (母单或子单) 聚合
// ==========================================
#[derive(Debug, Default, Clone)]
struct SideTotals {
    qty: i64,
    amount: f64,
    has_amount: bool,
    by_destination: BTreeMap<String, i64>,
}

impl SideTotals {
    fn absorb(&mut self, line: &OrderLine) {
        self.qty += line.quantity;
        if let Some(price) = line.unit_price {
            self.amount += price * line.quantity as f64;
            self.has_amount = true;
        }
        *self
            .by_destination
            .entry(line.destination.as_str().to_string())
            .or_insert(0) += line.quantity;
    }

    fn amount(&self) -> Option<f64> {
        self.has_amount.then_some(self.amount)
    }
}

// ==========================================
// AllocationReconciler - 对账引擎
// ==========================================
pub struct AllocationReconciler;

impl AllocationReconciler {
    /// 母子单对账
    ///
    /// # 规则
    /// 1. 两侧各按 SKU 聚合数量与金额 (缺价行金额按 0 计)
    /// 2. 取 SKU 并集, diff = 子单合计 - 母单合计
    /// 3. 分类: 仅母单 → UNDER; 仅子单 → EXTRA;
    ///    diff = 0 → MATCH; diff > 0 → OVER; diff < 0 → UNDER
    /// 4. 输出按 SKU 升序
    #[instrument(skip(parent_lines, child_lines), fields(
        parent_count = parent_lines.len(),
        child_count = child_lines.len()
    ))]
    pub fn reconcile(
        parent_lines: &[OrderLine],
        child_lines: &[OrderLine],
    ) -> Vec<AllocationMismatch> {
        let mut parent_totals: BTreeMap<String, SideTotals> = BTreeMap::new();
        for line in parent_lines {
            parent_totals.entry(line.sku.clone()).or_default().absorb(line);
        }

        let mut child_totals: BTreeMap<String, SideTotals> = BTreeMap::new();
        for line in child_lines {
            child_totals.entry(line.sku.clone()).or_default().absorb(line);
        }

        // SKU 并集 (BTreeMap 键序即升序输出序)
        let mut skus: BTreeMap<&str, ()> = BTreeMap::new();
        for sku in parent_totals.keys() {
            skus.insert(sku, ());
        }
        for sku in child_totals.keys() {
            skus.insert(sku, ());
        }

        let mut mismatches = Vec::with_capacity(skus.len());
        for (sku, ()) in skus {
            let parent = parent_totals.get(sku);
            let child = child_totals.get(sku);

            let parent_qty = parent.map_or(0, |t| t.qty);
            let child_qty = child.map_or(0, |t| t.qty);
            let diff = child_qty - parent_qty;

            let kind = match (parent, child) {
                (Some(_), None) => MismatchKind::Under,
                (None, Some(_)) => MismatchKind::Extra,
                _ => match diff {
                    0 => MismatchKind::Match,
                    d if d > 0 => MismatchKind::Over,
                    _ => MismatchKind::Under,
                },
            };

            if kind != MismatchKind::Match {
                warn!(sku = %sku, parent_qty, child_qty, diff, kind = %kind, "母子单数量不一致");
            } else {
                debug!(sku = %sku, qty = parent_qty, "母子单数量一致");
            }

            mismatches.push(AllocationMismatch {
                sku: sku.to_string(),
                parent_qty,
                child_qty,
                diff,
                parent_amount: parent.and_then(|t| t.amount()),
                child_amount: child.and_then(|t| t.amount()),
                kind,
                by_destination: child.map(|t| t.by_destination.clone()).unwrap_or_default(),
            });
        }
        mismatches
    }
}
