// ==========================================
// PO 审核系统 - 库存校验引擎
// ==========================================
// 职责: 组合 ValidatorCore 纯逻辑, 按行产出 LineValidation
// 红线: 库存快照与商品主档只读; 快照缺失 SKU 按 0/0 库存处理, 不报错
// ==========================================

use tracing::{debug, instrument, warn};

use crate::domain::order::OrderLine;
use crate::domain::report::{LineValidation, ValidationSummary};
use crate::domain::sku::SkuCatalog;
use crate::domain::stock::StockSnapshot;
use crate::domain::types::{PriceCheck, StockStatus};
use crate::engine::validator_core::ValidatorCore;

// ==========================================
// InventoryValidator - 库存校验引擎
// ==========================================
pub struct InventoryValidator<'a> {
    catalog: &'a SkuCatalog,
    stock: &'a StockSnapshot,
    safety_stock: i64,
}

impl<'a> InventoryValidator<'a> {
    pub fn new(catalog: &'a SkuCatalog, stock: &'a StockSnapshot, safety_stock: i64) -> Self {
        Self {
            catalog,
            stock,
            safety_stock,
        }
    }

    /// 校验单行: 三档库存判定 + 价格比对
    pub fn validate_line(&self, line: &OrderLine) -> LineValidation {
        let entry = self.stock.get(&line.sku);
        let (classification, mut reasons) = ValidatorCore::classify_stock(
            line.quantity,
            entry.main,
            entry.sub,
            self.safety_stock,
        );

        let catalog_price = self.catalog.get(&line.sku).and_then(|m| m.unit_price);
        let (price_check, price_warning) =
            ValidatorCore::compare_price(line.unit_price, catalog_price);
        if let Some(warning) = price_warning {
            reasons.push(format!("PRICE_MISMATCH: {}", warning));
        }

        LineValidation {
            order_no: line.order_no.clone(),
            sku: line.sku.clone(),
            destination: line.destination.clone(),
            required_qty: line.quantity,
            main_stock: entry.main,
            sub_stock: entry.sub,
            total_stock: entry.total(),
            status: classification.status,
            transfer_from_sub: classification.transfer_from_sub,
            remaining_shortage: classification.remaining_shortage,
            po_unit_price: line.unit_price,
            catalog_unit_price: catalog_price,
            price_check,
            reasons,
        }
    }

    /// 批量校验 (保持输入顺序), 缺货与价差逐行告警
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub fn validate_batch(&self, lines: &[OrderLine]) -> Vec<LineValidation> {
        let mut results = Vec::with_capacity(lines.len());
        for line in lines {
            let validation = self.validate_line(line);
            match validation.status {
                StockStatus::Ok => {
                    debug!(sku = %validation.sku, qty = validation.required_qty, "库存校验通过");
                }
                StockStatus::MainShortTransfer => {
                    warn!(
                        sku = %validation.sku,
                        transfer = validation.transfer_from_sub,
                        "MAIN 仓不足, 需从 SUB 仓调拨"
                    );
                }
                StockStatus::OutOfStock => {
                    warn!(
                        sku = %validation.sku,
                        shortage = validation.remaining_shortage,
                        "库存不足, 存在缺口"
                    );
                }
            }
            if validation.price_check == PriceCheck::Mismatch {
                warn!(
                    sku = %validation.sku,
                    po_price = ?validation.po_unit_price,
                    catalog_price = ?validation.catalog_unit_price,
                    "单价与系统价不一致"
                );
            }
            results.push(validation);
        }
        results
    }

    /// 批量校验并聚合汇总
    pub fn validate_with_summary(
        &self,
        lines: &[OrderLine],
    ) -> (Vec<LineValidation>, ValidationSummary) {
        let validations = self.validate_batch(lines);
        let summary = ValidationSummary::from_lines(&validations);
        (validations, summary)
    }
}
