// ==========================================
// PO 审核系统 - 审核编排器
// ==========================================
// 职责: 串联配置校验 → 入口收口 → 库存校验 → 母子单对账 → 分目的地码垛 → 组装报告
// 红线: 配置非法整体拒绝; 结构性输入错误整体中止, 不产出半成品报告;
//       取消仅在目的地之间生效, 半垛状态一律丢弃
// ==========================================

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::domain::order::{Destination, FieldIssue, OrderLine, RawOrderLine};
use crate::domain::report::{Report, ReportTotals, ValidationSummary};
use crate::domain::sku::SkuCatalog;
use crate::domain::stock::StockSnapshot;
use crate::domain::types::MismatchKind;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::packer::PalletPacker;
use crate::engine::reconciler::AllocationReconciler;
use crate::engine::validator::InventoryValidator;

// ==========================================
// CancelFlag - 协作式取消句柄
// ==========================================
// 廉价可克隆, 由调用方持有触发端
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ==========================================
// ReviewOrchestrator - 审核编排器
// ==========================================
pub struct ReviewOrchestrator;

impl ReviewOrchestrator {
    /// 完整审核流程 (不带取消)
    pub fn run(
        parent_raw: &[RawOrderLine],
        child_raw: &[RawOrderLine],
        snapshot: &StockSnapshot,
        catalog: &SkuCatalog,
        config: &EngineConfig,
    ) -> EngineResult<Report> {
        Self::run_with_cancel(parent_raw, child_raw, snapshot, catalog, config, &CancelFlag::new())
    }

    /// 完整审核流程 (带协作式取消)
    ///
    /// # 流程
    /// 1. 配置校验 (非法即整体拒绝, 不做任何计算)
    /// 2. 入口收口 (结构性错误中止; 字段级失败兜底 + 告警)
    /// 3. 库存校验 (母单与子单全部行, 保持输入顺序)
    /// 4. 母子单对账 (SKU 升序)
    /// 5. 分目的地码垛 (目的地升序; 每个目的地前检查取消标志)
    /// 6. 组装报告 (汇总 + 顶层计数)
    #[instrument(skip_all, fields(
        parent_count = parent_raw.len(),
        child_count = child_raw.len()
    ))]
    pub fn run_with_cancel(
        parent_raw: &[RawOrderLine],
        child_raw: &[RawOrderLine],
        snapshot: &StockSnapshot,
        catalog: &SkuCatalog,
        config: &EngineConfig,
        cancel: &CancelFlag,
    ) -> EngineResult<Report> {
        // ===== 步骤 1: 配置校验 =====
        config.validate()?;

        // 空输入产出空报告, 非错误
        if parent_raw.is_empty() && child_raw.is_empty() {
            info!("输入为空, 产出空报告");
            return Ok(Report::empty());
        }

        // ===== 步骤 2: 入口收口 =====
        let mut warnings: Vec<FieldIssue> = Vec::new();
        let parent_lines = Self::intake(parent_raw, &mut warnings)?;
        let child_lines = Self::intake(child_raw, &mut warnings)?;
        info!(
            parent_lines = parent_lines.len(),
            child_lines = child_lines.len(),
            warning_count = warnings.len(),
            "入口收口完成"
        );

        // ===== 步骤 3: 库存校验 =====
        let validator = InventoryValidator::new(catalog, snapshot, config.safety_stock);
        let mut line_validations = validator.validate_batch(&parent_lines);
        line_validations.extend(validator.validate_batch(&child_lines));
        let summary = ValidationSummary::from_lines(&line_validations);

        // ===== 步骤 4: 母子单对账 =====
        let mismatches = AllocationReconciler::reconcile(&parent_lines, &child_lines);
        let mismatched_skus = mismatches
            .iter()
            .filter(|m| m.kind != MismatchKind::Match)
            .count();

        // ===== 步骤 5: 分目的地码垛 =====
        // 子单按目的地分组 (BTreeMap 键序即码垛顺序)
        let mut lines_by_dc: BTreeMap<String, Vec<OrderLine>> = BTreeMap::new();
        for line in &child_lines {
            if let Destination::Dc(dc_id) = &line.destination {
                lines_by_dc.entry(dc_id.clone()).or_default().push(line.clone());
            }
        }

        let packer = PalletPacker::new(catalog, config.packing, config.pack_mode);
        let mut assignments = Vec::with_capacity(lines_by_dc.len());
        for (dc_id, lines) in &lines_by_dc {
            if cancel.is_cancelled() {
                warn!(dc_id = %dc_id, "运行被取消, 丢弃未完成的码垛结果");
                return Err(EngineError::Cancelled {
                    stage: format!("pack:{}", dc_id),
                });
            }
            assignments.push(packer.pack_destination(dc_id, lines));
        }

        // ===== 步骤 6: 组装报告 =====
        let totals = ReportTotals {
            total_skus: mismatches.len(),
            mismatched_skus,
            total_pallets: assignments.iter().map(|a| a.total_pallets()).sum(),
            total_shortage_units: summary.total_shortage,
        };
        info!(
            total_skus = totals.total_skus,
            mismatched_skus = totals.mismatched_skus,
            total_pallets = totals.total_pallets,
            total_shortage_units = totals.total_shortage_units,
            "审核完成"
        );

        Ok(Report {
            line_validations,
            mismatches,
            assignments,
            summary,
            totals,
            warnings,
        })
    }

    /// 批量收口松散记录; 结构性错误直接上抛
    fn intake(
        raw_lines: &[RawOrderLine],
        warnings: &mut Vec<FieldIssue>,
    ) -> EngineResult<Vec<OrderLine>> {
        let mut lines = Vec::with_capacity(raw_lines.len());
        for raw in raw_lines {
            let (line, issues) = OrderLine::from_raw(raw)?;
            warnings.extend(issues);
            lines.push(line);
        }
        Ok(lines)
    }
}
