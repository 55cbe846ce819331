// ==========================================
// PO 审核系统 - 码垛策略
// ==========================================
// 职责: 码垛策略抽象与两种落垛实现 (单品码垛 / 混装填充)
// 红线: 同一目的地内严格串行落箱; 超限单箱只出诊断, 不落垛不丢弃;
//       SKU 按升序遍历, 相同输入产出逐字节一致
// ==========================================

use tracing::{debug, warn};

use crate::config::PackingConstraints;
use crate::domain::pallet::{
    PackDiagnostic, Pallet, PalletAssignment, PalletBuilder, PalletCapacity,
};
use crate::domain::types::{PackMode, PackViolationType};
use crate::i18n::t_with_args;

// ==========================================
// CartonDemand - 单 SKU 的落垛需求
// ==========================================
// 由 PalletPacker 按商品主档折算产出, SKU 升序传入策略
#[derive(Debug, Clone, PartialEq)]
pub struct CartonDemand {
    pub sku: String,
    pub cartons: i64,
    pub carton_height_in: f64,
    pub carton_weight_lbs: f64,
}

impl CartonDemand {
    /// 单箱自身即超限 (高度超上限, 或托盘自重加单箱重量超总重上限)
    fn is_oversized(&self, constraints: &PackingConstraints) -> bool {
        self.carton_height_in > constraints.max_stack_height_in
            || constraints.pallet_tare_weight_lbs + self.carton_weight_lbs
                > constraints.max_pallet_weight_lbs
    }

    fn oversized_diagnostic(&self) -> PackDiagnostic {
        PackDiagnostic {
            violation: PackViolationType::OversizedCarton,
            sku: self.sku.clone(),
            cartons: self.cartons,
            carton_height_in: self.carton_height_in,
            carton_weight_lbs: self.carton_weight_lbs,
            message: t_with_args("pack.oversized_carton", &[("sku", &self.sku)]),
        }
    }
}

// ==========================================
// Trait: PackingStrategy
// ==========================================
// 对象安全, 由 PackMode 选择具体实现
pub trait PackingStrategy {
    fn mode(&self) -> PackMode;

    /// 为单一目的地码垛
    ///
    /// # 约定
    /// - demands 已按 SKU 升序
    /// - 数量为 0 的需求由上游过滤, 不传入
    fn pack_destination(
        &self,
        dc_id: &str,
        demands: &[CartonDemand],
        constraints: &PackingConstraints,
    ) -> PalletAssignment;
}

/// 按码垛模式选择策略实现
pub fn strategy_for(mode: PackMode) -> Box<dyn PackingStrategy> {
    match mode {
        PackMode::SingleSku => Box::new(SingleSkuGreedy),
        PackMode::MixedFill => Box::new(MixedFill),
    }
}

// ==========================================
// SingleSkuGreedy - 单品贪心码垛 (默认)
// ==========================================
// 规则: 一垛只装一个 SKU; 逐箱落垛, 任一上限将被突破即封垛开新垛;
//       SKU 切换处强制封垛
pub struct SingleSkuGreedy;

impl PackingStrategy for SingleSkuGreedy {
    fn mode(&self) -> PackMode {
        PackMode::SingleSku
    }

    fn pack_destination(
        &self,
        dc_id: &str,
        demands: &[CartonDemand],
        constraints: &PackingConstraints,
    ) -> PalletAssignment {
        let mut pallets: Vec<Pallet> = Vec::new();
        let mut diagnostics: Vec<PackDiagnostic> = Vec::new();
        let mut next_no: u32 = 1;

        for demand in demands {
            if demand.is_oversized(constraints) {
                warn!(
                    dc_id = %dc_id,
                    sku = %demand.sku,
                    height = demand.carton_height_in,
                    weight = demand.carton_weight_lbs,
                    "单箱超限, 跳过落垛并出具诊断"
                );
                diagnostics.push(demand.oversized_diagnostic());
                continue;
            }

            let mut builder = PalletBuilder::new(next_no, *constraints);
            for _ in 0..demand.cartons {
                if !builder.can_add_carton(demand.carton_height_in, demand.carton_weight_lbs) {
                    // 封垛开新垛
                    next_no += 1;
                    let full = std::mem::replace(&mut builder, PalletBuilder::new(next_no, *constraints));
                    pallets.push(full.finish());
                }
                builder.add_carton(&demand.sku, demand.carton_height_in, demand.carton_weight_lbs);
            }
            // SKU 边界强制封垛
            if !builder.is_empty() {
                next_no += 1;
                pallets.push(builder.finish());
            }
        }

        debug!(dc_id = %dc_id, pallet_count = pallets.len(), "单品码垛完成");
        PalletAssignment {
            dc_id: dc_id.to_string(),
            mode: PackMode::SingleSku,
            pallets,
            diagnostics,
        }
    }
}

// ==========================================
// MixedFill - 混装填充码垛
// ==========================================
// 规则: 开垛后跨 SKU 共享, 装不下才封垛; 同 SKU 条目在垛内合并;
//       遍历顺序仍为 SKU 升序, 结果确定
pub struct MixedFill;

impl PackingStrategy for MixedFill {
    fn mode(&self) -> PackMode {
        PackMode::MixedFill
    }

    fn pack_destination(
        &self,
        dc_id: &str,
        demands: &[CartonDemand],
        constraints: &PackingConstraints,
    ) -> PalletAssignment {
        let mut pallets: Vec<Pallet> = Vec::new();
        let mut diagnostics: Vec<PackDiagnostic> = Vec::new();
        let mut next_no: u32 = 1;
        let mut builder = PalletBuilder::new(next_no, *constraints);

        for demand in demands {
            if demand.is_oversized(constraints) {
                warn!(
                    dc_id = %dc_id,
                    sku = %demand.sku,
                    height = demand.carton_height_in,
                    weight = demand.carton_weight_lbs,
                    "单箱超限, 跳过落垛并出具诊断"
                );
                diagnostics.push(demand.oversized_diagnostic());
                continue;
            }

            for _ in 0..demand.cartons {
                if !builder.can_add_carton(demand.carton_height_in, demand.carton_weight_lbs) {
                    next_no += 1;
                    let full = std::mem::replace(&mut builder, PalletBuilder::new(next_no, *constraints));
                    pallets.push(full.finish());
                }
                builder.add_carton(&demand.sku, demand.carton_height_in, demand.carton_weight_lbs);
            }
        }

        if !builder.is_empty() {
            pallets.push(builder.finish());
        }

        debug!(dc_id = %dc_id, pallet_count = pallets.len(), "混装码垛完成");
        PalletAssignment {
            dc_id: dc_id.to_string(),
            mode: PackMode::MixedFill,
            pallets,
            diagnostics,
        }
    }
}
