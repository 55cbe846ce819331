// ==========================================
// PO 审核系统 - 垛位领域模型
// ==========================================
// 红线: 码垛约束优先于装载顺序, 任一上限将被突破即封垛
// 用途: 单垛累加器 + 按目的地的码垛结果
// ==========================================

use serde::{Deserialize, Serialize};

use crate::config::PackingConstraints;
use crate::domain::types::{PackMode, PackViolationType};

// ==========================================
// PalletItem - 垛上单 SKU 条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletItem {
    pub sku: String,
    pub cartons: i64,
}

// ==========================================
// Pallet - 封垛结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    // ===== 标识 (目的地内 1 起算) =====
    pub pallet_no: u32,

    // ===== 装载明细 (按落垛顺序) =====
    pub items: Vec<PalletItem>,
    pub total_cartons: i64,

    // ===== 实际占用 =====
    pub stack_height_in: f64,  // 堆叠高度 (不含托盘)
    pub gross_weight_lbs: f64, // 总重 (含托盘自重)

    // ===== 利用率 (供下游报表) =====
    pub height_ratio: f64,
    pub weight_ratio: f64,
}

// ==========================================
// Trait: PalletCapacity
// ==========================================
// 用途: 码垛策略的约束检查接口
pub trait PalletCapacity {
    /// 检查再落一箱是否仍满足两项上限
    fn can_add_carton(&self, height_in: f64, weight_lbs: f64) -> bool;

    /// 剩余可用高度
    fn remaining_height_in(&self) -> f64;

    /// 剩余可用重量
    fn remaining_weight_lbs(&self) -> f64;
}

// ==========================================
// PalletBuilder - 单垛累加器
// ==========================================
// 红线: 单目的地内严格串行使用, 不得跨并发写入
#[derive(Debug, Clone)]
pub struct PalletBuilder {
    constraints: PackingConstraints,
    pallet_no: u32,
    items: Vec<PalletItem>,
    total_cartons: i64,
    stack_height_in: f64,
    gross_weight_lbs: f64,
}

impl PalletBuilder {
    /// 开垛: 高度归零, 总重以托盘自重起算
    pub fn new(pallet_no: u32, constraints: PackingConstraints) -> Self {
        Self {
            constraints,
            pallet_no,
            items: Vec::new(),
            total_cartons: 0,
            stack_height_in: 0.0,
            gross_weight_lbs: constraints.pallet_tare_weight_lbs,
        }
    }

    /// 落一箱 (调用方必须先经 can_add_carton 检查)
    ///
    /// 同 SKU 连续落箱合并为一条明细
    pub fn add_carton(&mut self, sku: &str, height_in: f64, weight_lbs: f64) {
        match self.items.iter_mut().find(|item| item.sku == sku) {
            Some(item) => item.cartons += 1,
            None => self.items.push(PalletItem {
                sku: sku.to_string(),
                cartons: 1,
            }),
        }
        self.total_cartons += 1;
        self.stack_height_in += height_in;
        self.gross_weight_lbs += weight_lbs;
    }

    pub fn is_empty(&self) -> bool {
        self.total_cartons == 0
    }

    pub fn pallet_no(&self) -> u32 {
        self.pallet_no
    }

    /// 封垛, 产出不可变结果
    pub fn finish(self) -> Pallet {
        let height_ratio = if self.constraints.max_stack_height_in > 0.0 {
            self.stack_height_in / self.constraints.max_stack_height_in
        } else {
            0.0
        };
        let weight_ratio = if self.constraints.max_pallet_weight_lbs > 0.0 {
            self.gross_weight_lbs / self.constraints.max_pallet_weight_lbs
        } else {
            0.0
        };
        Pallet {
            pallet_no: self.pallet_no,
            items: self.items,
            total_cartons: self.total_cartons,
            stack_height_in: self.stack_height_in,
            gross_weight_lbs: self.gross_weight_lbs,
            height_ratio,
            weight_ratio,
        }
    }
}

impl PalletCapacity for PalletBuilder {
    fn can_add_carton(&self, height_in: f64, weight_lbs: f64) -> bool {
        self.stack_height_in + height_in <= self.constraints.max_stack_height_in
            && self.gross_weight_lbs + weight_lbs <= self.constraints.max_pallet_weight_lbs
    }

    fn remaining_height_in(&self) -> f64 {
        (self.constraints.max_stack_height_in - self.stack_height_in).max(0.0)
    }

    fn remaining_weight_lbs(&self) -> f64 {
        (self.constraints.max_pallet_weight_lbs - self.gross_weight_lbs).max(0.0)
    }
}

// ==========================================
// PackDiagnostic - 码垛诊断条目
// ==========================================
// 依据: 单箱超限不得静默丢弃, 必须显式上报由人工处置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackDiagnostic {
    pub violation: PackViolationType,
    pub sku: String,
    pub cartons: i64,
    pub carton_height_in: f64,
    pub carton_weight_lbs: f64,
    pub message: String,
}

// ==========================================
// PalletAssignment - 按目的地的码垛结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletAssignment {
    pub dc_id: String,
    pub mode: PackMode,
    pub pallets: Vec<Pallet>,
    pub diagnostics: Vec<PackDiagnostic>,
}

impl PalletAssignment {
    pub fn total_pallets(&self) -> usize {
        self.pallets.len()
    }

    pub fn total_cartons(&self) -> i64 {
        self.pallets.iter().map(|p| p.total_cartons).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_constraints() -> PackingConstraints {
        PackingConstraints {
            max_stack_height_in: 30.0,
            max_pallet_weight_lbs: 100.0,
            pallet_tare_weight_lbs: 10.0,
        }
    }

    #[test]
    fn test_builder_starts_with_tare_weight() {
        let builder = PalletBuilder::new(1, test_constraints());
        assert!(builder.is_empty());
        assert_eq!(builder.remaining_weight_lbs(), 90.0);
        assert_eq!(builder.remaining_height_in(), 30.0);
    }

    #[test]
    fn test_can_add_carton_respects_both_bounds() {
        let mut builder = PalletBuilder::new(1, test_constraints());
        assert!(builder.can_add_carton(10.0, 40.0));
        builder.add_carton("A", 10.0, 40.0);
        // 高度仍够, 重量不够 (10 + 40 + 60 > 100)
        assert!(!builder.can_add_carton(10.0, 60.0));
        // 重量够, 高度不够
        assert!(!builder.can_add_carton(25.0, 10.0));
    }

    #[test]
    fn test_same_sku_cartons_merge() {
        let mut builder = PalletBuilder::new(1, test_constraints());
        builder.add_carton("A", 5.0, 10.0);
        builder.add_carton("A", 5.0, 10.0);
        builder.add_carton("B", 5.0, 10.0);
        let pallet = builder.finish();
        assert_eq!(pallet.items.len(), 2);
        assert_eq!(pallet.items[0].cartons, 2);
        assert_eq!(pallet.total_cartons, 3);
    }

    #[test]
    fn test_finish_ratios() {
        let mut builder = PalletBuilder::new(2, test_constraints());
        builder.add_carton("A", 15.0, 40.0);
        let pallet = builder.finish();
        assert_eq!(pallet.pallet_no, 2);
        assert_eq!(pallet.stack_height_in, 15.0);
        assert_eq!(pallet.gross_weight_lbs, 50.0);
        assert!((pallet.height_ratio - 0.5).abs() < 1e-9);
        assert!((pallet.weight_ratio - 0.5).abs() < 1e-9);
    }
}
