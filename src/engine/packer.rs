// ==========================================
// PO 审核系统 - 码垛引擎
// ==========================================
// 职责: 订购量折算整箱需求, 委托码垛策略产出垛位分配
// 红线: 商品主档缺失 SKU 按兜底主档折算并告警, 不中止;
//       折算一律向上取整, 不得拆箱
// ==========================================

use std::collections::BTreeMap;
use tracing::{instrument, warn};

use crate::config::PackingConstraints;
use crate::domain::order::OrderLine;
use crate::domain::pallet::PalletAssignment;
use crate::domain::sku::{SkuCatalog, SkuMaster};
use crate::domain::types::PackMode;
use crate::engine::strategy::{strategy_for, CartonDemand};

// ==========================================
// PalletPacker - 码垛引擎
// ==========================================
pub struct PalletPacker<'a> {
    catalog: &'a SkuCatalog,
    constraints: PackingConstraints,
    mode: PackMode,
}

impl<'a> PalletPacker<'a> {
    pub fn new(catalog: &'a SkuCatalog, constraints: PackingConstraints, mode: PackMode) -> Self {
        Self {
            catalog,
            constraints,
            mode,
        }
    }

    /// 单一目的地码垛
    ///
    /// # 规则
    /// 1. 按 SKU 聚合订购量 (BTreeMap, 升序遍历)
    /// 2. 整箱折算: cartons = ceil(qty / units_per_carton)
    /// 3. 数量 0 的 SKU 不产生需求
    /// 4. 委托 PackMode 对应的策略落垛
    #[instrument(skip(self, lines), fields(dc_id = %dc_id, line_count = lines.len()))]
    pub fn pack_destination(&self, dc_id: &str, lines: &[OrderLine]) -> PalletAssignment {
        let mut qty_by_sku: BTreeMap<String, i64> = BTreeMap::new();
        for line in lines {
            *qty_by_sku.entry(line.sku.clone()).or_insert(0) += line.quantity;
        }

        let mut demands = Vec::with_capacity(qty_by_sku.len());
        for (sku, qty) in qty_by_sku {
            if qty <= 0 {
                continue;
            }
            let fallback;
            let master: &SkuMaster = match self.catalog.get(&sku) {
                Some(master) => master,
                None => {
                    warn!(sku = %sku, "商品主档缺失, 按兜底主档折算整箱");
                    fallback = SkuMaster::fallback(&sku);
                    &fallback
                }
            };
            let units_per_carton = master.effective_units_per_carton();
            let cartons = (qty + units_per_carton - 1) / units_per_carton;
            demands.push(CartonDemand {
                sku,
                cartons,
                carton_height_in: master.carton_height_in,
                carton_weight_lbs: master.carton_weight_lbs,
            });
        }

        strategy_for(self.mode).pack_destination(dc_id, &demands, &self.constraints)
    }
}
