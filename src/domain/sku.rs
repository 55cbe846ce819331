// ==========================================
// PO 审核系统 - SKU 商品主数据
// ==========================================
// 职责: 承载价格与装箱物性数据, 只读参考数据
// 红线: 引擎不修改主数据, 未登记 SKU 使用兜底物性值
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// 未登记 SKU 的兜底物性值 (与外部数据装载器保持一致)
pub const DEFAULT_CARTON_WEIGHT_LBS: f64 = 15.0;
pub const DEFAULT_CARTON_HEIGHT_IN: f64 = 10.0;
pub const DEFAULT_CARTON_LENGTH_IN: f64 = 12.0;
pub const DEFAULT_CARTON_WIDTH_IN: f64 = 12.0;
pub const DEFAULT_UNITS_PER_CARTON: i64 = 1;

// ==========================================
// SkuMaster - SKU 主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuMaster {
    // ===== 标识 =====
    pub sku: String,

    // ===== 商品信息 =====
    #[serde(default)]
    pub product_name: String,

    // 系统单价; 缺失时跳过比价
    #[serde(default)]
    pub unit_price: Option<f64>,

    // ===== 装箱物性 =====
    #[serde(default = "default_units_per_carton")]
    pub units_per_carton: i64,
    #[serde(default = "default_carton_weight")]
    pub carton_weight_lbs: f64,
    #[serde(default = "default_carton_height")]
    pub carton_height_in: f64,
    // 箱底尺寸为参考数据, 码垛上限仅约束高度与重量
    #[serde(default = "default_carton_length")]
    pub carton_length_in: f64,
    #[serde(default = "default_carton_width")]
    pub carton_width_in: f64,
}

fn default_units_per_carton() -> i64 {
    DEFAULT_UNITS_PER_CARTON
}
fn default_carton_weight() -> f64 {
    DEFAULT_CARTON_WEIGHT_LBS
}
fn default_carton_height() -> f64 {
    DEFAULT_CARTON_HEIGHT_IN
}
fn default_carton_length() -> f64 {
    DEFAULT_CARTON_LENGTH_IN
}
fn default_carton_width() -> f64 {
    DEFAULT_CARTON_WIDTH_IN
}

impl SkuMaster {
    /// 为未登记 SKU 构造兜底主数据
    ///
    /// # 参数
    /// - `sku`: SKU 编码
    pub fn fallback(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            product_name: String::new(),
            unit_price: None,
            units_per_carton: DEFAULT_UNITS_PER_CARTON,
            carton_weight_lbs: DEFAULT_CARTON_WEIGHT_LBS,
            carton_height_in: DEFAULT_CARTON_HEIGHT_IN,
            carton_length_in: DEFAULT_CARTON_LENGTH_IN,
            carton_width_in: DEFAULT_CARTON_WIDTH_IN,
        }
    }

    /// 每箱装量, 兜底为 1 (防止除零)
    pub fn effective_units_per_carton(&self) -> i64 {
        self.units_per_carton.max(1)
    }
}

// ==========================================
// SkuCatalog - SKU 主数据目录
// ==========================================
// 运行期间只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkuCatalog {
    masters: HashMap<String, SkuMaster>,
}

impl SkuCatalog {
    pub fn new() -> Self {
        Self {
            masters: HashMap::new(),
        }
    }

    /// 登记一条主数据 (同 SKU 覆盖)
    pub fn insert(&mut self, master: SkuMaster) {
        self.masters.insert(master.sku.clone(), master);
    }

    /// 查询主数据; 未登记返回 None (由调用方决定兜底)
    pub fn get(&self, sku: &str) -> Option<&SkuMaster> {
        self.masters.get(sku)
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }
}

impl FromIterator<SkuMaster> for SkuCatalog {
    fn from_iter<T: IntoIterator<Item = SkuMaster>>(iter: T) -> Self {
        let mut catalog = SkuCatalog::new();
        for master in iter {
            catalog.insert(master);
        }
        catalog
    }
}
