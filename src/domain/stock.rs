// ==========================================
// PO 审核系统 - 库存快照
// ==========================================
// 职责: 承载两级库存 (MAIN 主仓 / SUB 副仓) 的只读快照
// 红线: 未登记 SKU 按两仓均为 0 处理, 不视为错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// StockEntry - 单 SKU 两仓库存
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockEntry {
    pub main: i64, // 主仓在库量
    pub sub: i64,  // 副仓在库量
}

impl StockEntry {
    pub const ZERO: StockEntry = StockEntry { main: 0, sub: 0 };

    /// 构造库存条目; 负数输入按 0 收口 (装载边界保证非负, 此处兜底)
    pub fn new(main: i64, sub: i64) -> Self {
        Self {
            main: main.max(0),
            sub: sub.max(0),
        }
    }

    /// 两仓合计
    pub fn total(&self) -> i64 {
        self.main + self.sub
    }
}

// ==========================================
// StockSnapshot - 库存快照
// ==========================================
// 由外部数据装载器生成, 引擎运行期间只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    entries: HashMap<String, StockEntry>,
}

impl StockSnapshot {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 登记一条库存 (同 SKU 覆盖)
    pub fn insert(&mut self, sku: &str, entry: StockEntry) {
        self.entries.insert(sku.to_string(), entry);
    }

    /// 查询库存; 未登记 SKU 返回零库存条目
    pub fn get(&self, sku: &str) -> StockEntry {
        self.entries.get(sku).copied().unwrap_or(StockEntry::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, StockEntry)> for StockSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, StockEntry)>>(iter: T) -> Self {
        let mut snapshot = StockSnapshot::new();
        for (sku, entry) in iter {
            snapshot.insert(&sku, entry);
        }
        snapshot
    }
}
