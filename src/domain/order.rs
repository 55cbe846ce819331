// ==========================================
// PO 审核系统 - 订单行与类型化入口
// ==========================================
// 职责: 把解析协作方产出的松散记录收口为类型化订单行
// 红线: sku 缺失为结构性错误, 整体中止;
//       数量/价格字段解析失败按 0 兜底并记录告警, 继续处理
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::engine::error::EngineError;

// 母单 (Mother PO) 目的地哨兵值, 与上游解析约定一致
pub const PARENT_DEST_SENTINEL: &str = "N/A";

// ==========================================
// Destination - 订单行目的地
// ==========================================
// 母单行使用哨兵值 "N/A", 子单行携带配送中心 (DC) 编号
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Destination {
    Parent,
    Dc(String),
}

impl Destination {
    /// 从原始字符串解析目的地; 空白或哨兵值视为母单
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PARENT_DEST_SENTINEL {
            Destination::Parent
        } else {
            Destination::Dc(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Destination::Parent => PARENT_DEST_SENTINEL,
            Destination::Dc(id) => id.as_str(),
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Destination::Parent)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 序列化为目的地字符串 (母单即哨兵值), 保证报告为扁平嵌套结构
impl Serialize for Destination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Destination::from_raw(&s))
    }
}

// ==========================================
// RawOrderLine - 解析协作方产出的松散记录
// ==========================================
// 数值字段保持原始文本, 由 from_raw 统一收口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderLine {
    pub order_no: String,
    pub sku: String,
    pub quantity: String,
    #[serde(default)]
    pub unit_price: Option<String>,
    #[serde(default)]
    pub dc_id: String,
}

// ==========================================
// FieldIssue - 字段级解析告警
// ==========================================
// 依据: 数值转换失败不得静默吞掉, 必须留痕
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub order_no: String,
    pub sku: String,
    pub field: String,
    pub raw_value: String,
    pub message: String,
}

// ==========================================
// OrderLine - 类型化订单行
// ==========================================
// 创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_no: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    pub destination: Destination,
}

impl OrderLine {
    /// 从类型化字段直接构造 (测试与内部调用入口)
    ///
    /// # 错误
    /// - sku 为空白 → `MissingField`
    pub fn new(
        order_no: &str,
        sku: &str,
        quantity: i64,
        unit_price: Option<f64>,
        destination: Destination,
    ) -> Result<Self, EngineError> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(EngineError::missing_field(order_no, "sku", "sku 为空"));
        }
        Ok(Self {
            order_no: order_no.to_string(),
            sku: sku.to_string(),
            quantity: quantity.max(0),
            unit_price: unit_price.filter(|p| *p >= 0.0),
            destination,
        })
    }

    /// 从松散记录收口为类型化订单行
    ///
    /// # 规则
    /// 1. sku 空白 → 结构性错误, 整体中止
    /// 2. 数量解析失败或为负 → 按 0 兜底 + FieldIssue
    /// 3. 单价解析失败或为负 → 按缺失兜底 + FieldIssue
    ///
    /// # 返回
    /// (订单行, 字段告警列表)
    pub fn from_raw(raw: &RawOrderLine) -> Result<(Self, Vec<FieldIssue>), EngineError> {
        let sku = raw.sku.trim();
        if sku.is_empty() {
            return Err(EngineError::missing_field(&raw.order_no, "sku", "sku 为空"));
        }

        let mut issues = Vec::new();

        let quantity = match parse_quantity(&raw.quantity) {
            Ok(qty) => qty,
            Err(message) => {
                warn!(
                    order_no = %raw.order_no,
                    sku = %sku,
                    raw = %raw.quantity,
                    "数量字段解析失败, 按 0 兜底"
                );
                issues.push(FieldIssue {
                    order_no: raw.order_no.clone(),
                    sku: sku.to_string(),
                    field: "quantity".to_string(),
                    raw_value: raw.quantity.clone(),
                    message,
                });
                0
            }
        };

        let unit_price = match &raw.unit_price {
            None => None,
            Some(text) => match parse_price(text) {
                Ok(price) => price,
                Err(message) => {
                    warn!(
                        order_no = %raw.order_no,
                        sku = %sku,
                        raw = %text,
                        "单价字段解析失败, 按缺失兜底"
                    );
                    issues.push(FieldIssue {
                        order_no: raw.order_no.clone(),
                        sku: sku.to_string(),
                        field: "unit_price".to_string(),
                        raw_value: text.clone(),
                        message,
                    });
                    None
                }
            },
        };

        let line = Self {
            order_no: raw.order_no.trim().to_string(),
            sku: sku.to_string(),
            quantity,
            unit_price,
            destination: Destination::from_raw(&raw.dc_id),
        };
        Ok((line, issues))
    }
}

// ==========================================
// 字段级数值收口
// ==========================================

/// 解析数量文本 (容忍千分位逗号与空白)
///
/// # 错误
/// 非数值文本或负数返回描述性错误
fn parse_quantity(text: &str) -> Result<i64, String> {
    let cleaned: String = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err("数量为空".to_string());
    }
    match cleaned.parse::<i64>() {
        Ok(qty) if qty >= 0 => Ok(qty),
        Ok(qty) => Err(format!("数量为负数: {}", qty)),
        Err(_) => Err(format!("数量不是整数: {}", text.trim())),
    }
}

/// 解析单价文本 (容忍货币符号/千分位/空白); 空文本视为缺失
fn parse_price(text: &str) -> Result<Option<f64>, String> {
    let cleaned: String = text.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        Ok(price) => Err(format!("单价无效: {}", price)),
        Err(_) => Err(format!("单价不是数值: {}", text.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_line(sku: &str, qty: &str, price: Option<&str>, dc: &str) -> RawOrderLine {
        RawOrderLine {
            order_no: "PO-001".to_string(),
            sku: sku.to_string(),
            quantity: qty.to_string(),
            unit_price: price.map(|p| p.to_string()),
            dc_id: dc.to_string(),
        }
    }

    #[test]
    fn test_destination_sentinel() {
        assert_eq!(Destination::from_raw("N/A"), Destination::Parent);
        assert_eq!(Destination::from_raw("  "), Destination::Parent);
        assert_eq!(
            Destination::from_raw("DC-0789"),
            Destination::Dc("DC-0789".to_string())
        );
        assert_eq!(Destination::Parent.as_str(), "N/A");
    }

    #[test]
    fn test_destination_serde_roundtrip() {
        let json = serde_json::to_string(&Destination::Dc("DC-0456".to_string())).unwrap();
        assert_eq!(json, "\"DC-0456\"");
        let back: Destination = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(back, Destination::Parent);
    }

    #[test]
    fn test_from_raw_clean_line() {
        let (line, issues) =
            OrderLine::from_raw(&raw_line("12345", "1,000", Some("$9.99"), "DC-0789")).unwrap();
        assert!(issues.is_empty());
        assert_eq!(line.quantity, 1000);
        assert_eq!(line.unit_price, Some(9.99));
        assert_eq!(line.destination, Destination::Dc("DC-0789".to_string()));
    }

    #[test]
    fn test_from_raw_bad_quantity_defaults_zero_with_issue() {
        let (line, issues) =
            OrderLine::from_raw(&raw_line("12345", "abc", Some("1.00"), "N/A")).unwrap();
        assert_eq!(line.quantity, 0);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "quantity");
        assert_eq!(issues[0].raw_value, "abc");
    }

    #[test]
    fn test_from_raw_negative_quantity_is_issue() {
        let (line, issues) = OrderLine::from_raw(&raw_line("12345", "-5", None, "N/A")).unwrap();
        assert_eq!(line.quantity, 0);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("负数"));
    }

    #[test]
    fn test_from_raw_bad_price_defaults_missing_with_issue() {
        let (line, issues) =
            OrderLine::from_raw(&raw_line("12345", "10", Some("n/a"), "DC-0456")).unwrap();
        assert_eq!(line.quantity, 10);
        assert_eq!(line.unit_price, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "unit_price");
    }

    #[test]
    fn test_from_raw_blank_sku_is_structural_error() {
        let err = OrderLine::from_raw(&raw_line("  ", "10", None, "N/A")).unwrap_err();
        match err {
            EngineError::MissingField { field, .. } => assert_eq!(field, "sku"),
            other => panic!("期望 MissingField, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_from_raw_empty_price_text_is_missing_not_issue() {
        let (line, issues) =
            OrderLine::from_raw(&raw_line("12345", "10", Some("  "), "N/A")).unwrap();
        assert_eq!(line.unit_price, None);
        assert!(issues.is_empty());
    }
}
