// ==========================================
// PO 审核系统 - 引擎错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 红线: 行级/字段级异常就地吸收并记录告警,
//       配置与结构性异常整体中止, 不返回半成品报告
// ==========================================

use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 (计算开始前拒绝) =====
    #[error("配置无效 (field={field}): {message}")]
    ConfigInvalid { field: String, message: String },

    // ===== 结构性输入错误 (整体中止) =====
    #[error("结构性输入缺失 (order_no={order_no}, field={field}): {message}")]
    MissingField {
        order_no: String,
        field: String,
        message: String,
    },

    // ===== 协作式取消 =====
    #[error("运行已取消: stage={stage}")]
    Cancelled { stage: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// 便捷构造: 配置无效
    pub fn config_invalid(field: &str, message: impl Into<String>) -> Self {
        EngineError::ConfigInvalid {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 便捷构造: 结构性字段缺失
    pub fn missing_field(order_no: &str, field: &str, message: impl Into<String>) -> Self {
        EngineError::MissingField {
            order_no: order_no.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
