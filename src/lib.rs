// ==========================================
// PO 审核系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 对账与码垛引擎 (解析/渲染/持久化由外部协作方承担)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MismatchKind, PackMode, PackViolationType, PriceCheck, StockStatus};

// 领域实体
pub use domain::{
    AllocationMismatch, Destination, FieldIssue, LineValidation, OrderLine, PackDiagnostic,
    Pallet, PalletAssignment, RawOrderLine, Report, ReportTotals, ShortageLine, SkuCatalog,
    SkuMaster, StockEntry, StockSnapshot, ValidationSummary,
};

// 引擎
pub use engine::{
    AllocationReconciler, CancelFlag, EngineError, EngineResult, InventoryValidator,
    PalletPacker, ReviewOrchestrator, ValidatorCore,
};

// 配置
pub use config::{EngineConfig, PackingConstraints};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "PO 审核系统";

// ==========================================
// 预编译检查
// ==========================================
