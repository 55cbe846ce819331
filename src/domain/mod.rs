// ==========================================
// PO 审核系统 - 领域模型层
// ==========================================
// 职责: 纯数据结构与领域枚举, 不承载流程逻辑
// ==========================================

pub mod order;
pub mod pallet;
pub mod report;
pub mod sku;
pub mod stock;
pub mod types;

// 重导出核心领域类型
pub use order::{Destination, FieldIssue, OrderLine, RawOrderLine};
pub use pallet::{PackDiagnostic, Pallet, PalletAssignment, PalletBuilder, PalletCapacity, PalletItem};
pub use report::{
    AllocationMismatch, DcRollup, LineValidation, Report, ReportTotals, ShortageLine,
    ValidationSummary,
};
pub use sku::{SkuCatalog, SkuMaster};
pub use stock::{StockEntry, StockSnapshot};
pub use types::{MismatchKind, PackMode, PackViolationType, PriceCheck, StockStatus};
