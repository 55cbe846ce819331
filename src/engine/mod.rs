// ==========================================
// PO 审核系统 - 引擎层
// ==========================================
// 职责: 实现库存校验、母子单对账、码垛与流程编排的业务规则
// 红线: 引擎不做 I/O, 所有规则必须输出 reason
// ==========================================

pub mod error;
pub mod orchestrator;
pub mod packer;
pub mod reconciler;
pub mod strategy;
pub mod validator;
pub mod validator_core;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use orchestrator::{CancelFlag, ReviewOrchestrator};
pub use packer::PalletPacker;
pub use reconciler::AllocationReconciler;
pub use strategy::{strategy_for, CartonDemand, MixedFill, PackingStrategy, SingleSkuGreedy};
pub use validator::InventoryValidator;
pub use validator_core::{StockClassification, ValidatorCore, PRICE_TOLERANCE};
