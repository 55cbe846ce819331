// ==========================================
// PO 审核系统 - 配置层
// ==========================================
// 职责: 引擎运行配置, 显式不可变值随调用链传递
// ==========================================

pub mod engine_config;
pub mod packing_profile;

// 重导出核心配置类型
pub use engine_config::EngineConfig;
pub use packing_profile::{
    PackingConstraints, DEFAULT_MAX_PALLET_WEIGHT_LBS, DEFAULT_MAX_STACK_HEIGHT_IN,
    DEFAULT_PALLET_TARE_WEIGHT_LBS,
};
