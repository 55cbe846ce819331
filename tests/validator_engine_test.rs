// ==========================================
// InventoryValidator 引擎集成测试
// ==========================================
// 测试目标: 验证三档库存判定与价格比对
// 覆盖范围: 库存边界、安全库存、缺失 SKU、价格容差、汇总聚合
// ==========================================

use po_review_engine::domain::order::{Destination, OrderLine};
use po_review_engine::domain::sku::{SkuCatalog, SkuMaster};
use po_review_engine::domain::stock::{StockEntry, StockSnapshot};
use po_review_engine::domain::types::{PriceCheck, StockStatus};
use po_review_engine::engine::InventoryValidator;
use po_review_engine::logging;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的商品主档
fn create_test_catalog() -> SkuCatalog {
    [
        SkuMaster {
            product_name: "测试商品 A".to_string(),
            unit_price: Some(9.99),
            ..SkuMaster::fallback("12345")
        },
        SkuMaster {
            product_name: "测试商品 B".to_string(),
            unit_price: Some(100.00),
            ..SkuMaster::fallback("67890")
        },
    ]
    .into_iter()
    .collect()
}

/// 创建测试用的库存快照
fn create_test_snapshot() -> StockSnapshot {
    [
        ("12345".to_string(), StockEntry::new(1000, 300)),
        ("67890".to_string(), StockEntry::new(400, 500)),
    ]
    .into_iter()
    .collect()
}

fn create_test_line(sku: &str, qty: i64, price: Option<f64>) -> OrderLine {
    OrderLine::new("PO-001", sku, qty, price, Destination::Dc("DC-0123".to_string())).unwrap()
}

// ==========================================
// 测试 1: 三档库存判定
// ==========================================

#[test]
fn test_ok_when_main_covers_demand() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("12345", 1000, None));
    println!("判定结果: {:?} 原因: {:?}", result.status, result.reasons);

    assert_eq!(result.status, StockStatus::Ok, "MAIN 刚好覆盖需求应判 OK");
    assert_eq!(result.transfer_from_sub, 0);
    assert_eq!(result.remaining_shortage, 0);
}

#[test]
fn test_transfer_when_main_short_but_total_covers() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("12345", 1200, None));

    assert_eq!(result.status, StockStatus::MainShortTransfer);
    assert_eq!(result.transfer_from_sub, 200, "调拨量 = 需求 - MAIN");
    assert_eq!(result.remaining_shortage, 0);
}

#[test]
fn test_out_of_stock_with_partial_sub_transfer() {
    // ordered 1000, MAIN 400, SUB 500 → 缺 100
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("67890", 1000, None));
    println!("缺货判定: {:?}", result);

    assert_eq!(result.status, StockStatus::OutOfStock);
    assert_eq!(result.transfer_from_sub, 500, "SUB 全部调出");
    assert_eq!(result.remaining_shortage, 100);
}

#[test]
fn test_safety_stock_raises_demand() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 100);

    // 需求 = 950 + 100 = 1050 > MAIN 1000, SUB 300 补 50
    let result = validator.validate_line(&create_test_line("12345", 950, None));

    assert_eq!(result.status, StockStatus::MainShortTransfer);
    assert_eq!(result.transfer_from_sub, 50);
}

#[test]
fn test_missing_sku_is_out_of_stock_never_error() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("00000", 80, None));

    assert_eq!(result.status, StockStatus::OutOfStock, "快照缺失 SKU 按零库存处理");
    assert_eq!(result.main_stock, 0);
    assert_eq!(result.sub_stock, 0);
    assert_eq!(result.remaining_shortage, 80);
}

// ==========================================
// 测试 2: 价格比对容差
// ==========================================

#[test]
fn test_price_diff_exactly_at_tolerance_is_match() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    // 系统价 9.99, PO 价 10.00, 差值恰为 0.01 → 一致
    let result = validator.validate_line(&create_test_line("12345", 10, Some(10.00)));
    assert_eq!(result.price_check, PriceCheck::Match, "容差边界 0.01 必须含边界");
}

#[test]
fn test_price_diff_beyond_tolerance_is_mismatch() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("12345", 10, Some(10.001)));
    assert_eq!(result.price_check, PriceCheck::Mismatch);
    assert!(
        result.reasons.iter().any(|r| r.contains("PRICE_MISMATCH")),
        "价差必须留下原因记录: {:?}",
        result.reasons
    );
}

#[test]
fn test_price_missing_po_side_is_skipped() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let result = validator.validate_line(&create_test_line("12345", 10, None));
    assert_eq!(result.price_check, PriceCheck::Skipped, "缺价不算差异");
}

// ==========================================
// 测试 3: 批量校验与汇总
// ==========================================

#[test]
fn test_batch_summary_aggregates_counts_and_rollups() {
    logging::init_test();
    let catalog = create_test_catalog();
    let snapshot = create_test_snapshot();
    let validator = InventoryValidator::new(&catalog, &snapshot, 0);

    let lines = vec![
        create_test_line("12345", 500, Some(9.99)),  // OK
        create_test_line("12345", 1200, None),       // 调拨
        create_test_line("67890", 1000, Some(95.0)), // 缺货 + 价差
        OrderLine::new("PO-002", "67890", 100, None, Destination::Dc("DC-0456".to_string()))
            .unwrap(), // OK, 另一目的地
    ];
    let (validations, summary) = validator.validate_with_summary(&lines);
    println!("汇总: {:?}", summary);

    assert_eq!(validations.len(), 4);
    assert_eq!(summary.ok_count, 2);
    assert_eq!(summary.transfer_count, 1);
    assert_eq!(summary.out_of_stock_count, 1);
    assert_eq!(summary.price_mismatch_count, 1);
    assert_eq!(summary.total_units, 500 + 1200 + 1000 + 100);
    assert_eq!(summary.total_shortage, 100);

    // 按目的地汇总
    assert_eq!(summary.by_destination.len(), 2);
    assert_eq!(summary.by_destination["DC-0123"].line_count, 3);
    assert_eq!(summary.by_destination["DC-0456"].line_count, 1);
    assert_eq!(summary.by_destination["DC-0123"].total_shortage, 100);

    // 缺货明细
    assert_eq!(summary.shortage_lines.len(), 1);
    assert_eq!(summary.shortage_lines[0].sku, "67890");
    assert_eq!(summary.shortage_lines[0].shortage, 100);
}
