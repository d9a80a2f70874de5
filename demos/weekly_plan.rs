//! 週配枝計劃示例

use bloom::{Availability, BouquetOptimizer, Category, PriceTable, SeasonKey};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 週配枝計劃示例 ===\n");

    // 本週到貨庫存
    let availability = Availability::new()
        .with(Category::Focal, 48)
        .with(Category::Foundation, 120)
        .with(Category::Filler, 36)
        .with(Category::Floater, 40)
        .with(Category::Finisher, 30)
        .with(Category::Foliage, 60);

    // 批發均價
    let mut prices = PriceTable::new();
    prices.insert(Category::Focal, Decimal::new(250, 2)); // 2.50
    prices.insert(Category::Foundation, Decimal::new(90, 2)); // 0.90
    prices.insert(Category::Filler, Decimal::new(75, 2)); // 0.75
    prices.insert(Category::Floater, Decimal::new(110, 2)); // 1.10
    prices.insert(Category::Finisher, Decimal::new(130, 2)); // 1.30
    prices.insert(Category::Foliage, Decimal::new(60, 2)); // 0.60

    println!("庫存清單:");
    for cat in Category::ALL {
        println!(
            "  - 類別: {}, 可用: {} 枝, 均價: {}",
            cat,
            availability.get(cat),
            prices[&cat]
        );
    }

    // 目標零售價 28.00
    let season = SeasonKey::EarlySpring;
    let target_price = Decimal::from(28);
    println!("\n季節: {}，目標價: {}\n", season, target_price);

    let optimizer = BouquetOptimizer::new();
    let result = optimizer.optimize(&availability, season, target_price, &prices)?;

    println!("優化結果 ({:?}):", result.outcome);
    println!("  單束枝數: {}", result.total_stems);
    println!("  單束成本: {}", result.bouquet_cost);
    println!("  可製束數: {}", result.max_bouquets);
    if let Some(limiting) = result.limiting_category {
        println!("  瓶頸類別: {}", limiting);
    }
    println!("  滯留加權: {}", result.waste_penalty);

    println!("\n單束配枝:");
    for cat in Category::ALL {
        println!("  - {}: {} 枝", cat, result.allocation.get(cat));
    }

    println!("\nJSON 輸出:");
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
