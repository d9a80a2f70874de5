//! 花束定價反推：目標價 → 隱含連續枝數

use rust_decimal::Decimal;

use bloom_core::{BloomError, PriceTable, Recipe, Result};

/// 花束定價反推計算器
pub struct BouquetSizingCalculator;

impl BouquetSizingCalculator {
    /// 以配方比例估算隱含枝數
    ///
    /// 加權平均每枝成本 = Σ(百分比 × 批發均價)，僅計配方中
    /// 佔比 > 0 的類別；配方類別缺價立即失敗（上游資料問題）。
    ///
    /// 回傳未取整的連續枝數——精度保留給下游邊界縮放使用。
    pub fn implied_stem_count(
        target_price: Decimal,
        recipe: &Recipe,
        prices: &PriceTable,
    ) -> Result<Decimal> {
        let mut avg_cost_per_stem = Decimal::ZERO;

        for (category, pct) in recipe.iter() {
            if pct.is_zero() {
                continue;
            }

            let price = prices
                .get(&category)
                .copied()
                .ok_or(BloomError::MissingPrice(category))?;

            avg_cost_per_stem += pct * price;
        }

        if avg_cost_per_stem <= Decimal::ZERO {
            return Err(BloomError::InvalidCost(avg_cost_per_stem));
        }

        Ok(target_price / avg_cost_per_stem)
    }
}
