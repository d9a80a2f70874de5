//! 花束優化主編排

use rust_decimal::Decimal;
use uuid::Uuid;

use bloom_calc::{
    AllocationEvaluator, BoundScalingCalculator, BouquetSizingCalculator,
};
use bloom_core::{
    canonical_bounds, canonical_recipe, Availability, OptimizerConfig, PriceTable, Result,
    SeasonKey,
};

use crate::{
    AllocationInitializer, CompensationSearch, Diagnostics, OptimizationResult, Outcome,
    PriceExpansionSearch,
};

/// 花束優化器
pub struct BouquetOptimizer {
    /// 優化器配置
    config: OptimizerConfig,
}

impl BouquetOptimizer {
    /// 以預設配置創建優化器
    pub fn new() -> Self {
        Self {
            config: OptimizerConfig::new(),
        }
    }

    /// 以自定義配置創建優化器
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// 主優化入口
    ///
    /// 驗證類錯誤（無效配方、缺價、無效成本、邊界不可行）立即以
    /// `Err` 中止；「無改善」與「產不出束」屬正常業務結局，以
    /// [`Outcome`] 回報，絕不拋錯。
    pub fn optimize(
        &self,
        availability: &Availability,
        season: SeasonKey,
        target_price: Decimal,
        prices: &PriceTable,
    ) -> Result<OptimizationResult> {
        tracing::info!(
            "開始花束優化：季節 {}，目標價 {}，可用 {} 枝",
            season,
            target_price,
            availability.total()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 解析季節配方，目標價反推隱含枝數後鉗制到商業範圍
        tracing::debug!("Step 1: 定價反推");
        let recipe = canonical_recipe(season);
        let implied =
            BouquetSizingCalculator::implied_stem_count(target_price, &recipe, prices)?;
        let clamped = implied
            .max(Decimal::from(self.config.min_total_stems))
            .min(Decimal::from(self.config.max_total_stems));
        tracing::debug!("隱含枝數 {} → 鉗制後 {}", implied, clamped);

        // Step 2: 百分比邊界縮放至目標枝數（連續 + 整數兩模式）
        tracing::debug!("Step 2: 邊界縮放");
        let table = canonical_bounds(season);
        let continuous_bounds =
            BoundScalingCalculator::scale(&table, clamped, availability)?;
        let integer_bounds =
            BoundScalingCalculator::scale_integer(&table, clamped, availability)?;

        // Step 3: 基線配枝（有效下界）
        tracing::debug!("Step 3: 基線配枝");
        let baseline = AllocationInitializer::baseline(&integer_bounds);
        let baseline_eval = AllocationEvaluator::evaluate(&baseline, availability);
        tracing::debug!(
            "基線 {} 枝，可製 {} 束",
            baseline.total_stems(),
            baseline_eval.max_bouquets
        );

        // Step 4: 補償搜索最大化束數
        tracing::debug!("Step 4: 補償搜索");
        let (compensated, compensated_eval) = CompensationSearch::search(
            &baseline,
            availability,
            &integer_bounds,
            &self.config.compensation_rules,
            self.config.max_search_depth,
        );

        // Step 5: 價格擴張逼近目標價
        tracing::debug!("Step 5: 價格擴張");
        let expansion = PriceExpansionSearch::expand(
            &compensated,
            availability,
            &continuous_bounds,
            prices,
            target_price,
            &self.config,
        )?;

        // Step 6: 最終評估與滯留加權
        tracing::debug!("Step 6: 最終評估");
        let allocation = expansion.allocation;
        let final_eval = AllocationEvaluator::evaluate(&allocation, availability);
        let bouquet_cost = allocation.cost(prices)?;

        let waste_penalty: Decimal = final_eval
            .stranded_stems
            .iter()
            .map(|(&cat, &stranded)| Decimal::from(stranded) * self.config.waste_weight(cat))
            .sum();

        let price_delta = bouquet_cost - target_price;
        let within_price_tolerance = price_delta.abs() <= self.config.price_tolerance;

        let mut messages = Vec::new();
        let outcome = if final_eval.max_bouquets == 0 {
            messages.push("庫存不足以製作任何一束".to_string());
            Outcome::ZeroBouquets
        } else if !within_price_tolerance {
            messages.push(format!(
                "成本 {} 偏離目標價 {} 超出容差 {}",
                bouquet_cost, target_price, self.config.price_tolerance
            ));
            Outcome::PriceOutOfTolerance
        } else {
            Outcome::Feasible
        };

        let calculation_time_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            "花束優化完成：{:?}，{} 枝/束，可製 {} 束，耗時 {} ms",
            outcome,
            allocation.total_stems(),
            final_eval.max_bouquets,
            calculation_time_ms
        );

        Ok(OptimizationResult {
            id: Uuid::new_v4(),
            outcome,
            total_stems: allocation.total_stems(),
            allocation,
            bouquet_cost,
            max_bouquets: final_eval.max_bouquets,
            limiting_category: final_eval.limiting_category,
            stranded_stems: final_eval.stranded_stems,
            waste_penalty,
            price_delta,
            within_price_tolerance,
            diagnostics: Diagnostics {
                implied_stem_count: implied,
                clamped_stem_count: clamped,
                baseline_evaluation: baseline_eval,
                compensated_evaluation: compensated_eval,
                expansion_steps: expansion.steps,
            },
            messages,
            calculation_time_ms,
        })
    }
}

impl Default for BouquetOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
