//! 價格擴張搜索：逐枝加枝逼近目標價

use std::collections::HashMap;

use rust_decimal::Decimal;

use bloom_calc::{AllocationEvaluator, ScaledBounds};
use bloom_core::{Allocation, Availability, Category, OptimizerConfig, PriceTable, Result};

/// 價格擴張結果
#[derive(Debug, Clone)]
pub struct ExpansionResult {
    /// 價距最小的配枝
    pub allocation: Allocation,

    /// 實際加枝步數
    pub steps: u32,
}

/// 價格擴張搜索器
pub struct PriceExpansionSearch;

impl PriceExpansionSearch {
    /// 從合法基線出發逐枝加枝，收斂至目標價容差內
    ///
    /// 每步流程：
    /// 1. |成本 − 目標| ≤ 容差 → 接受當前配枝並停止；
    /// 2. 成本超出目標逾容差 → 停止（加枝成本單調，不回溯）；
    /// 3. 否則對每類別測試 +1 的合法性並評分，取最高分加一枝。
    ///
    /// 合法性：不得超過 absolute_max，且在束數向下放寬（從當前
    /// 束數試到 1）後庫存仍可支撐——接受以產量換價格精度。
    /// 評分 = 可用枝數 − 10×|新枝數 − 設計中點|
    ///       − 單價 × max(0, 成本 − 0.9×目標價)，
    /// 平手取固定優先序在前者。
    ///
    /// 全程追蹤價距最小的配枝並以其為結果——迴圈可能因超價提早
    /// 退出，最後狀態未必最接近目標。容差命中、超價、步數上限
    /// （預設 25）、無合法候選四者之一必然發生，保證終止。
    pub fn expand(
        initial: &Allocation,
        availability: &Availability,
        bounds: &HashMap<Category, ScaledBounds>,
        prices: &PriceTable,
        target_price: Decimal,
        config: &OptimizerConfig,
    ) -> Result<ExpansionResult> {
        let mut current = initial.clone();
        let mut best = initial.clone();
        let mut best_distance = (initial.cost(prices)? - target_price).abs();
        let mut steps = 0u32;

        loop {
            let cost = current.cost(prices)?;
            let distance = (cost - target_price).abs();

            if distance < best_distance {
                best = current.clone();
                best_distance = distance;
            }

            if distance <= config.expansion_tolerance {
                tracing::debug!("價格擴張收斂: 成本 {} 距目標 {}", cost, distance);
                best = current;
                break;
            }
            if cost - target_price > config.expansion_tolerance {
                tracing::debug!("價格擴張超價退出: 成本 {} 目標 {}", cost, target_price);
                break;
            }
            if steps >= config.max_expansion_steps {
                tracing::debug!("價格擴張達步數上限 {}", config.max_expansion_steps);
                break;
            }

            let current_bouquets =
                AllocationEvaluator::evaluate(&current, availability).max_bouquets;

            let mut candidate: Option<(Category, Decimal)> = None;
            for cat in Category::ALL {
                let Some(cat_bounds) = bounds.get(&cat) else {
                    continue;
                };

                let new_count = current.get(cat) + 1;
                if new_count > cat_bounds.absolute_max_stems() {
                    continue;
                }
                if Self::supported_bouquets(
                    new_count,
                    availability.get(cat),
                    current_bouquets,
                )
                .is_none()
                {
                    continue;
                }

                let Some(price) = prices.get(&cat).copied() else {
                    continue;
                };

                let score = Self::score(
                    availability.get(cat),
                    new_count,
                    cat_bounds,
                    price,
                    cost,
                    target_price,
                );
                let better = match candidate {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if better {
                    candidate = Some((cat, score));
                }
            }

            match candidate {
                Some((cat, _)) => {
                    current.add_one(cat);
                    steps += 1;
                }
                None => {
                    tracing::debug!("價格擴張無合法候選，於第 {} 步停止", steps);
                    break;
                }
            }
        }

        Ok(ExpansionResult {
            allocation: best,
            steps,
        })
    }

    /// 向下放寬束數尋找庫存仍可支撐的最大束數
    ///
    /// 從當前束數試到 1；全不支撐則候選不合法。
    fn supported_bouquets(new_count: u32, available: u32, current_bouquets: u32) -> Option<u32> {
        let start = current_bouquets.max(1);
        (1..=start)
            .rev()
            .find(|&n| available >= new_count.saturating_mul(n))
    }

    /// 加枝候選評分
    fn score(
        available: u32,
        new_count: u32,
        bounds: &ScaledBounds,
        stem_price: Decimal,
        current_cost: Decimal,
        target_price: Decimal,
    ) -> Decimal {
        let distance = (Decimal::from(new_count) - bounds.design_midpoint()).abs();
        let overspend =
            (current_cost - Decimal::new(9, 1) * target_price).max(Decimal::ZERO);

        Decimal::from(available) - Decimal::from(10) * distance - stem_price * overspend
    }
}
