//! 枝數縮放：百分比配方 → 精確整數配枝

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use bloom_core::{Category, Recipe};

/// 預設葉材衰減斷點（枝）
pub const DEFAULT_FOLIAGE_BREAKPOINT: u32 = 25;

/// 預設葉材衰減因子
pub fn default_foliage_damping() -> Decimal {
    Decimal::new(6, 1) // 0.6
}

/// 枝數縮放計算器
pub struct StemScalingCalculator;

impl StemScalingCalculator {
    /// 以預設斷點與衰減因子縮放
    pub fn calculate(total_stems: u32, recipe: &Recipe) -> HashMap<Category, u32> {
        Self::calculate_with(
            total_stems,
            recipe,
            DEFAULT_FOLIAGE_BREAKPOINT,
            default_foliage_damping(),
        )
    }

    /// 百分比配方轉為精確整數配枝
    ///
    /// - ≤ 斷點：單趟取整即可
    /// - > 斷點：斷點以上區段的葉材佔比乘上衰減因子，釋出的佔比
    ///   按比例分給非葉材類別，該區段獨立取整後加回斷點配枝。
    ///   大花束在視覺基線滿足後不需要等比例的葉材。
    ///
    /// 輸出總和恆等於 total_stems。
    pub fn calculate_with(
        total_stems: u32,
        recipe: &Recipe,
        breakpoint: u32,
        damping: Decimal,
    ) -> HashMap<Category, u32> {
        let percentages: HashMap<Category, Decimal> = recipe.iter().collect();

        // 斷點以下：單趟取整
        if total_stems <= breakpoint {
            return Self::round_counts(total_stems, &percentages);
        }

        // 斷點以上：基礎區段 + 衰減後的額外區段
        let base_counts = Self::round_counts(breakpoint, &percentages);
        let extra_stems = total_stems - breakpoint;

        let foliage_share = recipe.pct(Category::Foliage);
        let non_foliage_total: Decimal = Category::ALL
            .iter()
            .filter(|&&c| c != Category::Foliage)
            .map(|&c| recipe.pct(c))
            .sum();

        // 純葉材配方無從衰減，維持原比例
        if non_foliage_total.is_zero() {
            let extra_counts = Self::round_counts(extra_stems, &percentages);
            return Self::merge(&base_counts, &extra_counts);
        }

        let dampened_foliage = foliage_share * damping;
        let remaining_share = Decimal::ONE - dampened_foliage;

        let mut adjusted = HashMap::new();
        for cat in Category::ALL {
            if cat == Category::Foliage {
                adjusted.insert(cat, dampened_foliage);
            } else {
                adjusted.insert(cat, recipe.pct(cat) / non_foliage_total * remaining_share);
            }
        }

        tracing::debug!(
            "葉材衰減: 斷點 {} 以上 {} 枝，葉材佔比 {} → {}",
            breakpoint,
            extra_stems,
            foliage_share,
            dampened_foliage
        );

        let extra_counts = Self::round_counts(extra_stems, &adjusted);
        Self::merge(&base_counts, &extra_counts)
    }

    /// 取整：逐類別下取整後，餘數依固定循環順序一次一枝補回
    ///
    /// 決定性且總和精確。
    fn round_counts(
        stems: u32,
        percentages: &HashMap<Category, Decimal>,
    ) -> HashMap<Category, u32> {
        let total = Decimal::from(stems);

        let mut counts: HashMap<Category, u32> = HashMap::new();
        for cat in Category::ALL {
            let pct = percentages.get(&cat).copied().unwrap_or(Decimal::ZERO);
            let floored = (pct * total).floor().to_u32().unwrap_or(0);
            counts.insert(cat, floored);
        }

        let allocated: u32 = counts.values().sum();
        let mut remainder = stems.saturating_sub(allocated);

        let mut i = 0usize;
        while remainder > 0 {
            let cat = Category::REDISTRIBUTION_ORDER[i % Category::REDISTRIBUTION_ORDER.len()];
            *counts.entry(cat).or_insert(0) += 1;
            remainder -= 1;
            i += 1;
        }

        counts
    }

    /// 合併基礎區段與額外區段配枝
    fn merge(
        base: &HashMap<Category, u32>,
        extra: &HashMap<Category, u32>,
    ) -> HashMap<Category, u32> {
        let mut merged = HashMap::new();
        for cat in Category::ALL {
            let sum = base.get(&cat).copied().unwrap_or(0) + extra.get(&cat).copied().unwrap_or(0);
            merged.insert(cat, sum);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::{canonical_recipe, SeasonKey};
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_golden_early_spring_twenty_stems() {
        // 早春配方 20 枝：下取整後餘 2，依循環順序補給 Foundation、Floater
        let recipe = canonical_recipe(SeasonKey::EarlySpring);
        let counts = StemScalingCalculator::calculate(20, &recipe);

        assert_eq!(counts[&Category::Focal], 4);
        assert_eq!(counts[&Category::Foundation], 8);
        assert_eq!(counts[&Category::Filler], 1);
        assert_eq!(counts[&Category::Floater], 3);
        assert_eq!(counts[&Category::Finisher], 1);
        assert_eq!(counts[&Category::Foliage], 3);
        assert_eq!(counts.values().sum::<u32>(), 20);
    }

    #[test]
    fn test_zero_stems_all_zero() {
        let recipe = canonical_recipe(SeasonKey::SummerFall);
        let counts = StemScalingCalculator::calculate(0, &recipe);

        assert!(counts.values().all(|&v| v == 0));
    }

    #[test]
    fn test_deterministic() {
        let recipe = canonical_recipe(SeasonKey::LateSpring);
        let a = StemScalingCalculator::calculate(23, &recipe);
        let b = StemScalingCalculator::calculate(23, &recipe);
        assert_eq!(a, b);
    }

    #[rstest]
    #[case(SeasonKey::EarlySpring)]
    #[case(SeasonKey::LateSpring)]
    #[case(SeasonKey::SummerFall)]
    fn test_foliage_dampened_above_breakpoint(#[case] season: SeasonKey) {
        // 斷點以上：葉材配枝 ≤ 未衰減的線性佔比
        let recipe = canonical_recipe(season);
        let total = 40u32;
        let counts = StemScalingCalculator::calculate(total, &recipe);

        let linear_foliage = recipe.pct(Category::Foliage) * Decimal::from(total);
        assert!(Decimal::from(counts[&Category::Foliage]) <= linear_foliage);
        assert_eq!(counts.values().sum::<u32>(), total);
    }

    #[test]
    fn test_above_breakpoint_exact_counts() {
        // 早春配方 40 枝，手算驗證兩區段合併結果
        let recipe = canonical_recipe(SeasonKey::EarlySpring);
        let counts = StemScalingCalculator::calculate(40, &recipe);

        assert_eq!(counts[&Category::Focal], 8);
        assert_eq!(counts[&Category::Foundation], 17);
        assert_eq!(counts[&Category::Filler], 3);
        assert_eq!(counts[&Category::Floater], 5);
        assert_eq!(counts[&Category::Finisher], 3);
        assert_eq!(counts[&Category::Foliage], 4);
        assert_eq!(counts.values().sum::<u32>(), 40);
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_total(total in 0u32..=80, season_idx in 0usize..3) {
            let recipe = canonical_recipe(SeasonKey::ALL[season_idx]);
            let counts = StemScalingCalculator::calculate(total, &recipe);
            prop_assert_eq!(counts.values().sum::<u32>(), total);
        }

        #[test]
        fn prop_counts_nonnegative_and_deterministic(total in 0u32..=80) {
            let recipe = canonical_recipe(SeasonKey::EarlySpring);
            let a = StemScalingCalculator::calculate(total, &recipe);
            let b = StemScalingCalculator::calculate(total, &recipe);
            prop_assert_eq!(a, b);
        }
    }
}
