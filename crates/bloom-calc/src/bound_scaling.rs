//! 邊界縮放：百分比邊界 × 目標枝數 → 本次花束的每類別枝數邊界

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use bloom_core::{Availability, BloomError, BoundTable, Category, PercentBounds, Result};

/// 縮放後的連續邊界（枝）
///
/// 保留 Decimal 精度供評分使用；整數化由 [`StemBounds`] 承擔。
#[derive(Debug, Clone)]
pub struct ScaledBounds {
    pub design_min: Decimal,
    pub design_max: Decimal,
    pub absolute_min: Decimal,
    pub absolute_max: Decimal,

    /// 本次優化實際採用的下界（見 [`BoundScalingCalculator::scale`]）
    pub effective_min: Decimal,
}

impl ScaledBounds {
    /// 設計區間中點，作為「理想枝數」的評分基準
    pub fn design_midpoint(&self) -> Decimal {
        (self.design_min + self.design_max) / Decimal::TWO
    }

    /// 上界取整：下取整（不得超過硬性上限）
    pub fn absolute_max_stems(&self) -> u32 {
        self.absolute_max.floor().to_u32().unwrap_or(0)
    }

    /// 有效下界取整：上取整（不得低於硬性下限）
    pub fn effective_min_stems(&self) -> u32 {
        self.effective_min.ceil().to_u32().unwrap_or(0)
    }
}

/// 縮放後的整數邊界（枝）
///
/// 下界皆上取整、上界皆下取整，區間只會收緊不會放寬。
#[derive(Debug, Clone, Copy)]
pub struct StemBounds {
    pub design_min: u32,
    pub design_max: u32,
    pub absolute_min: u32,
    pub absolute_max: u32,
    pub effective_min: u32,
}

/// 邊界縮放計算器
pub struct BoundScalingCalculator;

impl BoundScalingCalculator {
    /// 百分比邊界縮放至目標枝數，並依庫存決定有效下界
    ///
    /// 有效下界規則：
    /// - 類別可用枝數 = 0 → absolute_min（無貨可配，退到硬性下限）
    /// - 否則有 stretch_min → stretch_min（缺貨容忍下限優先於美學下限）
    /// - 否則 → design_min
    ///
    /// 有效下界 > absolute_max 即回報邊界不可行。
    pub fn scale(
        table: &BoundTable,
        total_stems: Decimal,
        availability: &Availability,
    ) -> Result<HashMap<Category, ScaledBounds>> {
        let mut scaled = HashMap::new();

        for (category, pct) in table.iter() {
            let bounds = Self::scale_one(category, pct, total_stems, availability)?;
            scaled.insert(category, bounds);
        }

        Ok(scaled)
    }

    /// 縮放並整數化：下界上取整、上界下取整
    ///
    /// 整數化可能讓區間塌陷（effective_min > absolute_max），
    /// 此時同樣回報邊界不可行。
    pub fn scale_integer(
        table: &BoundTable,
        total_stems: Decimal,
        availability: &Availability,
    ) -> Result<HashMap<Category, StemBounds>> {
        let mut scaled = HashMap::new();

        for (category, pct) in table.iter() {
            let continuous = Self::scale_one(category, pct, total_stems, availability)?;

            let bounds = StemBounds {
                design_min: continuous.design_min.ceil().to_u32().unwrap_or(0),
                design_max: continuous.design_max.floor().to_u32().unwrap_or(0),
                absolute_min: continuous.absolute_min.ceil().to_u32().unwrap_or(0),
                absolute_max: continuous.absolute_max_stems(),
                effective_min: continuous.effective_min_stems(),
            };

            if bounds.effective_min > bounds.absolute_max {
                return Err(BloomError::InfeasibleBounds {
                    category,
                    min: Decimal::from(bounds.effective_min),
                    max: Decimal::from(bounds.absolute_max),
                });
            }

            scaled.insert(category, bounds);
        }

        Ok(scaled)
    }

    fn scale_one(
        category: Category,
        pct: &PercentBounds,
        total_stems: Decimal,
        availability: &Availability,
    ) -> Result<ScaledBounds> {
        let effective_min_pct = if availability.get(category) == 0 {
            pct.absolute_min
        } else {
            pct.stretch_min.unwrap_or(pct.design_min)
        };

        let scaled = ScaledBounds {
            design_min: pct.design_min * total_stems,
            design_max: pct.design_max * total_stems,
            absolute_min: pct.absolute_min * total_stems,
            absolute_max: pct.absolute_max * total_stems,
            effective_min: effective_min_pct * total_stems,
        };

        if scaled.effective_min > scaled.absolute_max {
            return Err(BloomError::InfeasibleBounds {
                category,
                min: scaled.effective_min,
                max: scaled.absolute_max,
            });
        }

        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::{canonical_bounds, SeasonKey};

    fn full_availability() -> Availability {
        Category::ALL.iter().map(|&c| (c, 100)).collect()
    }

    #[test]
    fn test_reference_size_reproduces_source_integers() {
        // 25 枝即參考花束：縮放結果應等於原始整數邊界
        let table = canonical_bounds(SeasonKey::EarlySpring);
        let scaled =
            BoundScalingCalculator::scale_integer(&table, Decimal::from(25), &full_availability())
                .unwrap();

        let focal = &scaled[&Category::Focal];
        assert_eq!(focal.design_min, 3);
        assert_eq!(focal.design_max, 5);
        assert_eq!(focal.absolute_min, 1);
        assert_eq!(focal.absolute_max, 7);
        // 有貨且有 stretch_min
        assert_eq!(focal.effective_min, 2);

        let foundation = &scaled[&Category::Foundation];
        assert_eq!(foundation.absolute_max, 15);
        // 無 stretch_min → design_min
        assert_eq!(foundation.effective_min, 5);
    }

    #[test]
    fn test_zero_availability_uses_absolute_min() {
        let table = canonical_bounds(SeasonKey::EarlySpring);
        let availability = full_availability().with(Category::Filler, 0);

        let scaled =
            BoundScalingCalculator::scale_integer(&table, Decimal::from(25), &availability)
                .unwrap();

        // Filler absolute_min = 0
        assert_eq!(scaled[&Category::Filler].effective_min, 0);
        // 其餘類別不受影響
        assert_eq!(scaled[&Category::Focal].effective_min, 2);
    }

    #[test]
    fn test_fractional_size_rounds_inward() {
        // 20 枝：Focal design_min = 3/25×20 = 2.4 → ceil 3；
        // absolute_max = 7/25×20 = 5.6 → floor 5
        let table = canonical_bounds(SeasonKey::LateSpring);
        let scaled =
            BoundScalingCalculator::scale_integer(&table, Decimal::from(20), &full_availability())
                .unwrap();

        let focal = &scaled[&Category::Focal];
        assert_eq!(focal.design_min, 3);
        assert_eq!(focal.absolute_max, 5);
    }

    #[test]
    fn test_design_midpoint() {
        let table = canonical_bounds(SeasonKey::EarlySpring);
        let scaled = BoundScalingCalculator::scale(
            &table,
            Decimal::from(25),
            &full_availability(),
        )
        .unwrap();

        // Focal: (3 + 5) / 2 = 4
        assert_eq!(scaled[&Category::Focal].design_midpoint(), Decimal::from(4));
    }

    #[test]
    fn test_collapsed_interval_rejected() {
        // 2 枝花束：Foundation effective_min = 5/25×2 = 0.4 → ceil 1；
        // absolute_max = 15/25×2 = 1.2 → floor 1，仍可行。
        // 1 枝：effective_min ceil(0.2)=1 > absolute_max floor(0.6)=0 → 不可行
        let table = canonical_bounds(SeasonKey::EarlySpring);
        let result = BoundScalingCalculator::scale_integer(
            &table,
            Decimal::ONE,
            &full_availability(),
        );

        assert!(matches!(result, Err(BloomError::InfeasibleBounds { .. })));
    }
}
