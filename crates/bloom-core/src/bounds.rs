//! 配方邊界模型與標準季節邊界表

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BloomError, Category, Result, SeasonKey};

/// 標準邊界表定義時的參考花束枝數
pub const REFERENCE_STEMS: u32 = 25;

/// 單一類別的百分比邊界（相對於參考花束枝數）
///
/// 不變量: absolute_min ≤ design_min ≤ design_max ≤ absolute_max；
/// stretch_min（若有）≤ design_min。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentBounds {
    /// 設計下界（美學偏好）
    pub design_min: Decimal,

    /// 設計上界（美學偏好）
    pub design_max: Decimal,

    /// 絕對下界（硬性合法下限）
    pub absolute_min: Decimal,

    /// 絕對上界（硬性合法上限）
    pub absolute_max: Decimal,

    /// 伸縮下界：缺貨時仍讓類別留在花束中的條件性下限
    pub stretch_min: Option<Decimal>,
}

impl PercentBounds {
    /// 創建並驗證邊界順序不變量
    pub fn new(
        category: Category,
        design_min: Decimal,
        design_max: Decimal,
        absolute_min: Decimal,
        absolute_max: Decimal,
        stretch_min: Option<Decimal>,
    ) -> Result<Self> {
        let ordered = absolute_min <= design_min
            && design_min <= design_max
            && design_max <= absolute_max;
        if !ordered {
            return Err(BloomError::InfeasibleBounds {
                category,
                min: absolute_min.max(design_min),
                max: design_max.min(absolute_max),
            });
        }

        if let Some(stretch) = stretch_min {
            if stretch > design_min {
                return Err(BloomError::InfeasibleBounds {
                    category,
                    min: stretch,
                    max: design_min,
                });
            }
        }

        Ok(Self {
            design_min,
            design_max,
            absolute_min,
            absolute_max,
            stretch_min,
        })
    }
}

/// 單一季節的邊界表：類別 → 百分比邊界
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundTable {
    bounds: HashMap<Category, PercentBounds>,
}

impl BoundTable {
    /// 創建邊界表（逐類別驗證由 `PercentBounds::new` 完成）
    pub fn new(bounds: HashMap<Category, PercentBounds>) -> Self {
        Self { bounds }
    }

    /// 取得類別邊界
    pub fn get(&self, category: Category) -> Option<&PercentBounds> {
        self.bounds.get(&category)
    }

    /// 依固定優先序迭代
    pub fn iter(&self) -> impl Iterator<Item = (Category, &PercentBounds)> + '_ {
        Category::ALL
            .iter()
            .filter_map(|cat| self.bounds.get(cat).map(|b| (*cat, b)))
    }
}

/// 以參考枝數定義的整數邊界轉為百分比
fn pct_of_reference(stems: u32) -> Decimal {
    Decimal::from(stems) / Decimal::from(REFERENCE_STEMS)
}

/// 標準季節邊界表
///
/// 原始邊界以 25 枝參考花束的整數枝數定義，各季節目前共用同一組
/// 結構性邊界（季節差異由配方百分比承擔）。
pub fn canonical_bounds(_season: SeasonKey) -> BoundTable {
    // (類別, design_min, design_max, absolute_min, absolute_max, stretch_min)
    let rows: [(Category, u32, u32, u32, u32, Option<u32>); 6] = [
        (Category::Focal, 3, 5, 1, 7, Some(2)),
        (Category::Foundation, 5, 10, 3, 15, None),
        (Category::Filler, 2, 4, 0, 5, Some(1)),
        (Category::Floater, 2, 4, 0, 5, Some(1)),
        (Category::Finisher, 2, 4, 0, 5, Some(1)),
        (Category::Foliage, 3, 5, 1, 7, Some(2)),
    ];

    let mut bounds = HashMap::new();
    for (cat, dmin, dmax, amin, amax, stretch) in rows {
        let pb = PercentBounds::new(
            cat,
            pct_of_reference(dmin),
            pct_of_reference(dmax),
            pct_of_reference(amin),
            pct_of_reference(amax),
            stretch.map(pct_of_reference),
        )
        .expect("標準邊界表必須通過驗證");
        bounds.insert(cat, pb);
    }

    BoundTable::new(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SeasonKey::EarlySpring)]
    #[case(SeasonKey::LateSpring)]
    #[case(SeasonKey::SummerFall)]
    fn test_canonical_bounds_cover_all_categories(#[case] season: SeasonKey) {
        let table = canonical_bounds(season);
        for cat in Category::ALL {
            let b = table.get(cat).expect("每個類別都應有邊界");
            assert!(b.absolute_min <= b.design_min);
            assert!(b.design_min <= b.design_max);
            assert!(b.design_max <= b.absolute_max);
            if let Some(stretch) = b.stretch_min {
                assert!(stretch <= b.design_min);
            }
        }
    }

    #[test]
    fn test_unordered_bounds_rejected() {
        // design_min > design_max
        let result = PercentBounds::new(
            Category::Filler,
            Decimal::new(20, 2),
            Decimal::new(10, 2),
            Decimal::ZERO,
            Decimal::new(30, 2),
            None,
        );
        assert!(matches!(result, Err(BloomError::InfeasibleBounds { .. })));
    }

    #[test]
    fn test_stretch_above_design_min_rejected() {
        let result = PercentBounds::new(
            Category::Focal,
            Decimal::new(10, 2),
            Decimal::new(20, 2),
            Decimal::ZERO,
            Decimal::new(30, 2),
            Some(Decimal::new(15, 2)),
        );
        assert!(matches!(result, Err(BloomError::InfeasibleBounds { .. })));
    }

    #[test]
    fn test_iter_follows_priority_order() {
        let table = canonical_bounds(SeasonKey::EarlySpring);
        let cats: Vec<Category> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(cats, Category::ALL.to_vec());
    }
}
