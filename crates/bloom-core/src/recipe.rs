//! 配方模型與標準季節配方表

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BloomError, Category, Result};

/// 每類別批發均價表（每次呼叫的輸入，允許省略配方外的類別）
pub type PriceTable = HashMap<Category, Decimal>;

/// 配方百分比總和容許誤差
const RECIPE_SUM_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6); // 0.000001

/// 季節鍵（封閉小集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonKey {
    /// 早春（牡丹季前）
    EarlySpring,
    /// 晚春（牡丹季）
    LateSpring,
    /// 夏／秋
    SummerFall,
}

impl SeasonKey {
    pub const ALL: [SeasonKey; 3] = [
        SeasonKey::EarlySpring,
        SeasonKey::LateSpring,
        SeasonKey::SummerFall,
    ];

    /// 內部鍵值
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonKey::EarlySpring => "early_spring",
            SeasonKey::LateSpring => "late_spring",
            SeasonKey::SummerFall => "summer_fall",
        }
    }

    /// 顯示標籤
    pub fn display_label(&self) -> &'static str {
        match self {
            SeasonKey::EarlySpring => "Early Spring",
            SeasonKey::LateSpring => "Late Spring",
            SeasonKey::SummerFall => "Summer/Fall",
        }
    }
}

impl std::fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeasonKey {
    type Err = BloomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "early_spring" => Ok(SeasonKey::EarlySpring),
            "late_spring" => Ok(SeasonKey::LateSpring),
            "summer_fall" => Ok(SeasonKey::SummerFall),
            other => Err(BloomError::UnknownSeason(other.to_string())),
        }
    }
}

/// 配方：類別 → 百分比（0..1）
///
/// 建構時驗證：百分比不得為負，且總和必須為 1.0 ± ε。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    percentages: HashMap<Category, Decimal>,
}

impl Recipe {
    /// 創建並驗證配方
    pub fn new(percentages: HashMap<Category, Decimal>) -> Result<Self> {
        let mut sum = Decimal::ZERO;
        for cat in Category::ALL {
            let pct = percentages.get(&cat).copied().unwrap_or(Decimal::ZERO);
            if pct < Decimal::ZERO {
                return Err(BloomError::InvalidRecipe(format!(
                    "類別 {} 百分比為負: {}",
                    cat, pct
                )));
            }
            sum += pct;
        }

        if (sum - Decimal::ONE).abs() > RECIPE_SUM_EPSILON {
            return Err(BloomError::InvalidRecipe(format!(
                "百分比總和必須為 1.0，實際 {}",
                sum
            )));
        }

        Ok(Self { percentages })
    }

    /// 取得類別百分比（缺漏視為 0）
    pub fn pct(&self, category: Category) -> Decimal {
        self.percentages
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 依固定優先序迭代（類別, 百分比）
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.iter().map(|&cat| (cat, self.pct(cat)))
    }

    /// 配方中實際佔比 > 0 的類別（固定優先序）
    pub fn active_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|&cat| self.pct(cat) > Decimal::ZERO)
            .collect()
    }
}

/// 標準季節配方
pub fn canonical_recipe(season: SeasonKey) -> Recipe {
    // 百分比以 Decimal 常量定義，總和恰為 1，建構必定成功
    let entries: [(Category, Decimal); 6] = match season {
        SeasonKey::EarlySpring => [
            (Category::Focal, Decimal::new(20, 2)),
            (Category::Foundation, Decimal::new(39, 2)),
            (Category::Filler, Decimal::new(8, 2)),
            (Category::Floater, Decimal::new(10, 2)),
            (Category::Finisher, Decimal::new(8, 2)),
            (Category::Foliage, Decimal::new(15, 2)),
        ],
        SeasonKey::LateSpring => [
            (Category::Focal, Decimal::new(12, 2)),
            (Category::Foundation, Decimal::new(43, 2)),
            (Category::Filler, Decimal::new(10, 2)),
            (Category::Floater, Decimal::new(10, 2)),
            (Category::Finisher, Decimal::new(10, 2)),
            (Category::Foliage, Decimal::new(15, 2)),
        ],
        SeasonKey::SummerFall => [
            (Category::Focal, Decimal::new(33, 2)),
            (Category::Foundation, Decimal::new(20, 2)),
            (Category::Filler, Decimal::new(10, 2)),
            (Category::Floater, Decimal::new(11, 2)),
            (Category::Finisher, Decimal::new(11, 2)),
            (Category::Foliage, Decimal::new(15, 2)),
        ],
    };

    let percentages = entries.into_iter().collect();
    Recipe::new(percentages).expect("標準配方必須通過驗證")
}
