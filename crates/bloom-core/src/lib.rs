//! # Bloom Core
//!
//! 核心資料模型與類型定義

pub mod allocation;
pub mod availability;
pub mod bounds;
pub mod category;
pub mod config;
pub mod recipe;
pub mod rules;

// Re-export 主要類型
pub use allocation::Allocation;
pub use availability::Availability;
pub use bounds::{canonical_bounds, BoundTable, PercentBounds, REFERENCE_STEMS};
pub use category::Category;
pub use config::OptimizerConfig;
pub use recipe::{canonical_recipe, PriceTable, Recipe, SeasonKey};
pub use rules::CompensationRules;

use rust_decimal::Decimal;

/// 花束配置錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum BloomError {
    #[error("無效配方: {0}")]
    InvalidRecipe(String),

    #[error("類別 {0} 缺少批發均價")]
    MissingPrice(Category),

    #[error("無效成本: 加權平均每枝成本必須 > 0（實際 {0}）")]
    InvalidCost(Decimal),

    #[error("邊界不可行: 類別 {category} 有效下界 {min} 大於上界 {max}")]
    InfeasibleBounds {
        category: Category,
        min: Decimal,
        max: Decimal,
    },

    #[error("未知季節: {0}")]
    UnknownSeason(String),

    #[error("未知花材類別: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, BloomError>;
