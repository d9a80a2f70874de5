//! # Bloom
//!
//! 花束配枝優化引擎：配方縮放、定價反推、邊界縮放、補償搜索、
//! 價格擴張與整體編排的統一入口。
//!
//! 各子 crate 分工：
//! - `bloom-core` — 資料模型、標準表、配置與錯誤類型
//! - `bloom-calc` — 純計算器（縮放、定價、邊界、評估）
//! - `bloom-optimizer` — 搜索與主編排

pub use bloom_core::{
    canonical_bounds, canonical_recipe, Allocation, Availability, BloomError, BoundTable,
    Category, CompensationRules, OptimizerConfig, PercentBounds, PriceTable, Recipe, Result,
    SeasonKey,
};

pub use bloom_calc::{
    AllocationEvaluator, BoundScalingCalculator, BouquetSizingCalculator, Evaluation,
    StemScalingCalculator,
};

pub use bloom_optimizer::{
    BouquetOptimizer, CompensationSearch, OptimizationResult, Outcome, PriceExpansionSearch,
};
