//! # Bloom Calculation Engine
//!
//! 核心配枝計算引擎：枝數縮放、花束定價反推、邊界縮放、配枝評估

pub mod bound_scaling;
pub mod evaluator;
pub mod scaling;
pub mod sizing;

// Re-export 主要類型
pub use bound_scaling::{BoundScalingCalculator, ScaledBounds, StemBounds};
pub use evaluator::{AllocationEvaluator, Evaluation};
pub use scaling::StemScalingCalculator;
pub use sizing::BouquetSizingCalculator;
