//! # Bloom Optimizer
//!
//! 配枝搜索模組（基線初始化、補償搜索、價格擴張、整體編排）

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use bloom_calc::Evaluation;
use bloom_core::{Allocation, Category};

pub mod compensation;
pub mod expansion;
pub mod initializer;
pub mod optimizer;

// Re-export 主要類型
pub use compensation::CompensationSearch;
pub use expansion::{ExpansionResult, PriceExpansionSearch};
pub use initializer::AllocationInitializer;
pub use optimizer::BouquetOptimizer;

/// 優化結局分類
///
/// 三種結局皆為正常業務結果，不會以錯誤形式回報；
/// 呼叫端必須據此分支，不可混為一談。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// 配枝合法、可製束、價格落在容差內
    Feasible,

    /// 配枝合法且可製束，但價格偏離目標超出容差
    PriceOutOfTolerance,

    /// 配枝合法但庫存撐不起任何一束
    ZeroBouquets,
}

/// 優化過程診斷記錄（中間評估快照）
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    /// 目標價反推的連續隱含枝數（未鉗制）
    pub implied_stem_count: Decimal,

    /// 鉗制到商業範圍後的目標枝數
    pub clamped_stem_count: Decimal,

    /// 基線配枝的評估
    pub baseline_evaluation: Evaluation,

    /// 補償搜索後的評估
    pub compensated_evaluation: Evaluation,

    /// 價格擴張實際執行的步數
    pub expansion_steps: u32,
}

/// 優化結果
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    /// 結果識別碼
    pub id: Uuid,

    /// 結局分類
    pub outcome: Outcome,

    /// 單束總枝數
    pub total_stems: u32,

    /// 最終單束配枝
    pub allocation: Allocation,

    /// 單束成本
    pub bouquet_cost: Decimal,

    /// 可製作的最大束數
    pub max_bouquets: u32,

    /// 瓶頸類別
    pub limiting_category: Option<Category>,

    /// 每類別滯留枝數
    pub stranded_stems: HashMap<Category, u32>,

    /// 滯留加權懲罰（Σ 滯留枝數 × 類別腐損加權）
    pub waste_penalty: Decimal,

    /// 成本與目標價的差（成本 − 目標價）
    pub price_delta: Decimal,

    /// 價格是否落在整體容差內
    pub within_price_tolerance: bool,

    /// 過程診斷
    pub diagnostics: Diagnostics,

    /// 優化信息
    pub messages: Vec<String>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: u64,
}
