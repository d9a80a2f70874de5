//! 優化器配置模型

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Category, CompensationRules};

/// 優化器參數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// 葉材衰減斷點（枝）：花束超過此枝數後，葉材佔比開始衰減
    pub foliage_breakpoint: u32,

    /// 葉材衰減因子（斷點以上區段的葉材佔比乘數）
    pub foliage_damping: Decimal,

    /// 補償搜索最大深度
    ///
    /// 訪問狀態數上界為（類別數）^ 深度，深度必須保持小（≤ 10）
    /// 以維持多項式執行時間。
    pub max_search_depth: u32,

    /// 整體價格容差（判定結果是否貼近目標價）
    pub price_tolerance: Decimal,

    /// 價格擴張搜索的收斂容差
    pub expansion_tolerance: Decimal,

    /// 價格擴張搜索的最大步數（保證終止）
    pub max_expansion_steps: u32,

    /// 單束最小總枝數（商業範圍下限）
    pub min_total_stems: u32,

    /// 單束最大總枝數（商業範圍上限）
    pub max_total_stems: u32,

    /// 滯留枝數加權（越高代表越不該滯留）
    pub waste_weights: HashMap<Category, Decimal>,

    /// 補償規則
    pub compensation_rules: CompensationRules,
}

impl OptimizerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            foliage_breakpoint: 25,
            foliage_damping: Decimal::new(6, 1), // 0.6
            max_search_depth: 8,
            price_tolerance: Decimal::new(15, 1),    // 1.5
            expansion_tolerance: Decimal::new(10, 1), // 1.0
            max_expansion_steps: 25,
            min_total_stems: 15,
            max_total_stems: 35,
            waste_weights: default_waste_weights(),
            compensation_rules: CompensationRules::canonical(),
        }
    }

    /// 建構器模式：設置葉材衰減斷點
    pub fn with_foliage_breakpoint(mut self, breakpoint: u32) -> Self {
        self.foliage_breakpoint = breakpoint;
        self
    }

    /// 建構器模式：設置葉材衰減因子
    pub fn with_foliage_damping(mut self, damping: Decimal) -> Self {
        self.foliage_damping = damping;
        self
    }

    /// 建構器模式：設置補償搜索深度（上限 10）
    pub fn with_max_search_depth(mut self, depth: u32) -> Self {
        self.max_search_depth = depth.min(10);
        self
    }

    /// 建構器模式：設置整體價格容差
    pub fn with_price_tolerance(mut self, tolerance: Decimal) -> Self {
        self.price_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置擴張收斂容差
    pub fn with_expansion_tolerance(mut self, tolerance: Decimal) -> Self {
        self.expansion_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置擴張最大步數
    pub fn with_max_expansion_steps(mut self, steps: u32) -> Self {
        self.max_expansion_steps = steps;
        self
    }

    /// 建構器模式：設置單束總枝數範圍
    pub fn with_total_stems_range(mut self, min: u32, max: u32) -> Self {
        self.min_total_stems = min;
        self.max_total_stems = max.max(min);
        self
    }

    /// 建構器模式：設置補償規則
    pub fn with_compensation_rules(mut self, rules: CompensationRules) -> Self {
        self.compensation_rules = rules;
        self
    }

    /// 取得類別的滯留加權（缺漏視為 1.0）
    pub fn waste_weight(&self, category: Category) -> Decimal {
        self.waste_weights
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 預設滯留加權（反映腐損優先級：基底花最高、葉材最低）
fn default_waste_weights() -> HashMap<Category, Decimal> {
    let mut weights = HashMap::new();
    weights.insert(Category::Foundation, Decimal::new(50, 1)); // 5.0
    weights.insert(Category::Finisher, Decimal::new(40, 1)); // 4.0
    weights.insert(Category::Floater, Decimal::new(30, 1)); // 3.0
    weights.insert(Category::Filler, Decimal::new(20, 1)); // 2.0
    weights.insert(Category::Focal, Decimal::new(10, 1)); // 1.0
    weights.insert(Category::Foliage, Decimal::new(5, 1)); // 0.5
    weights
}
