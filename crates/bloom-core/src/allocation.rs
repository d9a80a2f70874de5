//! 單束配枝模型

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BloomError, Category, PriceTable, Result};

/// 單一花束的每類別配枝數
///
/// 缺漏的類別視為 0。僅在搜索過程中被修改，搜索結束後轉為
/// 優化結果的一部分——不跨呼叫保留任何狀態。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    stems: HashMap<Category, u32>,
}

impl Allocation {
    /// 創建空配枝
    pub fn new() -> Self {
        Self::default()
    }

    /// 從映射創建
    pub fn from_map(stems: HashMap<Category, u32>) -> Self {
        Self { stems }
    }

    /// 取得類別配枝數（缺漏視為 0）
    pub fn get(&self, category: Category) -> u32 {
        self.stems.get(&category).copied().unwrap_or(0)
    }

    /// 設置類別配枝數
    pub fn set(&mut self, category: Category, stems: u32) {
        self.stems.insert(category, stems);
    }

    /// 建構器模式：設置類別配枝數
    pub fn with(mut self, category: Category, stems: u32) -> Self {
        self.set(category, stems);
        self
    }

    /// 對類別加一枝
    pub fn add_one(&mut self, category: Category) {
        let current = self.get(category);
        self.stems.insert(category, current + 1);
    }

    /// 對類別減一枝（已為 0 則不變）
    pub fn remove_one(&mut self, category: Category) {
        let current = self.get(category);
        if current > 0 {
            self.stems.insert(category, current - 1);
        }
    }

    /// 單束總枝數
    pub fn total_stems(&self) -> u32 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// 單束成本 = Σ(配枝數 × 批發均價)
    ///
    /// 配枝數 > 0 但缺價的類別視為上游資料問題，立即失敗。
    pub fn cost(&self, prices: &PriceTable) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for cat in Category::ALL {
            let count = self.get(cat);
            if count == 0 {
                continue;
            }
            let price = prices
                .get(&cat)
                .copied()
                .ok_or(BloomError::MissingPrice(cat))?;
            total += Decimal::from(count) * price;
        }
        Ok(total)
    }

    /// 正規化鍵：固定優先序下的枝數向量
    ///
    /// 搜索的訪問集合以此為鍵做去重——配枝在遍歷中會被就地修改，
    /// 不能依賴預設相等性。
    pub fn canonical_key(&self) -> [u32; 6] {
        let mut key = [0u32; 6];
        for (i, cat) in Category::ALL.iter().enumerate() {
            key[i] = self.get(*cat);
        }
        key
    }

    /// 是否所有類別皆為 0
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.get(c) == 0)
    }
}
