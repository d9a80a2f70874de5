//! 可用枝數模型

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Category;

/// 每類別可用枝數（單次優化呼叫期間唯讀）
///
/// 缺漏的類別視為 0。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Availability {
    stems: HashMap<Category, u32>,
}

impl Availability {
    /// 創建空的可用枝數（全部為 0）
    pub fn new() -> Self {
        Self::default()
    }

    /// 從映射創建
    pub fn from_map(stems: HashMap<Category, u32>) -> Self {
        Self { stems }
    }

    /// 取得類別可用枝數（缺漏視為 0）
    pub fn get(&self, category: Category) -> u32 {
        self.stems.get(&category).copied().unwrap_or(0)
    }

    /// 設置類別可用枝數（建構輸入用）
    pub fn set(&mut self, category: Category, stems: u32) {
        self.stems.insert(category, stems);
    }

    /// 建構器模式：設置類別可用枝數
    pub fn with(mut self, category: Category, stems: u32) -> Self {
        self.set(category, stems);
        self
    }

    /// 所有類別的總可用枝數
    pub fn total(&self) -> u64 {
        Category::ALL.iter().map(|&c| self.get(c) as u64).sum()
    }
}

impl FromIterator<(Category, u32)> for Availability {
    fn from_iter<T: IntoIterator<Item = (Category, u32)>>(iter: T) -> Self {
        Self {
            stems: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_is_zero() {
        let availability = Availability::new().with(Category::Foundation, 50);

        assert_eq!(availability.get(Category::Foundation), 50);
        assert_eq!(availability.get(Category::Filler), 0);
        assert_eq!(availability.total(), 50);
    }

    #[test]
    fn test_from_iterator() {
        let availability: Availability =
            [(Category::Focal, 30), (Category::Foliage, 10)].into_iter().collect();

        assert_eq!(availability.get(Category::Focal), 30);
        assert_eq!(availability.get(Category::Foliage), 10);
        assert_eq!(availability.total(), 40);
    }
}
