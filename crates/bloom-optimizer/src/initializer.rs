//! 基線配枝初始化

use std::collections::HashMap;

use bloom_calc::StemBounds;
use bloom_core::{Allocation, Category};

/// 基線配枝初始化器
pub struct AllocationInitializer;

impl AllocationInitializer {
    /// 以每類別的有效下界建立基線配枝
    ///
    /// 不做上界合法性檢查——上界由後續搜索維護。
    pub fn baseline(bounds: &HashMap<Category, StemBounds>) -> Allocation {
        let mut allocation = Allocation::new();
        for cat in Category::ALL {
            if let Some(b) = bounds.get(&cat) {
                allocation.set(cat, b.effective_min);
            }
        }
        allocation
    }
}
