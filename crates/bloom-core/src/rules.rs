//! 補償規則模型

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::Category;

/// 補償規則：有向圖，類別 X → 可吸收 X 減枝的類別集合
///
/// 集合可為空（該類別減枝不配對任何補償加枝）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompensationRules {
    rules: HashMap<Category, BTreeSet<Category>>,
}

impl CompensationRules {
    /// 創建空規則（不做任何補償配對）
    pub fn new() -> Self {
        Self::default()
    }

    /// 設置某類別的補償對象
    pub fn with_partners<I>(mut self, category: Category, partners: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        self.rules.insert(category, partners.into_iter().collect());
        self
    }

    /// 取得某類別的補償對象（BTreeSet 依宣告序迭代，保證決定性）
    pub fn partners(&self, category: Category) -> impl Iterator<Item = Category> + '_ {
        self.rules
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// 標準補償規則
    ///
    /// 結構性類別（Foundation）不外補；其餘類別的減枝可由
    /// 體量相近的類別吸收。
    pub fn canonical() -> Self {
        use Category::*;

        Self::new()
            .with_partners(Focal, [Foundation])
            .with_partners(Foundation, [])
            .with_partners(Filler, [Foundation, Finisher, Floater])
            .with_partners(Floater, [Foundation, Finisher, Filler])
            .with_partners(Finisher, [Foundation, Filler, Floater])
            .with_partners(Foliage, [Foundation, Finisher, Filler, Floater])
    }
}
