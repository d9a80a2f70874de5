//! 花材類別模型

use serde::{Deserialize, Serialize};

/// 花材類別（固定封閉集合）
///
/// 宣告順序即固定優先序（`ALL`），所有需要決定性的迭代與
/// 平手裁決都依此順序進行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// 焦點花
    Focal,
    /// 基底花
    Foundation,
    /// 填充花
    Filler,
    /// 漂浮花
    Floater,
    /// 收尾花
    Finisher,
    /// 葉材
    Foliage,
}

impl Category {
    /// 固定優先序（平手裁決、決定性迭代用）
    pub const ALL: [Category; 6] = [
        Category::Focal,
        Category::Foundation,
        Category::Filler,
        Category::Floater,
        Category::Finisher,
        Category::Foliage,
    ];

    /// 餘數再分配的循環順序（枝數取整時使用）
    pub const REDISTRIBUTION_ORDER: [Category; 6] = [
        Category::Foundation,
        Category::Floater,
        Category::Filler,
        Category::Finisher,
        Category::Focal,
        Category::Foliage,
    ];

    /// 類別名稱
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Focal => "Focal",
            Category::Foundation => "Foundation",
            Category::Filler => "Filler",
            Category::Floater => "Floater",
            Category::Finisher => "Finisher",
            Category::Foliage => "Foliage",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::BloomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Focal" => Ok(Category::Focal),
            "Foundation" => Ok(Category::Foundation),
            "Filler" => Ok(Category::Filler),
            "Floater" => Ok(Category::Floater),
            "Finisher" => Ok(Category::Finisher),
            "Foliage" => Ok(Category::Foliage),
            other => Err(crate::BloomError::UnknownCategory(other.to_string())),
        }
    }
}
