//! 配枝評估：單束配枝 × 庫存 → 可製束數、瓶頸類別、滯留枝數

use std::collections::HashMap;

use serde::Serialize;

use bloom_core::{Allocation, Availability, Category};

/// 配枝對庫存的評估結果
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// 可製作的最大束數
    pub max_bouquets: u32,

    /// 瓶頸類別（空配枝時為 None）
    pub limiting_category: Option<Category>,

    /// 每類別滯留枝數：製作 max_bouquets 束後剩餘的庫存
    pub stranded_stems: HashMap<Category, u32>,
}

/// 配枝評估計算器
pub struct AllocationEvaluator;

impl AllocationEvaluator {
    /// 評估配枝可支撐的束數
    ///
    /// 僅每束需求 > 0 的類別參與瓶頸計算（整數除法下取整）；
    /// 同為最小值時取固定優先序中最先出現的類別。
    /// 全零配枝回傳 0 束、無瓶頸、無滯留。
    pub fn evaluate(allocation: &Allocation, availability: &Availability) -> Evaluation {
        let mut max_bouquets: Option<u32> = None;
        let mut limiting_category = None;

        for cat in Category::ALL {
            let per_bouquet = allocation.get(cat);
            if per_bouquet == 0 {
                continue;
            }

            let supported = availability.get(cat) / per_bouquet;
            if max_bouquets.map_or(true, |current| supported < current) {
                max_bouquets = Some(supported);
                limiting_category = Some(cat);
            }
        }

        let max_bouquets = match max_bouquets {
            Some(n) => n,
            None => {
                return Evaluation {
                    max_bouquets: 0,
                    limiting_category: None,
                    stranded_stems: HashMap::new(),
                }
            }
        };

        let stranded_stems = Category::ALL
            .iter()
            .map(|&cat| {
                let consumed = allocation.get(cat) * max_bouquets;
                (cat, availability.get(cat).saturating_sub(consumed))
            })
            .collect();

        Evaluation {
            max_bouquets,
            limiting_category,
            stranded_stems,
        }
    }
}
