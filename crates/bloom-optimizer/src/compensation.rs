//! 補償搜索：有界廣度優先的減枝／補償探索

use std::collections::{HashMap, HashSet, VecDeque};

use bloom_calc::{AllocationEvaluator, Evaluation, StemBounds};
use bloom_core::{Allocation, Availability, Category, CompensationRules};

/// 補償搜索器
pub struct CompensationSearch;

impl CompensationSearch {
    /// 從初始配枝出發，尋找束數嚴格最大化的配枝
    ///
    /// 廣度優先遍歷，深度受 `max_depth` 限制。後繼狀態有兩類：
    /// - 單步減枝：類別減一枝後仍 ≥ 有效下界；
    /// - 補償步：X 的合法減枝配上規則表中每個 Y 的合法 +1
    ///   （≤ absolute_max），每個 (X, Y) 對各產生一個候選。
    ///
    /// 訪問集合以正規化鍵去重，且在展開前判定——補償對會繞回
    /// 先前狀態，缺了去重就會循環。每個新狀態都會被評估並入列
    /// （多步延遲改善必須保持可達），但只有束數嚴格提升才更新
    /// 當前最佳。同束數平手由先到者勝。
    ///
    /// 無法減枝時原樣返回輸入，不視為錯誤；結果束數絕不低於
    /// 初始評估。
    pub fn search(
        initial: &Allocation,
        availability: &Availability,
        bounds: &HashMap<Category, StemBounds>,
        rules: &CompensationRules,
        max_depth: u32,
    ) -> (Allocation, Evaluation) {
        let initial_eval = AllocationEvaluator::evaluate(initial, availability);

        let mut best_allocation = initial.clone();
        let mut best_eval = initial_eval;

        let mut visited: HashSet<[u32; 6]> = HashSet::new();
        visited.insert(initial.canonical_key());

        let mut frontier: VecDeque<(Allocation, u32)> = VecDeque::new();
        frontier.push_back((initial.clone(), 0));

        while let Some((state, depth)) = frontier.pop_front() {
            if depth >= max_depth {
                continue;
            }

            for successor in Self::successors(&state, bounds, rules) {
                if !visited.insert(successor.canonical_key()) {
                    continue;
                }

                let eval = AllocationEvaluator::evaluate(&successor, availability);
                if eval.max_bouquets > best_eval.max_bouquets {
                    tracing::debug!(
                        "補償搜索改善: {} → {} 束（深度 {}）",
                        best_eval.max_bouquets,
                        eval.max_bouquets,
                        depth + 1
                    );
                    best_allocation = successor.clone();
                    best_eval = eval;
                }

                frontier.push_back((successor, depth + 1));
            }
        }

        (best_allocation, best_eval)
    }

    /// 列舉一個狀態的所有合法後繼
    fn successors(
        state: &Allocation,
        bounds: &HashMap<Category, StemBounds>,
        rules: &CompensationRules,
    ) -> Vec<Allocation> {
        let mut successors = Vec::new();

        for cat in Category::ALL {
            let Some(cat_bounds) = bounds.get(&cat) else {
                continue;
            };

            let current = state.get(cat);
            if current == 0 || current - 1 < cat_bounds.effective_min {
                continue;
            }

            let mut reduced = state.clone();
            reduced.remove_one(cat);

            for partner in rules.partners(cat) {
                let Some(partner_bounds) = bounds.get(&partner) else {
                    continue;
                };
                if reduced.get(partner) + 1 > partner_bounds.absolute_max {
                    continue;
                }

                let mut compensated = reduced.clone();
                compensated.add_one(partner);
                successors.push(compensated);
            }

            successors.push(reduced);
        }

        successors
    }

    /// 單純爬山法：每輪取最佳單步減枝，嚴格改善才接受
    ///
    /// 無補償、無前瞻的廉價後備方案，首次無改善即停止。
    /// 不得作為主要策略使用。
    pub fn hill_climb(
        initial: &Allocation,
        availability: &Availability,
        bounds: &HashMap<Category, StemBounds>,
    ) -> (Allocation, Evaluation) {
        let mut current = initial.clone();
        let mut current_eval = AllocationEvaluator::evaluate(&current, availability);

        loop {
            let mut best_step: Option<(Allocation, Evaluation)> = None;

            for cat in Category::ALL {
                let Some(cat_bounds) = bounds.get(&cat) else {
                    continue;
                };

                let count = current.get(cat);
                if count == 0 || count - 1 < cat_bounds.effective_min {
                    continue;
                }

                let mut reduced = current.clone();
                reduced.remove_one(cat);
                let eval = AllocationEvaluator::evaluate(&reduced, availability);

                let improves = match &best_step {
                    Some((_, best)) => eval.max_bouquets > best.max_bouquets,
                    None => true,
                };
                if improves {
                    best_step = Some((reduced, eval));
                }
            }

            match best_step {
                Some((step, eval)) if eval.max_bouquets > current_eval.max_bouquets => {
                    current = step;
                    current_eval = eval;
                }
                _ => break,
            }
        }

        (current, current_eval)
    }
}
