//! 集成測試

use bloom::{
    Availability, BloomError, BouquetOptimizer, Category, Outcome, PriceTable, SeasonKey,
    StemScalingCalculator,
};
use rstest::rstest;
use rust_decimal::Decimal;

fn flat_prices(price: Decimal) -> PriceTable {
    Category::ALL.iter().map(|&c| (c, price)).collect()
}

fn ample_availability(stems: u32) -> Availability {
    Category::ALL.iter().map(|&c| (c, stems)).collect()
}

#[test]
fn test_early_spring_golden_allocation() {
    // 早春配方 20 枝的固定黃金配枝：
    // 下取整後餘數依固定循環順序補枝
    let recipe = bloom::canonical_recipe(SeasonKey::EarlySpring);
    let counts = StemScalingCalculator::calculate(20, &recipe);

    assert_eq!(counts[&Category::Focal], 4);
    assert_eq!(counts[&Category::Foundation], 8);
    assert_eq!(counts[&Category::Filler], 1);
    assert_eq!(counts[&Category::Floater], 3);
    assert_eq!(counts[&Category::Finisher], 1);
    assert_eq!(counts[&Category::Foliage], 3);
    assert_eq!(counts.values().sum::<u32>(), 20);
}

#[rstest]
#[case(SeasonKey::EarlySpring)]
#[case(SeasonKey::LateSpring)]
#[case(SeasonKey::SummerFall)]
fn test_full_pipeline_per_season(#[case] season: SeasonKey) {
    // 場景：充足庫存、均一單價，目標價 25
    let optimizer = BouquetOptimizer::new();
    let prices = flat_prices(Decimal::ONE);

    let result = optimizer
        .optimize(&ample_availability(200), season, Decimal::from(25), &prices)
        .unwrap();

    assert_eq!(result.outcome, Outcome::Feasible);
    assert!(result.max_bouquets > 0);
    assert!((result.bouquet_cost - Decimal::from(25)).abs() <= Decimal::new(15, 1));
    assert_eq!(result.total_stems, result.allocation.total_stems());

    // 滯留枝數皆非負且瓶頸類別滯留小於每束需求
    if let Some(limiting) = result.limiting_category {
        let per = result.allocation.get(limiting);
        assert!(result.stranded_stems[&limiting] < per);
    }
}

#[test]
fn test_foundation_only_availability() {
    // 場景：只有 Foundation 有貨
    // 零庫存且有效每束下限為 0 的類別（Filler/Floater/Finisher
    // 的 absolute_min 為 0）絕不得成為瓶頸類別
    let optimizer = BouquetOptimizer::new();
    let prices = flat_prices(Decimal::ONE);
    let availability = Availability::new().with(Category::Foundation, 50);

    let result = optimizer
        .optimize(
            &availability,
            SeasonKey::EarlySpring,
            Decimal::from(25),
            &prices,
        )
        .unwrap();

    // Focal/Foliage 的硬性下限 > 0，無貨即產不出束——正常結局而非錯誤
    assert_eq!(result.outcome, Outcome::ZeroBouquets);
    assert_eq!(result.max_bouquets, 0);

    let limiting = result.limiting_category.unwrap();
    assert!(!matches!(
        limiting,
        Category::Filler | Category::Floater | Category::Finisher
    ));
}

#[test]
fn test_missing_price_is_validation_error() {
    let optimizer = BouquetOptimizer::new();
    let mut prices = flat_prices(Decimal::ONE);
    prices.remove(&Category::Foliage);

    let result = optimizer.optimize(
        &ample_availability(100),
        SeasonKey::SummerFall,
        Decimal::from(25),
        &prices,
    );

    assert!(matches!(
        result,
        Err(BloomError::MissingPrice(Category::Foliage))
    ));
}

#[test]
fn test_scarce_inventory_still_maximizes_bouquets() {
    // 場景：Focal 短缺，補償搜索應壓低 Focal 用量換取束數
    let optimizer = BouquetOptimizer::new();
    let prices = flat_prices(Decimal::ONE);
    let availability = Availability::new()
        .with(Category::Focal, 10)
        .with(Category::Foundation, 200)
        .with(Category::Filler, 60)
        .with(Category::Floater, 60)
        .with(Category::Finisher, 60)
        .with(Category::Foliage, 60);

    let result = optimizer
        .optimize(
            &availability,
            SeasonKey::EarlySpring,
            Decimal::from(25),
            &prices,
        )
        .unwrap();

    assert!(result.max_bouquets > 0);
    // 補償搜索不倒退於基線
    assert!(
        result.diagnostics.compensated_evaluation.max_bouquets
            >= result.diagnostics.baseline_evaluation.max_bouquets
    );
}

#[test]
fn test_result_serializes_to_json() {
    let optimizer = BouquetOptimizer::new();
    let prices = flat_prices(Decimal::ONE);

    let result = optimizer
        .optimize(
            &ample_availability(100),
            SeasonKey::LateSpring,
            Decimal::from(20),
            &prices,
        )
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"outcome\""));
    assert!(json.contains("\"max_bouquets\""));
}
