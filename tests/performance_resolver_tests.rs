use std::collections::BTreeSet;

use chrono::NaiveDate;

use pool_strength::api::seventeen_lands::card_ratings_url;
use pool_strength::db::KvStore;

mod utils;

use utils::*;

fn ratings(set: &str, archetype: &str, day: NaiveDate) -> String {
    card_ratings_url(SEVENTEEN_LANDS_URL, set, "PremierDraft", day, archetype)
}

fn sets(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_current_set_is_cached_for_the_day() {
    let setup = TestSetup::new();
    let uri = ratings("HBG", "WR", today());
    setup.fetcher.route(&uri, fixture("ratings_hbg_wr.json")).await;
    let resolver = setup.performance_resolver();

    let first = resolver.resolve("HBG", "WR", false).await.unwrap();
    let second = resolver.resolve("HBG", "WR", false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("Lightning Bolt"), Some(&0.65));
    assert_eq!(setup.fetcher.calls_to(&uri).await, 1);
    assert!(setup
        .store
        .get("perf_HBG_WR_2022-07-09")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_current_set_refetches_the_next_day() {
    let setup = TestSetup::new();
    let next = NaiveDate::from_ymd_opt(2022, 7, 10).unwrap();
    setup
        .fetcher
        .route(ratings("HBG", "WR", today()), fixture("ratings_hbg_wr.json"))
        .await;
    setup
        .fetcher
        .route(ratings("HBG", "WR", next), fixture("ratings_hbg_wr.json"))
        .await;

    setup
        .performance_resolver()
        .resolve("HBG", "WR", false)
        .await
        .unwrap();
    setup
        .performance_resolver_on(next)
        .resolve("HBG", "WR", false)
        .await
        .unwrap();

    assert_eq!(setup.fetcher.call_count().await, 2);
    assert_eq!(setup.store.len().await, 2);
}

#[tokio::test]
async fn test_older_set_is_cached_permanently() {
    let setup = TestSetup::new();
    let next = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    setup
        .fetcher
        .route(ratings("SNC", "WR", today()), fixture("ratings_snc_wr.json"))
        .await;

    setup
        .performance_resolver()
        .resolve("SNC", "WR", false)
        .await
        .unwrap();
    let later = setup
        .performance_resolver_on(next)
        .resolve("SNC", "WR", false)
        .await
        .unwrap();

    assert_eq!(later.get("Lightning Bolt"), Some(&0.58));
    assert_eq!(setup.fetcher.call_count().await, 1);
}

#[tokio::test]
async fn test_forced_refresh_bypasses_and_overwrites_cache() {
    let setup = TestSetup::new();
    let uri = ratings("HBG", "WR", today());
    setup.store.set("perf_HBG_WR_2022-07-09", b"[]").await.unwrap();
    setup.fetcher.route(&uri, fixture("ratings_hbg_wr.json")).await;
    let resolver = setup.performance_resolver();

    let rates = resolver.resolve("HBG", "WR", true).await.unwrap();

    assert_eq!(rates.get("Lightning Bolt"), Some(&0.65));
    assert_eq!(setup.fetcher.calls_to(&uri).await, 1);
    assert_eq!(setup.store.write_count().await, 2);
}

#[tokio::test]
async fn test_forced_records_skip_a_populated_cache() {
    let setup = TestSetup::new();
    let uri = ratings("HBG", "WR", today());
    setup.fetcher.route(&uri, fixture("ratings_hbg_wr.json")).await;
    let resolver = setup.performance_resolver();

    resolver.records("HBG", "WR", false).await.unwrap();
    let records = resolver.records("HBG", "WR", true).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(setup.fetcher.calls_to(&uri).await, 2);
    assert_eq!(setup.store.write_count().await, 2);
}

#[tokio::test]
async fn test_empty_cached_value_is_refetched() {
    let setup = TestSetup::new();
    let uri = ratings("HBG", "WR", today());
    setup.store.set("perf_HBG_WR_2022-07-09", b"").await.unwrap();
    setup.fetcher.route(&uri, fixture("ratings_hbg_wr.json")).await;

    let rates = setup
        .performance_resolver()
        .resolve("HBG", "WR", false)
        .await
        .unwrap();

    assert_eq!(rates.len(), 2);
    assert_eq!(setup.fetcher.calls_to(&uri).await, 1);
}

#[tokio::test]
async fn test_prevalence_filter_zeroes_null_rates() {
    let setup = TestSetup::new();
    setup
        .fetcher
        .route(ratings("HBG", "WR", today()), fixture("ratings_hbg_wr.json"))
        .await;

    let rates = setup
        .performance_resolver()
        .resolve("HBG", "WR", false)
        .await
        .unwrap();

    assert_eq!(rates.get("Plains"), Some(&0.0));
}

#[tokio::test]
async fn test_failing_archetypes_are_skipped() {
    let setup = TestSetup::new();
    setup
        .fetcher
        .route(ratings("HBG", "WR", today()), fixture("ratings_hbg_wr.json"))
        .await;

    let maps = setup
        .performance_resolver()
        .load_archetype_maps(&sets(&["HBG"]), false)
        .await;

    assert_eq!(maps.len(), 1);
    assert_eq!(maps["WR"].get("Lightning Bolt"), Some(&0.65));
    // Nothing is cached for the archetypes that failed
    assert_eq!(setup.store.len().await, 1);
}

#[tokio::test]
async fn test_latest_set_wins_for_recurring_cards() {
    let setup = TestSetup::new();
    setup
        .fetcher
        .route(ratings("SNC", "WR", today()), fixture("ratings_snc_wr.json"))
        .await;
    setup
        .fetcher
        .route(ratings("HBG", "WR", today()), fixture("ratings_hbg_wr.json"))
        .await;

    let maps = setup
        .performance_resolver()
        .load_archetype_maps(&sets(&["HBG", "SNC"]), false)
        .await;

    let wr = &maps["WR"];
    assert_eq!(wr.get("Lightning Bolt"), Some(&0.65));
    assert_eq!(wr.get("Ob Nixilis, the Adversary"), Some(&0.61));
}

#[tokio::test]
async fn test_three_colour_set_queries_shard_archetypes() {
    let setup = TestSetup::new();

    setup
        .performance_resolver()
        .load_archetype_maps(&sets(&["SNC"]), false)
        .await;

    let calls = setup.fetcher.calls().await;
    assert_eq!(calls.len(), 20);
    assert!(calls.contains(&ratings("SNC", "WUB", today())));
}

#[tokio::test]
async fn test_unobserved_sets_are_not_queried() {
    let setup = TestSetup::new();

    setup
        .performance_resolver()
        .load_archetype_maps(&sets(&["HBG"]), false)
        .await;

    let calls = setup.fetcher.calls().await;
    assert_eq!(calls.len(), 10);
    assert!(calls.iter().all(|c| c.contains("expansion=HBG")));
}
