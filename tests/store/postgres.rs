//! Database-backed checks, ignored by default. Run with a reachable
//! Postgres instance:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use member_search::domain::{
    MemberSearchCondition, MemberStore, MemberStoreError, PageRequest, TeamId,
};
use member_search::get_postgres_pool;
use member_search::services::data_stores::PostgresMemberStore;
use member_search::utils::constants::DATABASE_URL;

async fn postgres_store() -> PostgresMemberStore {
    let pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PostgresMemberStore::new(pool)
}

// Rows persist between runs, so every run tags its fixture names.
fn run_tag() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock before the epoch")
        .as_nanos()
}

#[tokio::test]
#[ignore]
async fn search_filters_and_pages_against_postgres() {
    let mut store = postgres_store().await;
    let tag = run_tag();

    let team_a_name = format!("teamA-{tag}");
    let team_b_name = format!("teamB-{tag}");
    let team_a = store.add_team(&team_a_name).await.unwrap();
    let team_b = store.add_team(&team_b_name).await.unwrap();

    let usernames: Vec<String> =
        (1..=4).map(|n| format!("member{n}-{tag}")).collect();
    store
        .add_member(&usernames[0], 10, Some(team_a.id))
        .await
        .unwrap();
    store
        .add_member(&usernames[1], 20, Some(team_a.id))
        .await
        .unwrap();
    store
        .add_member(&usernames[2], 30, Some(team_b.id))
        .await
        .unwrap();
    store
        .add_member(&usernames[3], 40, Some(team_b.id))
        .await
        .unwrap();
    let teamless = format!("member5-{tag}");
    store.add_member(&teamless, 50, None).await.unwrap();

    let condition = MemberSearchCondition::default()
        .with_age_goe(15)
        .with_age_loe(35)
        .with_team_name(team_b_name.clone());
    let rows = store.search(&condition).await.unwrap();
    let found: Vec<_> =
        rows.iter().map(|row| row.username.as_str()).collect();
    assert_eq!(found, vec![usernames[2].as_str()]);

    let condition =
        MemberSearchCondition::default().with_username(teamless.clone());
    let rows = store.search(&condition).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team_name, None, "Left join keeps teamless members");

    let condition =
        MemberSearchCondition::default().with_team_name(team_a_name);
    let page = store
        .search_page_optimized(&condition, &PageRequest::first(10).unwrap())
        .await
        .unwrap();
    assert_eq!(page.total(), 2);
    assert!(page.is_last());

    let page = store
        .search_page(&condition, &PageRequest::first(1).unwrap())
        .await
        .unwrap();
    assert_eq!(page.rows().len(), 1);
    assert_eq!(page.total(), 2);
    assert!(!page.is_last());
}

#[tokio::test]
#[ignore]
async fn unknown_team_is_rejected_by_postgres() {
    let mut store = postgres_store().await;

    let team = store.add_team(&format!("gone-{}", run_tag())).await.unwrap();
    let missing = TeamId::new(*team.id.as_ref() + 1_000_000);

    let result = store.add_member("orphan", 10, Some(missing)).await;
    assert_eq!(result, Err(MemberStoreError::TeamNotFound));
}
