use member_search::domain::{MemberSearchCondition, MemberStore};

use crate::helpers::seeded_store;

#[tokio::test]
async fn empty_condition_returns_every_member() {
    let store = seeded_store().await;

    let rows = store
        .search(&MemberSearchCondition::default())
        .await
        .unwrap();
    let all_members = store.find_all().await.unwrap();

    assert_eq!(rows.len(), all_members.len());
    let usernames: Vec<_> =
        rows.iter().map(|row| row.username.as_str()).collect();
    assert_eq!(usernames, vec!["member1", "member2", "member3", "member4"]);
}

#[tokio::test]
async fn username_filter_matches_exactly() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default().with_username("member2");
    let rows = store.search(&condition).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "member2");
    assert_eq!(rows[0].age, 20);
}

#[tokio::test]
async fn username_filter_is_case_sensitive() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default().with_username("Member2");
    let rows = store.search(&condition).await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn blank_username_filter_behaves_as_absent() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default().with_username("   ");
    let rows = store.search(&condition).await.unwrap();

    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn age_bounds_are_inclusive() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default()
        .with_age_goe(20)
        .with_age_loe(30);
    let rows = store.search(&condition).await.unwrap();

    let ages: Vec<_> = rows.iter().map(|row| row.age).collect();
    assert_eq!(ages, vec![20, 30]);
}

#[tokio::test]
async fn omitting_one_age_bound_drops_only_that_side() {
    let store = seeded_store().await;

    let lower_only = MemberSearchCondition::default().with_age_goe(25);
    let rows = store.search(&lower_only).await.unwrap();
    let ages: Vec<_> = rows.iter().map(|row| row.age).collect();
    assert_eq!(ages, vec![30, 40]);

    let upper_only = MemberSearchCondition::default().with_age_loe(25);
    let rows = store.search(&upper_only).await.unwrap();
    let ages: Vec<_> = rows.iter().map(|row| row.age).collect();
    assert_eq!(ages, vec![10, 20]);
}

#[tokio::test]
async fn team_filter_excludes_teamless_members() {
    let mut store = seeded_store().await;
    store.add_member("member5", 50, None).await.unwrap();

    let unfiltered = store
        .search(&MemberSearchCondition::default())
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 5);
    let teamless = unfiltered.iter().find(|row| row.username == "member5");
    assert_eq!(teamless.unwrap().team_name, None);

    let condition = MemberSearchCondition::default().with_team_name("teamA");
    let rows = store.search(&condition).await.unwrap();
    let usernames: Vec<_> =
        rows.iter().map(|row| row.username.as_str()).collect();
    assert_eq!(
        usernames,
        vec!["member1", "member2"],
        "Teamless member should be dropped by the team filter"
    );
}

#[tokio::test]
async fn combined_filters_select_member3() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default()
        .with_age_goe(15)
        .with_age_loe(35)
        .with_team_name("teamB");
    let rows = store.search(&condition).await.unwrap();

    let usernames: Vec<_> =
        rows.iter().map(|row| row.username.as_str()).collect();
    assert_eq!(usernames, vec!["member3"]);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
}

#[tokio::test]
async fn projection_carries_team_fields() {
    let store = seeded_store().await;

    let condition = MemberSearchCondition::default().with_username("member4");
    let rows = store.search(&condition).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.age, 40);
    assert!(row.team_id.is_some());
    assert_eq!(row.team_name.as_deref(), Some("teamB"));
}
