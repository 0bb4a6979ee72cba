use color_eyre::eyre::eyre;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{
    Member, MemberId, MemberSearchCondition, MemberStore, MemberStoreError,
    MemberTeamRow, Page, PageRequest, Team, TeamId,
};

const SELECT_MEMBER_TEAM: &str = "\
    SELECT m.id AS member_id, m.username, m.age, \
           t.id AS team_id, t.name AS team_name \
    FROM members AS m \
    LEFT JOIN teams AS t ON m.team_id = t.id";

// Counts member rows through the same join and filters as the projection
// query. The join is many-to-one, so it cannot inflate the count.
const COUNT_MEMBERS: &str = "\
    SELECT count(m.id) \
    FROM members AS m \
    LEFT JOIN teams AS t ON m.team_id = t.id";

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_window(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Vec<MemberTeamRow>, MemberStoreError> {
        let mut query = QueryBuilder::new(SELECT_MEMBER_TEAM);
        push_search_filters(&mut query, condition);
        query.push(" ORDER BY m.id");
        query.push(" LIMIT ").push_bind(page.size() as i64);
        query.push(" OFFSET ").push_bind(page.offset() as i64);

        query
            .build_query_as::<MemberTeamRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    async fn count(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<u64, MemberStoreError> {
        let mut query = QueryBuilder::new(COUNT_MEMBERS);
        push_search_filters(&mut query, condition);

        let total: i64 = query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        Ok(total as u64)
    }
}

/// Appends a `WHERE` clause with one AND-ed predicate per present condition
/// field. An empty condition appends nothing, leaving the listing unfiltered.
fn push_search_filters<'qb>(
    query: &mut QueryBuilder<'qb, Postgres>,
    condition: &'qb MemberSearchCondition,
) {
    let mut separator = " WHERE ";

    if let Some(username) = condition.username() {
        query.push(separator).push("m.username = ").push_bind(username);
        separator = " AND ";
    }
    if let Some(team_name) = condition.team_name() {
        query.push(separator).push("t.name = ").push_bind(team_name);
        separator = " AND ";
    }
    if let Some(age_goe) = condition.age_goe() {
        query.push(separator).push("m.age >= ").push_bind(age_goe);
        separator = " AND ";
    }
    if let Some(age_loe) = condition.age_loe() {
        query.push(separator).push("m.age <= ").push_bind(age_loe);
    }
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding team to PostgreSQL", skip_all)]
    async fn add_team(&mut self, name: &str) -> Result<Team, MemberStoreError> {
        sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name) VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        username: &str,
        age: i32,
        team_id: Option<TeamId>,
    ) -> Result<Member, MemberStoreError> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (username, age, team_id) VALUES ($1, $2, $3)
            RETURNING id, username, age, team_id
            "#,
        )
        .bind(username)
        .bind(age)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                MemberStoreError::TeamNotFound
            }
            e => MemberStoreError::UnexpectedError(eyre!(e)),
        })
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn find_by_id(
        &self,
        id: MemberId,
    ) -> Result<Member, MemberStoreError> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
            e => MemberStoreError::UnexpectedError(eyre!(e)),
        })
    }

    #[tracing::instrument(
        name = "Getting members by username from PostgreSQL",
        skip_all
    )]
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Member>, MemberStoreError> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM members
            WHERE username = $1
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn find_all(&self) -> Result<Vec<Member>, MemberStoreError> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM members
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Searching members in PostgreSQL", skip_all)]
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, MemberStoreError> {
        let mut query = QueryBuilder::new(SELECT_MEMBER_TEAM);
        push_search_filters(&mut query, condition);
        query.push(" ORDER BY m.id");

        query
            .build_query_as::<MemberTeamRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Searching member page in PostgreSQL",
        skip_all
    )]
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError> {
        let rows = self.fetch_window(condition, page).await?;
        let total = self.count(condition).await?;

        Ok(Page::new(rows, *page, total))
    }

    #[tracing::instrument(
        name = "Searching member page in PostgreSQL with count skip",
        skip_all
    )]
    async fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError> {
        let rows = self.fetch_window(condition, page).await?;

        Page::from_window(rows, *page, || self.count(condition)).await
    }
}
