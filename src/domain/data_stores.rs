use color_eyre::eyre::Report;
use thiserror::Error;

use super::{
    Member, MemberId, MemberSearchCondition, MemberTeamRow, Page, PageRequest,
    Team, TeamId,
};

#[async_trait::async_trait]
pub trait MemberStore {
    async fn add_team(&mut self, name: &str) -> Result<Team, MemberStoreError>;
    async fn add_member(
        &mut self,
        username: &str,
        age: i32,
        team_id: Option<TeamId>,
    ) -> Result<Member, MemberStoreError>;
    async fn find_by_id(
        &self,
        id: MemberId,
    ) -> Result<Member, MemberStoreError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Member>, MemberStoreError>;
    async fn find_all(&self) -> Result<Vec<Member>, MemberStoreError>;

    /// Unpaged filtered listing, left-joined with teams.
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, MemberStoreError>;

    /// Bounded fetch plus an unconditional count query for the total.
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError>;

    /// Bounded fetch that skips the count query whenever the window alone
    /// proves the total.
    async fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Member not found")]
    MemberNotFound,
    #[error("Team not found")]
    TeamNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::TeamNotFound, Self::TeamNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
