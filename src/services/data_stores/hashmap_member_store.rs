use std::collections::HashMap;

use crate::domain::{
    Member, MemberId, MemberSearchCondition, MemberStore, MemberStoreError,
    MemberTeamRow, Page, PageRequest, Team, TeamId,
};

/// In-memory store with the same observable semantics as the Postgres one.
/// Members keep insertion order, which matches ascending id order since ids
/// are assigned monotonically.
#[derive(Default)]
pub struct HashmapMemberStore {
    teams: HashMap<TeamId, Team>,
    members: Vec<Member>,
    next_team_id: i64,
    next_member_id: i64,
}

impl HashmapMemberStore {
    fn project(&self, member: &Member) -> MemberTeamRow {
        let team = member.team_id.and_then(|id| self.teams.get(&id));
        MemberTeamRow {
            member_id: member.id,
            username: member.username.clone(),
            age: member.age,
            team_id: team.map(|team| team.id),
            team_name: team.map(|team| team.name.clone()),
        }
    }

    fn matching_rows(
        &self,
        condition: &MemberSearchCondition,
    ) -> Vec<MemberTeamRow> {
        self.members
            .iter()
            .map(|member| self.project(member))
            .filter(|row| matches_condition(condition, row))
            .collect()
    }
}

fn matches_condition(
    condition: &MemberSearchCondition,
    row: &MemberTeamRow,
) -> bool {
    // A team-name predicate compares against the joined name, so a member
    // without a team can never satisfy it.
    condition
        .username()
        .map_or(true, |username| row.username == username)
        && condition
            .team_name()
            .map_or(true, |team_name| row.team_name.as_deref() == Some(team_name))
        && condition.age_goe().map_or(true, |age_goe| row.age >= age_goe)
        && condition.age_loe().map_or(true, |age_loe| row.age <= age_loe)
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn add_team(&mut self, name: &str) -> Result<Team, MemberStoreError> {
        self.next_team_id += 1;
        let team = Team {
            id: TeamId::new(self.next_team_id),
            name: name.to_string(),
        };
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn add_member(
        &mut self,
        username: &str,
        age: i32,
        team_id: Option<TeamId>,
    ) -> Result<Member, MemberStoreError> {
        if let Some(team_id) = team_id {
            if !self.teams.contains_key(&team_id) {
                return Err(MemberStoreError::TeamNotFound);
            }
        }

        self.next_member_id += 1;
        let member = Member {
            id: MemberId::new(self.next_member_id),
            username: username.to_string(),
            age,
            team_id,
        };
        self.members.push(member.clone());
        Ok(member)
    }

    async fn find_by_id(
        &self,
        id: MemberId,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .iter()
            .find(|member| member.id == id)
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Member>, MemberStoreError> {
        Ok(self
            .members
            .iter()
            .filter(|member| member.username == username)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Member>, MemberStoreError> {
        Ok(self.members.clone())
    }

    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, MemberStoreError> {
        Ok(self.matching_rows(condition))
    }

    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError> {
        let matched = self.matching_rows(condition);
        let total = matched.len() as u64;
        let rows: Vec<_> = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .collect();

        Ok(Page::new(rows, *page, total))
    }

    async fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamRow>, MemberStoreError> {
        let matched = self.matching_rows(condition);
        let total = matched.len() as u64;
        let rows: Vec<_> = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .collect();

        Page::from_window(rows, *page, || async move { Ok(total) }).await
    }
}
