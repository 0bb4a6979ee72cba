use serde::{Deserialize, Serialize};

use super::{MemberId, TeamId};

/// Optional filters for the member/team search. Absent fields contribute no
/// predicate; blank or whitespace-only strings are normalized to absent so a
/// blank filter never matches the empty string literally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    username: Option<String>,
    team_name: Option<String>,
    age_goe: Option<i32>,
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = normalize(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = normalize(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age_goe: i32) -> Self {
        self.age_goe = Some(age_goe);
        self
    }

    pub fn with_age_loe(mut self, age_loe: i32) -> Self {
        self.age_loe = Some(age_loe);
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    pub fn is_empty(&self) -> bool {
        self.username().is_none()
            && self.team_name().is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

fn normalize(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Projection of a member row left-joined with its team. Team fields are
/// `None` for members without a team association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberTeamRow {
    pub member_id: MemberId,
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}
