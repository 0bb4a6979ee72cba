use serde::{Deserialize, Serialize};

use super::TeamId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}
