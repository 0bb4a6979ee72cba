mod data_stores;
mod error;
mod member;
mod member_id;
mod pagination;
mod search;
mod team;
mod team_id;

pub use data_stores::*;
pub use error::*;
pub use member::*;
pub use member_id::*;
pub use pagination::*;
pub use search::*;
pub use team::*;
pub use team_id::*;
