pub mod data_stores;

pub use data_stores::*;
