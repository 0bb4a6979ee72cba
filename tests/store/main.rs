mod postgres;
mod search;
