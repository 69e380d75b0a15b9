pub mod api;
pub mod collection;
pub mod config;
pub mod demo;
pub mod hltv;
pub mod models;
pub mod rate_limit;
pub mod schema;
pub mod store;
