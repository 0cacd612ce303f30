pub mod config;
pub mod logging;

pub mod catalog;
pub mod enrich;
pub mod library;
pub mod record;
