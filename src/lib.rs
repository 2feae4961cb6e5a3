pub mod config;
pub mod observability;
pub mod schedule;

pub use config::Config;
