pub mod action;
pub mod config;
pub mod error;
pub mod judge;
pub mod lang;
pub mod storage;
pub mod style;
pub mod testing;
pub mod workspace;

pub use crate::config::Config;
