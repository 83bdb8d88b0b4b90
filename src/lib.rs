pub mod backend;
pub mod board;
pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod db;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod sql_constants;
pub mod store;

#[cfg(test)]
pub mod test_utils;
