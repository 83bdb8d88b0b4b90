// CLI command handlers module
//
// board: task columns and focus navigation
// tree: Phase/Epic/Task/Sub-Task hierarchy
// config: init and configuration display

pub mod board_commands;
pub mod config_commands;
pub mod hierarchy_commands;
pub mod utils;

pub use board_commands::handle_board_command;
pub use config_commands::{handle_config_command, handle_init_command};
pub use hierarchy_commands::handle_tree_command;
pub use utils::open_database;
