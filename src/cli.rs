use crate::board::Direction;
use crate::hierarchy::{EditAction, HierarchyKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
vgplan - Kanban board and project hierarchy planner

Two views over one SQLite database:
  board   Tasks in status columns (To Do → In Progress → Blocked → In Review → Done)
  tree    Project hierarchy: Phase → Epic → Task → Sub-Task

Tasks created under an epic in the tree also appear on the board.

Database location (first match wins):
  --db <path>
  VGPLAN_DB environment variable
  ./project_kanban.db
"#;

#[derive(Parser, Clone)]
#[command(name = "vgplan")]
#[command(about = "Kanban board and Phase/Epic/Task/Sub-Task planner")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Database file (overrides VGPLAN_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose output (-v)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write logs to a file instead of stderr (default: ~/.vgplan/logs/cli.log)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    pub log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Create the database and seed the team list
    Init,

    /// Show the board configuration (statuses, modules, priorities, team)
    Config {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Kanban board commands
    #[command(subcommand)]
    Board(BoardCommands),

    /// Project hierarchy commands
    #[command(subcommand)]
    Tree(TreeCommands),
}

#[derive(Subcommand, Clone)]
pub enum BoardCommands {
    /// Print every column and its tasks
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Add a task to the board
    ///
    /// Examples:
    ///   vgplan board add "Write release notes"
    ///   vgplan board add "Fix login" --status "In Progress" --priority High --due 2025-06-30
    Add {
        /// Task title
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Team member
        #[arg(short, long)]
        assignee: Option<String>,

        #[arg(short, long)]
        module: Option<String>,

        /// Initial status (default: first column)
        #[arg(short, long)]
        status: Option<String>,

        /// High, Medium or Low
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Edit an existing task; omitted fields keep their value
    Edit {
        /// Task ID
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        assignee: Option<String>,

        #[arg(short, long)]
        module: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Move a task one column left or right
    ///
    /// Examples:
    ///   vgplan board move 7 right
    Move {
        /// Task ID
        id: i64,

        #[arg(value_enum)]
        direction: Direction,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Drop a task onto a column, by status name or column index
    ///
    /// Examples:
    ///   vgplan board drop 7 Done
    ///   vgplan board drop 7 2
    Drop {
        /// Task ID
        id: i64,

        /// Status name or zero-based column index
        column: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Replay key presses against the focus cursor
    ///
    /// Keys: up, down, left, right, enter, delete, backspace.
    /// Prefix with "ctrl+" for the modified variant; ctrl+left/right
    /// moves the focused task.
    ///
    /// Examples:
    ///   vgplan board navigate down down enter
    ///   vgplan board navigate --column 1 down ctrl+right
    Navigate {
        /// Keys to apply in order
        keys: Vec<String>,

        /// Starting column index
        #[arg(long, default_value_t = 0)]
        column: usize,

        /// Starting task index within the column
        #[arg(long)]
        task: Option<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum TreeCommands {
    /// Print the hierarchy
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a node under a parent
    ///
    /// Examples:
    ///   vgplan tree new root "Discovery" --skill-sets "BA, SA"
    ///   vgplan tree new phase --parent-id 1 "Authentication"
    ///   vgplan tree new epic --parent-id 3 "Login page"
    New {
        /// Kind of the parent node
        #[arg(value_enum)]
        parent: HierarchyKind,

        /// Name of the new node
        name: String,

        /// ID of the parent (not needed under root)
        #[arg(long)]
        parent_id: Option<i64>,

        /// Skill sets (phases only)
        #[arg(long)]
        skill_sets: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Rename a node; omitted fields keep their value
    Edit {
        #[arg(value_enum)]
        kind: HierarchyKind,

        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// Skill sets (phases only)
        #[arg(long)]
        skill_sets: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a node that has no children
    Delete {
        #[arg(value_enum)]
        kind: HierarchyKind,

        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the create/edit form a selection would open
    Form {
        #[arg(value_enum)]
        action: EditAction,

        /// Kind of the selected node
        #[arg(value_enum)]
        kind: HierarchyKind,

        /// ID of the selected node (not needed for root)
        id: Option<i64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
