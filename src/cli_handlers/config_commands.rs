use crate::cli_handlers::utils::{open_database, print_json};
use crate::config::{resolve_db_path, BoardConfig};
use crate::error::Result;
use crate::hierarchy::HierarchyKind;
use crate::store::SqliteStore;
use serde_json::json;
use std::path::PathBuf;

/// Create the database (if needed) and report what it holds
pub async fn handle_init_command(db: Option<PathBuf>) -> Result<()> {
    let path = resolve_db_path(db.clone());
    let pool = open_database(db).await?;
    let store = SqliteStore::new(&pool);

    let phases = store.count(HierarchyKind::Phase).await?;
    let tasks = store.count(HierarchyKind::Task).await?;
    pool.close().await;

    tracing::info!(path = %path.display(), phases, tasks, "Database initialized");
    println!("Initialized {}", path.display());
    println!("  {} phase(s), {} task(s)", phases, tasks);
    Ok(())
}

/// Print the static board configuration
pub fn handle_config_command(db: Option<PathBuf>, format: &str) -> Result<()> {
    let config = BoardConfig::default();
    let path = resolve_db_path(db);

    if format == "json" {
        return print_json(&json!({
            "database": path,
            "statuses": config.statuses,
            "modules": config.modules,
            "priorities": config.priorities,
            "team_members": config.team_members,
        }));
    }

    println!("Database:   {}", path.display());
    println!("Statuses:   {}", config.statuses.join(" → "));
    println!("Modules:    {}", config.modules.join(", "));
    println!("Priorities: {}", config.priorities.join(", "));
    println!("Team:       {}", config.team_members.join(", "));
    Ok(())
}
