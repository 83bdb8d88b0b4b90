use crate::board::{BoardEngine, BoardIntent, BoardOutcome, FocusCursor, FocusKey, MoveOutcome};
use crate::cli::BoardCommands;
use crate::cli_handlers::utils::{
    confirm, parse_column, parse_key, print_board, print_json, print_task, task_line,
};
use crate::config::BoardConfig;
use crate::db::models::TaskDraft;
use crate::error::{PlanError, Result};
use crate::store::SqliteStore;
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;

type Board<'a> = BoardEngine<SqliteStore<'a>>;

#[derive(Debug, Serialize)]
struct NavigationStep {
    key: FocusKey,
    ctrl: bool,
    #[serde(flatten)]
    outcome: BoardOutcome,
}

/// Handle all `vgplan board` subcommands
pub async fn handle_board_command(pool: &SqlitePool, cmd: BoardCommands) -> Result<()> {
    let mut board = BoardEngine::new(SqliteStore::new(pool), BoardConfig::default())?;
    board.refresh().await;

    match cmd {
        BoardCommands::Show { format } => {
            if format == "json" {
                print_json(&board.snapshot())?;
            } else {
                print_board(&board.snapshot());
            }
        },

        BoardCommands::Add {
            title,
            description,
            assignee,
            module,
            status,
            priority,
            due,
            format,
        } => {
            let draft = TaskDraft {
                title,
                description,
                assignee,
                module,
                status: status.unwrap_or_else(|| board.config().first_status().to_string()),
                priority,
                due_date: due,
            };
            let task_id = match board.dispatch(BoardIntent::Create(draft)).await? {
                BoardOutcome::Created { task_id } => task_id,
                other => return Err(unexpected(other)),
            };
            print_stored_task(&board, task_id, "Created", &format)?;
        },

        BoardCommands::Edit {
            id,
            title,
            description,
            assignee,
            module,
            status,
            priority,
            due,
            clear_due,
            format,
        } => {
            let mut task = board.find_task(id).cloned().ok_or(PlanError::NotFound {
                kind: "Task",
                id,
            })?;

            if let Some(title) = title {
                task.title = title;
            }
            if description.is_some() {
                task.description = description;
            }
            if assignee.is_some() {
                task.assignee = assignee;
            }
            if module.is_some() {
                task.module = module;
            }
            if let Some(status) = status {
                task.status = status;
            }
            if priority.is_some() {
                task.priority = priority;
            }
            if clear_due {
                task.due_date = None;
            } else if due.is_some() {
                task.due_date = due;
            }

            board.dispatch(BoardIntent::Edit(task)).await?;
            print_stored_task(&board, id, "Updated", &format)?;
        },

        BoardCommands::Move {
            id,
            direction,
            format,
        } => {
            let outcome = board.move_task(id, direction).await?;
            print_move(&board, id, outcome, &format)?;
        },

        BoardCommands::Drop { id, column, format } => {
            let column = parse_column(&column, board.config())?;
            match board.dispatch(BoardIntent::Drop { task_id: id, column }).await? {
                BoardOutcome::TaskMoved { .. } => {
                    let outcome = MoveOutcome::Moved {
                        column,
                        task: board.cursor().task,
                    };
                    print_move(&board, id, outcome, &format)?;
                },
                _ => {
                    return Err(PlanError::NotFound {
                        kind: "Task",
                        id,
                    })
                },
            }
        },

        BoardCommands::Delete { id, yes } => {
            let task = board.find_task(id).ok_or(PlanError::NotFound {
                kind: "Task",
                id,
            })?;
            let prompt = format!("Delete task #{} '{}'?", task.id, task.title);

            if confirm(&prompt, yes)? {
                board.dispatch(BoardIntent::ConfirmDelete { task_id: id }).await?;
                println!("Deleted task #{}", id);
            } else {
                println!("Cancelled");
            }
        },

        BoardCommands::Navigate {
            keys,
            column,
            task,
            format,
        } => {
            board.set_cursor(FocusCursor::new(column, task))?;

            let mut steps = Vec::with_capacity(keys.len());
            for raw in &keys {
                let (key, ctrl) = parse_key(raw)?;
                let outcome = board.advance_focus(key, ctrl).await?;
                steps.push(NavigationStep {
                    key,
                    ctrl,
                    outcome,
                });
            }

            if format == "json" {
                print_json(&json!({
                    "steps": steps,
                    "cursor": board.cursor(),
                    "focused_task": board.focused_task(),
                }))?;
            } else {
                for (raw, step) in keys.iter().zip(&steps) {
                    println!("{:<16} {}", raw, describe_outcome(&step.outcome));
                }
                let cursor = board.cursor();
                let status = board
                    .column(cursor.column)
                    .map(|c| c.status.as_str())
                    .unwrap_or_default();
                match board.focused_task() {
                    Some(task) => println!("Focus: {} / {}", status, task_line(task)),
                    None => println!("Focus: {}", status),
                }
            }
        },
    }

    Ok(())
}

fn print_stored_task(board: &Board<'_>, id: i64, verb: &str, format: &str) -> Result<()> {
    let task = board.find_task(id).ok_or(PlanError::NotFound { kind: "Task", id })?;
    if format == "json" {
        print_json(task)
    } else {
        println!("{} task #{}", verb, id);
        print_task(task);
        Ok(())
    }
}

fn print_move(board: &Board<'_>, id: i64, outcome: MoveOutcome, format: &str) -> Result<()> {
    let status = board.find_task(id).map(|t| t.status.clone());
    if format == "json" {
        return print_json(&json!({
            "task_id": id,
            "status": status,
            "result": outcome,
        }));
    }

    match (outcome, status) {
        (MoveOutcome::Moved { .. }, Some(status)) => {
            println!("Task #{} moved to '{}'", id, status)
        },
        (MoveOutcome::Moved { .. }, None) => println!("Task #{} moved", id),
        (MoveOutcome::Unchanged, _) => {
            println!("Task #{} is already at the edge of the board", id)
        },
    }
    Ok(())
}

fn describe_outcome(outcome: &BoardOutcome) -> String {
    match outcome {
        BoardOutcome::Ignored => "no change".to_string(),
        BoardOutcome::CursorMoved { cursor } => match cursor.task {
            Some(task) => format!("focus column {} task {}", cursor.column, task),
            None => format!("focus column {}", cursor.column),
        },
        BoardOutcome::TaskMoved { task_id, cursor } => {
            format!("moved task #{} to column {}", task_id, cursor.column)
        },
        BoardOutcome::OpenEditor { task_id } => format!("open editor for task #{}", task_id),
        BoardOutcome::ConfirmDelete { task_id } => {
            format!("confirm delete of task #{} (use `board delete`)", task_id)
        },
        BoardOutcome::Created { task_id } => format!("created task #{}", task_id),
        BoardOutcome::Saved { task_id } => format!("saved task #{}", task_id),
        BoardOutcome::Deleted { task_id } => format!("deleted task #{}", task_id),
        BoardOutcome::Refreshed => "refreshed".to_string(),
    }
}

fn unexpected(outcome: BoardOutcome) -> PlanError {
    PlanError::validation(format!("unexpected board outcome: {:?}", outcome))
}
