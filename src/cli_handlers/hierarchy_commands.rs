use crate::cli::TreeCommands;
use crate::cli_handlers::utils::{confirm, print_forest, print_json};
use crate::config::BoardConfig;
use crate::error::{PlanError, Result};
use crate::hierarchy::{
    resolve_edit, EditAction, EditTarget, HierarchyEngine, HierarchyIntent, HierarchyKind,
    HierarchyNode,
};
use crate::store::SqliteStore;
use serde_json::json;
use sqlx::SqlitePool;

type Engine<'a> = HierarchyEngine<SqliteStore<'a>>;

/// Handle all `vgplan tree` subcommands
pub async fn handle_tree_command(pool: &SqlitePool, cmd: TreeCommands) -> Result<()> {
    let mut engine = HierarchyEngine::new(SqliteStore::new(pool), &BoardConfig::default());
    engine.load().await;

    match cmd {
        TreeCommands::Show { format } => {
            if format == "json" {
                print_json(engine.forest())?;
            } else {
                print_forest(engine.forest());
            }
        },

        TreeCommands::New {
            parent,
            name,
            parent_id,
            skill_sets,
            format,
        } => {
            let target = edit_target(&engine, parent, parent_id, EditAction::New)?;
            let kind = target.kind;
            let intent = target
                .into_intent(name, skill_sets)
                .ok_or_else(|| PlanError::validation(format!("cannot create under a {}", parent)))?;

            let id = engine
                .apply(intent)
                .await?
                .ok_or_else(|| PlanError::validation("create did not return an id"))?;
            print_node(&engine, kind, id, "Created", &format)?;
        },

        TreeCommands::Edit {
            kind,
            id,
            name,
            skill_sets,
            format,
        } => {
            let target = edit_target(&engine, kind, Some(id), EditAction::Edit)?;
            let name = name.unwrap_or_else(|| target.form.name.clone());
            let skill_sets = skill_sets.or_else(|| target.form.skill_sets.clone());
            let intent = target
                .into_intent(name, skill_sets)
                .ok_or_else(|| PlanError::validation(format!("cannot edit a {}", kind)))?;

            engine.apply(intent).await?;
            print_node(&engine, kind, id, "Updated", &format)?;
        },

        TreeCommands::Delete { kind, id, yes } => {
            let label = engine
                .select(kind, Some(id))
                .map(|node| node.label.clone())
                .unwrap_or_else(|| format!("{} #{}", kind, id));

            if confirm(&format!("Delete {}?", label), yes)? {
                engine.apply(HierarchyIntent::Delete { kind, id }).await?;
                println!("Deleted {} #{}", kind, id);
            } else {
                println!("Cancelled");
            }
        },

        TreeCommands::Form {
            action,
            kind,
            id,
            format,
        } => {
            let selected = select(&engine, kind, id)?;
            let target = resolve_edit(Some(selected), action);

            if format == "json" {
                print_json(&target)?;
            } else {
                match target {
                    Some(target) => print_form(&target),
                    None => println!("Nothing to edit for {}", selected.label),
                }
            }
        },
    }

    Ok(())
}

fn select<'e>(
    engine: &'e Engine<'_>,
    kind: HierarchyKind,
    id: Option<i64>,
) -> Result<&'e HierarchyNode> {
    if let Some(error) = engine.forest().error() {
        return Err(PlanError::validation(format!(
            "hierarchy could not be loaded: {}",
            error
        )));
    }

    match (kind, id) {
        (HierarchyKind::Root, _) => engine
            .select(kind, None)
            .ok_or_else(|| PlanError::validation("root node missing")),
        (kind, Some(id)) => engine
            .select(kind, Some(id))
            .ok_or(PlanError::NotFound {
                kind: kind.noun(),
                id,
            }),
        (kind, None) => Err(PlanError::validation(format!(
            "an id is required to select a {}",
            kind
        ))),
    }
}

fn edit_target(
    engine: &Engine<'_>,
    kind: HierarchyKind,
    id: Option<i64>,
    action: EditAction,
) -> Result<EditTarget> {
    let selected = select(engine, kind, id)?;
    resolve_edit(Some(selected), action).ok_or_else(|| match action {
        EditAction::New => PlanError::validation(format!("a {} cannot have child nodes", kind)),
        EditAction::Edit => PlanError::validation(format!("the {} node cannot be edited", kind)),
    })
}

fn print_node(
    engine: &Engine<'_>,
    kind: HierarchyKind,
    id: i64,
    verb: &str,
    format: &str,
) -> Result<()> {
    let node = engine
        .select(kind, Some(id))
        .ok_or(PlanError::NotFound {
            kind: kind.noun(),
            id,
        })?;

    if format == "json" {
        print_json(&json!({
            "kind": node.entity.kind,
            "id": id,
            "name": node.entity.name,
            "label": node.label,
            "parent_id": node.entity.parent_id,
            "skill_sets": node.entity.skill_sets,
        }))
    } else {
        println!("{} {} (#{})", verb, node.label, id);
        if let Some(skill_sets) = &node.entity.skill_sets {
            println!("  Skill sets: {}", skill_sets);
        }
        Ok(())
    }
}

fn print_form(target: &EditTarget) {
    println!("{}", target.title);
    match target.parent_id {
        Some(parent_id) => println!("  Parent:     #{}", parent_id),
        None => println!("  Parent:     (root)"),
    }
    println!("  Name:       {}", target.form.name);
    if target.form.shows_skill_sets {
        println!(
            "  Skill sets: {}",
            target.form.skill_sets.as_deref().unwrap_or_default()
        );
    }
}
