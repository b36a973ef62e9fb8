//! Task commands

use colored::Colorize;
use prettytable::{format, row, Table};

use super::{print_json, require_session, truncate, user_facing};
use crate::api::ApiClient;
use crate::cli::TaskCommand;
use crate::error::Result;
use crate::models::{Task, TaskDraft, TaskStatus};

/// Handle `taskify tasks ...`
pub async fn handle_tasks(client: &ApiClient, command: TaskCommand, json: bool) -> Result<()> {
    require_session(client)?;

    match command {
        TaskCommand::List => {
            let tasks = client
                .tasks()
                .get_all()
                .await
                .map_err(|e| user_facing(e, "Failed to load tasks"))?;
            if json {
                return print_json(&tasks);
            }
            print_task_table(&tasks);
        }
        TaskCommand::Show { id } => {
            let task = client
                .tasks()
                .get_by_id(id)
                .await
                .map_err(|e| user_facing(e, "Failed to load task"))?;
            if json {
                return print_json(&task);
            }
            print_task_detail(&task);
        }
        TaskCommand::Create {
            title,
            description,
            status,
        } => {
            let draft = TaskDraft {
                title,
                description: description.filter(|d| !d.trim().is_empty()),
                status: TaskStatus::parse_str(&status)?,
            };
            draft.validate()?;
            let task = client
                .tasks()
                .create(&draft)
                .await
                .map_err(|e| user_facing(e, "Failed to save task"))?;
            report(&task, "Created", json)?;
        }
        TaskCommand::Update {
            id,
            title,
            description,
            status,
        } => {
            let current = client
                .tasks()
                .get_by_id(id)
                .await
                .map_err(|e| user_facing(e, "Failed to load task"))?;
            let draft = apply_changes(&current, title, description, status.as_deref())?;
            draft.validate()?;
            let task = client
                .tasks()
                .update(id, &draft)
                .await
                .map_err(|e| user_facing(e, "Failed to save task"))?;
            report(&task, "Updated", json)?;
        }
        TaskCommand::Delete { id } => {
            client
                .tasks()
                .delete(id)
                .await
                .map_err(|e| user_facing(e, "Failed to delete task"))?;
            if json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("{}", format!("Deleted task {}", id).green());
        }
        TaskCommand::Toggle { id } => {
            let current = client
                .tasks()
                .get_by_id(id)
                .await
                .map_err(|e| user_facing(e, "Failed to load task"))?;
            let task = client
                .tasks()
                .update(id, &current.toggled())
                .await
                .map_err(|e| user_facing(e, "Failed to update task status"))?;
            report(&task, "Marked", json)?;
        }
    }

    Ok(())
}

/// Merge CLI overrides into the task's current fields
///
/// An empty `description` is sent as `""`; the server ignores absent
/// fields on update, so leaving it out would keep the old text.
fn apply_changes(
    current: &Task,
    title: Option<String>,
    description: Option<String>,
    status: Option<&str>,
) -> Result<TaskDraft> {
    let mut draft = current.to_draft();
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(description) = description {
        draft.description = if description.trim().is_empty() {
            Some(String::new())
        } else {
            Some(description)
        };
    }
    if let Some(status) = status {
        draft.status = TaskStatus::parse_str(status)?;
    }
    Ok(draft)
}

fn report(task: &Task, verb: &str, json: bool) -> Result<()> {
    if json {
        return print_json(task);
    }
    println!(
        "{} task {} ({}) {}",
        verb.green(),
        task.id.to_string().cyan(),
        task.title,
        task.status.colored_tag()
    );
    Ok(())
}

fn print_task_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks yet.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Title".bold(),
        "Description".bold(),
        "Status".bold()
    ]);

    for task in tasks {
        let description = task
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-");
        table.add_row(row![
            task.id.to_string().cyan(),
            truncate(&task.title, 40),
            truncate(description, 50),
            task.status.colored_tag()
        ]);
    }

    table.printstd();
}

fn print_task_detail(task: &Task) {
    println!("{} {}", "ID:".bold(), task.id);
    println!("{} {}", "Title:".bold(), task.title);
    println!(
        "{} {}",
        "Description:".bold(),
        task.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description")
    );
    println!("{} {}", "Status:".bold(), task.status.colored_tag());
}
