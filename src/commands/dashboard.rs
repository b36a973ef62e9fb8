//! Dashboard command

use chrono::Local;
use colored::Colorize;
use prettytable::{format, row, Table};

use super::appointments::DISPLAY_FORMAT;
use super::{print_json, require_session, truncate, user_facing};
use crate::api::ApiClient;
use crate::dashboard::{load_dashboard, DashboardStats};
use crate::error::Result;

/// Handle `taskify dashboard`
pub async fn show_dashboard(client: &ApiClient, json: bool) -> Result<()> {
    require_session(client)?;

    let stats = load_dashboard(client, Local::now().naive_local())
        .await
        .map_err(|e| user_facing(e, "Failed to load dashboard data"))?;

    if json {
        return print_json(&serde_json::json!({
            "stats": &stats,
            "completion_rate": stats.completion_rate(),
        }));
    }

    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &DashboardStats) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(row![
        "Total tasks".bold(),
        format!("{} ({} completed)", stats.total_tasks, stats.completed_tasks)
    ]);
    table.add_row(row!["Pending tasks".bold(), stats.pending_tasks]);
    table.add_row(row![
        "Upcoming meetings".bold(),
        stats.upcoming_appointments
    ]);
    table.add_row(row![
        "Completion rate".bold(),
        format!("{}%", stats.completion_rate())
    ]);

    println!("\n{}", "Dashboard".bold());
    table.printstd();

    println!("\n{}", "Recent tasks".bold());
    if stats.recent_tasks.is_empty() {
        println!("  {}", "No tasks created yet.".yellow());
    }
    for task in &stats.recent_tasks {
        println!(
            "  {} {} {}",
            task.status.colored_tag(),
            truncate(&task.title, 50),
            task.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!("- {}", truncate(d, 40)))
                .unwrap_or_default()
                .dimmed()
        );
    }

    println!("\n{}", "Next appointment".bold());
    match &stats.next_appointment {
        Some(next) => println!(
            "  {} {}",
            next.date.format(DISPLAY_FORMAT).to_string().cyan(),
            next.subject
        ),
        None => println!("  {}", "No upcoming appointments scheduled.".yellow()),
    }
    println!();
}
