//! Appointment commands

use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use prettytable::{format, row, Table};

use super::{print_json, require_session, truncate, user_facing};
use crate::api::ApiClient;
use crate::cli::AppointmentCommand;
use crate::error::Result;
use crate::models::{parse_date, Appointment, AppointmentDraft};

/// Display format for appointment dates, e.g. "Sat, Oct 17 2026 09:30"
pub(crate) const DISPLAY_FORMAT: &str = "%a, %b %d %Y %H:%M";

/// Handle `taskify appointments ...`
pub async fn handle_appointments(
    client: &ApiClient,
    command: AppointmentCommand,
    json: bool,
) -> Result<()> {
    require_session(client)?;

    match command {
        AppointmentCommand::List => {
            let appointments = client
                .appointments()
                .get_all()
                .await
                .map_err(|e| user_facing(e, "Failed to load appointments"))?;
            if json {
                return print_json(&appointments);
            }
            print_appointment_table(&appointments, Local::now().naive_local());
        }
        AppointmentCommand::Show { id } => {
            let appointment = client
                .appointments()
                .get_by_id(id)
                .await
                .map_err(|e| user_facing(e, "Failed to load appointment"))?;
            if json {
                return print_json(&appointment);
            }
            println!("{} {}", "ID:".bold(), appointment.id);
            println!("{} {}", "Subject:".bold(), appointment.subject);
            println!(
                "{} {}",
                "Date:".bold(),
                appointment.date.format(DISPLAY_FORMAT)
            );
        }
        AppointmentCommand::Create { subject, date } => {
            let draft = AppointmentDraft {
                subject,
                date: parse_date(&date)?,
            };
            draft.validate()?;
            let appointment = client
                .appointments()
                .create(&draft)
                .await
                .map_err(|e| user_facing(e, "Failed to save appointment"))?;
            report(&appointment, "Scheduled", json)?;
        }
        AppointmentCommand::Update { id, subject, date } => {
            let current = client
                .appointments()
                .get_by_id(id)
                .await
                .map_err(|e| user_facing(e, "Failed to load appointment"))?;
            let mut draft = current.to_draft();
            if let Some(subject) = subject {
                draft.subject = subject;
            }
            if let Some(date) = date {
                draft.date = parse_date(&date)?;
            }
            draft.validate()?;
            let appointment = client
                .appointments()
                .update(id, &draft)
                .await
                .map_err(|e| user_facing(e, "Failed to save appointment"))?;
            report(&appointment, "Updated", json)?;
        }
        AppointmentCommand::Delete { id } => {
            client
                .appointments()
                .delete(id)
                .await
                .map_err(|e| user_facing(e, "Failed to delete appointment"))?;
            if json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("{}", format!("Deleted appointment {}", id).green());
        }
    }

    Ok(())
}

fn report(appointment: &Appointment, verb: &str, json: bool) -> Result<()> {
    if json {
        return print_json(appointment);
    }
    println!(
        "{} appointment {} ({}) on {}",
        verb.green(),
        appointment.id.to_string().cyan(),
        appointment.subject,
        appointment.date.format(DISPLAY_FORMAT)
    );
    Ok(())
}

fn print_appointment_table(appointments: &[Appointment], now: NaiveDateTime) {
    if appointments.is_empty() {
        println!("{}", "No appointments scheduled.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["ID".bold(), "Subject".bold(), "Date".bold(), "".bold()]);

    for appointment in appointments {
        let badge = if appointment.is_upcoming(now) {
            "Upcoming".green()
        } else {
            "Past".dimmed()
        };
        table.add_row(row![
            appointment.id.to_string().cyan(),
            truncate(&appointment.subject, 40),
            appointment.date.format(DISPLAY_FORMAT).to_string(),
            badge
        ]);
    }

    table.printstd();
}
