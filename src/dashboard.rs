//! Dashboard statistics
//!
//! [`DashboardStats::compute`] is a pure function of the fetched
//! collections and the current time. [`load_dashboard`] fetches both
//! collections concurrently and then computes.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Appointment, Task, TaskStatus};

/// Number of tasks listed under "recent tasks"
pub const RECENT_TASK_LIMIT: usize = 5;

/// Summary shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    /// Appointments dated strictly after "now"
    pub upcoming_appointments: usize,
    /// First tasks in server order
    pub recent_tasks: Vec<Task>,
    /// Earliest upcoming appointment
    pub next_appointment: Option<Appointment>,
}

impl DashboardStats {
    /// Derive the dashboard from already-fetched data
    ///
    /// Upcoming appointments are those with `date > now`. Among equal
    /// dates the one listed first wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskify::dashboard::DashboardStats;
    /// use taskify::models::{Task, TaskStatus};
    ///
    /// let task = |id, status| Task { id, title: format!("t{}", id), description: None, status };
    /// let tasks = vec![
    ///     task(1, TaskStatus::Todo),
    ///     task(2, TaskStatus::Todo),
    ///     task(3, TaskStatus::Done),
    ///     task(4, TaskStatus::Done),
    ///     task(5, TaskStatus::Done),
    /// ];
    /// let now = chrono::Local::now().naive_local();
    /// let stats = DashboardStats::compute(&tasks, &[], now);
    /// assert_eq!(stats.total_tasks, 5);
    /// assert_eq!(stats.pending_tasks, 2);
    /// assert_eq!(stats.completed_tasks, 3);
    /// assert_eq!(stats.completion_rate(), 60);
    /// ```
    pub fn compute(tasks: &[Task], appointments: &[Appointment], now: NaiveDateTime) -> Self {
        let pending_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Todo)
            .count();
        let completed_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();

        let mut upcoming: Vec<&Appointment> =
            appointments.iter().filter(|a| a.is_upcoming(now)).collect();
        // stable sort keeps input order for equal dates
        upcoming.sort_by_key(|a| a.date);

        Self {
            total_tasks: tasks.len(),
            pending_tasks,
            completed_tasks,
            upcoming_appointments: upcoming.len(),
            recent_tasks: tasks.iter().take(RECENT_TASK_LIMIT).cloned().collect(),
            next_appointment: upcoming.first().map(|a| (*a).clone()),
        }
    }

    /// Completed share of all tasks, as a rounded whole percentage
    ///
    /// Zero when there are no tasks.
    pub fn completion_rate(&self) -> u32 {
        if self.total_tasks == 0 {
            return 0;
        }
        ((self.completed_tasks as f64 / self.total_tasks as f64) * 100.0).round() as u32
    }
}

/// Fetch tasks and appointments concurrently and compute the dashboard
///
/// Fails if either fetch fails.
pub async fn load_dashboard(client: &ApiClient, now: NaiveDateTime) -> Result<DashboardStats> {
    let tasks_api = client.tasks();
    let appointments_api = client.appointments();
    let (tasks, appointments) =
        tokio::try_join!(tasks_api.get_all(), appointments_api.get_all())?;
    tracing::debug!(
        "Dashboard loaded {} tasks and {} appointments",
        tasks.len(),
        appointments.len()
    );
    Ok(DashboardStats::compute(&tasks, &appointments, now))
}
