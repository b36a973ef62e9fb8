//! Command-line interface definition for Taskify
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for account management, tasks, appointments and
//! the dashboard.

use clap::{Parser, Subcommand};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Taskify - manage tasks and appointments from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "taskify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Taskify
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "TASKIFY_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Password confirmation; defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "TASKIFY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommand,
    },

    /// Show task and appointment statistics
    Dashboard,
}

/// Task subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// List all tasks
    List,

    /// Show one task
    Show {
        /// Task id
        id: i64,
    },

    /// Create a task
    Create {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Initial status (TODO or DONE)
        #[arg(short, long, default_value = "TODO")]
        status: String,
    },

    /// Change fields of a task; omitted fields are kept
    Update {
        /// Task id
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// New status (TODO or DONE)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },

    /// Flip a task between TODO and DONE
    Toggle {
        /// Task id
        id: i64,
    },
}

/// Appointment subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AppointmentCommand {
    /// List all appointments
    List,

    /// Show one appointment
    Show {
        /// Appointment id
        id: i64,
    },

    /// Schedule an appointment
    Create {
        /// Appointment subject
        #[arg(short, long)]
        subject: String,

        /// Date and time, e.g. "2026-10-17 09:30"
        #[arg(short, long)]
        date: String,
    },

    /// Change fields of an appointment; omitted fields are kept
    Update {
        /// Appointment id
        id: i64,

        /// New subject
        #[arg(short, long)]
        subject: Option<String>,

        /// New date and time
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an appointment
    Delete {
        /// Appointment id
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration file path, falling back to the default
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_whoami_defaults() {
        let cli = Cli::try_parse_from(["taskify", "whoami"]).unwrap();
        assert_eq!(cli.config_path(), "config/config.yaml");
        assert!(!cli.verbose);
        assert!(!cli.json);
        assert!(cli.api_url.is_none());
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["taskify", "dashboard", "--log-json", "--json", "-v"]).unwrap();
        assert!(cli.log_json);
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::try_parse_from([
            "taskify",
            "login",
            "--email",
            "me@example.com",
            "--password",
            "secret",
        ])
        .unwrap();
        if let Commands::Login { email, password } = cli.command {
            assert_eq!(email, "me@example.com");
            assert_eq!(password.as_deref(), Some("secret"));
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_register_with_confirmation() {
        let cli = Cli::try_parse_from([
            "taskify",
            "register",
            "-e",
            "me@example.com",
            "-p",
            "abcd",
            "--confirm-password",
            "abce",
        ])
        .unwrap();
        if let Commands::Register {
            email,
            password,
            confirm_password,
        } = cli.command
        {
            assert_eq!(email, "me@example.com");
            assert_eq!(password.as_deref(), Some("abcd"));
            assert_eq!(confirm_password.as_deref(), Some("abce"));
        } else {
            panic!("Expected Register command");
        }
    }

    #[test]
    fn test_cli_parse_task_create_defaults_to_todo() {
        let cli = Cli::try_parse_from(["taskify", "tasks", "create", "--title", "X"]).unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::Create {
                    title,
                    description,
                    status,
                },
        } = cli.command
        {
            assert_eq!(title, "X");
            assert_eq!(description, None);
            assert_eq!(status, "TODO");
        } else {
            panic!("Expected tasks create command");
        }
    }

    #[test]
    fn test_cli_parse_task_toggle() {
        let cli = Cli::try_parse_from(["taskify", "tasks", "toggle", "42"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Tasks {
                command: TaskCommand::Toggle { id: 42 }
            }
        ));
    }

    #[test]
    fn test_cli_parse_task_update_partial() {
        let cli =
            Cli::try_parse_from(["taskify", "tasks", "update", "7", "--status", "done"]).unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::Update {
                    id,
                    title,
                    description,
                    status,
                },
        } = cli.command
        {
            assert_eq!(id, 7);
            assert_eq!(title, None);
            assert_eq!(description, None);
            assert_eq!(status.as_deref(), Some("done"));
        } else {
            panic!("Expected tasks update command");
        }
    }

    #[test]
    fn test_cli_parse_appointment_create() {
        let cli = Cli::try_parse_from([
            "taskify",
            "appointments",
            "create",
            "--subject",
            "Dentist",
            "--date",
            "2026-10-17 09:30",
        ])
        .unwrap();
        if let Commands::Appointments {
            command: AppointmentCommand::Create { subject, date },
        } = cli.command
        {
            assert_eq!(subject, "Dentist");
            assert_eq!(date, "2026-10-17 09:30");
        } else {
            panic!("Expected appointments create command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_nested_subcommand() {
        let cli = Cli::try_parse_from([
            "taskify",
            "tasks",
            "list",
            "--json",
            "--api-url",
            "http://example.com/api",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.api_url.as_deref(), Some("http://example.com/api"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["taskify", "tasks", "show", "abc"]).is_err());
    }
}
