//! Test utilities for Taskify
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, sample entities and assertion helpers.

use crate::error::TaskifyError;
use crate::models::{Appointment, Task, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error is a [`TaskifyError`] whose message contains
/// `expected`
///
/// # Panics
///
/// Panics if the result is Ok, if the error is some other type, or if the
/// message doesn't contain `expected`
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            assert!(
                e.downcast_ref::<TaskifyError>().is_some(),
                "Expected a TaskifyError, got: {:#}",
                e
            );
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Fixed reference time used by date-sensitive tests
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

/// Build a task with a generated title
pub fn sample_task(id: i64, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: None,
        status,
    }
}

/// Build an appointment with a generated subject
pub fn sample_appointment(id: i64, date: NaiveDateTime) -> Appointment {
    Appointment {
        id,
        subject: format!("Meeting {}", id),
        date,
    }
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
api:
  base_url: https://tasks.example.com/api
session:
  backend: memory
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(TaskifyError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    #[should_panic(expected = "Expected a TaskifyError")]
    fn test_assert_error_contains_foreign_error() {
        assert_error_contains::<()>(Err(anyhow::anyhow!("plain")), "plain");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: anyhow::Result<()> =
            Err(TaskifyError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.api.base_url, "https://tasks.example.com/api");
        assert_eq!(config.session.backend, "memory");
        assert!(config.validate().is_ok());
    }
}
