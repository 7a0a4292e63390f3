//! Input validation for workspace records and report parameters.

use crate::error::{CrewError, Result};

/// Maximum allowed length for a title or display name.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for a record body.
pub const MAX_BODY_LENGTH: usize = 50_000;

/// Maximum allowed length for a record ID.
pub const MAX_ID_LENGTH: usize = 50;

/// Largest reporting window accepted by the daily report.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Characters forbidden in IDs to prevent path traversal.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0'];

/// Validates a title or display name.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CrewError::Validation("Title cannot be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CrewError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_body(body: &str) -> Result<()> {
    if body.len() > MAX_BODY_LENGTH {
        return Err(CrewError::Validation(format!(
            "Body exceeds maximum length of {} characters",
            MAX_BODY_LENGTH
        )));
    }
    Ok(())
}

/// Validates a record ID to prevent path traversal attacks.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CrewError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(CrewError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(CrewError::Validation(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(CrewError::Validation(format!("ID cannot contain '{}'", c)));
        }
    }
    Ok(())
}

/// Every referenced member must exist in the workspace.
pub fn validate_members_exist<'a, I, F>(ids: I, exists: F) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
    F: Fn(&str) -> bool,
{
    for id in ids {
        if !exists(id) {
            return Err(CrewError::Validation(format!(
                "Member '{}' does not exist",
                id
            )));
        }
    }
    Ok(())
}

/// The daily report covers at least today.
pub fn validate_window(days: u32) -> Result<()> {
    if days == 0 {
        return Err(CrewError::Validation(
            "Day window must be at least 1".to_string(),
        ));
    }
    if days > MAX_WINDOW_DAYS {
        return Err(CrewError::Validation(format!(
            "Day window cannot exceed {} days",
            MAX_WINDOW_DAYS
        )));
    }
    Ok(())
}
