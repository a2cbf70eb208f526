//! Input rules shared by every `createXxx` mutation.

use async_graphql::ID;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Trims `raw`; the result must be non-empty and at most [`MAX_NAME_LENGTH`] chars.
pub fn name(raw: &str) -> ServiceResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ServiceError::validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_owned())
}

/// Trims `raw`; a blank description is stored as absent.
pub fn description(raw: Option<&str>) -> ServiceResult<Option<String>> {
    let Some(description) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ServiceError::validation(format!(
            "description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(Some(description.to_owned()))
}

pub fn schedule(starts: DateTime<Utc>, ends: DateTime<Utc>) -> ServiceResult<()> {
    if ends < starts {
        return Err(ServiceError::validation("ends must not be before starts"));
    }
    Ok(())
}

/// Parses an optional reference to another entity.
pub fn reference(field: &str, raw: Option<&ID>) -> ServiceResult<Option<Uuid>> {
    raw.map(|id| {
        Uuid::parse_str(id.as_str())
            .map_err(|_| ServiceError::validation(format!("{field} is not a valid id")))
    })
    .transpose()
}
