//! Turn untyped JSON bodies into validated inputs. Every check runs before any store call.

use crate::catalog;
use crate::error::AppError;
use crate::model::{NewDeveloper, NewDeveloperInfo, NewProject, PreferredOs, ProjectUpdate};
use chrono::NaiveDate;
use serde_json::Value;

pub const DEVELOPER_KEYS_REQUIRED: &str = "Name and Email are required keys!";
pub const EMAIL_IMMUTABLE: &str = "Email can't be updated!";
pub const NAME_REQUIRED: &str = "Name is a required key!";
pub const PREFERRED_OS_VALUES: &str =
    "Acceptable values for key preferredOS are: Windows, Linux and MacOS!";
pub const INFO_KEYS_REQUIRED: &str = "developerSince and preferredOS are required keys!";
pub const PROJECT_KEYS_REQUIRED: &str = "name, description, estimatedTime, repository, startDate and developerId are required keys! endDate is an optional key.";
pub const PROJECT_UPDATE_KEYS: &str = "At least one of the keys estimatedTime or endDate is required!";

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn date(key: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("{key} must be a date in the format YYYY-MM-DD!"))
    })
}

/// `developerId` as the store sees it; `None` for anything but an integer in range.
pub fn developer_id(body: &Value) -> Option<i32> {
    body.get("developerId")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
}

pub fn new_developer(body: &Value) -> Result<NewDeveloper, AppError> {
    match (str_field(body, "name"), str_field(body, "email")) {
        (Some(name), Some(email)) => Ok(NewDeveloper {
            name: name.to_string(),
            email: email.to_string(),
        }),
        _ => Err(AppError::Validation(DEVELOPER_KEYS_REQUIRED.into())),
    }
}

/// Only `name` may change; the mere presence of `email` is rejected.
pub fn developer_name(body: &Value) -> Result<String, AppError> {
    if body.get("email").is_some() {
        return Err(AppError::Validation(EMAIL_IMMUTABLE.into()));
    }
    str_field(body, "name")
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(NAME_REQUIRED.into()))
}

pub fn preferred_os(body: &Value) -> Result<PreferredOs, AppError> {
    str_field(body, "preferredOS")
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::Validation(PREFERRED_OS_VALUES.into()))
}

pub fn new_developer_info(body: &Value) -> Result<NewDeveloperInfo, AppError> {
    let preferred_os = preferred_os(body)?;
    let since = str_field(body, "developerSince")
        .ok_or_else(|| AppError::Validation(INFO_KEYS_REQUIRED.into()))?;
    Ok(NewDeveloperInfo {
        developer_since: date("developerSince", since)?,
        preferred_os,
    })
}

pub fn new_project(body: &Value) -> Result<NewProject, AppError> {
    let missing = || AppError::Validation(PROJECT_KEYS_REQUIRED.into());
    let required = |key: &str| str_field(body, key).ok_or_else(missing);

    let name = required("name")?;
    let description = required("description")?;
    let estimated_time = required("estimatedTime")?;
    let repository = required("repository")?;
    let start_date = required("startDate")?;
    let developer_id = developer_id(body).ok_or_else(missing)?;
    let end_date = match body.get("endDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(date("endDate", s)?),
        Some(_) => return Err(missing()),
    };

    Ok(NewProject {
        name: name.to_string(),
        description: description.to_string(),
        estimated_time: estimated_time.to_string(),
        repository: repository.to_string(),
        start_date: date("startDate", start_date)?,
        end_date,
        developer_id,
    })
}

/// At least one of `estimatedTime`/`endDate` must be a string. A null `endDate` clears the
/// column; other non-string values leave the field untouched.
pub fn project_update(body: &Value) -> Result<ProjectUpdate, AppError> {
    let estimated_time = str_field(body, "estimatedTime");
    let end_date = str_field(body, "endDate");
    if estimated_time.is_none() && end_date.is_none() {
        return Err(AppError::Validation(PROJECT_UPDATE_KEYS.into()));
    }
    let end_date = match (end_date, body.get("endDate")) {
        (Some(raw), _) => Some(Some(date("endDate", raw)?)),
        (None, Some(Value::Null)) => Some(None),
        _ => None,
    };
    Ok(ProjectUpdate {
        estimated_time: estimated_time.map(str::to_string),
        end_date,
    })
}

/// Non-empty name from the catalog.
pub fn technology_name(body: &Value) -> Result<String, AppError> {
    let name = str_field(body, "name")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(catalog::name_required_message()))?;
    if !catalog::is_cataloged(name) {
        return Err(AppError::Validation(catalog::not_accepted_message()));
    }
    Ok(name.to_string())
}
