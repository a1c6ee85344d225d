//! Entities, joined read models and validated inputs.
//!
//! Database columns are snake_case; every type that leaves the API serializes with
//! camelCase keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "os")]
pub enum PreferredOs {
    Windows,
    Linux,
    #[serde(rename = "MacOS")]
    #[sqlx(rename = "MacOS")]
    MacOs,
}

impl PreferredOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredOs::Windows => "Windows",
            PreferredOs::Linux => "Linux",
            PreferredOs::MacOs => "MacOS",
        }
    }
}

impl FromStr for PreferredOs {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Windows" => Ok(PreferredOs::Windows),
            "Linux" => Ok(PreferredOs::Linux),
            "MacOS" => Ok(PreferredOs::MacOs),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub developer_info_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInfo {
    pub id: i32,
    pub developer_since: NaiveDate,
    #[serde(rename = "preferredOS")]
    pub preferred_os: PreferredOs,
}

/// Developer left-joined with its info.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperDetail {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub developer_info_id: Option<i32>,
    pub developer_since: Option<NaiveDate>,
    #[serde(rename = "preferredOS")]
    pub preferred_os: Option<PreferredOs>,
}

impl DeveloperDetail {
    pub fn new(developer: Developer, info: Option<&DeveloperInfo>) -> Self {
        Self {
            id: developer.id,
            name: developer.name,
            email: developer.email,
            developer_info_id: developer.developer_info_id,
            developer_since: info.map(|i| i.developer_since),
            preferred_os: info.map(|i| i.preferred_os),
        }
    }
}

/// Developer record with the info object nested in place of the foreign key.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperWithInfo {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(rename = "developerInfoId")]
    pub developer_info: DeveloperInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub developer_id: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Technology {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTechnology {
    pub added_in: DateTime<Utc>,
    pub project_id: i32,
    pub technology_id: i32,
}

/// Technologies of one project collapsed into a single row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TechnologySummary {
    /// Latest association timestamp.
    pub tech_added_in: Option<DateTime<Utc>>,
    /// Technology ids joined with ", ", ordered by id.
    pub technology_ids: Option<String>,
    /// Technology names in the same order as `technology_ids`.
    pub technology_names: Option<String>,
}

impl TechnologySummary {
    pub fn from_associations<'a, I>(associations: I) -> Self
    where
        I: IntoIterator<Item = (&'a Technology, DateTime<Utc>)>,
    {
        let mut items: Vec<(&Technology, DateTime<Utc>)> = associations.into_iter().collect();
        if items.is_empty() {
            return Self::default();
        }
        items.sort_by_key(|(t, _)| t.id);
        Self {
            tech_added_in: items.iter().map(|(_, at)| *at).max(),
            technology_ids: Some(
                items
                    .iter()
                    .map(|(t, _)| t.id.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            technology_names: Some(
                items
                    .iter()
                    .map(|(t, _)| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

/// Project with its aggregated technologies.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub project_id: i32,
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub developer_id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub technologies: TechnologySummary,
}

impl ProjectDetail {
    pub fn new(project: Project, technologies: TechnologySummary) -> Self {
        Self {
            project_id: project.id,
            name: project.name,
            description: project.description,
            estimated_time: project.estimated_time,
            repository: project.repository,
            start_date: project.start_date,
            end_date: project.end_date,
            developer_id: project.developer_id,
            technologies,
        }
    }
}

/// One row of a developer's project listing.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperProject {
    pub developer_id: i32,
    pub developer_name: String,
    pub developer_email: String,
    pub developer_info_id: Option<i32>,
    pub developer_since: Option<NaiveDate>,
    #[serde(rename = "preferredOS")]
    pub preferred_os: Option<PreferredOs>,
    pub project_id: i32,
    pub project_name: String,
    pub project_description: String,
    pub project_estimated_time: String,
    pub project_repository: String,
    pub project_start_date: NaiveDate,
    pub project_end_date: Option<NaiveDate>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub technologies: TechnologySummary,
}

impl DeveloperProject {
    pub fn new(developer: &DeveloperDetail, project: ProjectDetail) -> Self {
        Self {
            developer_id: developer.id,
            developer_name: developer.name.clone(),
            developer_email: developer.email.clone(),
            developer_info_id: developer.developer_info_id,
            developer_since: developer.developer_since,
            preferred_os: developer.preferred_os,
            project_id: project.project_id,
            project_name: project.name,
            project_description: project.description,
            project_estimated_time: project.estimated_time,
            project_repository: project.repository,
            project_start_date: project.start_date,
            project_end_date: project.end_date,
            technologies: project.technologies,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeveloper {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeveloperInfo {
    pub developer_since: NaiveDate,
    pub preferred_os: PreferredOs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub developer_id: i32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectUpdate {
    pub estimated_time: Option<String>,
    /// `None` keeps the stored value, `Some(None)` clears it.
    pub end_date: Option<Option<NaiveDate>>,
}
