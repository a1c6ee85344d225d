//! In-process store for tests and `DEVHUB_STORE=memory`. Mirrors the PostgreSQL
//! constraints: unique email, one info per developer, unique (project, technology).

use super::Store;
use crate::catalog::TECHNOLOGIES;
use crate::error::AppError;
use crate::messages;
use crate::model::{
    Developer, DeveloperDetail, DeveloperInfo, DeveloperProject, DeveloperWithInfo, NewDeveloper,
    NewDeveloperInfo, NewProject, PreferredOs, Project, ProjectDetail, ProjectTechnology,
    ProjectUpdate, Technology, TechnologySummary,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Tables {
    developers: BTreeMap<i32, Developer>,
    infos: BTreeMap<i32, DeveloperInfo>,
    projects: BTreeMap<i32, Project>,
    technologies: Vec<Technology>,
    links: Vec<ProjectTechnology>,
    last_developer_id: i32,
    last_info_id: i32,
    last_project_id: i32,
}

impl Tables {
    fn seeded() -> Self {
        let technologies = TECHNOLOGIES
            .iter()
            .zip(1..)
            .map(|(name, id)| Technology {
                id,
                name: name.to_string(),
            })
            .collect();
        Tables {
            technologies,
            ..Default::default()
        }
    }

    fn detail(&self, developer: &Developer) -> DeveloperDetail {
        let info = developer.developer_info_id.and_then(|id| self.infos.get(&id));
        DeveloperDetail::new(developer.clone(), info)
    }

    fn summary(&self, project_id: i32) -> TechnologySummary {
        TechnologySummary::from_associations(
            self.links
                .iter()
                .filter(|l| l.project_id == project_id)
                .filter_map(|l| {
                    self.technologies
                        .iter()
                        .find(|t| t.id == l.technology_id)
                        .map(|t| (t, l.added_in))
                }),
        )
    }

    fn project_detail(&self, project: &Project) -> ProjectDetail {
        ProjectDetail::new(project.clone(), self.summary(project.id))
    }
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store with the technology catalog seeded as ids 1..=9.
    pub fn new() -> Self {
        MemoryStore {
            tables: Mutex::new(Tables::seeded()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn developer(&self, id: i32) -> Result<Option<Developer>, AppError> {
        Ok(self.lock().developers.get(&id).cloned())
    }

    async fn developer_by_email(&self, email: &str) -> Result<Option<Developer>, AppError> {
        Ok(self
            .lock()
            .developers
            .values()
            .find(|d| d.email == email)
            .cloned())
    }

    async fn create_developer(&self, input: &NewDeveloper) -> Result<Developer, AppError> {
        let mut t = self.lock();
        if t.developers.values().any(|d| d.email == input.email) {
            return Err(AppError::Conflict(messages::DEVELOPER_EXISTS.into()));
        }
        t.last_developer_id += 1;
        let developer = Developer {
            id: t.last_developer_id,
            name: input.name.clone(),
            email: input.email.clone(),
            developer_info_id: None,
        };
        t.developers.insert(developer.id, developer.clone());
        Ok(developer)
    }

    async fn developer_detail(&self, id: i32) -> Result<Option<DeveloperDetail>, AppError> {
        let t = self.lock();
        Ok(t.developers.get(&id).map(|d| t.detail(d)))
    }

    async fn list_developers(&self) -> Result<Vec<DeveloperDetail>, AppError> {
        let t = self.lock();
        Ok(t.developers.values().map(|d| t.detail(d)).collect())
    }

    async fn developer_projects(&self, id: i32) -> Result<Vec<DeveloperProject>, AppError> {
        let t = self.lock();
        let Some(developer) = t.developers.get(&id) else {
            return Ok(Vec::new());
        };
        let detail = t.detail(developer);
        Ok(t.projects
            .values()
            .filter(|p| p.developer_id == id)
            .map(|p| DeveloperProject::new(&detail, t.project_detail(p)))
            .collect())
    }

    async fn rename_developer(&self, id: i32, name: &str) -> Result<Option<Developer>, AppError> {
        let mut t = self.lock();
        Ok(t.developers.get_mut(&id).map(|d| {
            d.name = name.to_string();
            d.clone()
        }))
    }

    async fn delete_developer(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.lock();
        let Some(developer) = t.developers.remove(&id) else {
            return Ok(false);
        };
        let owned: Vec<i32> = t
            .projects
            .values()
            .filter(|p| p.developer_id == id)
            .map(|p| p.id)
            .collect();
        t.links.retain(|l| !owned.contains(&l.project_id));
        t.projects.retain(|_, p| p.developer_id != id);
        if let Some(info_id) = developer.developer_info_id {
            t.infos.remove(&info_id);
        }
        tracing::info!(developer_id = id, "developer deleted");
        Ok(true)
    }

    async fn create_developer_info(
        &self,
        developer_id: i32,
        input: &NewDeveloperInfo,
    ) -> Result<DeveloperWithInfo, AppError> {
        let mut t = self.lock();
        match t.developers.get(&developer_id) {
            None => return Err(AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into())),
            Some(d) if d.developer_info_id.is_some() => {
                return Err(AppError::Conflict(messages::DEVELOPER_INFO_EXISTS.into()))
            }
            Some(_) => {}
        }
        t.last_info_id += 1;
        let info = DeveloperInfo {
            id: t.last_info_id,
            developer_since: input.developer_since,
            preferred_os: input.preferred_os,
        };
        t.infos.insert(info.id, info.clone());
        let developer = t
            .developers
            .get_mut(&developer_id)
            .ok_or_else(|| AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()))?;
        developer.developer_info_id = Some(info.id);
        Ok(DeveloperWithInfo {
            id: developer.id,
            name: developer.name.clone(),
            email: developer.email.clone(),
            developer_info: info,
        })
    }

    async fn update_developer_info(
        &self,
        developer_id: i32,
        preferred_os: PreferredOs,
    ) -> Result<Option<DeveloperInfo>, AppError> {
        let mut t = self.lock();
        let Some(info_id) = t.developers.get(&developer_id).and_then(|d| d.developer_info_id) else {
            return Ok(None);
        };
        Ok(t.infos.get_mut(&info_id).map(|info| {
            info.preferred_os = preferred_os;
            info.clone()
        }))
    }

    async fn project(&self, id: i32) -> Result<Option<Project>, AppError> {
        Ok(self.lock().projects.get(&id).cloned())
    }

    async fn create_project(&self, input: &NewProject) -> Result<Project, AppError> {
        let mut t = self.lock();
        if !t.developers.contains_key(&input.developer_id) {
            return Err(AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into()));
        }
        t.last_project_id += 1;
        let project = Project {
            id: t.last_project_id,
            name: input.name.clone(),
            description: input.description.clone(),
            estimated_time: input.estimated_time.clone(),
            repository: input.repository.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            developer_id: input.developer_id,
        };
        t.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn project_detail(&self, id: i32) -> Result<Option<ProjectDetail>, AppError> {
        let t = self.lock();
        Ok(t.projects.get(&id).map(|p| t.project_detail(p)))
    }

    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, AppError> {
        let t = self.lock();
        Ok(t.projects.values().map(|p| t.project_detail(p)).collect())
    }

    async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, AppError> {
        let mut t = self.lock();
        Ok(t.projects.get_mut(&id).map(|p| {
            if let Some(estimated_time) = &update.estimated_time {
                p.estimated_time = estimated_time.clone();
            }
            if let Some(end_date) = update.end_date {
                p.end_date = end_date;
            }
            p.clone()
        }))
    }

    async fn delete_project(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.lock();
        if t.projects.remove(&id).is_none() {
            return Ok(false);
        }
        t.links.retain(|l| l.project_id != id);
        tracing::info!(project_id = id, "project deleted");
        Ok(true)
    }

    async fn technology_by_name(&self, name: &str) -> Result<Option<Technology>, AppError> {
        Ok(self
            .lock()
            .technologies
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn add_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<ProjectDetail, AppError> {
        let mut t = self.lock();
        let technology_id = t
            .technologies
            .iter()
            .find(|te| te.name == technology)
            .map(|te| te.id)
            .ok_or_else(|| AppError::Validation(crate::catalog::not_accepted_message()))?;
        if !t.projects.contains_key(&project_id) {
            return Err(AppError::NotFound(messages::PROJECT_NOT_FOUND.into()));
        }
        if t
            .links
            .iter()
            .any(|l| l.project_id == project_id && l.technology_id == technology_id)
        {
            return Err(AppError::Conflict(messages::TECHNOLOGY_ALREADY_ADDED.into()));
        }
        t.links.push(ProjectTechnology {
            added_in: Utc::now(),
            project_id,
            technology_id,
        });
        t.projects
            .get(&project_id)
            .map(|p| t.project_detail(p))
            .ok_or_else(|| AppError::NotFound(messages::PROJECT_NOT_FOUND.into()))
    }

    async fn remove_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<bool, AppError> {
        let mut t = self.lock();
        let Some(technology_id) = t
            .technologies
            .iter()
            .find(|te| te.name == technology)
            .map(|te| te.id)
        else {
            return Ok(false);
        };
        let before = t.links.len();
        t.links
            .retain(|l| !(l.project_id == project_id && l.technology_id == technology_id));
        Ok(t.links.len() < before)
    }
}
