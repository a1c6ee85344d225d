//! Store abstraction. Handlers and guards only see `dyn Store`, so PostgreSQL and the
//! in-memory backend are interchangeable.
//!
//! Every method is atomic: multi-statement operations either apply fully or not at all.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect, ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{
    Developer, DeveloperDetail, DeveloperInfo, DeveloperProject, DeveloperWithInfo, NewDeveloper,
    NewDeveloperInfo, NewProject, PreferredOs, Project, ProjectDetail, ProjectUpdate, Technology,
};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backend; used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    async fn developer(&self, id: i32) -> Result<Option<Developer>, AppError>;

    async fn developer_by_email(&self, email: &str) -> Result<Option<Developer>, AppError>;

    /// Fails with `Conflict` when the email is taken.
    async fn create_developer(&self, input: &NewDeveloper) -> Result<Developer, AppError>;

    async fn developer_detail(&self, id: i32) -> Result<Option<DeveloperDetail>, AppError>;

    /// All developers ordered by id.
    async fn list_developers(&self) -> Result<Vec<DeveloperDetail>, AppError>;

    /// One row per project owned by the developer, ordered by project id.
    async fn developer_projects(&self, id: i32) -> Result<Vec<DeveloperProject>, AppError>;

    async fn rename_developer(&self, id: i32, name: &str) -> Result<Option<Developer>, AppError>;

    /// Removes the developer's associations, projects, the developer and its info.
    /// Returns false when the developer does not exist.
    async fn delete_developer(&self, id: i32) -> Result<bool, AppError>;

    /// Inserts the info and links it. `NotFound` for an unknown developer, `Conflict` when
    /// one is already linked.
    async fn create_developer_info(
        &self,
        developer_id: i32,
        input: &NewDeveloperInfo,
    ) -> Result<DeveloperWithInfo, AppError>;

    /// `None` when the developer has no linked info.
    async fn update_developer_info(
        &self,
        developer_id: i32,
        preferred_os: PreferredOs,
    ) -> Result<Option<DeveloperInfo>, AppError>;

    async fn project(&self, id: i32) -> Result<Option<Project>, AppError>;

    /// `NotFound` when the owning developer does not exist.
    async fn create_project(&self, input: &NewProject) -> Result<Project, AppError>;

    async fn project_detail(&self, id: i32) -> Result<Option<ProjectDetail>, AppError>;

    /// All projects ordered by id.
    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, AppError>;

    async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, AppError>;

    /// Removes the project's associations and the project. False when it does not exist.
    async fn delete_project(&self, id: i32) -> Result<bool, AppError>;

    async fn technology_by_name(&self, name: &str) -> Result<Option<Technology>, AppError>;

    /// Associates a cataloged technology with the project and returns the refreshed project.
    /// `Validation` for a name outside the catalog, `NotFound` for an unknown project,
    /// `Conflict` when already associated.
    async fn add_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<ProjectDetail, AppError>;

    /// Removes the association of `technology` with this project only.
    /// False when there was no such association.
    async fn remove_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<bool, AppError>;
}
