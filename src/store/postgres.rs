//! PostgreSQL store over a `sqlx` pool.

use super::Store;
use crate::catalog;
use crate::config::DatabaseSettings;
use crate::error::{is_foreign_key_violation, is_unique_violation, AppError, ConfigError};
use crate::messages;
use crate::migration::apply_migrations;
use crate::model::{
    Developer, DeveloperDetail, DeveloperInfo, DeveloperProject, DeveloperWithInfo, NewDeveloper,
    NewDeveloperInfo, NewProject, PreferredOs, Project, ProjectDetail, ProjectUpdate, Technology,
};
use crate::sql::{developers, projects};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Create the database if configured, open the pool and apply the schema.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgStore, AppError> {
    if settings.create_if_missing {
        ensure_database_exists(&settings.url).await?;
    }
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await?;
    apply_migrations(&pool).await?;
    Ok(PgStore::new(pool))
}

fn log_query(sql: &str, op: &'static str) {
    tracing::debug!(op, sql = %sql.trim(), "query");
}

async fn fetch_project_detail(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<ProjectDetail>, AppError> {
    let sql = projects::select_detail_by_id();
    log_query(&sql, "project_detail");
    let row = sqlx::query_as::<_, ProjectDetail>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn developer(&self, id: i32) -> Result<Option<Developer>, AppError> {
        log_query(developers::SELECT_BY_ID, "developer");
        let row = sqlx::query_as::<_, Developer>(developers::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn developer_by_email(&self, email: &str) -> Result<Option<Developer>, AppError> {
        log_query(developers::SELECT_BY_EMAIL, "developer_by_email");
        let row = sqlx::query_as::<_, Developer>(developers::SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_developer(&self, input: &NewDeveloper) -> Result<Developer, AppError> {
        log_query(developers::INSERT, "create_developer");
        sqlx::query_as::<_, Developer>(developers::INSERT)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(messages::DEVELOPER_EXISTS.into())
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn developer_detail(&self, id: i32) -> Result<Option<DeveloperDetail>, AppError> {
        let sql = developers::select_detail_by_id();
        log_query(&sql, "developer_detail");
        let row = sqlx::query_as::<_, DeveloperDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_developers(&self) -> Result<Vec<DeveloperDetail>, AppError> {
        let sql = developers::select_detail_all();
        log_query(&sql, "list_developers");
        let rows = sqlx::query_as::<_, DeveloperDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn developer_projects(&self, id: i32) -> Result<Vec<DeveloperProject>, AppError> {
        log_query(developers::SELECT_PROJECTS, "developer_projects");
        let rows = sqlx::query_as::<_, DeveloperProject>(developers::SELECT_PROJECTS)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn rename_developer(&self, id: i32, name: &str) -> Result<Option<Developer>, AppError> {
        log_query(developers::UPDATE_NAME, "rename_developer");
        let row = sqlx::query_as::<_, Developer>(developers::UPDATE_NAME)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_developer(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        log_query(developers::DELETE_PROJECT_TECHNOLOGIES, "delete_developer");
        sqlx::query(developers::DELETE_PROJECT_TECHNOLOGIES)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(developers::DELETE_PROJECTS)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted: Option<(Option<i32>,)> = sqlx::query_as(developers::DELETE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((info_id,)) = deleted else {
            return Ok(false);
        };
        if let Some(info_id) = info_id {
            sqlx::query(developers::DELETE_INFO)
                .bind(info_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::info!(developer_id = id, "developer deleted");
        Ok(true)
    }

    async fn create_developer_info(
        &self,
        developer_id: i32,
        input: &NewDeveloperInfo,
    ) -> Result<DeveloperWithInfo, AppError> {
        let mut tx = self.pool.begin().await?;
        log_query(developers::INSERT_INFO, "create_developer_info");
        let info = sqlx::query_as::<_, DeveloperInfo>(developers::INSERT_INFO)
            .bind(input.developer_since)
            .bind(input.preferred_os)
            .fetch_one(&mut *tx)
            .await?;
        let linked = sqlx::query_as::<_, Developer>(developers::LINK_INFO)
            .bind(developer_id)
            .bind(info.id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(developer) = linked else {
            let exists = sqlx::query_as::<_, Developer>(developers::SELECT_BY_ID)
                .bind(developer_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();
            return Err(if exists {
                AppError::Conflict(messages::DEVELOPER_INFO_EXISTS.into())
            } else {
                AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into())
            });
        };
        tx.commit().await?;
        Ok(DeveloperWithInfo {
            id: developer.id,
            name: developer.name,
            email: developer.email,
            developer_info: info,
        })
    }

    async fn update_developer_info(
        &self,
        developer_id: i32,
        preferred_os: PreferredOs,
    ) -> Result<Option<DeveloperInfo>, AppError> {
        log_query(developers::UPDATE_INFO_OS, "update_developer_info");
        let row = sqlx::query_as::<_, DeveloperInfo>(developers::UPDATE_INFO_OS)
            .bind(developer_id)
            .bind(preferred_os)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let sql = projects::select_by_id();
        log_query(&sql, "project");
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_project(&self, input: &NewProject) -> Result<Project, AppError> {
        let sql = projects::insert();
        log_query(&sql, "create_project");
        sqlx::query_as::<_, Project>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.estimated_time)
            .bind(&input.repository)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.developer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::NotFound(messages::DEVELOPER_NOT_FOUND.into())
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn project_detail(&self, id: i32) -> Result<Option<ProjectDetail>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_project_detail(&mut *conn, id).await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectDetail>, AppError> {
        let sql = projects::select_detail_all();
        log_query(&sql, "list_projects");
        let rows = sqlx::query_as::<_, ProjectDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Option<Project>, AppError> {
        let sql = projects::update();
        log_query(&sql, "update_project");
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(update.estimated_time.as_deref())
            .bind(update.end_date.is_some())
            .bind(update.end_date.flatten())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_project(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        log_query(projects::DELETE, "delete_project");
        sqlx::query(projects::DELETE_TECHNOLOGIES)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query(projects::DELETE)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::info!(project_id = id, "project deleted");
        Ok(true)
    }

    async fn technology_by_name(&self, name: &str) -> Result<Option<Technology>, AppError> {
        log_query(projects::SELECT_TECHNOLOGY_BY_NAME, "technology_by_name");
        let row = sqlx::query_as::<_, Technology>(projects::SELECT_TECHNOLOGY_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<ProjectDetail, AppError> {
        let mut tx = self.pool.begin().await?;
        let tech = sqlx::query_as::<_, Technology>(projects::SELECT_TECHNOLOGY_BY_NAME)
            .bind(technology)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Validation(catalog::not_accepted_message()))?;
        log_query(projects::INSERT_TECHNOLOGY, "add_project_technology");
        sqlx::query(projects::INSERT_TECHNOLOGY)
            .bind(project_id)
            .bind(tech.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(messages::TECHNOLOGY_ALREADY_ADDED.into())
                } else if is_foreign_key_violation(&e) {
                    AppError::NotFound(messages::PROJECT_NOT_FOUND.into())
                } else {
                    AppError::Db(e)
                }
            })?;
        let detail = fetch_project_detail(&mut *tx, project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::PROJECT_NOT_FOUND.into()))?;
        tx.commit().await?;
        Ok(detail)
    }

    async fn remove_project_technology(
        &self,
        project_id: i32,
        technology: &str,
    ) -> Result<bool, AppError> {
        log_query(projects::DELETE_TECHNOLOGY, "remove_project_technology");
        let removed = sqlx::query(projects::DELETE_TECHNOLOGY)
            .bind(project_id)
            .bind(technology)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(removed > 0)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        // CREATE DATABASE takes no bind parameters; the name is quoted as an identifier.
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::DatabaseUrl("missing scheme".into()))?
        + 3;
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
