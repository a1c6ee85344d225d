//! Apply the schema to the database and seed the technology catalog.
//! Order follows PostgreSQL dependencies: enum type, then tables referenced by foreign keys first.

use crate::catalog::TECHNOLOGIES;
use crate::error::AppError;
use crate::sql::schema;
use sqlx::PgPool;

/// Create the enum type and the five tables if missing, then insert any missing catalog rows.
/// Runs in one transaction; safe to call on every startup.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in schema::TABLES {
        sqlx::raw_sql(ddl).execute(&mut *tx).await?;
    }
    for name in TECHNOLOGIES {
        sqlx::query(schema::SEED_TECHNOLOGY)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(technologies = TECHNOLOGIES.len(), "schema applied");
    Ok(())
}
