//! Table DDL and the `SELECT 1` connectivity check.

use crate::sql::{CREATE_BILLS, CREATE_ITEMS};
use sqlx::PgPool;

/// Create `items` and `bills` if they do not exist. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in [CREATE_ITEMS, CREATE_BILLS] {
        tracing::debug!(sql = %ddl.trim(), "query");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Round-trip `SELECT 1`.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}
