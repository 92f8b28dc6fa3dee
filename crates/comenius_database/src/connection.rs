//! Database connection utilities.

use comenius_error::{DatabaseError, DatabaseErrorKind};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// Connection pool over PostgreSQL.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Establish a single connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection
/// string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> Result<PgConnection, DatabaseError> {
    let database_url = database_url()?;

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Build an r2d2 connection pool for the given connection string.
///
/// The URL is passed in rather than read from the environment so callers own
/// where configuration comes from.
///
/// # Errors
///
/// Returns an error if the pool cannot be built.
pub fn establish_pool(database_url: &str) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

fn database_url() -> Result<String, DatabaseError> {
    std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires a reachable Postgres; run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn builds_a_pool_for_the_configured_url() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for this test");
        let pool = establish_pool(&url).unwrap();
        assert!(pool.get().is_ok());
    }
}
