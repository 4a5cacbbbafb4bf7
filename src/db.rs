//! SQLite connection pooling helpers shared by the server and the
//! maintenance binary.

use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// An r2d2 pool of SQLite connections. Cheap to clone.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out from a [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Build a connection pool for the given SQLite database path or URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager)
}
