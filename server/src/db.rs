use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Build the connection pool.
///
/// The builder opens the initial connections eagerly, so an unreachable
/// database or bad credentials surface here rather than on the first request.
pub fn create_pool(connection_string: &str, max_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(connection_string);
    r2d2::Pool::builder().max_size(max_size).build(manager)
}
