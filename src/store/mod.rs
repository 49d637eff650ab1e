use crate::errors::StoreError;
use tracing::{debug, error};

pub mod exercises;
pub mod maintenance;
pub mod points;
pub mod submissions;

pub(crate) async fn run_query<T, F>(
    pool: &deadpool_diesel::postgres::Pool,
    query: F,
) -> Result<T, StoreError>
where
    F: FnOnce(&mut diesel::PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static,
{
    let conn = pool.get().await.map_err(|pool_err| {
        error!(
            "Failed to get DB connection object from pool: {:?}",
            pool_err
        );
        StoreError::Pool(pool_err)
    })?;
    debug!("DB connection object obtained from pool for interaction");

    match conn.interact(query).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(diesel_err)) => Err(StoreError::from(diesel_err)),
        Err(interact_err) => {
            error!("Deadpool interact error: {:?}", interact_err);
            Err(StoreError::Interact(interact_err))
        }
    }
}
