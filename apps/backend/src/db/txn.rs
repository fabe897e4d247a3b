use futures_util::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::errors::domain::DomainError;

/// Runs `f` inside a transaction: commit on `Ok`, rollback on `Err`.
///
/// The closure returns a boxed future borrowing the transaction:
///
/// ```ignore
/// with_txn(db, move |txn| Box::pin(async move { drinks::delete_drink(txn, id).await }))
/// ```
pub async fn with_txn<R, E, F>(db: &DatabaseConnection, f: F) -> Result<R, E>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, E>>,
    E: From<DomainError>,
{
    let txn = db.begin().await.map_err(DomainError::from)?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await.map_err(DomainError::from)?;
            Ok(val)
        }
        Err(err) => {
            // best-effort; the closure's error wins
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
