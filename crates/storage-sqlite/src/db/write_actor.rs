use std::any::Any;
use std::time::Duration;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use super::{DbPool, DEFAULT_WRITE_TIMEOUT};
use crate::errors::StorageError;
use scholaris_core::errors::{DatabaseError, Error, Result};

// Type alias for the job to be executed by the writer actor.
// It takes a mutable reference to a SqliteConnection and returns a Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
///
/// Each job runs inside one immediate transaction on the actor's dedicated
/// connection, so all writes are serialized: the existence and uniqueness
/// checks a job performs and the insert/update they guard cannot interleave
/// with another writer.
#[derive(Clone)]
pub struct WriteHandle {
    // Sender part of the MPSC channel to send jobs.
    // Each job is a boxed closure, and a oneshot sender is used for the reply.
    // The Box<dyn Any + Send> is used for type erasure of the job's return type.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        Instant,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
    timeout: Duration,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job must complete within the handle's write timeout, queue wait
    /// included; otherwise the caller gets `Error::Timeout` and the job is
    /// discarded before it touches the database.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let deadline = Instant::now() + self.timeout;
        let (ret_tx, ret_rx) = oneshot::channel();

        // Send the job to the writer actor. The job is wrapped to return a
        // Box<dyn Any + Send> for type erasure.
        let send_result = self
            .tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                deadline,
                ret_tx,
            ))
            .await;
        if send_result.is_err() {
            return Err(Error::Database(DatabaseError::Internal(
                "Writer actor is no longer running".to_string(),
            )));
        }

        let reply = match tokio::time::timeout_at(deadline, ret_rx).await {
            Err(_) => {
                return Err(Error::Timeout(format!(
                    "Write transaction exceeded its {:?} budget",
                    self.timeout
                )))
            }
            Ok(Err(_)) => {
                return Err(Error::Database(DatabaseError::Internal(
                    "Writer actor dropped the reply sender without sending a result".to_string(),
                )))
            }
            Ok(Ok(result)) => result,
        };

        // Unwrap the Box<dyn Any + Send> back to the original type T.
        reply.map(|boxed: Box<dyn Any + Send + 'static>| {
            *boxed
                .downcast::<T>()
                .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
        })
    }
}

/// Spawns a background Tokio task that acts as a single writer to the
/// database, with the default write timeout.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    spawn_writer_with_timeout(pool, DEFAULT_WRITE_TIMEOUT)
}

/// Spawns the writer actor with an explicit per-job time budget.
///
/// The actor owns one database connection from the pool and processes write
/// jobs serially, each inside an immediate transaction.
pub fn spawn_writer_with_timeout(pool: DbPool, timeout: Duration) -> WriteHandle {
    // The channel is bounded; 1024 is an arbitrary size.
    #[allow(clippy::type_complexity)]
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        Instant,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        // Acquire a single connection from the pool for this actor.
        // This connection is held for the lifetime of the actor.
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, deadline, reply_tx)) = rx.recv().await {
            // A job that expired while queued is rejected without touching
            // the database, so a Timeout on the caller side means nothing
            // was written.
            if Instant::now() >= deadline {
                let _ = reply_tx.send(Err(Error::Timeout(
                    "Write job expired before reaching the database".to_string(),
                )));
                continue;
            }

            // Execute the job within an immediate database transaction.
            // StorageError implements From<diesel::result::Error> for the
            // transaction wrapper and carries domain errors through intact.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Ignore error if the receiver has dropped (e.g., the request
            // timed out or was cancelled).
            let _ = reply_tx.send(result);
        }
        // rx.recv() returning None means every WriteHandle was dropped, so
        // the actor can terminate.
    });

    WriteHandle { tx, timeout }
}
