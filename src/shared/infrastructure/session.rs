//! Session and unit-of-work boundary.
//!
//! A [`Session`] owns one pooled connection from the moment it is opened
//! until it is closed. Writes happen inside a [`UnitOfWork`], which borrows
//! the session exclusively, so units never nest and never overlap.
//!
//! ```text
//! Idle --begin--> Active --commit--> Committed
//!                    \----rollback-> RolledBack
//! ```
//!
//! Committed and RolledBack are terminal for the unit; the next `begin`
//! starts a fresh one.

use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::DbConnection;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_warn};
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::sqlite::SqliteConnection;
use serde::Serialize;
use std::fmt;

type Tm = AnsiTransactionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionState {
    Idle,
    Active,
    Committed,
    RolledBack,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionState::Idle => "idle",
            TransactionState::Active => "active",
            TransactionState::Committed => "committed",
            TransactionState::RolledBack => "rolled_back",
        };
        write!(f, "{}", s)
    }
}

/// Anything repositories can run queries through.
pub trait DbAccess {
    fn conn(&mut self) -> &mut SqliteConnection;
}

pub struct Session {
    conn: DbConnection,
    state: TransactionState,
    units_started: u64,
}

impl Session {
    pub(crate) fn new(conn: DbConnection) -> Self {
        log_debug!("Session opened");
        Self {
            conn,
            state: TransactionState::Idle,
            units_started: 0,
        }
    }

    /// State of the most recent unit of work on this session.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn units_started(&self) -> u64 {
        self.units_started
    }

    /// Start a unit of work.
    pub fn begin(&mut self) -> AppResult<UnitOfWork<'_>> {
        if self.state == TransactionState::Active {
            return Err(AppError::TransactionFailure(
                "A unit of work is already active on this session".to_string(),
            ));
        }

        Tm::begin_transaction(&mut *self.conn).map_err(|e| {
            AppError::TransactionFailure(format!("Failed to begin transaction: {}", e))
        })?;

        self.units_started += 1;
        self.state = TransactionState::Active;
        let id = self.units_started;
        LogContext::unit_of_work("begin", id);

        Ok(UnitOfWork {
            session: self,
            id,
            finished: false,
            timer: Some(TimedOperation::new(&format!("unit_of_work #{}", id))),
        })
    }

    /// Run `work` in its own unit of work.
    ///
    /// `Ok` commits. `Err` rolls everything back and hands the original error
    /// back to the caller.
    pub fn transaction<T, F>(&mut self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut UnitOfWork<'_>) -> AppResult<T>,
    {
        let mut uow = self.begin()?;

        match work(&mut uow) {
            Ok(value) => {
                uow.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback() {
                    log_error!("Rollback after failed unit of work also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Give the connection back to the pool.
    pub fn close(self) {
        log_debug!("Session closed after {} unit(s) of work", self.units_started);
    }
}

impl DbAccess for Session {
    fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("units_started", &self.units_started)
            .finish()
    }
}

/// One open transaction. Dropping it without `commit` rolls it back.
pub struct UnitOfWork<'s> {
    session: &'s mut Session,
    id: u64,
    finished: bool,
    timer: Option<TimedOperation>,
}

impl UnitOfWork<'_> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn commit(mut self) -> AppResult<()> {
        self.finished = true;

        match Tm::commit_transaction(&mut *self.session.conn) {
            Ok(()) => {
                self.session.state = TransactionState::Committed;
                LogContext::unit_of_work("commit", self.id);
                if let Some(timer) = self.timer.take() {
                    timer.finish_with_info("committed");
                }
                Ok(())
            }
            Err(e) => {
                // A failed commit leaves nothing applied.
                self.session.state = TransactionState::RolledBack;
                LogContext::error_with_context(&e, "Commit failed");
                Err(AppError::TransactionFailure(format!(
                    "Failed to commit unit of work #{}: {}",
                    self.id, e
                )))
            }
        }
    }

    pub fn rollback(mut self) -> AppResult<()> {
        self.finished = true;
        self.rollback_inner()
    }

    fn rollback_inner(&mut self) -> AppResult<()> {
        self.session.state = TransactionState::RolledBack;
        LogContext::unit_of_work("rollback", self.id);
        if let Some(timer) = self.timer.take() {
            timer.finish_with_info("rolled back");
        }

        Tm::rollback_transaction(&mut *self.session.conn).map_err(|e| {
            AppError::TransactionFailure(format!(
                "Failed to roll back unit of work #{}: {}",
                self.id, e
            ))
        })
    }
}

impl DbAccess for UnitOfWork<'_> {
    fn conn(&mut self) -> &mut SqliteConnection {
        self.session.conn()
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log_warn!("Unit of work #{} dropped while active, rolling back", self.id);
        if let Err(e) = self.rollback_inner() {
            log_error!("{}", e);
        }
    }
}
