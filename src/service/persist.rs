//! Persist step: every write statement passes through here on its way to the datastore.

use crate::error::AppError;
use crate::extractors::FailFlag;
use crate::response::WriteAck;
use crate::sql::Statement;
use crate::store::{Datastore, Outcome};

pub struct Persist;

impl Persist {
    /// Decide the transaction outcome for `stmt`: forced rollback when `fail` is set, commit otherwise.
    pub fn decide(fail: FailFlag) -> Outcome {
        if fail.0 {
            Outcome::Rollback
        } else {
            Outcome::Commit
        }
    }

    /// Execute `stmt` in a transaction and acknowledge the outcome.
    ///
    /// Both outcomes run the same statement and leave nothing written when execution
    /// fails. On the commit path that failure propagates; a forced rollback always
    /// acknowledges, reporting zero rows if the statement itself failed.
    pub async fn run(store: &dyn Datastore, stmt: &Statement, fail: FailFlag) -> Result<WriteAck, AppError> {
        let outcome = Self::decide(fail);
        tracing::info!(statement = stmt.kind(), outcome = outcome.as_str(), "persisting");
        let ack = match (outcome, store.execute(stmt, outcome).await) {
            (Outcome::Commit, Ok(rows)) => WriteAck::executed(rows),
            (Outcome::Commit, Err(e)) => return Err(e.into()),
            (Outcome::Rollback, Ok(rows)) => WriteAck::rolled_back(rows),
            (Outcome::Rollback, Err(e)) => {
                tracing::warn!(statement = stmt.kind(), error = %e, "statement failed inside forced rollback");
                WriteAck::rolled_back(0)
            }
        };
        let rows = ack.rows_affected;
        tracing::info!(statement = stmt.kind(), outcome = outcome.as_str(), rows, "persisted");
        Ok(ack)
    }
}
