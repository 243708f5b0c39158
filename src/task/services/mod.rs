//! Application services for the task ledger and assignment subsystem.

mod assignment;
mod ledger;
mod locks;

pub use assignment::{AssignmentService, AssignmentServiceError, AssignmentServiceResult};
pub use ledger::{
    TaskFieldsRequest, TaskLedgerError, TaskLedgerResult, TaskLedgerService, TaskWithHistory,
};
