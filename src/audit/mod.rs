//! Audit logging for ledger mutations
//!
//! Every change the budget store applies can be recorded with its before
//! and after values in an append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: one operation on one entity (timestamp, operation,
//!   entity path, optional before/after values).
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
