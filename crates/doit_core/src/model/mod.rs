//! Domain model for the to-do list.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod task;
