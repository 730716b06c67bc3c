//! Use-case services driven by a display layer.
//!
//! # Responsibility
//! - Keep the in-memory task list in lockstep with the store.
//! - Translate user intents (checkbox, swipe, editor) into store mutations.
//!
//! # Invariants
//! - Every mutation goes through the injected store before the list changes.
//! - Services are single-threaded; callers serialize access.

pub mod editor;
pub mod session;
pub mod task_list;
