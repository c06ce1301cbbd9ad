//! Interaction state for the SnapTask
//! task pages: upload validation, search
//! highlighting, task actions, the edit
//! dialog, notifications and required
//! field checks. Nothing here touches the
//! DOM; `snaptask_web` drives it from
//! browser events.

pub mod actions;
pub mod config;
pub mod edit;
pub mod notify;
pub mod search;
pub mod task;
pub mod upload;
pub mod validate;

pub use config::PageConfig;
pub use notify::Severity;
pub use task::{
  TaskId,
  TaskRequest
};
