// SPDX-License-Identifier: GPL-3.0-only

//! Application core
//!
//! # Architecture
//!
//! - `state`: the model, messages, workflow state machine, and the camera
//!   configuration snapshot
//! - `update`: message dispatcher
//! - `handlers`: focused handler methods grouped by functional domain
//! - `runtime`: task effects and the event loop
//!
//! The model is only ever mutated from `update`, which the runtime drives
//! on a single logical thread. Handlers describe asynchronous work as
//! [`Task`] values instead of blocking; completed tasks feed their messages
//! back into the next update.

mod handlers;
pub mod runtime;
mod state;
mod update;

pub use runtime::{Runtime, Task};
pub use state::{AppModel, CameraConfiguration, Message, StatusKind, StatusNotice, WorkflowState};
