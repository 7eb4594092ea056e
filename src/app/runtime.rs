// SPDX-License-Identifier: GPL-3.0-only

//! Task effects and the event loop driving the application model
//!
//! Handlers return [`Task`] values describing asynchronous follow-up work.
//! [`Runtime`] owns the model, applies every update on a single logical
//! thread and spawns task futures on tokio; a completed future feeds its
//! message back into the next update. That serialization is the only
//! concurrency guard the workflow needs: a second shutter press during an
//! in-flight capture reaches the state machine before the capture
//! finishes, and is rejected there.

use crate::app::state::{AppModel, Message};
use futures::future::BoxFuture;
use tokio::task::JoinSet;
use tracing::warn;

/// A set of futures producing follow-up messages
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M: Send + 'static> Task<M> {
    /// No follow-up work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// A message that is ready immediately
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![Box::pin(std::future::ready(message))],
        }
    }

    /// Run `future` and map its output into a message
    pub fn perform<T, F, Map>(future: F, map: Map) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Map: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            futures: vec![Box::pin(async move { map(future.await) })],
        }
    }

    /// Combine several tasks into one
    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub(crate) fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }
}

/// Event loop owning the model and its in-flight tasks.
///
/// Must be created and driven inside a tokio runtime context.
pub struct Runtime {
    model: AppModel,
    tasks: JoinSet<Message>,
}

impl Runtime {
    /// Wrap a model and kick off its startup task
    pub fn new(model: AppModel) -> Self {
        let mut runtime = Self {
            model,
            tasks: JoinSet::new(),
        };
        let init = runtime.model.init();
        runtime.spawn(init);
        runtime
    }

    fn spawn(&mut self, task: Task<Message>) {
        for future in task.into_futures() {
            self.tasks.spawn(future);
        }
    }

    /// Apply a message to the model and spawn whatever work it produces
    pub fn dispatch(&mut self, message: Message) {
        let task = self.model.update(message);
        self.spawn(task);
    }

    /// Non-blocking: fold any completed task messages back into the model
    pub fn poll(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            match result {
                Ok(message) => self.dispatch(message),
                Err(err) => warn!(error = %err, "Background task failed"),
            }
        }
    }

    /// Drive the loop until no task remains in flight.
    ///
    /// Used by headless runs and tests; the interactive front-end polls
    /// instead so it can keep rendering.
    pub async fn run_until_idle(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            match result {
                Ok(message) => self.dispatch(message),
                Err(err) => warn!(error = %err, "Background task failed"),
            }
        }
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }
}
