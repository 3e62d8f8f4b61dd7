use crate::Dispatcher;
use crate::close::AsyncClose;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Shared ownership of the owner task's join handle.
///
/// Only the last holder gets to await the task and collect its final map.
#[derive(Debug)]
struct OwnerTask<K, V> {
    join_handle: Arc<JoinHandle<HashMap<K, V>>>,
}

impl<K, V> Clone for OwnerTask<K, V> {
    fn clone(&self) -> Self {
        Self {
            join_handle: Arc::clone(&self.join_handle),
        }
    }
}

impl<K, V> OwnerTask<K, V> {
    fn new(join_handle: JoinHandle<HashMap<K, V>>) -> Self {
        Self {
            join_handle: Arc::new(join_handle),
        }
    }

    async fn wait_for_completion(mut self) -> Option<HashMap<K, V>> {
        let join_handle = Arc::get_mut(&mut self.join_handle)?;
        match join_handle.await {
            Ok(state) => Some(state),
            Err(error) => {
                warn!(%error, "state owner task did not complete");
                None
            }
        }
    }
}

/// A [`Dispatcher`] bound to a running state owner.
///
/// Derefs to the dispatcher, so `handle.read(k)` and `handle.write(k, v)`
/// work directly. Clones share the owner; see [`OwnerHandle::close`] for how
/// the lifecycle is driven by the senders.
#[derive(Debug)]
pub struct OwnerHandle<K, V> {
    dispatcher: Dispatcher<K, V>,
    task: OwnerTask<K, V>,
    token: CancellationToken,
}

impl<K, V> Clone for OwnerHandle<K, V> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            task: self.task.clone(),
            token: self.token.clone(),
        }
    }
}

impl<K, V> OwnerHandle<K, V> {
    pub(crate) fn new(
        dispatcher: Dispatcher<K, V>,
        join_handle: JoinHandle<HashMap<K, V>>,
        token: CancellationToken,
    ) -> Self {
        Self {
            dispatcher,
            task: OwnerTask::new(join_handle),
            token,
        }
    }

    /// A sender-only clone for caller actors. It keeps the owner serving but
    /// does not take part in collecting its final state.
    pub fn dispatcher(&self) -> Dispatcher<K, V> {
        self.dispatcher.clone()
    }

    /// Cancelling this token stops the owner even while senders remain.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl<K: Send, V: Send> OwnerHandle<K, V> {
    /// Drops this handle's senders.
    ///
    /// The owner drains what is already queued and stops once every
    /// [`OwnerHandle`] and [`Dispatcher`] is gone. The last handle to close
    /// waits for that and returns the final map; earlier ones return `None`
    /// at once.
    ///
    /// "Last" is decided when this handle looks at the shared join handle.
    /// If two clones close concurrently, each may still see the other and
    /// both return `None`, losing the final map. Close clones one after
    /// another when the map is needed.
    pub async fn close(self) -> Option<HashMap<K, V>> {
        let Self {
            dispatcher, task, ..
        } = self;
        dispatcher.close().await;
        task.wait_for_completion().await
    }

    /// Cancels the owner, then [`close`](OwnerHandle::close)s.
    ///
    /// Requests still queued are dropped unanswered and their callers see
    /// [`Error::NoReply`](crate::Error::NoReply); later submits fail with
    /// [`Error::OwnerClosed`](crate::Error::OwnerClosed).
    pub async fn shutdown(self) -> Option<HashMap<K, V>> {
        self.token.cancel();
        self.close().await
    }
}

impl<K, V> Deref for OwnerHandle<K, V> {
    type Target = Dispatcher<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.dispatcher
    }
}
