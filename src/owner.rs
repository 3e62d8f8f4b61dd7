//! The state owner: the only task that ever touches the map.

use crate::request::{ReadRequest, Request, WriteAck, WriteRequest};
use crate::{Actor, Inbox};
use futures::StreamExt;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::pin::pin;
use std::sync::Arc;
use tracing::{debug, trace};

/// Decides whether a write may be applied. Returning `false` rejects it.
pub type Admission<K, V> = Arc<dyn Fn(&K, &V) -> bool + Send + Sync>;

/// Holds a key/value map that no other task can reach directly.
///
/// Once started (see [`StateOwner::start`]), the map moves into the owner's
/// task. Reads and writes arrive as [`Request`]s and are served one at a time,
/// so every observation and mutation is serialized by construction. When the
/// inbox ends the task yields the final map.
pub struct StateOwner<K, V> {
    state: HashMap<K, V>,
    admission: Option<Admission<K, V>>,
}

impl<K, V> StateOwner<K, V> {
    pub fn new() -> Self {
        Self {
            state: HashMap::new(),
            admission: None,
        }
    }

    /// Starts from `state` instead of an empty map.
    pub fn with_state(state: HashMap<K, V>) -> Self {
        Self {
            state,
            admission: None,
        }
    }

    /// Installs a policy consulted before each write.
    ///
    /// Refused writes leave the map unchanged and are answered with
    /// [`WriteAck::Rejected`].
    pub fn with_admission<F>(mut self, admit: F) -> Self
    where
        F: Fn(&K, &V) -> bool + Send + Sync + 'static,
    {
        self.admission = Some(Arc::new(admit));
        self
    }
}

impl<K, V> Default for StateOwner<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for StateOwner<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateOwner")
            .field("state", &self.state)
            .field("admission", &self.admission.is_some())
            .finish()
    }
}

impl<K, V> StateOwner<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Serves exactly one request.
    ///
    /// A caller that stopped waiting has dropped its receiver; its answer is
    /// discarded. A write is applied regardless.
    pub(crate) fn serve(&mut self, request: Request<K, V>) {
        match request {
            Request::Read(ReadRequest { key, reply }) => {
                let value = self.state.get(&key).cloned();
                if reply.send(value).is_err() {
                    trace!("reader went away before its reply");
                }
            }
            Request::Write(WriteRequest { key, value, reply }) => {
                let ack = match &self.admission {
                    Some(admit) if !admit(&key, &value) => WriteAck::Rejected,
                    _ => {
                        self.state.insert(key, value);
                        WriteAck::Stored
                    }
                };
                if reply.send(ack).is_err() {
                    trace!(?ack, "writer went away before its acknowledgment");
                }
            }
        }
    }
}

impl<K, V> Actor for StateOwner<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    type Message = Request<K, V>;
    type Output = HashMap<K, V>;

    async fn run(mut self, inbox: impl Inbox<Item = Self::Message>) -> Self::Output {
        let mut inbox = pin!(inbox);
        debug!(entries = self.state.len(), "state owner serving");

        let mut served: u64 = 0;
        while let Some(request) = inbox.next().await {
            self.serve(request);
            served += 1;
        }

        debug!(served, entries = self.state.len(), "state owner stopped");
        self.state
    }
}
