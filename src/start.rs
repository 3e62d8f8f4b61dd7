//! Launching actors, and the state owner in particular.
//!
//! [`ActorExt`] is implemented for every [`Actor`] and spawns it onto the
//! current tokio runtime. [`StateOwner::start`] builds on it: it creates the
//! two bounded dispatch channels, merges them into one inbox and hands back an
//! [`OwnerHandle`].

use crate::request::Request;
use crate::{Actor, Dispatcher, Inbox, OwnerHandle, StateOwner};
use futures::{StreamExt, stream};
use std::hash::Hash;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Capacity of each dispatch channel when none is given.
///
/// tokio's bounded channels cannot be zero-sized, so one slot is the closest
/// thing to a synchronous handoff: a second submit waits for the owner.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1;

/// Provides startup methods for every [`Actor`].
pub trait ActorExt: Actor {
    /// Spawns the actor on an existing message stream.
    ///
    /// The returned handle resolves to the actor's output once the stream ends.
    fn start_with<I>(self, inbox: I) -> JoinHandle<Self::Output>
    where
        I: Inbox<Item = Self::Message> + 'static,
    {
        tokio::spawn(self.run(inbox))
    }
}

impl<A: Actor> ActorExt for A {}

impl<K, V> StateOwner<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Starts the owner with [`DEFAULT_MAILBOX_CAPACITY`] slots per channel.
    ///
    /// # Examples
    /// ```
    /// use state_owner::StateOwner;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let owner = StateOwner::<u32, String>::new().start();
    ///
    ///     owner.write(1, "one".to_string()).await.unwrap();
    ///     assert_eq!(owner.lookup(1).await, Ok(Some("one".to_string())));
    ///     assert_eq!(owner.lookup(2).await, Ok(None));
    ///
    ///     let state = owner.close().await.unwrap();
    ///     assert_eq!(state.len(), 1);
    /// }
    /// ```
    pub fn start(self) -> OwnerHandle<K, V> {
        self.start_with_mailbox_capacity(DEFAULT_MAILBOX_CAPACITY)
    }

    /// Starts the owner with `mailbox_capacity` slots on each of the read and
    /// write channels. Zero is raised to one.
    ///
    /// While a channel is full, submitting to it waits until the owner takes
    /// a request off. There is no unbounded variant.
    pub fn start_with_mailbox_capacity(self, mailbox_capacity: usize) -> OwnerHandle<K, V> {
        let capacity = mailbox_capacity.max(1);
        let (reads, read_rx) = mpsc::channel(capacity);
        let (writes, write_rx) = mpsc::channel(capacity);
        let token = CancellationToken::new();

        // `select` polls the two channels round-robin, so neither kind can
        // starve the other.
        let inbox = stream::select(
            ReceiverStream::new(read_rx).map(Request::Read),
            ReceiverStream::new(write_rx).map(Request::Write),
        )
        .take_until(token.clone().cancelled_owned());

        let join_handle = self.start_with(inbox);
        OwnerHandle::new(Dispatcher::new(reads, writes), join_handle, token)
    }
}
