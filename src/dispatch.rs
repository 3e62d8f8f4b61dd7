//! Dispatch channels: how callers hand requests to the state owner.

use crate::close::AsyncClose;
use crate::request::{ReadRequest, Request, WriteAck, WriteRequest};
use crate::{Error, Result};
use std::fmt;
use tokio::sync::mpsc::Sender;

/// The sending ends of the owner's read and write channels.
///
/// Both channels are bounded: a submit waits while the owner's queue for that
/// kind of request is full. Clones share the same channels; the owner keeps
/// serving until every clone is dropped or it is cancelled.
pub struct Dispatcher<K, V> {
    reads: Sender<ReadRequest<K, V>>,
    writes: Sender<WriteRequest<K, V>>,
}

impl<K, V> Clone for Dispatcher<K, V> {
    fn clone(&self) -> Self {
        Self {
            reads: self.reads.clone(),
            writes: self.writes.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Dispatcher<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .finish()
    }
}

impl<K, V> Dispatcher<K, V> {
    pub(crate) fn new(reads: Sender<ReadRequest<K, V>>, writes: Sender<WriteRequest<K, V>>) -> Self {
        Self { reads, writes }
    }

    /// `true` once the owner has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.reads.is_closed() && self.writes.is_closed()
    }

    /// Submits a request built by the caller and returns once the owner's
    /// queue has accepted it. The answer arrives on the request's own reply.
    pub async fn submit(&self, request: Request<K, V>) -> Result<()> {
        match request {
            Request::Read(read) => self.reads.send(read).await.map_err(|_| Error::OwnerClosed),
            Request::Write(write) => self.writes.send(write).await.map_err(|_| Error::OwnerClosed),
        }
    }

    /// The value stored under `key`, or `None` if it was never written.
    pub async fn lookup(&self, key: K) -> Result<Option<V>> {
        let (request, answer) = ReadRequest::new(key);
        self.reads.send(request).await.map_err(|_| Error::OwnerClosed)?;
        answer.await.map_err(|_| Error::NoReply)
    }

    /// Like [`lookup`](Dispatcher::lookup), but an absent key reads as `V::default()`.
    pub async fn read(&self, key: K) -> Result<V>
    where
        V: Default,
    {
        self.lookup(key).await.map(Option::unwrap_or_default)
    }

    /// Stores `value` under `key` and waits for the owner's acknowledgment.
    pub async fn write(&self, key: K, value: V) -> Result<()> {
        let (request, answer) = WriteRequest::new(key, value);
        self.writes.send(request).await.map_err(|_| Error::OwnerClosed)?;
        match answer.await.map_err(|_| Error::NoReply)? {
            WriteAck::Stored => Ok(()),
            WriteAck::Rejected => Err(Error::Rejected),
        }
    }
}

impl<K: Send, V: Send> AsyncClose for Dispatcher<K, V> {
    async fn close(self) {
        self.reads.close().await;
        self.writes.close().await;
    }
}
