//! Request envelopes exchanged between callers and the state owner.
//!
//! Every request carries its own single-use reply sender. The owner consumes
//! it by value when answering, so a request is answered at most once, and the
//! caller consumes the matching receiver by awaiting it.

use tokio::sync::oneshot;

/// Asks the owner for the value stored under `key`.
#[derive(Debug)]
pub struct ReadRequest<K, V> {
    pub key: K,
    pub reply: oneshot::Sender<Option<V>>,
}

impl<K, V> ReadRequest<K, V> {
    /// Builds a request together with the receiver its answer arrives on.
    pub fn new(key: K) -> (Self, oneshot::Receiver<Option<V>>) {
        let (reply, answer) = oneshot::channel();
        (Self { key, reply }, answer)
    }
}

/// Asks the owner to store `value` under `key`, overwriting any previous value.
#[derive(Debug)]
pub struct WriteRequest<K, V> {
    pub key: K,
    pub value: V,
    pub reply: oneshot::Sender<WriteAck>,
}

impl<K, V> WriteRequest<K, V> {
    /// Builds a request together with the receiver its acknowledgment arrives on.
    pub fn new(key: K, value: V) -> (Self, oneshot::Receiver<WriteAck>) {
        let (reply, answer) = oneshot::channel();
        (Self { key, value, reply }, answer)
    }
}

/// The owner's answer to a [`WriteRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAck {
    /// The value is now in the map.
    Stored,
    /// The owner's admission policy refused the write; the map is unchanged.
    Rejected,
}

impl WriteAck {
    pub fn is_stored(self) -> bool {
        matches!(self, WriteAck::Stored)
    }
}

/// A single item of the owner's inbox, after the read and write channels are merged.
#[derive(Debug)]
pub enum Request<K, V> {
    Read(ReadRequest<K, V>),
    Write(WriteRequest<K, V>),
}

impl<K, V> From<ReadRequest<K, V>> for Request<K, V> {
    fn from(request: ReadRequest<K, V>) -> Self {
        Request::Read(request)
    }
}

impl<K, V> From<WriteRequest<K, V>> for Request<K, V> {
    fn from(request: WriteRequest<K, V>) -> Self {
        Request::Write(request)
    }
}
