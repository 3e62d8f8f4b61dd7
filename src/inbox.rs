use futures::Stream;

/// Anything an [`Actor`](crate::Actor) can drain messages from.
pub trait Inbox: Stream + Send {}

impl<S: Stream + Send> Inbox for S {}
