//! # state-owner
//!
//! One task owns a key/value map; every other task reaches it by message
//! passing. There is no lock around the map: only the owner can see it, and
//! it serves one request at a time, so reads and writes are serialized by
//! construction.
//!
//! ## Core concepts
//!
//! - **Actor**: anything implementing [`Actor`]; [`ActorExt`] spawns it on tokio.
//! - **State owner**: [`StateOwner`], the actor holding the map.
//! - **Requests**: [`ReadRequest`] and [`WriteRequest`], each with its own
//!   single-use reply channel.
//! - **Dispatch**: [`Dispatcher`], the bounded read and write channels callers
//!   submit on. A full channel makes the caller wait (back-pressure).
//! - **Handle**: [`OwnerHandle`], a dispatcher that can also close or shut down
//!   the owner and collect its final map.
//! - **Load**: [`Load`] runs reader and writer actors against an owner and
//!   tallies completed round-trips in an [`OpCounter`].
//!
//! ## Lifecycle
//!
//! The owner runs while any sender is alive. Dropping (or
//! [`close`](OwnerHandle::close)-ing) every handle and dispatcher lets it
//! drain its queues and stop. [`OwnerHandle::shutdown`] stops it right away;
//! queued requests are then dropped and their callers get [`Error::NoReply`],
//! while later submits fail with [`Error::OwnerClosed`]. No caller is left
//! waiting on a stopped owner.
//!
//! ```rust
//! use state_owner::{Load, LoadConfig, OpCounter, StateOwner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let owner = StateOwner::<i64, i64>::new().start();
//!
//!     owner.write(3, 42).await.unwrap();
//!     assert_eq!(owner.read(3).await, Ok(42));
//!     // Never written: reads as the default value.
//!     assert_eq!(owner.read(7).await, Ok(0));
//!
//!     // Ten round-trips from each of four readers and two writers.
//!     let counter = OpCounter::new();
//!     let config = LoadConfig::default().readers(4).writers(2).rounds(10);
//!     let load = Load::spawn(&owner, &config, counter.clone()).unwrap();
//!     load.join().await;
//!     assert_eq!(counter.load(), 60);
//!
//!     let state = owner.close().await.unwrap();
//!     assert!(state.contains_key(&3));
//! }
//! ```

mod actor;
mod close;
mod config;
mod counter;
mod dispatch;
mod error;
mod handle;
mod inbox;
mod load;
mod owner;
mod request;
mod start;

pub use {
    actor::Actor,
    close::AsyncClose,
    config::LoadConfig,
    counter::OpCounter,
    dispatch::Dispatcher,
    error::{Error, Result},
    handle::OwnerHandle,
    inbox::Inbox,
    load::{CallerKind, Key, Load, Value},
    owner::{Admission, StateOwner},
    request::{ReadRequest, Request, WriteAck, WriteRequest},
    start::{ActorExt, DEFAULT_MAILBOX_CAPACITY},
};
