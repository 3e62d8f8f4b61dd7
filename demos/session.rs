//! Session Example
//!
//! A single caller talks to the state owner step by step, showing the
//! request/reply protocol without any load:
//! - a write is acknowledged before the next request is sent
//! - a read of a key never written gives the default value (or `None` via `lookup`)
//! - a second write overwrites the first
//! - shutting the owner down fails later requests instead of hanging them
use state_owner::{Error, StateOwner};

#[tokio::main]
async fn main() {
    let owner = StateOwner::<i64, i64>::new().start();
    let caller = owner.dispatcher();

    caller.write(3, 42).await.unwrap();
    println!("write(3, 42) acknowledged");

    let value = caller.read(3).await.unwrap();
    println!("read(3) = {}", value);
    assert_eq!(value, 42);

    let value = caller.read(7).await.unwrap();
    println!("read(7) = {} (never written)", value);
    assert_eq!(value, 0);
    assert_eq!(caller.lookup(7).await, Ok(None));

    caller.write(3, 99).await.unwrap();
    let value = caller.read(3).await.unwrap();
    println!("read(3) = {} after overwrite", value);
    assert_eq!(value, 99);

    let state = owner.shutdown().await;
    println!("owner stopped with {:?}", state);

    assert_eq!(caller.read(3).await, Err(Error::OwnerClosed));
    println!("read after shutdown: {}", Error::OwnerClosed);
}
