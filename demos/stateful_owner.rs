//! Stateful Owner Example
//!
//! One task owns a small map of integers. A crowd of reader and writer actors
//! hammers it through the dispatch channels for a while, and the number of
//! completed round-trips is printed at the end.
//!
//! ```text
//! cargo run --example stateful_owner -- --readers 100 --writers 10 --duration-ms 1000
//! RUST_LOG=state_owner=debug cargo run --example stateful_owner
//! ```
use clap::Parser;
use state_owner::{Key, Load, LoadConfig, OpCounter, StateOwner, Value};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Run reader and writer actors against a single state owner")]
struct Args {
    /// Number of reader actors
    #[arg(long, default_value_t = 100)]
    readers: usize,

    /// Number of writer actors
    #[arg(long, default_value_t = 10)]
    writers: usize,

    /// Keys are drawn from 0..key_space
    #[arg(long, default_value_t = 5)]
    key_space: u32,

    /// Values are drawn from 0..value_range
    #[arg(long, default_value_t = 100)]
    value_range: u32,

    /// How long the actors run
    #[arg(long, default_value_t = 1000)]
    duration_ms: u64,

    /// Slots in each dispatch channel
    #[arg(long, default_value_t = state_owner::DEFAULT_MAILBOX_CAPACITY)]
    mailbox_capacity: usize,

    /// Seed for reproducible key/value choices
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> state_owner::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let owner = StateOwner::<Key, Value>::new().start_with_mailbox_capacity(args.mailbox_capacity);

    let mut config = LoadConfig::default()
        .readers(args.readers)
        .writers(args.writers)
        .key_space(args.key_space)
        .value_range(args.value_range);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let ops = OpCounter::new();
    let load = Load::spawn(&owner, &config, ops.clone())?;

    // Let the actors work.
    tokio::time::sleep(Duration::from_millis(args.duration_ms)).await;

    println!("ops: {}", ops.load());

    load.stop().await;
    if let Some(state) = owner.close().await {
        let mut entries: Vec<_> = state.into_iter().collect();
        entries.sort_unstable();
        println!("state: {:?}", entries);
    }
    Ok(())
}
