//! Caller actors: the reader and writer tasks that put load on a state owner.
//!
//! Each caller loops on one round-trip at a time: pick a random key (and
//! value, for writers), submit, wait for the answer, bump the shared
//! [`OpCounter`]. A caller stops when its load is stopped, when it has done
//! its configured number of rounds, or when the owner is gone.

use crate::{Dispatcher, Error, LoadConfig, OpCounter, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::iter;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Key type used by the caller actors.
pub type Key = i64;
/// Value type used by the caller actors.
pub type Value = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerKind {
    Reader,
    Writer,
}

struct Caller {
    kind: CallerKind,
    index: usize,
    dispatcher: Dispatcher<Key, Value>,
    key_space: u32,
    value_range: u32,
    rounds: Option<u64>,
    rng: StdRng,
    counter: OpCounter,
}

impl Caller {
    async fn round_trip(&mut self) -> Result<()> {
        let key = self.rng.gen_range(0..Key::from(self.key_space));
        match self.kind {
            CallerKind::Reader => self.dispatcher.read(key).await.map(drop),
            CallerKind::Writer => {
                let value = self.rng.gen_range(0..Value::from(self.value_range));
                match self.dispatcher.write(key, value).await {
                    // A refused write is still an answered request.
                    Ok(()) | Err(Error::Rejected) => Ok(()),
                    Err(error) => Err(error),
                }
            }
        }
    }

    async fn run(mut self, token: CancellationToken) -> u64 {
        let mut completed = 0;
        while self.rounds.is_none_or(|rounds| completed < rounds) {
            tokio::select! {
                _ = token.cancelled() => break,
                result = self.round_trip() => match result {
                    Ok(()) => {
                        self.counter.increment();
                        completed += 1;
                    }
                    Err(error) => {
                        debug!(kind = ?self.kind, index = self.index, %error, "caller stopping");
                        break;
                    }
                },
            }
        }
        completed
    }
}

/// A running group of reader and writer actors.
///
/// Dropping a `Load` aborts its actors; use [`Load::stop`] or [`Load::join`]
/// to let them finish their current round-trip first.
#[derive(Debug)]
pub struct Load {
    tasks: JoinSet<u64>,
    token: CancellationToken,
    counter: OpCounter,
}

impl Load {
    /// Validates `config` and spawns `config.readers` readers and
    /// `config.writers` writers against `dispatcher`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        dispatcher: &Dispatcher<Key, Value>,
        config: &LoadConfig,
        counter: OpCounter,
    ) -> Result<Self> {
        config.validate()?;

        let token = CancellationToken::new();
        let mut tasks = JoinSet::new();
        let kinds = iter::repeat_n(CallerKind::Reader, config.readers)
            .chain(iter::repeat_n(CallerKind::Writer, config.writers));

        for (index, kind) in kinds.enumerate() {
            let rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                None => StdRng::from_entropy(),
            };
            let caller = Caller {
                kind,
                index,
                dispatcher: dispatcher.clone(),
                key_space: config.key_space,
                value_range: config.value_range,
                rounds: config.rounds,
                rng,
                counter: counter.clone(),
            };
            tasks.spawn(caller.run(token.clone()));
        }

        debug!(
            readers = config.readers,
            writers = config.writers,
            rounds = ?config.rounds,
            "load started"
        );
        Ok(Self {
            tasks,
            token,
            counter,
        })
    }

    pub fn counter(&self) -> &OpCounter {
        &self.counter
    }

    /// Number of caller actors that have not finished yet.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every actor to finish on its own and returns how many
    /// round-trips they completed in total.
    pub async fn join(mut self) -> u64 {
        let mut completed = 0;
        while let Some(result) = self.tasks.join_next().await {
            match result {
                Ok(rounds) => completed += rounds,
                Err(error) => warn!(%error, "caller actor did not complete"),
            }
        }
        debug!(completed, "load finished");
        completed
    }

    /// Signals every actor to stop, then [`join`](Load::join)s them.
    pub async fn stop(self) -> u64 {
        self.token.cancel();
        self.join().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateOwner;
    use std::time::Duration;

    async fn bounded_run(readers: usize, writers: usize, rounds: u64) -> (u64, u64) {
        let owner = StateOwner::new().start();
        let counter = OpCounter::new();
        let config = LoadConfig::default()
            .readers(readers)
            .writers(writers)
            .rounds(rounds)
            .seed(7);

        let load = Load::spawn(&owner, &config, counter.clone()).unwrap();
        let completed = load.join().await;
        owner.close().await;

        (completed, counter.load())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_counter_matches_completed_round_trips() {
        let cases = [
            (0, 0, 5),
            (2, 2, 0),
            (1, 0, 3),
            (0, 1, 3),
            (4, 2, 10),
            (100, 10, 5),
        ];
        for (readers, writers, rounds) in cases {
            let expected = (readers + writers) as u64 * rounds;
            assert_eq!(
                bounded_run(readers, writers, rounds).await,
                (expected, expected),
                "readers={readers} writers={writers} rounds={rounds}"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_request_is_answered_at_any_caller_count() {
        for callers in [0, 1, 100, 1000] {
            let run = bounded_run(callers, callers / 10, 5);
            let (completed, _) = tokio::time::timeout(Duration::from_secs(30), run)
                .await
                .expect("load deadlocked");
            assert_eq!(completed, (callers + callers / 10) as u64 * 5);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_throughput_is_positive_and_monotonic() {
        let owner = StateOwner::new().start();
        let load = Load::spawn(&owner, &LoadConfig::default(), OpCounter::new()).unwrap();

        let mut samples = Vec::new();
        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            samples.push(load.counter().load());
        }
        let counter = load.counter().clone();
        let completed = load.stop().await;

        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]), "{samples:?}");
        assert!(counter.load() > 0);
        assert_eq!(completed, counter.load());
        owner.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_callers_exit_when_owner_shuts_down() {
        let owner = StateOwner::new().start();
        let config = LoadConfig::default().readers(20).writers(5);
        let load = Load::spawn(&owner.dispatcher(), &config, OpCounter::new()).unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        owner.shutdown().await;

        let joined = tokio::time::timeout(Duration::from_secs(5), load.join()).await;
        assert!(joined.is_ok(), "callers kept running after the owner stopped");
    }

    #[tokio::test]
    async fn test_rejected_writes_still_count() {
        let owner = StateOwner::new().with_admission(|_: &Key, _: &Value| false).start();
        let config = LoadConfig::default().readers(0).writers(3).rounds(4);

        let load = Load::spawn(&owner, &config, OpCounter::new()).unwrap();
        assert_eq!(load.join().await, 12);
        assert_eq!(owner.close().await, Some(Default::default()));
    }

    #[tokio::test]
    async fn test_invalid_config_spawns_nothing() {
        let owner = StateOwner::new().start();
        let config = LoadConfig::default().key_space(0);

        let result = Load::spawn(&owner, &config, OpCounter::new());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        owner.close().await;
    }

    #[tokio::test]
    async fn test_writes_stay_within_configured_ranges() {
        let owner = StateOwner::new().start();
        let config = LoadConfig::default()
            .readers(0)
            .writers(4)
            .key_space(3)
            .value_range(10)
            .rounds(50);

        Load::spawn(&owner, &config, OpCounter::new()).unwrap().join().await;
        let state = owner.close().await.unwrap();

        assert!(state.keys().all(|key| (0..3).contains(key)));
        assert!(state.values().all(|value| (0..10).contains(value)));
    }
}
