use proptest::prelude::*;
use state_owner::StateOwner;
use std::collections::{HashMap, HashSet};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Writes from one caller land in submission order.
    #[test]
    fn sequential_writes_match_a_plain_map(writes in prop::collection::vec((0_i64..5, any::<i64>()), 0..64)) {
        let mut model = HashMap::new();
        for &(key, value) in &writes {
            model.insert(key, value);
        }

        let state = runtime().block_on(async {
            let owner = StateOwner::new().start();
            for &(key, value) in &writes {
                owner.write(key, value).await.unwrap();
            }
            owner.close().await
        });

        prop_assert_eq!(state, Some(model));
    }

    // Concurrent writers on disjoint keys: each key ends with its writer's
    // last value, so no write was lost or replayed out of order.
    #[test]
    fn concurrent_writers_on_disjoint_keys(
        plans in prop::collection::vec(prop::collection::vec((0_i64..4, any::<i64>()), 1..32), 1..8)
    ) {
        let mut expected = HashMap::new();
        for (writer, plan) in plans.iter().enumerate() {
            for &(slot, value) in plan {
                expected.insert(writer as i64 * 4 + slot, value);
            }
        }

        let state = runtime().block_on(async {
            let owner = StateOwner::new().start();
            let mut writers = tokio::task::JoinSet::new();
            for (writer, plan) in plans.iter().cloned().enumerate() {
                let dispatcher = owner.dispatcher();
                writers.spawn(async move {
                    for (slot, value) in plan {
                        dispatcher.write(writer as i64 * 4 + slot, value).await.unwrap();
                    }
                });
            }
            while let Some(result) = writers.join_next().await {
                result.unwrap();
            }
            owner.close().await
        });

        prop_assert_eq!(state, Some(expected));
    }
}

/// Concurrent writers on shared keys: the final value of every key is one
/// that some writer actually wrote to it.
#[test]
fn shared_keys_end_with_a_written_value() {
    let (state, written) = runtime().block_on(async {
        let owner = StateOwner::<i64, i64>::new().start();
        let mut writers = tokio::task::JoinSet::new();
        for writer in 0..16_i64 {
            let dispatcher = owner.dispatcher();
            writers.spawn(async move {
                let mut written = Vec::new();
                for round in 0..50_i64 {
                    let key = (writer + round) % 5;
                    let value = writer * 1_000 + round;
                    dispatcher.write(key, value).await.unwrap();
                    written.push((key, value));
                }
                written
            });
        }

        let mut written = HashSet::new();
        while let Some(result) = writers.join_next().await {
            written.extend(result.unwrap());
        }
        (owner.close().await.unwrap(), written)
    });

    assert_eq!(state.len(), 5);
    for (key, value) in state {
        assert!(written.contains(&(key, value)), "{key} -> {value} was never written");
    }
}
