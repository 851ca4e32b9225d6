use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use cfgspec::{identity, Filter, FilterResult, MapSource, Schema};

fn add(n: i64) -> Filter<i64, i64> {
    Filter::new(move |v: i64| FilterResult::ok(v + n))
}

fn below(limit: i64) -> Filter<i64, i64> {
    Filter::predicate(move |v: &i64| *v < limit, move |v| format!("{} >= {}", v, limit))
}

fn halve() -> Filter<i64, i64> {
    Filter::predicate(|v: &i64| v % 2 == 0, |v| format!("{} is odd", v)).map(|v| v / 2)
}

proptest! {
    #[test]
    fn test_then_is_associative(x in -1000i64..1000, n in -50i64..50, limit in -500i64..500) {
        let left = add(n).then(below(limit)).then(halve());
        let right = add(n).then(below(limit).then(halve()));
        prop_assert_eq!(left.filter(x), right.filter(x));
    }

    #[test]
    fn test_identity_is_a_unit(x in any::<i64>(), limit in any::<i64>()) {
        prop_assert_eq!(identity::<i64>().filter(x), FilterResult::ok(x));
        let f = below(limit);
        prop_assert_eq!(f.clone().then(identity()).filter(x), f.filter(x));
        prop_assert_eq!(identity().then(f.clone()).filter(x), f.filter(x));
    }

    #[test]
    fn test_missing_children_are_exactly_the_failures(present in prop::collection::vec(any::<bool>(), 1..12)) {
        let keys: Vec<String> = (0..present.len()).map(|i| format!("k{}", i)).collect();
        let mut source = MapSource::new();
        for (key, here) in keys.iter().zip(&present) {
            if *here {
                source.insert(key.clone(), 1);
            }
        }

        let forward = Schema::spec().add_children(keys.iter().map(|k| (k.clone(), Schema::integer())));
        let backward = Schema::spec().add_children(keys.iter().rev().map(|k| (k.clone(), Schema::integer())));

        let expected: Vec<String> = keys
            .iter()
            .zip(&present)
            .filter(|(_, here)| !**here)
            .map(|(k, _)| k.clone())
            .collect();

        let forward_result = forward.validate(&source);
        let found: Vec<String> = forward_result.failures().map(|f| f.path.to_string()).collect();
        prop_assert_eq!(&found, &expected);
        prop_assert_eq!(forward_result.passed(), expected.is_empty());

        let backward_result = backward.validate(&source);
        let forward_set: BTreeSet<String> = found.into_iter().collect();
        let backward_set: BTreeSet<String> =
            backward_result.failures().map(|f| f.path.to_string()).collect();
        prop_assert_eq!(forward_set, backward_set);
    }

    #[test]
    fn test_list_filter_runs_only_when_every_element_passes(items in prop::collection::vec(-100i32..100, 0..20)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let even = Filter::predicate(|v: &i32| v % 2 == 0, |v| format!("{} is odd", v));
        let list = Schema::list_with(even, Filter::run(move |_: &Vec<i32>| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let source = MapSource::new().with("items", items.clone());

        let result = list.validate(&source, "items");
        let all_even = items.iter().all(|v| v % 2 == 0);

        prop_assert_eq!(result.passed(), all_even);
        prop_assert_eq!(calls.load(Ordering::SeqCst), usize::from(all_even));
        for (index, v) in items.iter().enumerate() {
            let path = format!("items[{}]", index);
            let reported = result.failures().filter(|f| f.path.to_string() == path).count();
            prop_assert_eq!(reported, usize::from(v % 2 != 0));
        }
    }
}
