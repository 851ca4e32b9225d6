//! Tests for filter composition.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cfgspec::{filters, identity, Capture, Filter, FilterResult};

fn double() -> Filter<i32, i32> {
    Filter::new(|v: i32| FilterResult::ok(v * 2))
}

fn below_ten() -> Filter<i32, i32> {
    Filter::predicate(|v: &i32| *v < 10, |v| format!("{} is too large", v))
}

#[test]
fn test_composition_order() {
    let chain = double().then(below_ten());
    assert_eq!(chain.filter(4), FilterResult::ok(8));
    assert_eq!(chain.filter(5), FilterResult::fail("10 is too large"));

    let reversed = below_ten().then(double());
    assert_eq!(reversed.filter(5), FilterResult::ok(10));
}

#[test]
fn test_failing_stage_stops_the_chain() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let chain = below_ten()
        .then(Filter::run(move |_: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .then(double());

    assert!(chain.filter(12).failed());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(chain.filter(1).passed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_capture_pulls_values_out_of_a_chain() {
    let before = Capture::new();
    let after = Capture::new();
    let chain = identity::<i32>()
        .capture(&before)
        .then(double())
        .capture(&after);

    let _ = chain.filter(21);
    assert_eq!(before.get(), Some(21));
    assert_eq!(after.take(), Some(42));
    assert!(!after.is_set());
}

#[test]
fn test_error_override_only_on_failure() {
    let filter = below_ten().error("keep it small");
    assert_eq!(filter.filter(3), FilterResult::ok(3));
    assert_eq!(filter.filter(30).message(), "keep it small");
}

#[test]
fn test_type_changing_chain() {
    let filter = filters::parse::<i64>()
        .then(filters::non_negative())
        .map(|v| v as u64);

    assert_eq!(filter.filter("17".to_string()), FilterResult::ok(17_u64));
    assert_eq!(
        filter.filter("-1".to_string()).message(),
        "must be non-negative, got -1"
    );
}

#[test]
fn test_for_each_lifts_element_filters() {
    let lifted = below_ten().for_each();
    assert_eq!(lifted.filter(vec![1, 2]), FilterResult::ok(vec![1, 2]));
    assert_eq!(
        lifted.filter(vec![11, 2, 12]).message(),
        "One or more filters failed while being applied to a list:\n\
         [0] 11 is too large\n\
         [2] 12 is too large"
    );
}

#[test]
fn test_result_conversions() {
    let parsed: FilterResult<u8> = "300".parse::<u8>().into();
    assert!(parsed.failed());
    assert_eq!(parsed.clone().into_option(), None);
    assert!(parsed.into_result().is_err());

    let chained = FilterResult::ok(2).and_then(|v| {
        if v > 1 {
            FilterResult::ok(v + 1)
        } else {
            FilterResult::fail("too small")
        }
    });
    assert_eq!(chained, FilterResult::ok(3));
}

#[test]
#[should_panic(expected = "cannot take the value of a failed filter result")]
fn test_value_of_failed_result_panics() {
    let _ = below_ten().filter(100).value();
}

#[test]
#[should_panic(expected = "cannot take the message of a passed filter result")]
fn test_message_of_passed_result_panics() {
    let result = below_ten().filter(1);
    let _ = result.message();
}
