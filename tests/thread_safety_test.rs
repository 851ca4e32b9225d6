//! Tests for sharing schemas and sources across threads.

use std::sync::Arc;
use std::thread;

use cfgspec::{filters, Capture, MapSource, Schema, Section};

#[test]
fn test_concurrent_validation() {
    let spec = Arc::new(
        Schema::spec()
            .add_child("name", Schema::string())
            .add_child("age", Schema::node(filters::positive::<i32>())),
    );

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let spec = Arc::clone(&spec);
            thread::spawn(move || {
                let source = MapSource::new()
                    .with("name", format!("user{}", i))
                    .with("age", i - 4);
                (i, spec.validate(&source).passed())
            })
        })
        .collect();

    for handle in handles {
        let (i, passed) = handle.join().unwrap();
        assert_eq!(passed, i > 4);
    }
}

#[test]
fn test_shared_source() {
    let source: Section = Arc::new(
        MapSource::new().with("servers", vec![MapSource::new().with("host", "a")]),
    );
    let servers = Arc::new(Schema::section_list(
        &Schema::spec().add_child("host", Schema::string()),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            let servers = Arc::clone(&servers);
            thread::spawn(move || servers.validate(source.as_ref(), "servers").passed())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_capture_across_threads() {
    let seen = Capture::new();
    let node = Schema::integer().with_filter(cfgspec::identity().capture(&seen));

    thread::spawn(move || {
        let source = MapSource::new().with("n", 7);
        assert!(node.validate(&source, "n").passed());
    })
    .join()
    .unwrap();

    assert_eq!(seen.get(), Some(7));
}

#[test]
fn test_schema_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<cfgspec::Spec<Section>>();
    assert_send_sync::<cfgspec::List<i32, i32, Vec<i32>>>();
    assert_send_sync::<cfgspec::Node<String, String>>();
    assert_send_sync::<cfgspec::ValidationResult>();
    assert_send_sync::<MapSource>();
}
