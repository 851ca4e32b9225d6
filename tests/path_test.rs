//! Tests for configuration paths.

use cfgspec::{ConfigPath, PathSegment};

#[test]
fn test_root_display() {
    assert_eq!(ConfigPath::root().to_string(), "");
    assert!(ConfigPath::root().is_root());
}

#[test]
fn test_mixed_segments() {
    let path = ConfigPath::root()
        .push_field("db")
        .push_field("replicas")
        .push_index(0)
        .push_index(3)
        .push_field("host");
    assert_eq!(path.to_string(), "db.replicas[0][3].host");
    assert_eq!(path.len(), 5);
}

#[test]
fn test_segments_iteration() {
    let path = ConfigPath::from_field("a").push_index(1);
    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![&PathSegment::field("a"), &PathSegment::index(1)]
    );
}

#[test]
fn test_separator_is_carried() {
    let path = ConfigPath::root_with_separator("::").push_field("a").push_field("b");
    assert_eq!(path.separator(), "::");
    assert_eq!(path.to_string(), "a::b");
    assert_eq!(path.push_index(0).push_field("c").to_string(), "a::b[0]::c");
}
