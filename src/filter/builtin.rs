//! Ready-made filters for common value constraints.
//!
//! Numeric filters work for any ordered, displayable type, so the same
//! `min` serves `i8` through `f64`. String lengths count characters, not
//! bytes.
//!
//! ```rust
//! use cfgspec::filters;
//!
//! let name = filters::non_empty().then(filters::max_len(16));
//! assert!(name.filter("svc".to_string()).passed());
//! assert!(name.filter(String::new()).failed());
//! ```

use std::fmt::Display;
use std::str::FromStr;

use regex::Regex;

use super::{Filter, FilterResult};

/// Passes values greater than or equal to `min`.
pub fn min<T>(min: T) -> Filter<T, T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let bound = min.to_string();
    Filter::predicate(
        move |v: &T| *v >= min,
        move |v| format!("must be at least {}, got {}", bound, v),
    )
}

/// Passes values less than or equal to `max`.
pub fn max<T>(max: T) -> Filter<T, T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let bound = max.to_string();
    Filter::predicate(
        move |v: &T| *v <= max,
        move |v| format!("must be at most {}, got {}", bound, v),
    )
}

/// Passes values within `min..=max`.
pub fn range<T>(min: T, max: T) -> Filter<T, T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let bounds = format!("{} and {}", min, max);
    Filter::predicate(
        move |v: &T| *v >= min && *v <= max,
        move |v| format!("must be between {}, got {}", bounds, v),
    )
}

/// Passes values strictly greater than zero.
pub fn positive<T>() -> Filter<T, T>
where
    T: PartialOrd + Default + Display + Send + Sync + 'static,
{
    Filter::predicate(
        |v: &T| *v > T::default(),
        |v| format!("must be positive, got {}", v),
    )
}

/// Passes values greater than or equal to zero.
pub fn non_negative<T>() -> Filter<T, T>
where
    T: PartialOrd + Default + Display + Send + Sync + 'static,
{
    Filter::predicate(
        |v: &T| *v >= T::default(),
        |v| format!("must be non-negative, got {}", v),
    )
}

/// Passes strings of at least `min` characters.
pub fn min_len(min: usize) -> Filter<String, String> {
    Filter::predicate(
        move |s: &String| s.chars().count() >= min,
        move |s| format!("length must be at least {}, got {}", min, s.chars().count()),
    )
}

/// Passes strings of at most `max` characters.
pub fn max_len(max: usize) -> Filter<String, String> {
    Filter::predicate(
        move |s: &String| s.chars().count() <= max,
        move |s| format!("length must be at most {}, got {}", max, s.chars().count()),
    )
}

/// Passes non-empty strings.
pub fn non_empty() -> Filter<String, String> {
    Filter::predicate(|s: &String| !s.is_empty(), |_| "must not be empty".to_string())
}

/// Passes strings matching the regular expression `pattern`.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regular expression.
pub fn pattern(pattern: &str) -> Result<Filter<String, String>, regex::Error> {
    let regex = Regex::new(pattern)?;
    let source = pattern.to_string();
    Ok(Filter::predicate(
        move |s: &String| regex.is_match(s),
        move |_| format!("must match pattern '{}'", source),
    ))
}

/// Passes strings equal to one of `allowed`.
pub fn one_of(allowed: &[&str]) -> Filter<String, String> {
    let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
    let listing = allowed.join(", ");
    Filter::predicate(
        move |s: &String| allowed.iter().any(|a| a == s),
        move |s| format!("must be one of [{}], got '{}'", listing, s),
    )
}

/// Parses strings into `T` with [`FromStr`].
///
/// ```rust
/// use std::net::IpAddr;
/// use cfgspec::filters;
///
/// let addr = filters::parse::<IpAddr>();
/// assert!(addr.filter("127.0.0.1".to_string()).passed());
/// assert!(addr.filter("localhost".to_string()).failed());
/// ```
pub fn parse<T>() -> Filter<String, T>
where
    T: FromStr + 'static,
    T::Err: Display,
{
    Filter::new(|s: String| match s.parse::<T>() {
        Ok(value) => FilterResult::Pass(value),
        Err(err) => FilterResult::Fail(format!("cannot parse '{}': {}", s, err)),
    })
}

/// Passes sequences of at least `min` items.
pub fn min_items<T: 'static>(min: usize) -> Filter<Vec<T>, Vec<T>> {
    Filter::predicate(
        move |items: &Vec<T>| items.len() >= min,
        move |items| format!("must have at least {} items, got {}", min, items.len()),
    )
}

/// Passes sequences of at most `max` items.
pub fn max_items<T: 'static>(max: usize) -> Filter<Vec<T>, Vec<T>> {
    Filter::predicate(
        move |items: &Vec<T>| items.len() <= max,
        move |items| format!("must have at most {} items, got {}", max, items.len()),
    )
}
