//! Template filter registry.
//!
//! Filters are pure functions over JSON values, registered under the names
//! the template layer invokes them by. Malformed input never fails a
//! filter: sequences pass through unchanged when the input is not an array,
//! and missing fields fall back to defaults. Only looking up an
//! unregistered name is an error.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Result, SsgError};
use crate::sample::shuffle_take;
use crate::slug::slugify;
use crate::views::normalize_views_value;

/// A registered filter: input value plus positional arguments.
pub type FilterFn = Box<dyn Fn(&Value, &[Value]) -> Value + Send + Sync>;

/// Name-to-function table the template layer resolves filters against.
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in filters registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("sortByRating", |input, _| sort_by_rating(input));
        registry.register("sortByViews", |input, _| sort_by_views(input));
        registry.register("slice", |input, args| slice(input, args));
        registry.register("getRandomItems", |input, args| get_random_items(input, args));
        registry.register("filterByType", |input, args| filter_by_type(input, args));
        registry.register("default", |input, args| default_value(input, args));
        registry.register("slugify", |input, _| slugify_value(input));
        registry
    }

    /// Register a filter under a name, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        filter: impl Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.filters.insert(name.into(), Box::new(filter));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.keys().map(String::as_str).collect()
    }

    /// Invoke a filter by name.
    pub fn apply(&self, name: &str, input: &Value, args: &[Value]) -> Result<Value> {
        let filter = self
            .filters
            .get(name)
            .ok_or_else(|| SsgError::UnknownFilter(name.to_string()))?;
        Ok(filter(input, args))
    }
}

/// Descending sort by the `rating` field, missing ratings counting as 0.
fn sort_by_rating(input: &Value) -> Value {
    map_array(input, |mut items| {
        items.sort_by(|a, b| rating_of(b).total_cmp(&rating_of(a)));
        items
    })
}

/// Descending sort by the normalized `views` field.
fn sort_by_views(input: &Value) -> Value {
    map_array(input, |mut items| {
        items.sort_by_cached_key(|item| {
            std::cmp::Reverse(normalize_views_value(item.get("views")))
        });
        items
    })
}

/// Host slice semantics: optional end, negative indices count from the
/// back, out-of-range clamps.
fn slice(input: &Value, args: &[Value]) -> Value {
    map_array(input, |items| {
        let len = items.len();
        let start = resolve_index(args.first(), 0, len);
        let end = resolve_index(args.get(1), len, len);
        if start >= end {
            Vec::new()
        } else {
            items[start..end].to_vec()
        }
    })
}

/// Uniform random draw of up to `count` items.
fn get_random_items(input: &Value, args: &[Value]) -> Value {
    let count = args
        .first()
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(usize::MAX);
    map_array(input, |items| {
        shuffle_take(items, count, &mut rand::thread_rng())
    })
}

/// Keep items whose `type` field equals the argument. Without an argument
/// there is nothing to compare against and the sequence passes through
/// unchanged.
fn filter_by_type(input: &Value, args: &[Value]) -> Value {
    let Some(wanted) = args.first().and_then(Value::as_str) else {
        return input.clone();
    };
    map_array(input, |items| {
        items
            .into_iter()
            .filter(|item| item.get("type").and_then(Value::as_str) == Some(wanted))
            .collect()
    })
}

/// `value || fallback` with the host's notion of emptiness: null, absent,
/// empty string, zero and false all fall back.
fn default_value(input: &Value, args: &[Value]) -> Value {
    let fallback = args.first().cloned().unwrap_or(Value::Null);
    let is_empty = match input {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if is_empty {
        fallback
    } else {
        input.clone()
    }
}

/// Slugify a string value; anything else yields an empty slug.
fn slugify_value(input: &Value) -> Value {
    match input {
        Value::String(s) => Value::String(slugify(s)),
        _ => Value::String(String::new()),
    }
}

/// Apply `f` to the elements of an array value; pass non-arrays through.
fn map_array(input: &Value, f: impl FnOnce(Vec<Value>) -> Vec<Value>) -> Value {
    match input {
        Value::Array(items) => Value::Array(f(items.clone())),
        other => other.clone(),
    }
}

fn rating_of(item: &Value) -> f64 {
    item.get("rating").and_then(Value::as_f64).unwrap_or(0.0)
}

/// Resolve a possibly-negative slice index against a length.
fn resolve_index(arg: Option<&Value>, fallback: usize, len: usize) -> usize {
    match arg.and_then(Value::as_i64) {
        None => fallback,
        Some(i) if i < 0 => len.saturating_sub(i.unsigned_abs() as usize),
        Some(i) => (i as usize).min(len),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn shows() -> Value {
        json!([
            {"title": "A", "rating": 6.5, "views": "1.2K", "type": "TV"},
            {"title": "B", "views": "3M", "type": "Movie"},
            {"title": "C", "rating": 9.0, "views": "800", "type": "TV"}
        ])
    }

    fn titles(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let registry = FilterRegistry::with_builtins();
        let sorted = registry.apply("sortByRating", &shows(), &[]).unwrap();
        assert_eq!(titles(&sorted), ["C", "A", "B"]);
    }

    #[test]
    fn test_sort_by_views_descending() {
        let registry = FilterRegistry::with_builtins();
        let sorted = registry.apply("sortByViews", &shows(), &[]).unwrap();
        assert_eq!(titles(&sorted), ["B", "A", "C"]);
    }

    #[test]
    fn test_slice_with_bounds() {
        let registry = FilterRegistry::with_builtins();
        let input = json!([1, 2, 3, 4, 5]);

        let sliced = registry
            .apply("slice", &input, &[json!(1), json!(3)])
            .unwrap();
        assert_eq!(sliced, json!([2, 3]));

        let tail = registry.apply("slice", &input, &[json!(-2)]).unwrap();
        assert_eq!(tail, json!([4, 5]));

        let clamped = registry
            .apply("slice", &input, &[json!(0), json!(99)])
            .unwrap();
        assert_eq!(clamped, json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_get_random_items_bounds() {
        let registry = FilterRegistry::with_builtins();
        let picked = registry
            .apply("getRandomItems", &shows(), &[json!(2)])
            .unwrap();
        assert_eq!(picked.as_array().unwrap().len(), 2);

        let all = registry
            .apply("getRandomItems", &shows(), &[json!(50)])
            .unwrap();
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_filter_by_type() {
        let registry = FilterRegistry::with_builtins();
        let tv = registry
            .apply("filterByType", &shows(), &[json!("TV")])
            .unwrap();
        assert_eq!(titles(&tv), ["A", "C"]);
    }

    #[test]
    fn test_filter_by_type_without_argument_passes_through() {
        let registry = FilterRegistry::with_builtins();
        let untyped = json!([{"title": "A", "type": "TV"}, {"title": "B"}]);

        let out = registry.apply("filterByType", &untyped, &[]).unwrap();
        assert_eq!(out, untyped);
    }

    #[test]
    fn test_default_filter() {
        let registry = FilterRegistry::with_builtins();
        let fallback = [json!("fallback")];

        let kept = registry.apply("default", &json!("value"), &fallback).unwrap();
        assert_eq!(kept, json!("value"));

        for empty in [json!(null), json!(""), json!(0), json!(false)] {
            let defaulted = registry.apply("default", &empty, &fallback).unwrap();
            assert_eq!(defaulted, json!("fallback"));
        }
    }

    #[test]
    fn test_slugify_filter() {
        let registry = FilterRegistry::with_builtins();
        let slug = registry
            .apply("slugify", &json!("Attack on Titan!"), &[])
            .unwrap();
        assert_eq!(slug, json!("attack-on-titan"));

        let not_text = registry.apply("slugify", &json!(42), &[]).unwrap();
        assert_eq!(not_text, json!(""));
    }

    #[test]
    fn test_non_array_passes_through() {
        let registry = FilterRegistry::with_builtins();
        let input = json!("not an array");
        let out = registry.apply("sortByViews", &input, &[]).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_unknown_filter_errors() {
        let registry = FilterRegistry::with_builtins();
        let err = registry.apply("sortByWhatever", &json!([]), &[]);
        assert!(matches!(err, Err(SsgError::UnknownFilter(_))));
    }

    #[test]
    fn test_builtin_names_registered() {
        let registry = FilterRegistry::with_builtins();
        for name in [
            "sortByRating",
            "sortByViews",
            "slice",
            "getRandomItems",
            "filterByType",
            "default",
            "slugify",
        ] {
            assert!(registry.contains(name), "missing filter {name}");
        }
    }
}
