//! Process-wide memo for argument-deterministic placeholder work
//!
//! Holds two tables: rendered outputs keyed by `(placeholder, level,
//! argument)` and argument splits keyed by the raw argument. Both are dropped
//! wholesale by [`invalidate`] whenever any placeholder registry changes.

use super::log_level::LogLevel;
use super::placeholder::split_arguments;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

type OutputTable = HashMap<(&'static str, LogLevel), HashMap<String, String>>;
type SplitTable = HashMap<String, Arc<[String]>>;

#[derive(Default)]
struct PlaceholderCache {
    outputs: RwLock<OutputTable>,
    splits: RwLock<SplitTable>,
}

impl PlaceholderCache {
    fn memoize_output<F>(
        &self,
        placeholder: &'static str,
        level: LogLevel,
        argument: &str,
        compute: F,
    ) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(hit) = self.cached_output(placeholder, level, argument) {
            return hit;
        }

        let value = compute();
        self.outputs
            .write()
            .entry((placeholder, level))
            .or_default()
            .insert(argument.to_string(), value.clone());
        value
    }

    fn cached_output(
        &self,
        placeholder: &'static str,
        level: LogLevel,
        argument: &str,
    ) -> Option<String> {
        self.outputs
            .read()
            .get(&(placeholder, level))
            .and_then(|by_argument| by_argument.get(argument))
            .cloned()
    }

    fn split_cached(&self, argument: &str) -> Arc<[String]> {
        if let Some(hit) = self.splits.read().get(argument) {
            return Arc::clone(hit);
        }

        let fields: Arc<[String]> = split_arguments(argument).into();
        self.splits
            .write()
            .insert(argument.to_string(), Arc::clone(&fields));
        fields
    }

    fn invalidate(&self) {
        self.outputs.write().clear();
        self.splits.write().clear();
    }
}

static CACHE: LazyLock<PlaceholderCache> = LazyLock::new(PlaceholderCache::default);

/// Return the memoized output of `placeholder` for `(level, argument)`,
/// computing and storing it on a miss.
pub fn memoize_output<F>(
    placeholder: &'static str,
    level: LogLevel,
    argument: &str,
    compute: F,
) -> String
where
    F: FnOnce() -> String,
{
    CACHE.memoize_output(placeholder, level, argument, compute)
}

/// [`split_arguments`] with memoization.
pub fn split_cached(argument: &str) -> Arc<[String]> {
    CACHE.split_cached(argument)
}

/// Drop every memoized entry.
pub fn invalidate() {
    CACHE.invalidate();
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "cache_test";

    #[test]
    fn test_memoize_computes_once() {
        let cache = PlaceholderCache::default();
        let mut calls = 0;

        let first = cache.memoize_output(NAME, LogLevel::Trace, "memo-once", || {
            calls += 1;
            "value".to_string()
        });
        let second = cache.memoize_output(NAME, LogLevel::Trace, "memo-once", || {
            calls += 1;
            "recomputed".to_string()
        });

        assert_eq!(first, "value");
        assert_eq!(second, "value");
        assert_eq!(calls, 1);
        assert_eq!(
            cache.cached_output(NAME, LogLevel::Trace, "memo-once").as_deref(),
            Some("value")
        );
    }

    #[test]
    fn test_memoize_keys_by_level_and_argument() {
        let cache = PlaceholderCache::default();
        cache.memoize_output(NAME, LogLevel::Info, "a", || "info-a".to_string());
        cache.memoize_output(NAME, LogLevel::Debug, "a", || "debug-a".to_string());
        cache.memoize_output(NAME, LogLevel::Info, "b", || "info-b".to_string());

        assert_eq!(
            cache.cached_output(NAME, LogLevel::Info, "a").as_deref(),
            Some("info-a")
        );
        assert_eq!(
            cache.cached_output(NAME, LogLevel::Debug, "a").as_deref(),
            Some("debug-a")
        );
        assert_eq!(
            cache.cached_output(NAME, LogLevel::Info, "b").as_deref(),
            Some("info-b")
        );
        assert!(cache.cached_output("other", LogLevel::Info, "a").is_none());
    }

    #[test]
    fn test_split_cached_shares_fields() {
        let cache = PlaceholderCache::default();
        let first = cache.split_cached(r"[%s]\::left");
        let second = cache.split_cached(r"[%s]\::left");

        assert_eq!(&*first, &["[%s]:".to_string(), "left".to_string()]);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_clears() {
        let cache = PlaceholderCache::default();
        cache.memoize_output(NAME, LogLevel::Fatal, "to-clear", || "x".to_string());
        let before = cache.split_cached("a:b");

        cache.invalidate();

        assert!(cache.cached_output(NAME, LogLevel::Fatal, "to-clear").is_none());
        assert!(!Arc::ptr_eq(&before, &cache.split_cached("a:b")));
    }

    #[test]
    fn test_global_functions_use_shared_cache() {
        let fields = split_cached("x\\:y:z");
        assert_eq!(&*fields, &["x:y".to_string(), "z".to_string()]);
        assert_eq!(
            memoize_output(NAME, LogLevel::Error, "global", || "g".to_string()),
            "g"
        );
    }
}
