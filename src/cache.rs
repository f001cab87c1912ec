use crate::ast::{Evaluator, EvaluatorBuilder, EvaluatorOptions};
use crate::error::Result;
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: usize = 128;

type CacheKey = (String, EvaluatorOptions);

/// Bounded cache of compiled evaluators keyed by source text and options.
///
/// Compilation errors are not cached; a failing source is revalidated on
/// every request.
pub struct ExpressionCache {
    entries: Mutex<LruCache<CacheKey, Arc<Evaluator>>>,
}

impl ExpressionCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get_or_compile(&self, source: &str, options: EvaluatorOptions) -> Result<Arc<Evaluator>> {
        let key = (source.to_string(), options);
        if let Some(evaluator) = self.lock().get(&key) {
            debug!("Expression cache hit: {}", source);
            return Ok(Arc::clone(evaluator));
        }

        // Compile outside the lock; a concurrent miss on the same key just
        // overwrites with an equivalent evaluator.
        debug!("Expression cache miss: {}", source);
        let evaluator = Arc::new(EvaluatorBuilder::new(source).options(options).build()?);
        self.lock().put(key, Arc::clone(&evaluator));
        Ok(evaluator)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, Arc<Evaluator>>> {
        // Entries stay consistent even if a holder panicked.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Bindings, CharacterSet, ResolutionPolicy, Value};
    use crate::error::EvalError;

    #[test]
    fn test_reuses_compiled_evaluator() {
        let cache = ExpressionCache::new(4);
        let first = cache
            .get_or_compile("t + 1", EvaluatorOptions::default())
            .unwrap();
        let second = cache
            .get_or_compile("t + 1", EvaluatorOptions::default())
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_options_are_part_of_the_key() {
        let cache = ExpressionCache::new(4);
        let open = cache
            .get_or_compile("sqrt(4)", EvaluatorOptions::default())
            .unwrap();
        let closed = cache
            .get_or_compile(
                "sqrt(4)",
                EvaluatorOptions {
                    policy: ResolutionPolicy::VariablesOnly,
                    character_set: CharacterSet::Standard,
                },
            )
            .unwrap();
        assert!(!Arc::ptr_eq(&open, &closed));
        assert_eq!(open.evaluate(&Bindings::new()).unwrap(), Value::Float(2.0));
        assert_eq!(
            closed.evaluate(&Bindings::new()),
            Err(EvalError::NameNotFound("sqrt".to_string()))
        );
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = ExpressionCache::new(2);
        let options = EvaluatorOptions::default();
        let a = cache.get_or_compile("1", options).unwrap();
        cache.get_or_compile("2", options).unwrap();
        cache.get_or_compile("1", options).unwrap();
        cache.get_or_compile("3", options).unwrap();
        assert_eq!(cache.len(), 2);

        let a_again = cache.get_or_compile("1", options).unwrap();
        assert!(Arc::ptr_eq(&a, &a_again));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = ExpressionCache::new(2);
        assert!(matches!(
            cache.get_or_compile("t %", EvaluatorOptions::default()),
            Err(EvalError::InvalidCharacter { character: '%', .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let cache = ExpressionCache::new(0);
        cache
            .get_or_compile("1", EvaluatorOptions::default())
            .unwrap();
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
