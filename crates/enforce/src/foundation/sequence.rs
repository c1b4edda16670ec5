//! Lazy, pull-based sequences
//!
//! A [`Sequence`] is the runtime shape of a lazy argument. Validators that
//! understand lazy values observe elements as the function body pulls them
//! by attaching a [`SequenceCheck`]; a failing check surfaces as an `Err`
//! item, after which the sequence is exhausted.

use super::error::EnforceError;
use super::value::Value;
use std::fmt;

/// The item type of every lazy sequence.
pub type SequenceItem = Result<Value, EnforceError>;

// ============================================================================
// SEQUENCE
// ============================================================================

/// A single-consumer, pull-based source of values.
///
/// Yields `Ok` elements until the source ends or an error is produced.
/// After the first `Err` the sequence is fused and only returns `None`.
pub struct Sequence {
    inner: Box<dyn Iterator<Item = SequenceItem> + Send>,
    failed: bool,
}

impl Sequence {
    /// Wraps an iterator of plain values.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Into<Value>,
    {
        Self::from_results(iter.into_iter().map(|item| Ok(item.into())))
    }

    /// Wraps an iterator whose elements may already carry errors.
    pub fn from_results<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = SequenceItem>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(iter.into_iter()),
            failed: false,
        }
    }

    /// Attaches a stateful check that sees every element as it is pulled.
    ///
    /// The check's [`finish`](SequenceCheck::finish) runs once, when the
    /// source reports its end.
    pub fn checked<C>(self, check: C) -> Self
    where
        C: SequenceCheck,
    {
        Self::from_results(Checked {
            source: self,
            check,
            finished: false,
        })
    }

    /// Pulls every element into a vector, stopping at the first error.
    ///
    /// Never returns for an unbounded source.
    pub fn drain(self) -> Result<Vec<Value>, EnforceError> {
        self.collect()
    }
}

impl Iterator for Sequence {
    type Item = SequenceItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.inner.next();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.inner.size_hint()
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Per-sequence validation state driven by pulls.
///
/// A fresh check is created for every wrapped sequence, so implementations
/// may accumulate state freely.
pub trait SequenceCheck: Send + 'static {
    /// Inspects an element before it is handed to the consumer.
    fn observe(&mut self, value: &Value) -> Result<(), EnforceError>;

    /// Runs once the source is exhausted, for rules only decidable at the end.
    fn finish(&mut self) -> Result<(), EnforceError> {
        Ok(())
    }
}

struct Checked<C> {
    source: Sequence,
    check: C,
    finished: bool,
}

impl<C: SequenceCheck> Iterator for Checked<C> {
    type Item = SequenceItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.source.next() {
            Some(Ok(value)) => Some(self.check.observe(&value).map(|()| value)),
            Some(Err(error)) => Some(Err(error)),
            None => {
                self.finished = true;
                self.check.finish().err().map(Err)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidationError, ValidationTarget};

    struct RejectNegative {
        target: ValidationTarget,
    }

    impl SequenceCheck for RejectNegative {
        fn observe(&mut self, value: &Value) -> Result<(), EnforceError> {
            match value.as_int() {
                Some(n) if n < 0 => {
                    Err(ValidationError::new("negative", "negative value", &self.target).into())
                }
                _ => Ok(()),
            }
        }
    }

    fn reject_negative() -> RejectNegative {
        RejectNegative {
            target: ValidationTarget::new("f", "items"),
        }
    }

    #[test]
    fn test_new_yields_values_in_order() {
        let values: Vec<_> = Sequence::new(vec![1, 2, 3])
            .map(|item| item.unwrap().as_int().unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_fuses_after_error() {
        let mut sequence = Sequence::new(vec![1, -1, 2]).checked(reject_negative());
        assert!(matches!(sequence.next(), Some(Ok(_))));
        assert!(matches!(sequence.next(), Some(Err(_))));
        assert!(sequence.next().is_none());
        assert!(sequence.next().is_none());
    }

    #[test]
    fn test_drain_stops_at_first_error() {
        let err = Sequence::new(vec![1, -2, 3])
            .checked(reject_negative())
            .drain()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_drain_materializes_everything() {
        let items = Sequence::new(0..5).drain().unwrap();
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn test_finish_reported_at_end() {
        struct FailAtEnd;
        impl SequenceCheck for FailAtEnd {
            fn observe(&mut self, _: &Value) -> Result<(), EnforceError> {
                Ok(())
            }
            fn finish(&mut self) -> Result<(), EnforceError> {
                let target = ValidationTarget::new("f", "items");
                Err(ValidationError::new("end", "failed at end", &target).into())
            }
        }

        let results: Vec<_> = Sequence::new(vec![1, 2]).checked(FailAtEnd).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_pulls_are_lazy() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulled);
        let source = (0..).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut sequence = Sequence::new(source).checked(reject_negative());
        for _ in 0..10 {
            sequence.next();
        }
        assert_eq!(pulled.load(Ordering::SeqCst), 10);
    }
}
