//! Concurrency-safe accumulation of distinct email addresses.
//!
//! One [`EmailSet`] lives for the duration of a crawl session. Every page
//! worker funnels its candidates through [`EmailSet::try_insert`], and the
//! caller reads a snapshot once all workers have finished.

use parking_lot::Mutex;

use crate::validate::is_valid_email;

/// An insertion-ordered set of distinct, valid email addresses.
///
/// The backing sequence is guarded by a single mutex; the only mutation is
/// the atomic check-then-append inside [`try_insert`](Self::try_insert), so
/// no two concurrent producers can commit the same address twice.
///
/// Deduplication is a case-sensitive exact match: `Foo@Bar.com` and
/// `foo@bar.com` are distinct entries. Elements are never removed.
///
/// # Example
///
/// ```rust
/// use mailsift_core::EmailSet;
///
/// let set = EmailSet::new();
/// assert!(set.try_insert("user@example.com"));
/// assert!(!set.try_insert("user@example.com")); // duplicate
/// assert!(!set.try_insert("not-an-email"));     // invalid
/// assert_eq!(set.snapshot(), vec!["user@example.com".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct EmailSet {
    inner: Mutex<Vec<String>>,
}

impl EmailSet {
    /// Creates an empty set for a new crawl session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `candidate` and appends it if not already present.
    ///
    /// Returns `true` only when the candidate passed validation and was newly
    /// appended. Invalid and duplicate candidates return `false` without
    /// mutating the set; neither is an error. The lock is held only for the
    /// duplicate scan and append, never across I/O.
    pub fn try_insert(&self, candidate: &str) -> bool {
        if !is_valid_email(candidate) {
            return false;
        }

        let mut emails = self.inner.lock();

        if emails.iter().any(|existing| existing == candidate) {
            return false;
        }

        emails.push(candidate.to_string());

        true
    }

    /// Returns a copy of every address collected so far, in discovery order.
    ///
    /// Callers must wait for all producers to finish before treating the
    /// snapshot as the final result; the set itself provides no completion
    /// signal.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().clone()
    }

    /// Number of distinct addresses collected so far.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no address has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
