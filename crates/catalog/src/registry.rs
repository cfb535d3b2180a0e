//! Process-wide record of consumed redemption codes.

use std::sync::{Mutex, OnceLock, PoisonError};

static GLOBAL: OnceLock<CodeRegistry> = OnceLock::new();

/// Registry of redemption codes that have been issued to virtual products.
///
/// The list is append-only and deliberately unvalidated: every recorded code
/// is kept in insertion order, duplicates and empty strings included. The
/// interesting contract lives at the call sites — constructing a virtual
/// product (or re-assigning its code) always records the code here.
///
/// Components take `&CodeRegistry` explicitly so tests can use fresh local
/// instances; [`CodeRegistry::global`] provides the one-per-process instance
/// for the program entry point.
#[derive(Debug, Default)]
pub struct CodeRegistry {
    used: Mutex<Vec<String>>,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry instance.
    ///
    /// Lazily created on first access; concurrent first callers all observe
    /// the same instance (no duplicate ever escapes).
    pub fn global() -> &'static CodeRegistry {
        GLOBAL.get_or_init(CodeRegistry::new)
    }

    /// Record `code` as used. Unconditional: no dedup, no validation.
    ///
    /// A poisoned lock does not lose the record; the side effect must happen
    /// even if another holder panicked.
    pub fn use_code(&self, code: &str) {
        let mut used = self.used.lock().unwrap_or_else(PoisonError::into_inner);
        used.push(code.to_owned());
        tracing::debug!(code, total = used.len(), "redemption code recorded");
    }

    /// Whether `code` appears anywhere in the recorded list.
    ///
    /// Empty registry or absent code returns `false`.
    pub fn is_code_used(&self, code: &str) -> bool {
        self.used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|used| used == code)
    }

    /// Snapshot of the recorded codes, in insertion order.
    pub fn used_codes(&self) -> Vec<String> {
        self.used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
