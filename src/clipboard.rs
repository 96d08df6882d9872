//! Clipboard copy of model identifiers with transient acknowledgements.
//!
//! Copying a model id flips a per-model "copied" flag that auto-clears
//! after a fixed delay, so a UI can swap "Copy ID" for "Copied" and back.
//! Flags are keyed by [`ModelId`] and fully independent of each other.

use crate::error::Result;
use crate::model::ModelId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Default time a "copied" acknowledgement stays visible.
pub const DEFAULT_COPIED_TTL: Duration = Duration::from_millis(5000);

/// Destination for copied text.
///
/// The watcher only ever writes; reading the clipboard is out of scope.
pub trait Clipboard: Send + Sync {
    /// Place the given text on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or rejects the
    /// write.
    fn set_text(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        // arboard handles are not Sync; open one per write.
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|e| crate::error::VigilError::Clipboard(e.to_string()))
    }
}

/// Per-model "copied" flags with automatic expiry.
///
/// Each successful copy arms its own clear timer; copying model A never
/// touches model B's flag, and re-copying the same model restarts that
/// model's clock (a stale clear from an earlier copy is ignored).
pub struct CopyAcknowledgements {
    clipboard: Arc<dyn Clipboard>,
    ttl: Duration,
    // ModelId -> generation of the copy that set the live flag.
    flags: Arc<Mutex<HashMap<ModelId, u64>>>,
    generation: AtomicU64,
}

impl CopyAcknowledgements {
    /// Create a store writing to the given clipboard.
    #[must_use]
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            clipboard,
            ttl: DEFAULT_COPIED_TTL,
            flags: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Set how long acknowledgements stay visible.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Copy a model id to the clipboard.
    ///
    /// On success the model's flag is set and scheduled to clear after the
    /// TTL; returns `true`. On failure nothing is flagged, the error is
    /// logged, and `false` is returned; clipboard trouble is never
    /// surfaced to the user as an error.
    ///
    /// Must be called from within a tokio runtime.
    pub fn copy_model_id(&self, model_id: ModelId) -> bool {
        if let Err(err) = self.clipboard.set_text(&model_id.to_string()) {
            warn!(model_id = %model_id, error = %err, "failed to copy model id");
            return false;
        }

        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        self.flags.lock().insert(model_id, generation);

        let flags = Arc::clone(&self.flags);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut flags = flags.lock();
            // A newer copy of the same id owns the flag now; leave it.
            if flags.get(&model_id) == Some(&generation) {
                flags.remove(&model_id);
            }
        });

        true
    }

    /// Whether the model's acknowledgement is currently visible.
    #[must_use]
    pub fn is_copied(&self, model_id: ModelId) -> bool {
        self.flags.lock().contains_key(&model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VigilError;

    /// In-memory clipboard for tests.
    #[derive(Default)]
    struct FakeClipboard {
        contents: Mutex<Option<String>>,
        fail: bool,
    }

    impl FakeClipboard {
        fn failing() -> Self {
            Self {
                contents: Mutex::new(None),
                fail: true,
            }
        }
    }

    impl Clipboard for FakeClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(VigilError::Clipboard("no clipboard backend".to_string()));
            }
            *self.contents.lock() = Some(text.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_flag_and_clipboard() {
        let clipboard = Arc::new(FakeClipboard::default());
        let acks = CopyAcknowledgements::new(Arc::clone(&clipboard) as Arc<dyn Clipboard>);

        assert!(acks.copy_model_id(ModelId::new(42)));
        assert!(acks.is_copied(ModelId::new(42)));
        assert_eq!(clipboard.contents.lock().as_deref(), Some("42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flag_clears_after_ttl() {
        let clipboard = Arc::new(FakeClipboard::default());
        let acks = CopyAcknowledgements::new(clipboard);

        acks.copy_model_id(ModelId::new(1));
        assert!(acks.is_copied(ModelId::new(1)));

        tokio::time::sleep(DEFAULT_COPIED_TTL + Duration::from_millis(50)).await;
        assert!(!acks.is_copied(ModelId::new(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flags_are_independent_per_model() {
        let clipboard = Arc::new(FakeClipboard::default());
        let acks = CopyAcknowledgements::new(clipboard);

        acks.copy_model_id(ModelId::new(1));
        tokio::time::sleep(Duration::from_millis(3000)).await;
        acks.copy_model_id(ModelId::new(2));

        // Model 1's clock expires first; model 2 is untouched.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(!acks.is_copied(ModelId::new(1)));
        assert!(acks.is_copied(ModelId::new(2)));

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(!acks.is_copied(ModelId::new(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_restarts_the_clock() {
        let clipboard = Arc::new(FakeClipboard::default());
        let acks = CopyAcknowledgements::new(clipboard);

        acks.copy_model_id(ModelId::new(7));
        tokio::time::sleep(Duration::from_millis(4000)).await;

        // Re-copy at t=4s; the first copy's clear at t=5s must not wipe it.
        acks.copy_model_id(ModelId::new(7));
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(acks.is_copied(ModelId::new(7)));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(!acks.is_copied(ModelId::new(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_sets_no_flag() {
        let clipboard = Arc::new(FakeClipboard::failing());
        let acks = CopyAcknowledgements::new(clipboard);

        assert!(!acks.copy_model_id(ModelId::new(9)));
        assert!(!acks.is_copied(ModelId::new(9)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ttl() {
        let clipboard = Arc::new(FakeClipboard::default());
        let acks = CopyAcknowledgements::new(clipboard).with_ttl(Duration::from_millis(100));

        acks.copy_model_id(ModelId::new(3));
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!acks.is_copied(ModelId::new(3)));
    }
}
