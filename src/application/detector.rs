//! Clipboard change detection

use crate::domain::clipboard::{ChangeCount, ClipboardContent};

use super::ports::{ClipboardError, SystemClipboard};

/// Result of one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Generation token did not move
    Unchanged,
    /// A pending suppression was consumed; the clipboard was not inspected
    Suppressed,
    /// The clipboard was written since the last poll
    Changed(ClipboardContent),
}

impl Observation {
    /// Content of a detected change, if any
    pub fn into_content(self) -> Option<ClipboardContent> {
        match self {
            Self::Changed(content) => Some(content),
            _ => None,
        }
    }
}

/// Change detector.
///
/// Tracks the last generation token seen and a single-slot suppression flag.
/// Both live in the same value so that consuming the flag and acknowledging
/// the clipboard state happen under whatever lock guards the detector.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_seen: Option<ChangeCount>,
    suppress_next: bool,
}

impl ChangeDetector {
    /// Create a detector that has not observed the clipboard yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the clipboard's current generation without reading content.
    ///
    /// Called at startup so content already on the clipboard is not ingested.
    pub async fn prime<C>(&mut self, clipboard: &C) -> Result<ChangeCount, ClipboardError>
    where
        C: SystemClipboard + ?Sized,
    {
        let count = clipboard.change_count().await?;
        self.last_seen = Some(count);
        Ok(count)
    }

    /// Check the clipboard once.
    ///
    /// The last-seen token is updated whenever a change is reported, whether
    /// or not the caller ends up keeping the content.
    pub async fn poll<C>(&mut self, clipboard: &C) -> Result<Observation, ClipboardError>
    where
        C: SystemClipboard + ?Sized,
    {
        if self.suppress_next {
            self.suppress_next = false;
            // Acknowledge our own write so it is not picked up next tick.
            // If this fails the write is re-read once, which promotion absorbs.
            if let Ok(count) = clipboard.change_count().await {
                self.last_seen = Some(count);
            }
            return Ok(Observation::Suppressed);
        }

        let count = clipboard.change_count().await?;
        if self.last_seen == Some(count) {
            return Ok(Observation::Unchanged);
        }
        self.last_seen = Some(count);

        let content = clipboard.read().await?;
        Ok(Observation::Changed(content))
    }

    /// Ignore the next poll. Arming twice still suppresses one poll.
    pub fn arm_suppression(&mut self) {
        self.suppress_next = true;
    }

    /// Drop a pending suppression
    pub fn disarm_suppression(&mut self) {
        self.suppress_next = false;
    }

    /// Check if the next poll will be suppressed
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    /// Last generation token observed
    pub fn last_seen(&self) -> Option<ChangeCount> {
        self.last_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeClipboard;

    #[tokio::test]
    async fn first_poll_without_prime_reports_content() {
        let clipboard = FakeClipboard::with_text("hello");
        let mut detector = ChangeDetector::new();

        let obs = detector.poll(&clipboard).await.unwrap();
        assert_eq!(obs, Observation::Changed(ClipboardContent::Text("hello".into())));
    }

    #[tokio::test]
    async fn primed_detector_ignores_existing_content() {
        let clipboard = FakeClipboard::with_text("already there");
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        assert_eq!(detector.poll(&clipboard).await.unwrap(), Observation::Unchanged);
    }

    #[tokio::test]
    async fn reports_each_change_once() {
        let clipboard = FakeClipboard::new();
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        clipboard.copy_text("a");
        assert!(matches!(detector.poll(&clipboard).await.unwrap(), Observation::Changed(_)));
        assert_eq!(detector.poll(&clipboard).await.unwrap(), Observation::Unchanged);
        assert_eq!(detector.last_seen(), Some(clipboard.generation()));
    }

    #[tokio::test]
    async fn same_text_copied_again_is_a_change() {
        let clipboard = FakeClipboard::new();
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        clipboard.copy_text("a");
        detector.poll(&clipboard).await.unwrap();
        clipboard.copy_text("a");
        assert!(matches!(detector.poll(&clipboard).await.unwrap(), Observation::Changed(_)));
    }

    #[tokio::test]
    async fn suppression_consumes_flag_and_acknowledges_write() {
        let clipboard = FakeClipboard::new();
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        detector.arm_suppression();
        clipboard.copy_text("ours");

        assert_eq!(detector.poll(&clipboard).await.unwrap(), Observation::Suppressed);
        assert!(!detector.is_suppressing());
        assert_eq!(detector.poll(&clipboard).await.unwrap(), Observation::Unchanged);
    }

    #[tokio::test]
    async fn suppression_is_single_slot() {
        let clipboard = FakeClipboard::new();
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        detector.arm_suppression();
        detector.arm_suppression();
        assert_eq!(detector.poll(&clipboard).await.unwrap(), Observation::Suppressed);

        clipboard.copy_text("external");
        assert!(matches!(detector.poll(&clipboard).await.unwrap(), Observation::Changed(_)));
    }

    #[tokio::test]
    async fn disarm_clears_pending_suppression() {
        let clipboard = FakeClipboard::new();
        let mut detector = ChangeDetector::new();
        detector.prime(&clipboard).await.unwrap();

        detector.arm_suppression();
        detector.disarm_suppression();
        clipboard.copy_text("x");
        assert!(matches!(detector.poll(&clipboard).await.unwrap(), Observation::Changed(_)));
    }

    #[test]
    fn into_content() {
        assert!(Observation::Unchanged.into_content().is_none());
        assert!(Observation::Suppressed.into_content().is_none());
        assert_eq!(
            Observation::Changed(ClipboardContent::Empty).into_content(),
            Some(ClipboardContent::Empty)
        );
    }
}
