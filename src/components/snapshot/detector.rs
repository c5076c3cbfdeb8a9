use crate::components::events_feed::EventsDocument;

/// Holds the last accepted events document and decides whether a new one needs rendering
#[derive(Debug, Default, Clone)]
pub struct ChangeDetector {
    last_seen: Option<EventsDocument>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a freshly fetched document.
    ///
    /// Returns the accepted document when it differs from the snapshot, in which
    /// case it replaces the snapshot. A missing document (failed fetch) or one
    /// equal to the snapshot returns `None` and leaves the snapshot untouched.
    pub fn observe(&mut self, fetched: Option<EventsDocument>) -> Option<&EventsDocument> {
        let fetched = fetched?;
        if self.last_seen.as_ref() == Some(&fetched) {
            return None;
        }
        self.last_seen = Some(fetched);
        self.last_seen.as_ref()
    }

    pub fn last_seen(&self) -> Option<&EventsDocument> {
        self.last_seen.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::events_feed::Event;

    fn document(titles: &[&str]) -> EventsDocument {
        EventsDocument {
            events: titles
                .iter()
                .map(|title| Event {
                    title: title.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn first_document_is_accepted() {
        let mut detector = ChangeDetector::new();
        assert!(detector.last_seen().is_none());

        let accepted = detector.observe(Some(document(&["A"]))).cloned();
        assert_eq!(accepted, Some(document(&["A"])));
        assert_eq!(detector.last_seen(), Some(&document(&["A"])));
    }

    #[test]
    fn same_document_twice_triggers_once() {
        let mut detector = ChangeDetector::new();
        assert!(detector.observe(Some(document(&["A", "B"]))).is_some());
        assert!(detector.observe(Some(document(&["A", "B"]))).is_none());
    }

    #[test]
    fn failed_fetch_keeps_snapshot() {
        let mut detector = ChangeDetector::new();
        assert!(detector.observe(None).is_none());
        assert!(detector.last_seen().is_none());

        detector.observe(Some(document(&["A"])));
        assert!(detector.observe(None).is_none());
        assert_eq!(detector.last_seen(), Some(&document(&["A"])));
    }

    #[test]
    fn changed_document_replaces_snapshot() {
        let mut detector = ChangeDetector::new();
        detector.observe(Some(document(&["A"])));

        assert!(detector.observe(Some(document(&["A", "B"]))).is_some());
        assert_eq!(detector.last_seen(), Some(&document(&["A", "B"])));

        // Reverting to the earlier content is a change as well
        assert!(detector.observe(Some(document(&["A"]))).is_some());
    }
}
