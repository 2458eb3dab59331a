//! Link-list editor
//!
//! Backs the "attach links" section of question and approval forms: two text
//! inputs, an add action guarded by a reachability probe, and removal by
//! position.

use crate::error::LinkError;
use crate::notify::{Notification, NotificationSink};
use flowsync_core::{Link, LinkList};
use flowsync_sdk::ReachabilityProbe;
use std::sync::Arc;
use tracing::debug;

pub struct LinkEditor {
    links: LinkList,
    name: String,
    url: String,
    checking: bool,
    probe: Arc<dyn ReachabilityProbe>,
    sink: Arc<dyn NotificationSink>,
}

impl LinkEditor {
    pub fn new(probe: Arc<dyn ReachabilityProbe>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            links: LinkList::new(),
            name: String::new(),
            url: String::new(),
            checking: false,
            probe,
            sink,
        }
    }

    /// Start from links that are already attached.
    pub fn with_links(mut self, links: LinkList) -> Self {
        self.links = links;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn links(&self) -> &LinkList {
        &self.links
    }

    pub fn into_links(self) -> LinkList {
        self.links
    }

    /// True while the probe for a pending add is running.
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// Append the link described by the two inputs.
    ///
    /// Both inputs must be filled in and the URL must pass the probe. On
    /// success the URL is stored exactly as typed and both inputs are
    /// cleared; on failure the list and inputs are left untouched and the
    /// sink is told why.
    pub async fn add(&mut self) -> Result<(), LinkError> {
        let link = match Link::new(self.name.as_str(), self.url.as_str()) {
            Ok(link) => link,
            Err(_) => return self.reject(LinkError::MissingInput),
        };

        self.checking = true;
        let exists = self.probe.exists(&link.url).await;
        self.checking = false;

        if !exists {
            return self.reject(LinkError::Unreachable);
        }

        debug!(name = %link.name, url = %link.url, "link added");
        self.links.push(link);
        self.name.clear();
        self.url.clear();
        Ok(())
    }

    /// Remove the link at `index`; out-of-range indices change nothing.
    pub fn remove(&mut self, index: usize) -> Option<Link> {
        self.links.remove(index)
    }

    fn reject(&self, error: LinkError) -> Result<(), LinkError> {
        self.sink.show(Notification::error(error.to_string()));
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use async_trait::async_trait;
    use flowsync_sdk::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProbe {
        verdict: bool,
        calls: AtomicUsize,
    }

    impl FixedProbe {
        fn new(verdict: bool) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReachabilityProbe for FixedProbe {
        async fn exists(&self, _url: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    #[tokio::test]
    async fn test_missing_name_is_rejected_without_probing() {
        let probe = FixedProbe::new(true);
        let sink = Arc::new(RecordingSink::new());
        let mut editor = LinkEditor::new(probe.clone(), sink.clone());
        editor.set_url("x.com");

        let err = editor.add().await.unwrap_err();

        assert_eq!(err, LinkError::MissingInput);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(editor.links().is_empty());
        assert_eq!(editor.url(), "x.com");
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            sink.last().map(|n| n.description),
            Some("Enter both a link and a name.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_url_is_rejected() {
        let sink = Arc::new(RecordingSink::new());
        let mut editor = LinkEditor::new(FixedProbe::new(false), sink.clone());
        editor.set_name("Docs");
        editor.set_url("nowhere.invalid");

        let err = tokio_test::assert_err!(editor.add().await);

        assert_eq!(err.kind(), ErrorKind::UnreachableResource);
        assert!(editor.links().is_empty());
        assert_eq!(editor.name(), "Docs");
        assert!(!editor.is_checking());
        assert_eq!(
            sink.last().and_then(|n| n.error),
            Some("URL does not exist.".to_string())
        );
    }

    #[tokio::test]
    async fn test_reachable_link_is_appended_verbatim() {
        let sink = Arc::new(RecordingSink::new());
        let mut editor = LinkEditor::new(FixedProbe::new(true), sink.clone());
        editor.set_name("Site");
        editor.set_url("x.com");

        tokio_test::assert_ok!(editor.add().await);

        assert_eq!(editor.links().as_slice(), &[Link::new("Site", "x.com").unwrap()]);
        assert_eq!(editor.name(), "");
        assert_eq!(editor.url(), "");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_remove_by_index() {
        let links: LinkList = vec![
            Link::new("A", "a.com").unwrap(),
            Link::new("B", "b.com").unwrap(),
        ]
        .into();
        let mut editor = LinkEditor::new(FixedProbe::new(true), Arc::new(RecordingSink::new()))
            .with_links(links);

        assert_eq!(editor.remove(0).map(|l| l.name), Some("A".to_string()));
        assert_eq!(editor.remove(5), None);
        assert_eq!(editor.into_links().as_slice(), &[Link::new("B", "b.com").unwrap()]);
    }
}
