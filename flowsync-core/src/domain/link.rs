use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A named hyperlink attached to a question or approval post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    /// Build a link, rejecting a blank name or a blank URL.
    ///
    /// The URL is stored exactly as entered; scheme normalization only
    /// happens when the link is probed.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let url = url.into();

        if name.trim().is_empty() || url.trim().is_empty() {
            return Err(CoreError::Validation(
                "Enter both a link and a name.".to_string(),
            ));
        }

        Ok(Self { name, url })
    }
}

/// Ordered list of links being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LinkList(Vec<Link>);

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    /// Remove the link at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Link> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }
}

impl From<Vec<Link>> for LinkList {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

impl From<LinkList> for Vec<Link> {
    fn from(list: LinkList) -> Self {
        list.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_requires_name_and_url() {
        assert!(Link::new("", "x.com").is_err());
        assert!(Link::new("Site", "  ").is_err());
        let link = Link::new("Site", "x.com").unwrap();
        assert_eq!(link.url, "x.com");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = LinkList::new();
        list.push(Link::new("a", "a.com").unwrap());
        assert!(list.remove(3).is_none());
        assert_eq!(list.len(), 1);
    }
}
