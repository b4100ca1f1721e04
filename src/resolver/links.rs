//! Ordered identifier -> URL map built once per page.

use std::collections::HashMap;

/// Image identifier and direct URL pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Stable identifier; also the on-disk file stem.
    pub id: String,
    /// Direct image URL.
    pub url: String,
}

impl ResolvedImage {
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Insertion-ordered map of resolved images.
///
/// Inserting an identifier that is already present replaces its URL and keeps
/// the slot of the first insertion, so iteration order is the order in which
/// identifiers were first seen and each identifier appears once.
#[derive(Debug, Clone, Default)]
pub struct ResolvedLinks {
    entries: Vec<ResolvedImage>,
    index: HashMap<String, usize>,
}

impl ResolvedLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `image`. Returns the URL it replaced, if any.
    pub fn insert(&mut self, image: ResolvedImage) -> Option<String> {
        if let Some(&slot) = self.index.get(&image.id) {
            let previous = std::mem::replace(&mut self.entries[slot].url, image.url);
            return Some(previous);
        }
        self.index.insert(image.id.clone(), self.entries.len());
        self.entries.push(image);
        None
    }

    #[cfg(test)]
    fn get(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&slot| self.entries[slot].url.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedImage> {
        self.entries.iter()
    }
}

impl Extend<ResolvedImage> for ResolvedLinks {
    fn extend<I: IntoIterator<Item = ResolvedImage>>(&mut self, iter: I) {
        for image in iter {
            self.insert(image);
        }
    }
}

impl IntoIterator for ResolvedLinks {
    type Item = ResolvedImage;
    type IntoIter = std::vec::IntoIter<ResolvedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut links = ResolvedLinks::new();
        links.insert(ResolvedImage::new("b", "https://x/b.jpg"));
        links.insert(ResolvedImage::new("a", "https://x/a.jpg"));
        links.insert(ResolvedImage::new("c", "https://x/c.jpg"));
        let ids: Vec<_> = links.iter().map(|image| image.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_id_last_write_wins_in_first_slot() {
        let mut links = ResolvedLinks::new();
        links.insert(ResolvedImage::new("a", "https://x/first.jpg"));
        links.insert(ResolvedImage::new("b", "https://x/b.jpg"));
        let replaced = links.insert(ResolvedImage::new("a", "https://x/second.jpg"));

        assert_eq!(replaced.as_deref(), Some("https://x/first.jpg"));
        assert_eq!(links.len(), 2);
        assert_eq!(links.get("a"), Some("https://x/second.jpg"));
        let ids: Vec<_> = links.iter().map(|image| image.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_extend_applies_overwrite_semantics() {
        let mut links = ResolvedLinks::new();
        links.extend([
            ResolvedImage::new("x", "1"),
            ResolvedImage::new("x", "2"),
            ResolvedImage::new("y", "3"),
        ]);
        let collected: Vec<_> = links.into_iter().collect();
        assert_eq!(
            collected,
            vec![ResolvedImage::new("x", "2"), ResolvedImage::new("y", "3")]
        );
    }
}
