//! In-memory wardrobe of classified clothing items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub added_at: DateTime<Utc>,
}

impl WardrobeItem {
    pub fn new(name: String, image_url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            image_url,
            added_at: Utc::now(),
        }
    }
}

/// Items in display order, newest first. Nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wardrobe {
    items: Vec<WardrobeItem>,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts a new item at the front and returns it.
    pub fn add(&mut self, name: String, image_url: String) -> &WardrobeItem {
        self.items.insert(0, WardrobeItem::new(name, image_url));
        &self.items[0]
    }

    pub fn items(&self) -> &[WardrobeItem] {
        &self.items
    }

    /// Item names in display order.
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    pub fn find(&self, id: &str) -> Option<&WardrobeItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<WardrobeItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Local reference to a photo: a percent-encoded `file://` URL when the path
/// can be canonicalized, otherwise the path as given.
pub fn local_image_url(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .and_then(|absolute| Url::from_file_path(absolute).ok())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_puts_newest_first() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add("blue denim jacket".to_string(), "a.jpg".to_string());
        wardrobe.add("black leather boots".to_string(), "b.jpg".to_string());

        assert_eq!(
            wardrobe.names(),
            vec!["black leather boots".to_string(), "blue denim jacket".to_string()]
        );
        assert_eq!(wardrobe.len(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut wardrobe = Wardrobe::new();
        let first = wardrobe.add("shirt".to_string(), "a.jpg".to_string()).id.clone();
        let second = wardrobe.add("shirt".to_string(), "a.jpg".to_string()).id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut wardrobe = Wardrobe::new();
        let id = wardrobe.add("scarf".to_string(), "s.jpg".to_string()).id.clone();
        wardrobe.add("hat".to_string(), "h.jpg".to_string());

        assert!(wardrobe.find(&id).is_some());
        let removed = wardrobe.remove(&id).unwrap();
        assert_eq!(removed.name, "scarf");
        assert!(wardrobe.remove(&id).is_none());

        wardrobe.clear();
        assert!(wardrobe.is_empty());
    }

    #[test]
    fn test_local_image_url() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(local_image_url(file.path()).starts_with("file://"));
        assert_eq!(
            local_image_url(Path::new("does/not/exist.jpg")),
            "does/not/exist.jpg"
        );
    }

    #[test]
    fn test_local_image_url_escapes_reserved_characters() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("my photo #1.jpg");
        std::fs::write(&photo, [0xFF, 0xD8, 0xFF]).unwrap();

        let url = Url::parse(&local_image_url(&photo)).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.fragment().is_none());
        assert!(url.path().ends_with("/my%20photo%20%231.jpg"));
        assert_eq!(url.to_file_path().unwrap(), photo.canonicalize().unwrap());
    }
}
