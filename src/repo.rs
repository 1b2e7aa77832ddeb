//! Repository Module
//!
//! In-memory content store for documents, images, and site configuration.
//! Stands in for the document database behind the read routes the cache
//! wraps and the write routes the invalidation helpers follow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::cache::current_timestamp_ms;

// == Repository Errors ==
/// Typed failures from the persistence layer, reclassified at the HTTP
/// boundary by the error normalizer.
#[derive(Error, Debug)]
pub enum RepoError {
    /// Uniqueness constraint violated
    #[error("duplicate value '{value}' for field '{field}'")]
    Duplicate { field: String, value: String },

    /// Entity does not exist
    #[error("{0} not found")]
    NotFound(String),
}

// == Domain Records ==
/// A knowledge-base document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: String,
    pub body: String,
    /// Last modification (Unix milliseconds)
    pub updated_at: u64,
}

/// Uploaded image metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub url: String,
    pub size_bytes: u64,
}

// == Repository ==
/// In-memory document and image tables with title/name uniqueness.
#[derive(Debug, Default)]
pub struct Repository {
    documents: HashMap<String, Document>,
    images: HashMap<String, Image>,
    next_id: u64,
}

/// Page size for document listings.
pub const PAGE_SIZE: usize = 20;

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    // == Documents ==
    /// Lists documents, newest first, optionally filtered by category,
    /// paginated with 1-based page numbers.
    pub fn list_documents(&self, category: Option<&str>, page: usize) -> Vec<Document> {
        let mut docs: Vec<Document> = self
            .documents
            .values()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));

        let page = page.max(1);
        docs.into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.documents.get(id).cloned()
    }

    /// Inserts a document; titles are unique.
    pub fn insert_document(
        &mut self,
        title: String,
        category: String,
        body: String,
    ) -> Result<Document, RepoError> {
        if self.documents.values().any(|d| d.title == title) {
            return Err(RepoError::Duplicate {
                field: "title".to_string(),
                value: title,
            });
        }
        let doc = Document {
            id: self.allocate_id(),
            title,
            category,
            body,
            updated_at: current_timestamp_ms(),
        };
        self.documents.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    /// Replaces a document's content; the new title must not collide with
    /// another document.
    pub fn update_document(
        &mut self,
        id: &str,
        title: String,
        category: String,
        body: String,
    ) -> Result<Document, RepoError> {
        if self
            .documents
            .values()
            .any(|d| d.title == title && d.id != id)
        {
            return Err(RepoError::Duplicate {
                field: "title".to_string(),
                value: title,
            });
        }
        let doc = self
            .documents
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound("Document".to_string()))?;
        doc.title = title;
        doc.category = category;
        doc.body = body;
        doc.updated_at = current_timestamp_ms();
        Ok(doc.clone())
    }

    pub fn delete_document(&mut self, id: &str) -> Result<(), RepoError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound("Document".to_string()))
    }

    /// Case-insensitive substring search over titles and bodies.
    pub fn search_documents(&self, query: &str) -> Vec<Document> {
        let needle = query.to_lowercase();
        let mut hits: Vec<Document> = self
            .documents
            .values()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle) || d.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        hits
    }

    // == Images ==
    pub fn list_images(&self) -> Vec<Image> {
        let mut images: Vec<Image> = self.images.values().cloned().collect();
        images.sort_by(|a, b| a.id.cmp(&b.id));
        images
    }

    pub fn get_image(&self, id: &str) -> Option<Image> {
        self.images.get(id).cloned()
    }

    /// Inserts image metadata; names are unique.
    pub fn insert_image(
        &mut self,
        name: String,
        url: String,
        size_bytes: u64,
    ) -> Result<Image, RepoError> {
        if self.images.values().any(|i| i.name == name) {
            return Err(RepoError::Duplicate {
                field: "name".to_string(),
                value: name,
            });
        }
        let image = Image {
            id: self.allocate_id(),
            name,
            url,
            size_bytes,
        };
        self.images.insert(image.id.clone(), image.clone());
        Ok(image)
    }

    pub fn delete_image(&mut self, id: &str) -> Result<(), RepoError> {
        self.images
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound("Image".to_string()))
    }

    // == Site Config ==
    /// The public site configuration served by `GET /config`.
    pub fn site_config(&self) -> Value {
        json!({
            "site_name": "Gearbase",
            "categories": ["engine", "transmission", "suspension", "electrics"],
            "documents": self.documents.len(),
            "images": self.images.len(),
            "page_size": PAGE_SIZE,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Repository {
        let mut repo = Repository::new();
        repo.insert_document(
            "Brake bleeding".into(),
            "suspension".into(),
            "Two-person procedure".into(),
        )
        .unwrap();
        repo.insert_document(
            "Timing belt".into(),
            "engine".into(),
            "Replace every 100k km".into(),
        )
        .unwrap();
        repo
    }

    #[test]
    fn test_insert_and_get_document() {
        let repo = seeded();
        let doc = repo.get_document("1").unwrap();
        assert_eq!(doc.title, "Brake bleeding");
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let mut repo = seeded();
        let err = repo
            .insert_document("Timing belt".into(), "engine".into(), "dup".into())
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_update_document() {
        let mut repo = seeded();
        let doc = repo
            .update_document("1", "Brake bleeding".into(), "brakes".into(), "Updated".into())
            .unwrap();
        assert_eq!(doc.category, "brakes");
        assert_eq!(repo.get_document("1").unwrap().body, "Updated");
    }

    #[test]
    fn test_update_missing_document() {
        let mut repo = seeded();
        let err = repo
            .update_document("99", "X".into(), "y".into(), "z".into())
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[test]
    fn test_list_documents_filtered() {
        let repo = seeded();
        let engine = repo.list_documents(Some("engine"), 1);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine[0].title, "Timing belt");

        let all = repo.list_documents(None, 1);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_list_documents_pagination() {
        let repo = seeded();
        assert!(repo.list_documents(None, 2).is_empty());
    }

    #[test]
    fn test_search_documents() {
        let repo = seeded();
        let hits = repo.search_documents("TIMING");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Timing belt");
        assert!(repo.search_documents("clutch").is_empty());
    }

    #[test]
    fn test_delete_document() {
        let mut repo = seeded();
        repo.delete_document("1").unwrap();
        assert!(repo.get_document("1").is_none());
        assert!(matches!(
            repo.delete_document("1"),
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn test_image_lifecycle() {
        let mut repo = Repository::new();
        let image = repo
            .insert_image("carb-diagram.png".into(), "/uploads/carb.png".into(), 1024)
            .unwrap();
        assert_eq!(repo.list_images().len(), 1);
        assert!(repo.get_image(&image.id).is_some());

        let err = repo
            .insert_image("carb-diagram.png".into(), "/uploads/dup.png".into(), 10)
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { ref field, .. } if field == "name"));

        repo.delete_image(&image.id).unwrap();
        assert!(repo.list_images().is_empty());
    }

    #[test]
    fn test_site_config_counts() {
        let repo = seeded();
        let config = repo.site_config();
        assert_eq!(config["documents"], 2);
        assert_eq!(config["site_name"], "Gearbase");
    }
}
