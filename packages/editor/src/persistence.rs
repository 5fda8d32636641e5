//! Page storage
//!
//! A page is the persisted form of a document: its title, timestamps and
//! the flat element array (`layers`). The editor never reads storage on its
//! own; callers fetch a [`Page`] and hand it to [`crate::Document::open_page`],
//! then write [`crate::Document::elements`] back with [`PageRepository::save`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pagecraft_model::Element;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::PersistenceError;

/// Persisted page record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,

    /// Unix time in milliseconds
    pub created_at: i64,
    pub updated_at: i64,

    #[serde(default)]
    pub layers: Vec<Element>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            layers: Vec::new(),
        }
    }
}

/// Load/save boundary for pages
pub trait PageRepository {
    /// All pages, oldest first
    fn list(&self) -> Result<Vec<Page>, PersistenceError>;

    /// Create an empty page
    fn create(&mut self, title: &str) -> Result<Page, PersistenceError>;

    fn get(&self, id: &str) -> Result<Page, PersistenceError>;

    /// Replace the page's layers and bump `updatedAt`
    fn save(&mut self, id: &str, layers: Vec<Element>) -> Result<Page, PersistenceError>;

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError>;
}

fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

/// In-memory pages, for tests and scratch documents
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pages: HashMap<String, Page>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<Page>, PersistenceError> {
        let mut pages: Vec<Page> = self.pages.values().cloned().collect();
        sort_pages(&mut pages);
        Ok(pages)
    }

    fn create(&mut self, title: &str) -> Result<Page, PersistenceError> {
        let page = Page::new(title);
        self.pages.insert(page.id.clone(), page.clone());
        Ok(page)
    }

    fn get(&self, id: &str) -> Result<Page, PersistenceError> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::PageNotFound(id.to_string()))
    }

    fn save(&mut self, id: &str, layers: Vec<Element>) -> Result<Page, PersistenceError> {
        let page = self
            .pages
            .get_mut(id)
            .ok_or_else(|| PersistenceError::PageNotFound(id.to_string()))?;
        page.layers = layers;
        page.updated_at = chrono::Utc::now().timestamp_millis();
        Ok(page.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.pages
            .remove(id)
            .map(drop)
            .ok_or_else(|| PersistenceError::PageNotFound(id.to_string()))
    }
}

/// One `<id>.json` file per page under a directory
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Open a repository, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn page_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read(&self, path: &Path) -> Result<Page, PersistenceError> {
        let source = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }

    fn write(&self, page: &Page) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(page)?;
        fs::write(self.page_path(&page.id), json)?;
        debug!(page_id = %page.id, layers = page.layers.len(), "Wrote page");
        Ok(())
    }
}

impl PageRepository for JsonFileRepository {
    fn list(&self) -> Result<Vec<Page>, PersistenceError> {
        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                pages.push(self.read(&path)?);
            }
        }
        sort_pages(&mut pages);
        Ok(pages)
    }

    fn create(&mut self, title: &str) -> Result<Page, PersistenceError> {
        let page = Page::new(title);
        self.write(&page)?;
        info!(page_id = %page.id, title = %page.title, "Created page");
        Ok(page)
    }

    fn get(&self, id: &str) -> Result<Page, PersistenceError> {
        let path = self.page_path(id);
        if !path.exists() {
            return Err(PersistenceError::PageNotFound(id.to_string()));
        }
        self.read(&path)
    }

    fn save(&mut self, id: &str, layers: Vec<Element>) -> Result<Page, PersistenceError> {
        let mut page = self.get(id)?;
        page.layers = layers;
        page.updated_at = chrono::Utc::now().timestamp_millis();
        self.write(&page)?;
        Ok(page)
    }

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        let path = self.page_path(id);
        if !path.exists() {
            return Err(PersistenceError::PageNotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        info!(page_id = %id, "Deleted page");
        Ok(())
    }
}
