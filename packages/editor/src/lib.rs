//! # Pagecraft Editor
//!
//! Editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element, ElementStyle, ElementTree   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document + mutations                │
//! │  - Flat element map keyed by id             │
//! │  - Validated, all-or-nothing mutations      │
//! │  - Snapshot undo/redo                       │
//! │  - Tree view for rendering                  │
//! │  - Page load/save                           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: ElementTree → HTML, Element → CSS│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The flat map is the source of truth**: the tree is derived on demand
//! 2. **Ids, not pointers**: children and parents reference each other by id
//! 3. **One mutation, one undo step**: refused mutations leave no trace
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Document, JsonFileRepository, PageRepository};
//! use pagecraft_model::ElementType;
//!
//! let mut repo = JsonFileRepository::open("pages")?;
//! let page = repo.get("home")?;
//!
//! let mut doc = Document::new();
//! doc.open_page(&page);
//!
//! let id = doc.add_element(ElementType::P, None)?;
//! doc.update_element_content(&id, "Hello")?;
//! doc.undo();
//!
//! repo.save(&page.id, doc.elements())?;
//! let html = doc.generate_html();
//! ```

mod defaults;
mod document;
mod element_map;
mod errors;
mod mutations;
mod persistence;
mod tree_builder;
mod undo_stack;

pub use defaults::{default_content, default_list_items, default_style, seed_elements, DEFAULT_LIST_ITEMS};
pub use document::{Document, DocumentOptions};
pub use element_map::ElementMap;
pub use errors::{EditorError, PersistenceError};
pub use mutations::{Mutation, MutationContext, MutationError, MutationResult};
pub use persistence::{JsonFileRepository, MemoryRepository, Page, PageRepository};
pub use tree_builder::build_tree;
pub use undo_stack::{Snapshot, UndoStack};

// Re-export common types for convenience
pub use pagecraft_model::{Element, ElementId, ElementStyle, ElementTree, ElementType, StyleProperty};
