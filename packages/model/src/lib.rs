//! # Pagecraft Model
//!
//! Data types shared by every Pagecraft crate.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element, ElementStyle, ElementTree   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html / compiler-css                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: flat element map + mutations + undo │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Pages are stored as a flat list of [`Element`]s that reference each other
//! by id. [`ElementTree`] is the nested view derived from that list for
//! rendering and export.

pub mod element;
pub mod error;
pub mod id_generator;
pub mod style;
pub mod tree;

pub use element::{Element, ElementId, ElementType, PLACEHOLDER_TEXT};
pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use style::{ElementStyle, StyleProperty};
pub use tree::ElementTree;
