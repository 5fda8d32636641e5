//! # Document Handle
//!
//! The editable state of one page: the flat element map, the root id, the
//! current selection and the undo history.
//!
//! Every edit goes through [`Document::apply`]. A mutation either lands
//! completely and becomes one undo step, or is refused with a
//! [`MutationError`] and leaves the page untouched.
//!
//! ## Lifecycle
//!
//! ```text
//! load_page_data → apply / undo / redo → elements() (save)
//!                         ↓
//!               elements_tree → generate_html / generate_css
//! ```

use pagecraft_compiler_css::compile_to_css;
use pagecraft_compiler_html::{compile_document, compile_to_html, CompileOptions};
use pagecraft_model::{Element, ElementId, ElementStyle, ElementTree, ElementType, IdGenerator};
use tracing::{debug, info, warn};

use crate::defaults::seed_elements;
use crate::element_map::ElementMap;
use crate::mutations::{Mutation, MutationContext, MutationError, MutationResult};
use crate::persistence::Page;
use crate::tree_builder::build_tree;
use crate::undo_stack::UndoStack;

/// Construction options for a [`Document`]
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Maximum undo depth (0 = unlimited)
    pub history_limit: usize,

    /// Id source for new elements
    pub ids: IdGenerator,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            history_limit: 100,
            ids: IdGenerator::random(),
        }
    }
}

/// Editable page
#[derive(Debug)]
pub struct Document {
    elements: ElementMap,
    root_id: ElementId,
    selected_id: Option<ElementId>,
    history: UndoStack,
    ids: IdGenerator,

    /// Increments on every successful mutation, undo and redo
    pub version: u64,
}

impl Document {
    /// Document holding the starter page
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    pub fn with_options(options: DocumentOptions) -> Self {
        let mut ids = options.ids;
        let (root_id, elements) = seed_elements(&mut ids);

        Self {
            elements: ElementMap::from_elements(elements),
            root_id,
            selected_id: None,
            history: UndoStack::with_max_levels(options.history_limit),
            ids,
            version: 0,
        }
    }

    /// Document holding `elements`, or the starter page if they have no root
    pub fn from_elements(elements: Vec<Element>, options: DocumentOptions) -> Self {
        let mut doc = Self::with_options(options);
        doc.load_page_data(elements);
        doc
    }

    /// Replace the whole page. History and selection are reset.
    pub fn load_page_data(&mut self, elements: Vec<Element>) {
        let elements = ElementMap::from_elements(elements);
        let roots: Vec<ElementId> = elements
            .iter()
            .filter(|element| element.is_root())
            .map(|element| element.id.clone())
            .collect();

        if roots.len() > 1 {
            warn!(roots = roots.len(), "Page has more than one root, using the first");
        }

        match roots.into_iter().next() {
            Some(root_id) => {
                info!(elements = elements.len(), root_id = %root_id, "Loaded page");
                self.elements = elements;
                self.root_id = root_id;
            }
            None => {
                info!("Page is empty or has no root, starting from the default page");
                let (root_id, seed) = seed_elements(&mut self.ids);
                self.elements = ElementMap::from_elements(seed);
                self.root_id = root_id;
            }
        }

        self.selected_id = None;
        self.history.clear();
        self.version += 1;
    }

    /// Load a persisted page
    pub fn open_page(&mut self, page: &Page) {
        debug!(page_id = %page.id, title = %page.title, "Opening page");
        self.load_page_data(page.layers.clone());
    }

    /// Apply a mutation as one undoable step
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let snapshot = self.elements.clone();
        let mut ctx = MutationContext {
            root_id: &self.root_id,
            ids: &mut self.ids,
        };

        match mutation.apply(&mut self.elements, &mut ctx) {
            Ok(result) => {
                self.history.record(snapshot, mutation.name());
                self.version += 1;
                if let Some(selected) = &result.select {
                    self.selected_id = Some(selected.clone());
                }
                self.drop_dangling_selection();
                debug!(mutation = mutation.name(), version = self.version, "Applied mutation");
                Ok(result)
            }
            Err(err) => {
                self.elements = snapshot;
                warn!(mutation = mutation.name(), error = %err, "Mutation refused");
                Err(err)
            }
        }
    }

    pub fn add_element(
        &mut self,
        element_type: ElementType,
        parent_id: Option<&str>,
    ) -> Result<ElementId, MutationError> {
        let result = self.apply(Mutation::AddElement {
            element_type,
            parent_id: parent_id.map(str::to_string),
        })?;
        Ok(result.created.unwrap_or_default())
    }

    /// Change the selection. Not recorded in history.
    pub fn select_element(&mut self, id: Option<&str>) -> Result<(), MutationError> {
        if let Some(id) = id {
            if !self.elements.contains(id) {
                warn!(element_id = %id, "Cannot select missing element");
                return Err(MutationError::ElementNotFound(id.to_string()));
            }
        }
        self.selected_id = id.map(str::to_string);
        Ok(())
    }

    pub fn update_element_style(&mut self, id: &str, style: ElementStyle) -> Result<(), MutationError> {
        self.apply(Mutation::UpdateStyle {
            node_id: id.to_string(),
            style,
        })
        .map(drop)
    }

    pub fn update_element_content(&mut self, id: &str, content: &str) -> Result<(), MutationError> {
        self.apply(Mutation::UpdateContent {
            node_id: id.to_string(),
            content: content.to_string(),
        })
        .map(drop)
    }

    pub fn update_element_name(&mut self, id: &str, name: &str) -> Result<(), MutationError> {
        self.apply(Mutation::UpdateName {
            node_id: id.to_string(),
            name: name.to_string(),
        })
        .map(drop)
    }

    pub fn delete_element(&mut self, id: &str) -> Result<(), MutationError> {
        self.apply(Mutation::DeleteElement {
            node_id: id.to_string(),
        })
        .map(drop)
    }

    /// Wrap `ids` in a new group and return its id
    pub fn group_elements(&mut self, ids: &[ElementId]) -> Result<ElementId, MutationError> {
        let result = self.apply(Mutation::GroupElements {
            node_ids: ids.to_vec(),
        })?;
        Ok(result.select.unwrap_or_default())
    }

    pub fn reorder_element(
        &mut self,
        id: &str,
        target_parent_id: &str,
        target_index: usize,
    ) -> Result<(), MutationError> {
        self.apply(Mutation::ReorderElement {
            node_id: id.to_string(),
            new_parent_id: target_parent_id.to_string(),
            index: target_index,
        })
        .map(drop)
    }

    pub fn add_list_item(&mut self, list_id: &str, text: Option<&str>) -> Result<(), MutationError> {
        self.apply(Mutation::AddListItem {
            list_id: list_id.to_string(),
            text: text.map(str::to_string),
        })
        .map(drop)
    }

    pub fn update_list_item(&mut self, list_id: &str, index: usize, text: &str) -> Result<(), MutationError> {
        self.apply(Mutation::UpdateListItem {
            list_id: list_id.to_string(),
            index,
            text: text.to_string(),
        })
        .map(drop)
    }

    pub fn delete_list_item(&mut self, list_id: &str, index: usize) -> Result<(), MutationError> {
        self.apply(Mutation::DeleteListItem {
            list_id: list_id.to_string(),
            index,
        })
        .map(drop)
    }

    pub fn reorder_list_item(
        &mut self,
        list_id: &str,
        old_index: usize,
        new_index: usize,
    ) -> Result<(), MutationError> {
        self.apply(Mutation::ReorderListItem {
            list_id: list_id.to_string(),
            old_index,
            new_index,
        })
        .map(drop)
    }

    /// Step back one mutation. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.elements);
        if undone {
            self.after_history_step("undo");
        }
        undone
    }

    /// Reapply the last undone mutation. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.elements);
        if redone {
            self.after_history_step("redo");
        }
        redone
    }

    fn after_history_step(&mut self, step: &str) {
        self.version += 1;
        // Selection is not restored, only dropped when it no longer resolves
        self.drop_dangling_selection();
        debug!(step, version = self.version, "History step");
    }

    fn drop_dangling_selection(&mut self) {
        if let Some(selected) = &self.selected_id {
            if !self.elements.contains(selected) {
                self.selected_id = None;
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    pub fn undo_description(&self) -> Option<&'static str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&'static str> {
        self.history.redo_description()
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_map(&self) -> &ElementMap {
        &self.elements
    }

    /// Flat element list in page order, as persisted
    pub fn elements(&self) -> Vec<Element> {
        self.elements.to_vec()
    }

    /// Nested view of the page for rendering
    pub fn elements_tree(&self) -> ElementTree {
        build_tree(&self.elements, &self.root_id)
    }

    pub fn generate_html(&self) -> String {
        self.generate_html_with(CompileOptions::default())
    }

    pub fn generate_html_with(&self, options: CompileOptions) -> String {
        compile_to_html(&self.elements_tree(), options)
    }

    pub fn generate_css(&self) -> String {
        compile_to_css(&self.elements())
    }

    /// Standalone HTML document with the stylesheet inlined
    pub fn export_html(&self, options: CompileOptions) -> String {
        compile_document(&self.generate_css(), &self.generate_html_with(options))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::with_options(DocumentOptions {
            history_limit: 100,
            ids: IdGenerator::sequential("t"),
        })
    }

    #[test]
    fn test_create_seeded_document() {
        let doc = doc();

        assert_eq!(doc.version, 0);
        assert_eq!(doc.root_id(), "t-1");
        assert_eq!(doc.elements().len(), 7);
        assert!(doc.selected_id().is_none());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_refused_mutation_leaves_no_trace() {
        let mut doc = doc();
        let before = doc.elements();

        let result = doc.update_element_content("nope", "Hello");

        assert_eq!(result, Err(MutationError::ElementNotFound("nope".to_string())));
        assert_eq!(doc.elements(), before);
        assert_eq!(doc.version, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_selection_is_not_history() {
        let mut doc = doc();
        let root = doc.root_id().to_string();

        doc.select_element(Some(&root)).unwrap();
        assert_eq!(doc.selected_id(), Some(root.as_str()));
        assert!(!doc.can_undo());

        assert!(doc.select_element(Some("missing")).is_err());
        doc.select_element(None).unwrap();
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn test_undo_drops_dangling_selection() {
        let mut doc = doc();
        let id = doc.add_element(ElementType::P, None).unwrap();
        assert_eq!(doc.selected_id(), Some(id.as_str()));

        doc.undo();
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn test_load_empty_page_seeds_fresh_root() {
        let mut doc = doc();
        doc.add_element(ElementType::P, None).unwrap();

        doc.load_page_data(vec![]);

        assert_eq!(doc.elements().len(), 7);
        assert_ne!(doc.root_id(), "t-1");
        assert!(!doc.can_undo());
        assert!(doc.selected_id().is_none());
    }

    #[test]
    fn test_load_page_with_two_roots_uses_first() {
        let mut doc = doc();
        let layers = vec![
            Element::new("first", ElementType::Div),
            Element::new("second", ElementType::Section),
        ];

        doc.load_page_data(layers.clone());

        assert_eq!(doc.root_id(), "first");
        assert_eq!(doc.elements(), layers);
        assert_eq!(doc.elements_tree().ids(), vec!["first"]);
    }

    #[test]
    fn test_deleting_selected_stray_clears_selection() {
        let mut doc = doc();
        doc.load_page_data(vec![
            Element::new("root", ElementType::Div),
            Element::new("stray", ElementType::P).with_parent("gone"),
        ]);
        doc.select_element(Some("stray")).unwrap();

        doc.delete_element("stray").unwrap();

        assert!(doc.element("stray").is_none());
        assert!(doc.selected_id().is_none());
        assert!(doc.can_undo());
    }

    #[test]
    fn test_load_rootless_page_seeds_fresh_root() {
        let mut doc = doc();
        let orphan = Element::new("x", ElementType::P).with_parent("gone");

        doc.load_page_data(vec![orphan]);

        assert!(doc.element("x").is_none());
        assert_eq!(doc.elements().len(), 7);
    }
}
