//! # Page Mutations
//!
//! Every structural, content and style edit of a page is a [`Mutation`].
//!
//! ## Design Principles
//!
//! 1. **Validated**: each mutation checks its preconditions before touching
//!    the element map, so a refused mutation leaves the page unchanged
//! 2. **Typed refusals**: invalid ids, root edits, cycles and bad list
//!    indices come back as [`MutationError`], never as panics
//! 3. **Serializable**: mutations can be recorded and replayed from JSON
//!
//! ## Mutation Semantics
//!
//! ### ReorderElement
//! - Refuses to move the root, into a missing parent, or into its own subtree
//! - Target index is clamped to the new parent's child count
//! - Within the same parent the index is read against the list *before*
//!   removal, so indices past the old position shift down by one
//!
//! ### DeleteElement
//! - Removes the element and its whole subtree, then selects the parent
//!
//! ### GroupElements
//! - Wraps two or more siblings in a new `div` appended to their parent

use std::collections::HashSet;

use pagecraft_model::{Element, ElementId, ElementStyle, ElementType, IdGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{default_content, default_list_items, default_style, group_style};
use crate::element_map::ElementMap;

/// Semantic edits of a page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new element with type defaults; `None` parent means the root
    AddElement {
        element_type: ElementType,
        parent_id: Option<ElementId>,
    },

    /// Merge style properties with shorthand reconciliation
    UpdateStyle {
        node_id: ElementId,
        style: ElementStyle,
    },

    /// Replace the text payload
    UpdateContent {
        node_id: ElementId,
        content: String,
    },

    /// Rename the layer label (and group name for groups)
    UpdateName {
        node_id: ElementId,
        name: String,
    },

    /// Remove an element and all descendants
    DeleteElement {
        node_id: ElementId,
    },

    /// Wrap sibling elements in a new group
    GroupElements {
        node_ids: Vec<ElementId>,
    },

    /// Move an element to a parent at index
    ReorderElement {
        node_id: ElementId,
        new_parent_id: ElementId,
        index: usize,
    },

    /// Append an entry to a list; `None` or empty text auto-numbers it
    AddListItem {
        list_id: ElementId,
        text: Option<String>,
    },

    UpdateListItem {
        list_id: ElementId,
        index: usize,
        text: String,
    },

    /// Remove an entry; removing the last one deletes the list
    DeleteListItem {
        list_id: ElementId,
        index: usize,
    },

    ReorderListItem {
        list_id: ElementId,
        old_index: usize,
        new_index: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ElementId),

    #[error("The root element cannot be deleted or moved")]
    RootImmutable,

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Element is not a list: {0}")]
    NotAList(ElementId),

    #[error("List item index {index} out of range for {len} items")]
    ListIndexOutOfRange { index: usize, len: usize },

    #[error("Grouping needs at least 2 elements, got {0}")]
    NotEnoughElements(usize),

    #[error("Element listed twice: {0}")]
    DuplicateElement(ElementId),

    #[error("Grouped elements must share a parent")]
    MixedParents,

    #[error("Element has no parent: {0}")]
    Orphan(ElementId),
}

/// What the mutation needs from the owning document
pub struct MutationContext<'a> {
    pub root_id: &'a str,
    pub ids: &'a mut IdGenerator,
}

impl MutationContext<'_> {
    /// Fresh id not present in `elements`
    fn mint_id(&mut self, elements: &ElementMap) -> ElementId {
        loop {
            let id = self.ids.new_id();
            if !elements.contains(&id) {
                return id;
            }
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    /// Id of the element the mutation created, if any
    pub created: Option<ElementId>,

    /// Element to select afterwards; `None` keeps the current selection
    pub select: Option<ElementId>,
}

impl MutationResult {
    fn created(id: ElementId) -> Self {
        Self {
            created: Some(id.clone()),
            select: Some(id),
        }
    }

    fn select(id: ElementId) -> Self {
        Self {
            created: None,
            select: Some(id),
        }
    }
}

impl Mutation {
    /// Short name for logs and history labels
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "Add element",
            Mutation::UpdateStyle { .. } => "Update style",
            Mutation::UpdateContent { .. } => "Update content",
            Mutation::UpdateName { .. } => "Rename",
            Mutation::DeleteElement { .. } => "Delete element",
            Mutation::GroupElements { .. } => "Group elements",
            Mutation::ReorderElement { .. } => "Move element",
            Mutation::AddListItem { .. } => "Add list item",
            Mutation::UpdateListItem { .. } => "Update list item",
            Mutation::DeleteListItem { .. } => "Delete list item",
            Mutation::ReorderListItem { .. } => "Reorder list item",
        }
    }

    /// Apply mutation to the element map with validation
    pub fn apply(
        &self,
        elements: &mut ElementMap,
        ctx: &mut MutationContext<'_>,
    ) -> Result<MutationResult, MutationError> {
        // Validate first
        self.validate(elements, ctx.root_id)?;

        match self {
            Mutation::AddElement { element_type, parent_id } => {
                let parent_id = Self::add_target(parent_id, ctx.root_id);
                Ok(Self::apply_add(elements, ctx, *element_type, parent_id))
            }

            Mutation::UpdateStyle { node_id, style } => {
                let element = Self::element_mut(elements, node_id)?;
                element.style.merge(style);
                Ok(MutationResult::default())
            }

            Mutation::UpdateContent { node_id, content } => {
                let element = Self::element_mut(elements, node_id)?;
                element.content = Some(content.clone());
                Ok(MutationResult::default())
            }

            Mutation::UpdateName { node_id, name } => {
                let element = Self::element_mut(elements, node_id)?;
                if element.is_group {
                    element.group_name = Some(name.clone());
                }
                element.content = Some(name.clone());
                Ok(MutationResult::default())
            }

            Mutation::DeleteElement { node_id } => Self::apply_delete(elements, node_id),

            Mutation::GroupElements { node_ids } => Self::apply_group(elements, ctx, node_ids),

            Mutation::ReorderElement { node_id, new_parent_id, index } => {
                Self::apply_reorder(elements, node_id, new_parent_id, *index)
            }

            Mutation::AddListItem { list_id, text } => {
                let list = Self::element_mut(elements, list_id)?;
                let items = list.list_items.get_or_insert_with(Vec::new);
                let text = match text {
                    Some(text) if !text.is_empty() => text.clone(),
                    _ => format!("Item {}", items.len() + 1),
                };
                items.push(text);
                Ok(MutationResult::default())
            }

            Mutation::UpdateListItem { list_id, index, text } => {
                let list = Self::element_mut(elements, list_id)?;
                if let Some(item) = list.list_items.as_mut().and_then(|items| items.get_mut(*index)) {
                    *item = text.clone();
                }
                Ok(MutationResult::default())
            }

            Mutation::DeleteListItem { list_id, index } => {
                let list = Self::element_mut(elements, list_id)?;
                if list.list_len() == 1 {
                    return Self::apply_delete(elements, list_id);
                }
                if let Some(items) = list.list_items.as_mut() {
                    items.remove(*index);
                }
                Ok(MutationResult::default())
            }

            Mutation::ReorderListItem { list_id, old_index, new_index } => {
                let list = Self::element_mut(elements, list_id)?;
                if let Some(items) = list.list_items.as_mut() {
                    let item = items.remove(*old_index);
                    let target = (*new_index).min(items.len());
                    items.insert(target, item);
                }
                Ok(MutationResult::default())
            }
        }
    }

    fn element_mut<'a>(elements: &'a mut ElementMap, id: &str) -> Result<&'a mut Element, MutationError> {
        elements
            .get_mut(id)
            .ok_or_else(|| MutationError::ElementNotFound(id.to_string()))
    }

    fn apply_add(
        elements: &mut ElementMap,
        ctx: &mut MutationContext<'_>,
        element_type: ElementType,
        parent_id: &str,
    ) -> MutationResult {
        let id = ctx.mint_id(elements);

        let mut element = Element::new(id.clone(), element_type)
            .with_style(default_style(element_type))
            .with_parent(parent_id);
        element.content = default_content(element_type, elements, ctx.root_id);
        element.list_items = default_list_items(element_type);

        if let Some(parent) = elements.get_mut(parent_id) {
            parent.children.push(id.clone());
        }
        elements.insert(element);

        MutationResult::created(id)
    }

    /// Parent for a new element; a missing or empty id means the root
    fn add_target<'a>(parent_id: &'a Option<ElementId>, root_id: &'a str) -> &'a str {
        parent_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(root_id)
    }

    fn apply_delete(elements: &mut ElementMap, node_id: &str) -> Result<MutationResult, MutationError> {
        let parent_id = elements
            .get(node_id)
            .ok_or_else(|| MutationError::ElementNotFound(node_id.to_string()))?
            .parent_id
            .clone();

        let doomed: HashSet<ElementId> = elements.descendants(node_id).into_iter().collect();

        if let Some(parent) = parent_id.as_deref().and_then(|id| elements.get_mut(id)) {
            parent.children.retain(|child| child != node_id);
        }
        elements.remove_all(&doomed);

        // A dangling parent link cannot be selected
        Ok(match parent_id.filter(|id| elements.contains(id)) {
            Some(parent_id) => MutationResult::select(parent_id),
            None => MutationResult::default(),
        })
    }

    fn apply_group(
        elements: &mut ElementMap,
        ctx: &mut MutationContext<'_>,
        node_ids: &[ElementId],
    ) -> Result<MutationResult, MutationError> {
        let parent_id = node_ids
            .first()
            .and_then(|id| elements.get(id))
            .and_then(|element| element.parent_id.clone())
            .ok_or(MutationError::RootImmutable)?;

        let count = elements.count_where(|element| element.is_group);
        let group_name = format!("Group {}", count + 1);
        let group_id = ctx.mint_id(elements);

        let mut group = Element::new(group_id.clone(), ElementType::Div)
            .with_style(group_style())
            .with_parent(parent_id.clone())
            .with_children(node_ids.to_vec())
            .with_content(group_name.clone());
        group.is_group = true;
        group.group_name = Some(group_name);

        if let Some(parent) = elements.get_mut(&parent_id) {
            parent.children.retain(|child| !node_ids.contains(child));
            parent.children.push(group_id.clone());
        }
        for id in node_ids {
            if let Some(element) = elements.get_mut(id) {
                element.parent_id = Some(group_id.clone());
            }
        }
        elements.insert(group);

        Ok(MutationResult::select(group_id))
    }

    fn apply_reorder(
        elements: &mut ElementMap,
        node_id: &str,
        new_parent_id: &str,
        index: usize,
    ) -> Result<MutationResult, MutationError> {
        let old_parent_id = elements
            .get(node_id)
            .and_then(|element| element.parent_id.clone())
            .ok_or(MutationError::RootImmutable)?;

        let target_len = elements
            .get(new_parent_id)
            .map(|parent| parent.children.len())
            .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.to_string()))?;
        let mut index = index.min(target_len);

        let old_parent = Self::element_mut(elements, &old_parent_id)?;
        let old_index = old_parent.children.iter().position(|child| child == node_id);
        old_parent.children.retain(|child| child != node_id);

        if old_parent_id == new_parent_id {
            if let Some(old_index) = old_index {
                if index > old_index {
                    index -= 1;
                }
            }
        }

        let new_parent = Self::element_mut(elements, new_parent_id)?;
        let index = index.min(new_parent.children.len());
        new_parent.children.insert(index, node_id.to_string());

        if let Some(element) = elements.get_mut(node_id) {
            element.parent_id = Some(new_parent_id.to_string());
        }

        Ok(MutationResult::default())
    }

    /// Validate without applying
    pub fn validate(&self, elements: &ElementMap, root_id: &str) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement { parent_id, .. } => {
                let parent_id = Self::add_target(parent_id, root_id);
                if !elements.contains(parent_id) {
                    return Err(MutationError::ParentNotFound(parent_id.to_string()));
                }
                Ok(())
            }

            Mutation::UpdateStyle { node_id, .. }
            | Mutation::UpdateContent { node_id, .. }
            | Mutation::UpdateName { node_id, .. } => {
                Self::require(elements, node_id)?;
                Ok(())
            }

            Mutation::DeleteElement { node_id } => Self::validate_delete(elements, node_id, root_id),

            Mutation::GroupElements { node_ids } => {
                if node_ids.len() < 2 {
                    return Err(MutationError::NotEnoughElements(node_ids.len()));
                }

                let mut seen = HashSet::new();
                let mut shared_parent: Option<&ElementId> = None;
                for id in node_ids {
                    if !seen.insert(id) {
                        return Err(MutationError::DuplicateElement(id.clone()));
                    }
                    let element = Self::require(elements, id)?;
                    let parent_id = element
                        .parent_id
                        .as_ref()
                        .ok_or(MutationError::RootImmutable)?;
                    match shared_parent {
                        None => shared_parent = Some(parent_id),
                        Some(shared) if shared != parent_id => return Err(MutationError::MixedParents),
                        Some(_) => {}
                    }
                }

                if let Some(parent_id) = shared_parent {
                    if !elements.contains(parent_id) {
                        return Err(MutationError::ParentNotFound(parent_id.clone()));
                    }
                }
                Ok(())
            }

            Mutation::ReorderElement { node_id, new_parent_id, .. } => {
                Self::validate_detach(elements, node_id, root_id)?;

                if !elements.contains(new_parent_id) {
                    return Err(MutationError::ParentNotFound(new_parent_id.clone()));
                }

                // Moving into itself or its own subtree
                if elements.is_within(node_id, new_parent_id) {
                    return Err(MutationError::CycleDetected);
                }

                Ok(())
            }

            Mutation::AddListItem { list_id, .. } => {
                Self::require_list(elements, list_id)?;
                Ok(())
            }

            Mutation::UpdateListItem { list_id, index, .. }
            | Mutation::ReorderListItem { list_id, old_index: index, .. } => {
                let list = Self::require_list(elements, list_id)?;
                Self::check_index(list, *index)
            }

            Mutation::DeleteListItem { list_id, index } => {
                let list = Self::require_list(elements, list_id)?;
                Self::check_index(list, *index)?;
                if list.list_len() == 1 {
                    Self::validate_delete(elements, list_id, root_id)?;
                }
                Ok(())
            }
        }
    }

    fn require<'a>(elements: &'a ElementMap, id: &str) -> Result<&'a Element, MutationError> {
        elements
            .get(id)
            .ok_or_else(|| MutationError::ElementNotFound(id.to_string()))
    }

    fn require_list<'a>(elements: &'a ElementMap, id: &str) -> Result<&'a Element, MutationError> {
        let element = Self::require(elements, id)?;
        if !element.element_type.is_list() {
            return Err(MutationError::NotAList(id.to_string()));
        }
        Ok(element)
    }

    fn check_index(list: &Element, index: usize) -> Result<(), MutationError> {
        let len = list.list_len();
        if index >= len {
            return Err(MutationError::ListIndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Anything but the root can be deleted, even with a dangling parent link
    fn validate_delete(elements: &ElementMap, node_id: &str, root_id: &str) -> Result<(), MutationError> {
        Self::require(elements, node_id)?;
        if node_id == root_id {
            return Err(MutationError::RootImmutable);
        }
        Ok(())
    }

    /// The element exists, is not the root, and its parent exists
    fn validate_detach(elements: &ElementMap, node_id: &str, root_id: &str) -> Result<(), MutationError> {
        let element = Self::require(elements, node_id)?;
        if node_id == root_id {
            return Err(MutationError::RootImmutable);
        }
        let parent_id = element
            .parent_id
            .as_ref()
            .ok_or_else(|| MutationError::Orphan(node_id.to_string()))?;
        if !elements.contains(parent_id) {
            return Err(MutationError::ParentNotFound(parent_id.clone()));
        }
        Ok(())
    }
}
