//! Nested view of a page, rebuilt on demand from the flat element list.

use serde::Serialize;

use crate::element::{layer_label, Element, ElementId, ElementType};
use crate::style::{ElementStyle, StyleProperty};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTree {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub style: ElementStyle,

    pub children: Vec<ElementTree>,

    pub parent_id: Option<ElementId>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_group: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
}

impl ElementTree {
    /// Copy `element`, embedding already-built child subtrees
    pub fn from_element(element: &Element, children: Vec<ElementTree>) -> Self {
        Self {
            id: element.id.clone(),
            element_type: element.element_type,
            content: element.content.clone(),
            style: element.style.clone(),
            children,
            parent_id: element.parent_id.clone(),
            is_group: element.is_group,
            group_name: element.group_name.clone(),
            list_items: element.list_items.clone(),
        }
    }

    /// Minimal renderable root used when the flat map cannot be resolved
    pub fn fallback_root(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            element_type: ElementType::Div,
            content: None,
            style: ElementStyle::new()
                .with(StyleProperty::Width, "100%")
                .with(StyleProperty::Height, "100%"),
            children: Vec::new(),
            parent_id: None,
            is_group: false,
            group_name: None,
            list_items: None,
        }
    }

    /// Number of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ElementTree::node_count).sum::<usize>()
    }

    /// Same label as [`Element::display_name`]
    pub fn display_name(&self) -> String {
        layer_label(
            self.element_type,
            self.content.as_deref(),
            self.is_group,
            self.group_name.as_deref(),
        )
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ElementTree> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Ids in depth-first pre-order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::with_capacity(self.node_count());
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        ids.push(&self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }
}
