//! # Elements
//!
//! A page is a flat collection of elements. Structure lives in the
//! `children` id lists and the `parent_id` back-reference; the root is the
//! only element without a parent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::style::ElementStyle;

/// Opaque element identifier
pub type ElementId = String;

/// Content given to freshly added headings and paragraphs until the user edits them
pub const PLACEHOLDER_TEXT: &str = "Double click to edit text";

/// The fixed set of tags a page can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Div,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    A,
    Img,
    Ul,
    Ol,
    Li,
    Button,
    Span,
    Section,
}

impl ElementType {
    pub const ALL: [ElementType; 16] = [
        ElementType::Div,
        ElementType::H1,
        ElementType::H2,
        ElementType::H3,
        ElementType::H4,
        ElementType::H5,
        ElementType::H6,
        ElementType::P,
        ElementType::A,
        ElementType::Img,
        ElementType::Ul,
        ElementType::Ol,
        ElementType::Li,
        ElementType::Button,
        ElementType::Span,
        ElementType::Section,
    ];

    /// HTML tag name
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementType::Div => "div",
            ElementType::H1 => "h1",
            ElementType::H2 => "h2",
            ElementType::H3 => "h3",
            ElementType::H4 => "h4",
            ElementType::H5 => "h5",
            ElementType::H6 => "h6",
            ElementType::P => "p",
            ElementType::A => "a",
            ElementType::Img => "img",
            ElementType::Ul => "ul",
            ElementType::Ol => "ol",
            ElementType::Li => "li",
            ElementType::Button => "button",
            ElementType::Span => "span",
            ElementType::Section => "section",
        }
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ElementType::H1 => Some(1),
            ElementType::H2 => Some(2),
            ElementType::H3 => Some(3),
            ElementType::H4 => Some(4),
            ElementType::H5 => Some(5),
            ElementType::H6 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// `ul` and `ol` carry their own `list_items`
    pub fn is_list(&self) -> bool {
        matches!(self, ElementType::Ul | ElementType::Ol)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ElementType::Div | ElementType::Section)
    }

    /// Types whose `content` ends up in exported markup
    pub fn is_text_bearing(&self) -> bool {
        self.is_heading()
            || matches!(
                self,
                ElementType::P
                    | ElementType::A
                    | ElementType::Li
                    | ElementType::Button
                    | ElementType::Span
            )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

impl FromStr for ElementType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|ty| ty.tag_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownElementType(s.to_string()))
    }
}

/// One node of a page, stored flat and linked by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub style: ElementStyle,

    /// Child ids in render order
    #[serde(default)]
    pub children: Vec<ElementId>,

    /// `None` only for the root
    #[serde(default)]
    pub parent_id: Option<ElementId>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_group: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Plain text entries of a `ul`/`ol`, independent of child elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, element_type: ElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
            content: None,
            style: ElementStyle::default(),
            children: Vec::new(),
            parent_id: None,
            is_group: false,
            group_name: None,
            list_items: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<ElementId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ElementId>) -> Self {
        self.children = children;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Label shown in the layers panel
    pub fn display_name(&self) -> String {
        layer_label(
            self.element_type,
            self.content.as_deref(),
            self.is_group,
            self.group_name.as_deref(),
        )
    }

    pub fn list_len(&self) -> usize {
        self.list_items.as_ref().map_or(0, Vec::len)
    }
}

/// Group name for named groups, else non-empty content, else the tag name
pub(crate) fn layer_label(
    element_type: ElementType,
    content: Option<&str>,
    is_group: bool,
    group_name: Option<&str>,
) -> String {
    match (group_name, content) {
        (Some(name), _) if is_group => name.to_string(),
        (_, Some(content)) if !content.is_empty() => content.to_string(),
        _ => element_type.tag_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProperty;

    #[test]
    fn test_element_type_round_trips_through_tag_name() {
        for ty in ElementType::ALL {
            assert_eq!(ty.tag_name().parse::<ElementType>().unwrap(), ty);
        }
        assert!("blink".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_text_bearing_types() {
        assert!(ElementType::P.is_text_bearing());
        assert!(ElementType::H4.is_text_bearing());
        assert!(ElementType::Li.is_text_bearing());
        assert!(!ElementType::Div.is_text_bearing());
        assert!(!ElementType::Img.is_text_bearing());
        assert!(!ElementType::Ul.is_text_bearing());
    }

    #[test]
    fn test_element_json_shape() {
        let mut element = Element::new("a1", ElementType::Ul)
            .with_content("List 1")
            .with_parent("root");
        element.style.set(StyleProperty::PaddingLeft, "30px");
        element.list_items = Some(vec!["one".to_string()]);

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "ul");
        assert_eq!(json["parentId"], "root");
        assert_eq!(json["style"]["paddingLeft"], "30px");
        assert_eq!(json["listItems"][0], "one");
        assert!(json.get("isGroup").is_none());
    }

    #[test]
    fn test_element_deserializes_with_missing_optional_fields() {
        let json = r#"{"id": "x", "type": "div", "parentId": null}"#;
        let element: Element = serde_json::from_str(json).unwrap();

        assert!(element.is_root());
        assert!(element.children.is_empty());
        assert!(element.style.is_empty());
        assert!(!element.is_group);
    }

    #[test]
    fn test_display_name_prefers_group_name() {
        let mut group = Element::new("g", ElementType::Div).with_content("Group 1");
        group.is_group = true;
        group.group_name = Some("Hero".to_string());
        assert_eq!(group.display_name(), "Hero");

        let bare = Element::new("b", ElementType::Section);
        assert_eq!(bare.display_name(), "section");
    }
}
