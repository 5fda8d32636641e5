//! # Style Model
//!
//! An element's style is a map from a closed set of CSS-like properties to
//! string values. Property keys are persisted in camelCase (`paddingTop`)
//! and emitted as hyphenated CSS names (`padding-top`).
//!
//! ## Reconciliation
//!
//! [`ElementStyle::merge`] keeps shorthands and their constituents from
//! drifting apart:
//!
//! - a non-empty `border`/`padding`/`margin` clears its longhands
//! - a non-empty longhand clears its shorthand
//! - once `borderWidth`, `borderStyle` and `borderColor` are all set by an
//!   update, `border` is rebuilt from them
//! - an empty value unsets the property

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelError;

macro_rules! style_properties {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A style property, in emission order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum StyleProperty {
            $($variant),+
        }

        impl StyleProperty {
            pub const ALL: &'static [StyleProperty] = &[$(StyleProperty::$variant),+];

            /// camelCase key used in persisted pages
            pub fn name(&self) -> &'static str {
                match self {
                    $(StyleProperty::$variant => $name),+
                }
            }
        }
    };
}

style_properties! {
    Display => "display",
    FlexDirection => "flexDirection",
    JustifyContent => "justifyContent",
    AlignItems => "alignItems",
    FlexWrap => "flexWrap",
    Gap => "gap",
    Flex => "flex",
    Padding => "padding",
    PaddingTop => "paddingTop",
    PaddingRight => "paddingRight",
    PaddingBottom => "paddingBottom",
    PaddingLeft => "paddingLeft",
    PaddingInlineStart => "paddingInlineStart",
    Margin => "margin",
    MarginTop => "marginTop",
    MarginRight => "marginRight",
    MarginBottom => "marginBottom",
    MarginLeft => "marginLeft",
    Width => "width",
    Height => "height",
    MinWidth => "minWidth",
    MinHeight => "minHeight",
    MaxWidth => "maxWidth",
    Background => "background",
    BackgroundColor => "backgroundColor",
    Color => "color",
    FontSize => "fontSize",
    FontWeight => "fontWeight",
    LineHeight => "lineHeight",
    TextAlign => "textAlign",
    TextDecoration => "textDecoration",
    WordBreak => "wordBreak",
    OverflowWrap => "overflowWrap",
    Border => "border",
    BorderWidth => "borderWidth",
    BorderStyle => "borderStyle",
    BorderColor => "borderColor",
    BorderRadius => "borderRadius",
    BorderTop => "borderTop",
    BorderRight => "borderRight",
    BorderBottom => "borderBottom",
    BorderLeft => "borderLeft",
    Outline => "outline",
    BoxSizing => "boxSizing",
    Position => "position",
    ZIndex => "zIndex",
    ListStyleType => "listStyleType",
    ListStylePosition => "listStylePosition",
    ObjectFit => "objectFit",
    Cursor => "cursor",
    Transition => "transition",
}

const PADDING_SIDES: [StyleProperty; 4] = [
    StyleProperty::PaddingTop,
    StyleProperty::PaddingRight,
    StyleProperty::PaddingBottom,
    StyleProperty::PaddingLeft,
];

const MARGIN_SIDES: [StyleProperty; 4] = [
    StyleProperty::MarginTop,
    StyleProperty::MarginRight,
    StyleProperty::MarginBottom,
    StyleProperty::MarginLeft,
];

const BORDER_PARTS: [StyleProperty; 3] = [
    StyleProperty::BorderWidth,
    StyleProperty::BorderStyle,
    StyleProperty::BorderColor,
];

impl StyleProperty {
    /// Hyphenated CSS property name
    pub fn css_name(&self) -> String {
        let name = self.name();
        let mut css = String::with_capacity(name.len() + 4);
        for ch in name.chars() {
            if ch.is_ascii_uppercase() {
                css.push('-');
                css.push(ch.to_ascii_lowercase());
            } else {
                css.push(ch);
            }
        }
        css
    }

    /// Constituents replaced by this shorthand
    pub fn longhands(&self) -> &'static [StyleProperty] {
        match self {
            StyleProperty::Padding => &PADDING_SIDES,
            StyleProperty::Margin => &MARGIN_SIDES,
            StyleProperty::Border => &BORDER_PARTS,
            _ => &[],
        }
    }

    /// Shorthand this property is a constituent of
    pub fn shorthand(&self) -> Option<StyleProperty> {
        if PADDING_SIDES.contains(self) {
            Some(StyleProperty::Padding)
        } else if MARGIN_SIDES.contains(self) {
            Some(StyleProperty::Margin)
        } else if BORDER_PARTS.contains(self) {
            Some(StyleProperty::Border)
        } else {
            None
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleProperty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleProperty::ALL
            .iter()
            .copied()
            .find(|property| property.name() == s)
            .ok_or_else(|| ModelError::UnknownStyleProperty(s.to_string()))
    }
}

/// Style record of a single element. Also used as a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    properties: BTreeMap<StyleProperty, String>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ElementStyle::set`]
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.properties.get(&property).map(String::as_str)
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.properties.contains_key(&property)
    }

    /// Raw write, no reconciliation
    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        self.properties.insert(property, value.into());
    }

    pub fn set_if_absent(&mut self, property: StyleProperty, value: &str) {
        self.properties
            .entry(property)
            .or_insert_with(|| value.to_string());
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<String> {
        self.properties.remove(&property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.properties
            .iter()
            .map(|(property, value)| (*property, value.as_str()))
    }

    /// Apply a partial update with shorthand/longhand reconciliation.
    ///
    /// Properties absent from `patch` are left untouched.
    pub fn merge(&mut self, patch: &ElementStyle) {
        let mut border_part_set = false;

        for (property, value) in patch.iter() {
            if value.is_empty() {
                self.properties.remove(&property);
                continue;
            }

            for longhand in property.longhands() {
                self.properties.remove(longhand);
            }
            if let Some(shorthand) = property.shorthand() {
                self.properties.remove(&shorthand);
                border_part_set |= shorthand == StyleProperty::Border;
            }

            self.properties.insert(property, value.to_string());
        }

        if border_part_set {
            self.rebuild_border();
        }
    }

    fn rebuild_border(&mut self) {
        let parts: Option<Vec<&str>> = BORDER_PARTS.iter().map(|part| self.get(*part)).collect();
        if let Some(parts) = parts {
            let border = parts.join(" ");
            self.properties.insert(StyleProperty::Border, border);
        }
    }
}

impl FromIterator<(StyleProperty, String)> for ElementStyle {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, String)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ElementStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (property, value) in &self.properties {
            map.serialize_entry(property.name(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut style = ElementStyle::default();

        for (key, value) in raw {
            let property = match key.parse::<StyleProperty>() {
                Ok(property) => property,
                Err(_) => {
                    warn!(property = %key, "Skipping unknown style property");
                    continue;
                }
            };

            let value = match value {
                // An empty value means the property is unset
                serde_json::Value::String(s) if s.is_empty() => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => continue,
                other => {
                    warn!(property = %key, value = %other, "Skipping non-scalar style value");
                    continue;
                }
            };

            style.properties.insert(property, value);
        }

        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_names() {
        assert_eq!(StyleProperty::Display.css_name(), "display");
        assert_eq!(StyleProperty::PaddingTop.css_name(), "padding-top");
        assert_eq!(StyleProperty::ZIndex.css_name(), "z-index");
        assert_eq!(
            StyleProperty::PaddingInlineStart.css_name(),
            "padding-inline-start"
        );
    }

    #[test]
    fn test_property_names_are_unique() {
        for (i, a) in StyleProperty::ALL.iter().enumerate() {
            for b in &StyleProperty::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
            assert_eq!(a.name().parse::<StyleProperty>().unwrap(), *a);
        }
    }

    #[test]
    fn test_border_shorthand_clears_parts() {
        let mut style = ElementStyle::new()
            .with(StyleProperty::BorderWidth, "2px")
            .with(StyleProperty::BorderStyle, "dotted");

        style.merge(&ElementStyle::new().with(StyleProperty::Border, "1px solid red"));

        assert_eq!(style.get(StyleProperty::Border), Some("1px solid red"));
        assert!(!style.contains(StyleProperty::BorderWidth));
        assert!(!style.contains(StyleProperty::BorderStyle));
        assert!(!style.contains(StyleProperty::BorderColor));
    }

    #[test]
    fn test_border_rebuilt_from_parts() {
        let mut style = ElementStyle::new()
            .with(StyleProperty::BorderWidth, "1px")
            .with(StyleProperty::BorderStyle, "solid");

        style.merge(&ElementStyle::new().with(StyleProperty::BorderColor, "blue"));

        assert_eq!(style.get(StyleProperty::Border), Some("1px solid blue"));
        assert_eq!(style.get(StyleProperty::BorderWidth), Some("1px"));
        assert_eq!(style.get(StyleProperty::BorderStyle), Some("solid"));
        assert_eq!(style.get(StyleProperty::BorderColor), Some("blue"));
    }

    #[test]
    fn test_border_part_clears_shorthand_until_complete() {
        let mut style = ElementStyle::new().with(StyleProperty::Border, "1px solid red");

        style.merge(&ElementStyle::new().with(StyleProperty::BorderColor, "green"));

        assert!(!style.contains(StyleProperty::Border));
        assert_eq!(style.get(StyleProperty::BorderColor), Some("green"));
    }

    #[test]
    fn test_padding_and_margin_reconciliation() {
        let mut style = ElementStyle::new()
            .with(StyleProperty::PaddingTop, "1px")
            .with(StyleProperty::PaddingLeft, "2px")
            .with(StyleProperty::Margin, "8px");

        style.merge(
            &ElementStyle::new()
                .with(StyleProperty::Padding, "4px")
                .with(StyleProperty::MarginBottom, "3px"),
        );

        assert_eq!(style.get(StyleProperty::Padding), Some("4px"));
        assert!(!style.contains(StyleProperty::PaddingTop));
        assert!(!style.contains(StyleProperty::PaddingLeft));
        assert!(!style.contains(StyleProperty::Margin));
        assert_eq!(style.get(StyleProperty::MarginBottom), Some("3px"));
    }

    #[test]
    fn test_plain_merge_and_empty_unsets() {
        let mut style = ElementStyle::new()
            .with(StyleProperty::Color, "red")
            .with(StyleProperty::Width, "10px")
            .with(StyleProperty::PaddingTop, "2px");

        style.merge(
            &ElementStyle::new()
                .with(StyleProperty::Color, "blue")
                .with(StyleProperty::Width, "")
                .with(StyleProperty::Padding, ""),
        );

        assert_eq!(style.get(StyleProperty::Color), Some("blue"));
        assert!(!style.contains(StyleProperty::Width));
        // An empty shorthand does not wipe the sides
        assert_eq!(style.get(StyleProperty::PaddingTop), Some("2px"));
    }

    #[test]
    fn test_deserialize_tolerates_numbers_and_unknown_keys() {
        let json = r#"{"zIndex": 10, "flex": 1.5, "color": "red", "boxShadow": "none", "width": null}"#;
        let style: ElementStyle = serde_json::from_str(json).unwrap();

        assert_eq!(style.get(StyleProperty::ZIndex), Some("10"));
        assert_eq!(style.get(StyleProperty::Flex), Some("1.5"));
        assert_eq!(style.get(StyleProperty::Color), Some("red"));
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn test_deserialize_skips_empty_values() {
        let json = r#"{"fontSize": "", "margin": "", "color": "red"}"#;
        let style: ElementStyle = serde_json::from_str(json).unwrap();

        assert!(!style.contains(StyleProperty::FontSize));
        assert!(!style.contains(StyleProperty::Margin));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let style = ElementStyle::new().with(StyleProperty::BackgroundColor, "#fff");
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r##"{"backgroundColor":"#fff"}"##);
    }
}
