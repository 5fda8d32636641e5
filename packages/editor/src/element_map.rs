//! # Element Map
//!
//! Flat, insertion-ordered storage for a page's elements. Structure is
//! expressed through ids (`children`, `parent_id`), so the map doubles as
//! an arena: no element owns another.

use std::collections::{HashMap, HashSet};

use pagecraft_model::{Element, ElementId, ElementType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMap {
    by_id: HashMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl ElementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a persisted list. Later duplicates of an id are dropped.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut map = Self::new();
        for element in elements {
            if map.contains(&element.id) {
                warn!(element_id = %element.id, "Dropping duplicate element id");
                continue;
            }
            map.insert(element);
        }
        map
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.by_id.get_mut(id)
    }

    /// Insert or replace. New ids go to the end of the order.
    pub fn insert(&mut self, element: Element) {
        if !self.by_id.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.by_id.insert(element.id.clone(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = self.by_id.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    pub fn remove_all(&mut self, ids: &HashSet<ElementId>) -> usize {
        let before = self.order.len();
        self.order.retain(|id| !ids.contains(id));
        self.by_id.retain(|id, _| !ids.contains(id));
        before - self.order.len()
    }

    /// Elements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn to_vec(&self) -> Vec<Element> {
        self.iter().cloned().collect()
    }

    pub fn count_where(&self, predicate: impl Fn(&Element) -> bool) -> usize {
        self.iter().filter(|element| predicate(element)).count()
    }

    pub fn count_of_type(&self, element_type: ElementType) -> usize {
        self.count_where(|element| element.element_type == element_type)
    }

    /// `id` plus every element reachable through `children`, in pre-order.
    /// Missing ids are skipped and each id is visited once.
    pub fn descendants(&self, id: &str) -> Vec<ElementId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];

        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(element) = self.by_id.get(&current) else {
                continue;
            };
            stack.extend(element.children.iter().rev().cloned());
            out.push(current);
        }

        out
    }

    /// True if `candidate` is `ancestor` itself or lies beneath it
    pub fn is_within(&self, ancestor: &str, candidate: &str) -> bool {
        self.descendants(ancestor).iter().any(|id| id == candidate)
    }
}

impl Serialize for ElementMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ElementMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Element>::deserialize(deserializer).map(ElementMap::from_elements)
    }
}
