//! Derives the nested [`ElementTree`] from the flat element map.
//!
//! This feeds live rendering, so it never fails: missing children are
//! skipped, a missing root yields a bare placeholder root, and cycles in a
//! corrupted map are cut.

use std::collections::HashSet;

use pagecraft_model::{Element, ElementTree};
use tracing::warn;

use crate::element_map::ElementMap;

pub fn build_tree(elements: &ElementMap, root_id: &str) -> ElementTree {
    let Some(root) = elements.get(root_id) else {
        warn!(element_id = %root_id, "Root element not found, using fallback tree");
        return ElementTree::fallback_root(root_id);
    };

    let mut path = HashSet::new();
    build_subtree(elements, root, &mut path)
}

fn build_subtree<'a>(
    elements: &'a ElementMap,
    element: &'a Element,
    path: &mut HashSet<&'a str>,
) -> ElementTree {
    path.insert(&element.id);

    let mut children = Vec::with_capacity(element.children.len());
    for child_id in &element.children {
        if path.contains(child_id.as_str()) {
            warn!(element_id = %element.id, child_id = %child_id, "Skipping cyclic child reference");
            continue;
        }
        match elements.get(child_id) {
            Some(child) => children.push(build_subtree(elements, child, path)),
            None => warn!(element_id = %element.id, child_id = %child_id, "Child not found"),
        }
    }

    path.remove(element.id.as_str());
    ElementTree::from_element(element, children)
}
