//! Property-based invariant tests for the element store.
//!
//! Arbitrary edit sequences are replayed against a document and after every
//! step we check:
//!
//! 1. Parent and child links agree, every element reaches the single root
//! 2. A refused mutation leaves elements and history untouched
//! 3. `undo` then `redo` of an accepted mutation is the identity
//! 4. Moving an element into itself or any descendant is always refused

use std::collections::HashSet;

use pagecraft_editor::{
    Document, DocumentOptions, ElementStyle, ElementType, Mutation, MutationError, StyleProperty,
};
use pagecraft_model::IdGenerator;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Edits expressed as picks into the current element list, so every
/// generated sequence stays meaningful as the page changes shape.
#[derive(Debug, Clone)]
enum Op {
    Add { ty: usize, parent: usize },
    Delete(usize),
    Group { parent: usize, a: usize, b: usize },
    Reorder { node: usize, parent: usize, index: usize },
    Style { node: usize, patch: usize },
    Content(usize),
    AddListItem(usize),
    DeleteListItem { list: usize, index: usize },
    ReorderListItem { list: usize, from: usize, to: usize },
    Missing,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..16, any::<usize>()).prop_map(|(ty, parent)| Op::Add { ty, parent }),
        2 => any::<usize>().prop_map(Op::Delete),
        2 => (any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(parent, a, b)| Op::Group { parent, a, b }),
        3 => (any::<usize>(), any::<usize>(), 0usize..8)
            .prop_map(|(node, parent, index)| Op::Reorder { node, parent, index }),
        1 => (any::<usize>(), 0usize..PATCHES.len()).prop_map(|(node, patch)| Op::Style { node, patch }),
        1 => any::<usize>().prop_map(Op::Content),
        1 => any::<usize>().prop_map(Op::AddListItem),
        1 => (any::<usize>(), 0usize..5).prop_map(|(list, index)| Op::DeleteListItem { list, index }),
        1 => (any::<usize>(), 0usize..5, 0usize..6)
            .prop_map(|(list, from, to)| Op::ReorderListItem { list, from, to }),
        1 => Just(Op::Missing),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

const PATCHES: [(StyleProperty, &str); 6] = [
    (StyleProperty::Padding, "8px"),
    (StyleProperty::PaddingTop, "2px"),
    (StyleProperty::BorderWidth, "1px"),
    (StyleProperty::BorderStyle, "solid"),
    (StyleProperty::BorderColor, "red"),
    (StyleProperty::Color, ""),
];

// ── Helpers ─────────────────────────────────────────────────────────────

fn new_doc() -> Document {
    Document::with_options(DocumentOptions {
        history_limit: 0,
        ids: IdGenerator::sequential("p"),
    })
}

fn pick(doc: &Document, n: usize) -> String {
    let elements = doc.element_map();
    let ids: Vec<&str> = elements.iter().map(|element| element.id.as_str()).collect();
    ids[n % ids.len()].to_string()
}

fn pick_list(doc: &Document, n: usize) -> Option<String> {
    let lists: Vec<String> = doc
        .element_map()
        .iter()
        .filter(|element| element.element_type.is_list())
        .map(|element| element.id.clone())
        .collect();
    (!lists.is_empty()).then(|| lists[n % lists.len()].clone())
}

fn to_mutation(doc: &Document, op: &Op) -> Option<Mutation> {
    let mutation = match op {
        Op::Add { ty, parent } => Mutation::AddElement {
            element_type: ElementType::ALL[*ty],
            parent_id: Some(pick(doc, *parent)),
        },
        Op::Delete(node) => Mutation::DeleteElement {
            node_id: pick(doc, *node),
        },
        Op::Group { parent, a, b } => {
            let children = &doc.element(&pick(doc, *parent))?.children;
            if children.is_empty() {
                return None;
            }
            Mutation::GroupElements {
                node_ids: vec![
                    children[a % children.len()].clone(),
                    children[b % children.len()].clone(),
                ],
            }
        }
        Op::Reorder { node, parent, index } => Mutation::ReorderElement {
            node_id: pick(doc, *node),
            new_parent_id: pick(doc, *parent),
            index: *index,
        },
        Op::Style { node, patch } => {
            let (property, value) = PATCHES[*patch];
            Mutation::UpdateStyle {
                node_id: pick(doc, *node),
                style: ElementStyle::new().with(property, value),
            }
        }
        Op::Content(node) => Mutation::UpdateContent {
            node_id: pick(doc, *node),
            content: "Edited".to_string(),
        },
        Op::AddListItem(list) => Mutation::AddListItem {
            list_id: pick_list(doc, *list)?,
            text: None,
        },
        Op::DeleteListItem { list, index } => Mutation::DeleteListItem {
            list_id: pick_list(doc, *list)?,
            index: *index,
        },
        Op::ReorderListItem { list, from, to } => Mutation::ReorderListItem {
            list_id: pick_list(doc, *list)?,
            old_index: *from,
            new_index: *to,
        },
        Op::Missing => Mutation::UpdateContent {
            node_id: "missing".to_string(),
            content: "x".to_string(),
        },
        Op::Undo | Op::Redo => return None,
    };
    Some(mutation)
}

/// Every parent link resolves both ways and every element reaches the root
fn assert_tree_integrity(doc: &Document) {
    let elements = doc.elements();
    let roots: Vec<_> = elements.iter().filter(|e| e.parent_id.is_none()).collect();
    assert_eq!(roots.len(), 1, "exactly one root");
    assert_eq!(roots[0].id, doc.root_id());

    for element in &elements {
        if let Some(parent_id) = &element.parent_id {
            let parent = doc.element(parent_id).expect("parent exists");
            assert_eq!(
                parent.children.iter().filter(|id| *id == &element.id).count(),
                1,
                "{} listed once under {}",
                element.id,
                parent_id
            );
        }
        for child in &element.children {
            let child = doc.element(child).expect("child exists");
            assert_eq!(child.parent_id.as_deref(), Some(element.id.as_str()));
        }

        let mut seen = HashSet::new();
        let mut cursor = element;
        while let Some(parent_id) = &cursor.parent_id {
            assert!(seen.insert(parent_id.clone()), "cycle through {}", parent_id);
            cursor = doc.element(parent_id).expect("ancestor exists");
        }
        assert_eq!(cursor.id, doc.root_id());
    }

    assert_eq!(doc.elements_tree().node_count(), elements.len());
}

fn run(doc: &mut Document, op: &Op) {
    match op {
        Op::Undo => {
            doc.undo();
        }
        Op::Redo => {
            doc.redo();
        }
        _ => {
            let Some(mutation) = to_mutation(doc, op) else {
                return;
            };
            let before = doc.elements();
            let levels = (doc.undo_levels(), doc.redo_levels());

            match doc.apply(mutation) {
                Ok(_) => {
                    let after = doc.elements();
                    assert!(doc.undo());
                    assert_eq!(doc.elements(), before, "undo restores the previous page");
                    assert!(doc.redo());
                    assert_eq!(doc.elements(), after, "redo reapplies the mutation");
                }
                Err(_) => {
                    assert_eq!(doc.elements(), before, "refusal leaves the page unchanged");
                    assert_eq!((doc.undo_levels(), doc.redo_levels()), levels);
                }
            }
        }
    }
    assert_tree_integrity(doc);
}

// ═══════════════════════════════════════════════════════════════════════
// 1-3. Tree integrity, refusals and history over arbitrary sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn edit_sequences_keep_tree_and_history_consistent(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut doc = new_doc();
        for op in &ops {
            run(&mut doc, op);
        }
    }

    #[test]
    fn undoing_everything_restores_seed(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut doc = new_doc();
        let seed = doc.elements();
        for op in &ops {
            run(&mut doc, op);
        }

        while doc.undo() {}
        prop_assert_eq!(doc.elements(), seed);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Cycle guard holds for every tree shape
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn moving_into_own_subtree_is_refused(
        ops in prop::collection::vec(op_strategy(), 1..40),
        index in 0usize..4,
    ) {
        let mut doc = new_doc();
        for op in &ops {
            run(&mut doc, op);
        }

        let tree = doc.elements_tree();
        for element in doc.elements() {
            if element.parent_id.is_none() {
                continue;
            }
            let subtree = tree.find(&element.id).expect("element is in the tree");
            for target in subtree.ids() {
                let result = doc.reorder_element(&element.id, target, index);
                prop_assert_eq!(result, Err(MutationError::CycleDetected));
            }
        }
    }
}
