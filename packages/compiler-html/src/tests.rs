use crate::{compile_document, compile_to_html, display_text, CompileOptions, PLACEHOLDER_IMAGE_SRC};
use pagecraft_model::{Element, ElementTree, ElementType, PLACEHOLDER_TEXT};

fn node(id: &str, ty: ElementType, content: Option<&str>, children: Vec<ElementTree>) -> ElementTree {
    let mut element = Element::new(id, ty).with_parent("root");
    element.content = content.map(str::to_string);
    ElementTree::from_element(&element, children)
}

fn root(children: Vec<ElementTree>) -> ElementTree {
    ElementTree::from_element(&Element::new("root", ElementType::Div), children)
}

#[test]
fn test_compile_paragraph() {
    let tree = root(vec![node("p1", ElementType::P, Some("Hello"), vec![])]);
    let html = compile_to_html(&tree, CompileOptions::default());

    assert_eq!(
        html,
        r#"<div class="element-root"><p class="element-p1">Hello</p></div>"#
    );
}

#[test]
fn test_placeholder_content_falls_back() {
    let tree = root(vec![
        node("p", ElementType::P, Some(PLACEHOLDER_TEXT), vec![]),
        node("h", ElementType::H2, None, vec![]),
        node("b", ElementType::Button, Some(""), vec![]),
        node("s", ElementType::Span, None, vec![]),
    ]);
    let html = compile_to_html(&tree, CompileOptions::default());

    assert!(html.contains(r#"<p class="element-p">Paragraph text</p>"#));
    assert!(html.contains(r#"<h2 class="element-h">H2 Heading</h2>"#));
    assert!(html.contains(r#"<button class="element-b">Button</button>"#));
    assert!(html.contains(r#"<span class="element-s"></span>"#));
}

#[test]
fn test_display_text_only_strips_placeholder_once() {
    let tree = node("p", ElementType::P, Some("Intro: Double click to edit text"), vec![]);
    assert_eq!(display_text(&tree), "Intro: ");
}

#[test]
fn test_links_always_point_nowhere() {
    let tree = root(vec![node("a", ElementType::A, Some("Docs"), vec![])]);
    let html = compile_to_html(&tree, CompileOptions::default());

    assert!(html.contains(r##"<a class="element-a" href="#" target="_blank">Docs</a>"##));
}

#[test]
fn test_images_use_placeholder_source() {
    let tree = root(vec![node("i", ElementType::Img, Some("Image 1"), vec![])]);
    let html = compile_to_html(&tree, CompileOptions::default());

    assert!(html.contains(&format!(
        r#"<img class="element-i" src="{}" alt="Image">"#,
        PLACEHOLDER_IMAGE_SRC
    )));
    assert!(!html.contains("Image 1"));
}

#[test]
fn test_list_items_then_children() {
    let mut list = node(
        "l",
        ElementType::Ol,
        Some("List 1"),
        vec![node("li", ElementType::Li, Some("Nested"), vec![])],
    );
    list.list_items = Some(vec!["First".to_string(), "Second".to_string()]);
    let html = compile_to_html(&root(vec![list]), CompileOptions::default());

    let expected = concat!(
        r#"<ol class="element-l" style="list-style-type: decimal;">"#,
        r#"<li style="display: list-item; word-break: break-word; overflow-wrap: break-word;">First</li>"#,
        r#"<li style="display: list-item; word-break: break-word; overflow-wrap: break-word;">Second</li>"#,
        r#"<li class="element-li">Nested</li>"#,
        "</ol>"
    );
    assert!(html.contains(expected), "got: {}", html);
}

#[test]
fn test_empty_list_gets_fallback_items() {
    let mut list = node("u", ElementType::Ul, None, vec![]);
    list.list_items = Some(vec![]);
    let html = compile_to_html(&root(vec![list]), CompileOptions::default());

    assert!(html.contains(r#"style="list-style-type: disc;""#));
    assert!(html.contains(">List item 1</li>"));
    assert!(html.contains(">List item 2</li>"));
    assert!(html.contains(">List item 3</li>"));
}

#[test]
fn test_containers_do_not_emit_their_label() {
    let mut group = node("g", ElementType::Div, Some("Group 1"), vec![]);
    group.is_group = true;
    let html = compile_to_html(&root(vec![group]), CompileOptions::default());

    assert!(html.contains(r#"<div class="element-g"></div>"#));
    assert!(!html.contains("Group 1"));
}

#[test]
fn test_content_is_escaped() {
    let mut list = node("u", ElementType::Ul, None, vec![]);
    list.list_items = Some(vec!["a < b".to_string()]);
    let tree = root(vec![node("p", ElementType::P, Some("<script>"), vec![]), list]);
    let html = compile_to_html(&tree, CompileOptions::default());

    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains(">a &lt; b</li>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_pretty_output_indents_children() {
    let tree = root(vec![node(
        "s",
        ElementType::Section,
        None,
        vec![node("p", ElementType::P, Some("Hi"), vec![])],
    )]);
    let options = CompileOptions {
        pretty: true,
        ..Default::default()
    };
    let html = compile_to_html(&tree, options);

    let expected = "<div class=\"element-root\">\n  <section class=\"element-s\">\n    <p class=\"element-p\">Hi</p>\n  </section>\n</div>\n";
    assert_eq!(html, expected);
}

#[test]
fn test_document_wrapper() {
    let doc = compile_document("p { color: red; }", "<p>Hi</p>");

    assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    assert!(doc.contains("<meta charset=\"UTF-8\">"));
    assert!(doc.contains("<title>Page Builder Export</title>"));
    assert!(doc.contains("<style>\np { color: red; }\n  </style>"));
    assert!(doc.contains("<div class=\"page-container\">\n<p>Hi</p>\n</div>"));
    assert!(doc.ends_with("</html>"));
}
