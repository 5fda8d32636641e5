//! Default styles, labels and the starter page.

use pagecraft_model::{
    Element, ElementId, ElementStyle, ElementType, IdGenerator, StyleProperty, PLACEHOLDER_TEXT,
};

use crate::element_map::ElementMap;

/// Entries given to a freshly added `ul`/`ol`
pub const DEFAULT_LIST_ITEMS: [&str; 3] = ["List item 1", "List item 2", "List item 3"];

fn base_style() -> ElementStyle {
    ElementStyle::new()
        .with(StyleProperty::Display, "flex")
        .with(StyleProperty::FlexDirection, "column")
        .with(StyleProperty::Padding, "0")
        .with(StyleProperty::Margin, "0")
}

/// Style for a newly added element of `element_type`
pub fn default_style(element_type: ElementType) -> ElementStyle {
    use StyleProperty::*;

    let style = base_style();
    match element_type {
        ElementType::Div | ElementType::Section => style
            .with(Padding, "4px")
            .with(MinHeight, "20px")
            .with(MinWidth, "20px"),
        ElementType::H1 => style
            .with(FontSize, "2rem")
            .with(FontWeight, "bold")
            .with(Margin, "0 0 1rem 0"),
        ElementType::H2 => style
            .with(FontSize, "1.75rem")
            .with(FontWeight, "bold")
            .with(Margin, "0 0 0.875rem 0"),
        ElementType::H3 => style
            .with(FontSize, "1.5rem")
            .with(FontWeight, "bold")
            .with(Margin, "0 0 0.75rem 0"),
        ElementType::P => style.with(FontSize, "1rem").with(Margin, "0 0 1rem 0"),
        ElementType::A => style
            .with(Color, "#1890ff")
            .with(TextDecoration, "none"),
        ElementType::Button => style
            .with(Padding, "0.5rem 1rem")
            .with(BackgroundColor, "#212529")
            .with(Color, "white")
            .with(Border, "none")
            .with(BorderRadius, "4px")
            .with(Cursor, "pointer")
            .with(Width, "100%")
            .with(TextAlign, "center"),
        ElementType::Img => style
            .with(Width, "150px")
            .with(Height, "auto")
            .with(ObjectFit, "contain"),
        ElementType::Ul | ElementType::Ol => style
            .with(PaddingLeft, "30px")
            .with(ListStylePosition, "outside")
            .with(
                ListStyleType,
                if element_type == ElementType::Ul { "disc" } else { "decimal" },
            )
            .with(MaxWidth, "100%")
            .with(WordBreak, "break-word")
            .with(OverflowWrap, "break-word")
            .with(Margin, "0 0 1rem 0"),
        ElementType::Li => style
            .with(Display, "list-item")
            .with(MaxWidth, "100%")
            .with(WordBreak, "break-word")
            .with(OverflowWrap, "break-word")
            .with(MarginLeft, "0"),
        ElementType::Span => style.with(Display, "inline"),
        ElementType::H4 | ElementType::H5 | ElementType::H6 => style,
    }
}

/// Style of the synthetic container created by grouping
pub fn group_style() -> ElementStyle {
    base_style()
        .with(StyleProperty::FlexDirection, "row")
        .with(StyleProperty::Padding, "4px")
}

/// Label for the next element of `element_type`, numbered from the
/// elements already on the page
pub fn default_content(
    element_type: ElementType,
    elements: &ElementMap,
    root_id: &str,
) -> Option<String> {
    let next = |label: &str, count: usize| Some(format!("{} {}", label, count + 1));

    match element_type {
        ElementType::Div => next(
            "Div",
            elements.count_where(|e| e.element_type == ElementType::Div && e.id != root_id),
        ),
        ElementType::Section => next("Section", elements.count_of_type(ElementType::Section)),
        ElementType::Span => next("Span", elements.count_of_type(ElementType::Span)),
        ElementType::Button => next("Button", elements.count_of_type(ElementType::Button)),
        ElementType::A => next("Link", elements.count_of_type(ElementType::A)),
        ElementType::Img => next("Image", elements.count_of_type(ElementType::Img)),
        ElementType::Ul | ElementType::Ol => {
            next("List", elements.count_where(|e| e.element_type.is_list()))
        }
        ElementType::Li => next("Item", elements.count_of_type(ElementType::Li)),
        _ => Some(PLACEHOLDER_TEXT.to_string()),
    }
}

pub fn default_list_items(element_type: ElementType) -> Option<Vec<String>> {
    element_type
        .is_list()
        .then(|| DEFAULT_LIST_ITEMS.iter().map(|item| item.to_string()).collect())
}

/// Starter page: a root container holding a navbar with a logo and three links
pub fn seed_elements(ids: &mut IdGenerator) -> (ElementId, Vec<Element>) {
    use StyleProperty::*;

    let root_id = ids.new_id();
    let navbar_id = ids.new_id();
    let logo_id = ids.new_id();
    let links_id = ids.new_id();
    let link_ids: Vec<ElementId> = (0..3).map(|_| ids.new_id()).collect();

    let root = Element::new(root_id.clone(), ElementType::Div)
        .with_content("Page Container")
        .with_style(base_style().with(Width, "100%").with(Height, "100%"))
        .with_children(vec![navbar_id.clone()]);

    let navbar = Element::new(navbar_id.clone(), ElementType::Div)
        .with_content("Navbar")
        .with_parent(root_id.clone())
        .with_children(vec![logo_id.clone(), links_id.clone()])
        .with_style(
            ElementStyle::new()
                .with(Display, "flex")
                .with(FlexDirection, "row")
                .with(JustifyContent, "space-between")
                .with(AlignItems, "center")
                .with(Padding, "16px")
                .with(BackgroundColor, "#f8f9fa")
                .with(Width, "100%")
                .with(BorderBottom, "1px solid #dee2e6"),
        );

    let logo = Element::new(logo_id, ElementType::H1)
        .with_content("Logo")
        .with_parent(navbar_id.clone())
        .with_style(
            ElementStyle::new()
                .with(Margin, "0")
                .with(FontSize, "24px")
                .with(FontWeight, "bold")
                .with(Color, "#333"),
        );

    let links = Element::new(links_id.clone(), ElementType::Div)
        .with_content("Links Container")
        .with_parent(navbar_id)
        .with_children(link_ids.clone())
        .with_style(
            ElementStyle::new()
                .with(Display, "flex")
                .with(FlexDirection, "row")
                .with(Gap, "20px"),
        );

    let mut elements = vec![root, navbar, logo, links];
    for (id, label) in link_ids.into_iter().zip(["Home", "About", "Contact"]) {
        elements.push(
            Element::new(id, ElementType::A)
                .with_content(label)
                .with_parent(links_id.clone())
                .with_style(
                    ElementStyle::new()
                        .with(Color, "#0d6efd")
                        .with(TextDecoration, "none")
                        .with(FontSize, "16px"),
                ),
        );
    }

    (root_id, elements)
}
