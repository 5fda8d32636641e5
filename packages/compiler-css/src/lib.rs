use pagecraft_model::{Element, ElementStyle, ElementType, StyleProperty};
use tracing::debug;

/// Stylesheet emitted ahead of the per-element rules
pub const BASE_CSS: &str = r#"
/* Base styles for consistent text rendering */
* {
  box-sizing: border-box;
}

body {
  font-family: 'Arial', sans-serif;
  line-height: 1.5;
  color: #333;
  margin: 0;
  padding: 0;
}

.page-container {
  width: 100%;
  max-width: none !important;
}

h1 {
  font-size: 2rem;
  margin-bottom: 1rem;
}

h2 {
  font-size: 1.75rem;
  margin-bottom: 0.875rem;
}

h3 {
  font-size: 1.5rem;
  margin-bottom: 0.75rem;
}

p {
  font-size: 1rem;
  margin-bottom: 1rem;
}

a {
  color: #1890ff;
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

button {
  font-size: 1rem;
  padding: 0.5rem 1rem;
  background-color: #212529;
  color: white;
  border: none;
  border-radius: 4px;
  cursor: pointer;
  width: 100%;
  text-align: center;
}

ul, ol {
  padding-left: 30px;
  margin-bottom: 1rem;
  list-style-position: outside;
  max-width: 100%;
  word-break: break-word;
  overflow-wrap: break-word;
}

li {
  max-width: 100%;
  word-break: break-word;
  overflow-wrap: break-word;
  margin-left: 0;
  display: list-item;
}

img {
  max-width: 100%;
  height: auto;
}
"#;

/// Borders the editor draws around selected or hovered elements
const SELECTION_BORDERS: [&str; 2] = ["1px dashed #1890ff", "2px solid #1890ff"];

const SELECTION_BACKGROUND: &str = "#1890ff";

/// Compile a page's flat element list to a stylesheet, one rule per element
pub fn compile_to_css(elements: &[Element]) -> String {
    let rules: Vec<String> = elements.iter().map(compile_rule).collect();
    debug!(rules = rules.len(), "Compiled element rules");

    format!("{}\n\n{}", BASE_CSS, rules.join("\n\n"))
}

/// `.element-<id> { ... }` for a single element
pub fn compile_rule(element: &Element) -> String {
    let style = export_style(element);
    let mut rule = format!(".element-{} {{\n", element.id);
    for (property, value) in style.iter() {
        rule.push_str(&format!("  {}: {};\n", property.css_name(), value));
    }
    rule.push('}');
    rule
}

/// The element's style without editing chrome, with per-type defaults filled in
pub fn export_style(element: &Element) -> ElementStyle {
    let mut style = element.style.clone();

    style.remove(StyleProperty::Outline);
    style.remove(StyleProperty::ZIndex);
    if style
        .get(StyleProperty::Border)
        .is_some_and(|border| SELECTION_BORDERS.contains(&border))
    {
        style.remove(StyleProperty::Border);
    }
    if style.get(StyleProperty::Background) == Some(SELECTION_BACKGROUND) {
        style.remove(StyleProperty::Background);
    }

    apply_type_defaults(element, &mut style);

    if style.contains(StyleProperty::FlexDirection) {
        style.set_if_absent(StyleProperty::Display, "flex");
    }

    style
}

fn apply_type_defaults(element: &Element, style: &mut ElementStyle) {
    let ty = element.element_type;

    if ty.is_container() {
        if element.children.is_empty() {
            style.set_if_absent(StyleProperty::MinHeight, "20px");
            style.set_if_absent(StyleProperty::MinWidth, "20px");
        }
        style.set_if_absent(StyleProperty::Padding, "4px");
    }

    match ty {
        ElementType::Ul | ElementType::Ol => {
            style.set_if_absent(StyleProperty::ListStylePosition, "outside");
            style.set_if_absent(StyleProperty::PaddingLeft, "30px");
            style.set_if_absent(StyleProperty::MaxWidth, "100%");
            style.set_if_absent(StyleProperty::WordBreak, "break-word");
            style.set_if_absent(StyleProperty::OverflowWrap, "break-word");
            let marker = if ty == ElementType::Ul { "disc" } else { "decimal" };
            style.set_if_absent(StyleProperty::ListStyleType, marker);
            style.set_if_absent(StyleProperty::Margin, "0 0 1rem 0");
        }

        ElementType::Li => {
            style.set_if_absent(StyleProperty::MaxWidth, "100%");
            style.set_if_absent(StyleProperty::WordBreak, "break-word");
            style.set_if_absent(StyleProperty::OverflowWrap, "break-word");
            style.set_if_absent(StyleProperty::MarginLeft, "0");
            style.set_if_absent(StyleProperty::Display, "list-item");
        }

        ElementType::Img => {
            style.set_if_absent(StyleProperty::Width, "150px");
            style.set_if_absent(StyleProperty::Height, "auto");
            style.set_if_absent(StyleProperty::ObjectFit, "contain");
        }

        ElementType::P => {
            style.set_if_absent(StyleProperty::FontSize, "1rem");
            style.set_if_absent(StyleProperty::Margin, "0 0 1rem 0");
        }

        ElementType::A => {
            style.set_if_absent(StyleProperty::Color, "#1890ff");
            style.set_if_absent(StyleProperty::TextDecoration, "none");
        }

        ElementType::Button => {
            style.set_if_absent(StyleProperty::Padding, "0.5rem 1rem");
            if !style.contains(StyleProperty::Background) {
                style.set_if_absent(StyleProperty::BackgroundColor, "#212529");
            }
            style.set_if_absent(StyleProperty::Color, "white");
            style.set_if_absent(StyleProperty::Border, "none");
            style.set_if_absent(StyleProperty::BorderRadius, "4px");
            style.set_if_absent(StyleProperty::Cursor, "pointer");
            style.set_if_absent(StyleProperty::Width, "100%");
            style.set_if_absent(StyleProperty::TextAlign, "center");
        }

        _ => {}
    }

    if let Some(level) = ty.heading_level() {
        let font_size = match level {
            1 => "2rem",
            2 => "1.75rem",
            3 => "1.5rem",
            4 => "1.25rem",
            5 => "1.1rem",
            _ => "1rem",
        };
        let margin = match level {
            1 => "0 0 1rem 0",
            2 => "0 0 0.875rem 0",
            3 => "0 0 0.75rem 0",
            _ => "0 0 0.5rem 0",
        };
        style.set_if_absent(StyleProperty::FontSize, font_size);
        style.set_if_absent(StyleProperty::Margin, margin);
        style.set_if_absent(StyleProperty::FontWeight, "bold");
    }
}
