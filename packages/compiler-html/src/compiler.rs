use pagecraft_model::{ElementTree, ElementType, PLACEHOLDER_TEXT};

/// Image source emitted for every `img`; uploads are not part of a page
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://via.placeholder.com/150";

const LIST_ITEM_STYLE: &str = "display: list-item; word-break: break-word; overflow-wrap: break-word;";

const FALLBACK_LIST_ITEMS: [&str; 3] = ["List item 1", "List item 2", "List item 3"];

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Put every tag on its own indented line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Class name tying an element's markup to its generated CSS rule
pub fn class_name(id: &str) -> String {
    format!("element-{}", id)
}

/// Compile a page tree to body markup
pub fn compile_to_html(tree: &ElementTree, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    compile_element(tree, &mut ctx);
    ctx.get_output()
}

/// Wrap compiled CSS and body markup into a standalone document
pub fn compile_document(css: &str, html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Page Builder Export</title>
  <style>
{css}
  </style>
</head>
<body>
<div class="page-container">
{html}
</div>
</body>
</html>"#
    )
}

fn compile_element(element: &ElementTree, ctx: &mut Context) {
    let ty = element.element_type;
    let tag = ty.tag_name();
    let class = class_name(&element.id);

    match ty {
        ElementType::Img => {
            ctx.add_line(&format!(
                "<img class=\"{}\" src=\"{}\" alt=\"Image\">",
                class, PLACEHOLDER_IMAGE_SRC
            ));
        }

        ElementType::Ul | ElementType::Ol => {
            let marker = if ty == ElementType::Ul { "disc" } else { "decimal" };
            let open = format!(
                "<{} class=\"{}\" style=\"list-style-type: {};\">",
                tag, class, marker
            );
            let items: Vec<String> = match &element.list_items {
                Some(items) if !items.is_empty() => items.iter().map(|item| escape_html(item)).collect(),
                _ => FALLBACK_LIST_ITEMS.iter().map(|item| item.to_string()).collect(),
            };
            compile_tag(tag, &open, &items, &element.children, ctx);
        }

        ElementType::A => {
            let open = format!(
                "<a class=\"{}\" href=\"#\" target=\"_blank\">{}",
                class,
                escape_html(&display_text(element))
            );
            compile_tag(tag, &open, &[], &element.children, ctx);
        }

        _ if ty.is_text_bearing() => {
            let open = format!(
                "<{} class=\"{}\">{}",
                tag,
                class,
                escape_html(&display_text(element))
            );
            compile_tag(tag, &open, &[], &element.children, ctx);
        }

        // Containers, groups included, carry no text of their own
        _ => {
            let open = format!("<{} class=\"{}\">", tag, class);
            compile_tag(tag, &open, &[], &element.children, ctx);
        }
    }
}

/// `open` already holds the start tag and any inline text
fn compile_tag(tag: &str, open: &str, items: &[String], children: &[ElementTree], ctx: &mut Context) {
    let close = format!("</{}>", tag);

    if items.is_empty() && children.is_empty() {
        ctx.add_line(&format!("{}{}", open, close));
        return;
    }

    ctx.add_line(open);
    ctx.indent();

    for item in items {
        ctx.add_line(&format!("<li style=\"{}\">{}</li>", LIST_ITEM_STYLE, item));
    }
    for child in children {
        compile_element(child, ctx);
    }

    ctx.dedent();
    ctx.add_line(&close);
}

/// Content with the unedited placeholder removed, or the per-type fallback
pub fn display_text(element: &ElementTree) -> String {
    let cleaned = element
        .content
        .as_deref()
        .map(|content| content.replacen(PLACEHOLDER_TEXT, "", 1))
        .unwrap_or_default();

    if cleaned.is_empty() {
        placeholder_text(element.element_type)
    } else {
        cleaned
    }
}

fn placeholder_text(ty: ElementType) -> String {
    match ty {
        ElementType::P => "Paragraph text".to_string(),
        ElementType::A => "Link text".to_string(),
        ElementType::Button => "Button".to_string(),
        _ if ty.is_heading() => format!("{} Heading", ty.tag_name().to_uppercase()),
        _ => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
