use super::{open_page, open_repository};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_model::ElementTree;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page to print
    pub page_id: String,

    /// Show element ids
    #[arg(long)]
    pub ids: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let repo = open_repository(&config, cwd)?;
    let (page, doc) = open_page(&config, &repo, &args.page_id)?;

    println!("{}", page.title.bright_white().bold());
    for line in outline(&doc.elements_tree(), args.ids) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per element, indented by depth
fn outline(root: &ElementTree, show_ids: bool) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(root, 0, show_ids, &mut lines);
    lines
}

fn push_lines(node: &ElementTree, depth: usize, show_ids: bool, lines: &mut Vec<String>) {
    let tag = node.element_type.tag_name();
    let mut label = node.display_name();
    // Unlabelled elements fall back to their tag, which is already printed
    if label == tag {
        label.clear();
    }

    let mut line = format!("{}{} {}", "  ".repeat(depth), tag.cyan(), label);
    if show_ids {
        line.push_str(&format!(" {}", format!("#{}", node.id).dimmed()));
    }
    lines.push(line.trim_end().to_string());

    for child in &node.children {
        push_lines(child, depth + 1, show_ids, lines);
    }
}
