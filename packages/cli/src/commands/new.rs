use super::{open_page, open_repository};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::PageRepository;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page title
    pub title: String,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut repo = open_repository(&config, cwd)?;

    // A new page starts empty and opens on the starter tree
    let page = repo.create(&args.title)?;
    let (page, doc) = open_page(&config, &repo, &page.id)?;
    let page = repo.save(&page.id, doc.elements())?;

    println!(
        "{} Created page {} {}",
        "✓".green(),
        page.title.bright_white().bold(),
        format!("({})", page.id).dimmed()
    );
    println!("  {} layers", page.layers.len());

    Ok(())
}
