use super::open_repository;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::PageRepository;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print pages as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn list(args: ListArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let repo = open_repository(&config, cwd)?;
    let pages = repo.list()?;

    if args.json {
        let summary: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                serde_json::json!({
                    "id": page.id,
                    "title": page.title,
                    "createdAt": page.created_at,
                    "updatedAt": page.updated_at,
                    "layers": page.layers.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if pages.is_empty() {
        println!("{}", "⚠️  No pages found".yellow());
        return Ok(());
    }

    for page in &pages {
        println!(
            "  {} {} {}",
            page.id.dimmed(),
            page.title.bright_white().bold(),
            format!("{} layers, updated {}", page.layers.len(), format_timestamp(page.updated_at)).dimmed()
        );
    }
    println!();
    println!("{} pages", pages.len());

    Ok(())
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
