use super::{open_page, open_repository};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::CompileOptions;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page to export
    pub page_id: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Indent the generated markup (overrides config)
    #[arg(long)]
    pub pretty: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let repo = open_repository(&config, cwd)?;
    let (page, doc) = open_page(&config, &repo, &args.page_id)?;

    let options = CompileOptions {
        pretty: args.pretty || config.pretty_html,
        ..CompileOptions::default()
    };
    let output = doc.export_html(options);

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let output_file = out_dir.join(&page.id).join("index.html");

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        page.title,
        output_file.display()
    );

    Ok(())
}
