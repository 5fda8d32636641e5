pub mod apply;
pub mod export;
pub mod init;
pub mod list;
pub mod new;
pub mod tree;

pub use apply::{apply, ApplyArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use list::{list, ListArgs};
pub use new::{new, NewArgs};
pub use tree::{tree, TreeArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use pagecraft_editor::{Document, JsonFileRepository, Page, PageRepository};

fn open_repository(config: &Config, cwd: &str) -> Result<JsonFileRepository> {
    let dir = config.get_pages_dir(cwd);
    JsonFileRepository::open(&dir)
        .with_context(|| format!("Cannot open pages directory {}", dir.display()))
}

/// Fetch a page and load it into a fresh document
fn open_page(config: &Config, repo: &JsonFileRepository, page_id: &str) -> Result<(Page, Document)> {
    let page = repo.get(page_id)?;
    let mut doc = Document::with_options(config.document_options());
    doc.open_page(&page);
    Ok((page, doc))
}
