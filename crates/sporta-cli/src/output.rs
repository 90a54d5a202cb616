//! Output formatting helpers.

use anyhow::{Result, bail};
use colored::Colorize;
use serde::Serialize;

use sporta_core::ListSnapshot;
use sporta_core::list::{PageLink, page_window};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the rows of a list screen, one per line, then its pager.
///
/// A failed fetch becomes the command's error; an empty list prints a hint.
pub fn rows<T: Serialize>(
    snapshot: &ListSnapshot<T>,
    as_json: bool,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if let Some(message) = &snapshot.error {
        bail!("{message}");
    }

    if snapshot.items.is_empty() {
        eprintln!("{}", "No results.".dimmed());
    }

    for item in &snapshot.items {
        if as_json {
            json(item)?;
        } else {
            println!("{}", line(item));
        }
    }

    if snapshot.total_pages > 1 {
        eprintln!();
        eprintln!("{}", pager(snapshot.page, snapshot.total_pages));
    }
    Ok(())
}

/// Numbered page links with the current page highlighted.
pub fn pager(page: u32, total_pages: u32) -> String {
    page_window(page, total_pages)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == page => format!("[{n}]").bold().to_string(),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".dimmed().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
