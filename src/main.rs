use clap::Parser;
use env_logger::Env;
use itertools::Itertools;
use pagekit::{LogSink, Paginator, PaginatorConfig};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use wrap_context::{arg_context, raw_context};

/// Page, block and row calculator
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Total number of rows
    #[arg(value_name = "COUNT")]
    count: usize,

    /// Requested page, clamped to the last page
    #[arg(short, long)]
    page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    per_page: Option<usize>,

    /// Pages per navigation block
    #[arg(long)]
    per_block: Option<usize>,

    /// JSON object with pagination parameters, flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also print the offsets from the current page through the last one
    #[arg(short, long)]
    offsets: bool,
}

#[derive(Serialize)]
struct Summary {
    count: usize,
    page: usize,
    per_page: usize,
    per_block: usize,
    pages: usize,
    block: usize,
    blocks: usize,
    first_page_in_block: usize,
    last_page_in_block: usize,
    pages_last_block: usize,
    is_first_page: bool,
    is_last_page: bool,
    is_last_block: bool,
    first_row: usize,
    last_row: usize,
    rows_in_last_page: usize,
    navigation: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    offsets: Option<Vec<(usize, usize)>>,
}

impl From<&Paginator> for Summary {
    fn from(paginator: &Paginator) -> Self {
        Self {
            count: paginator.count(),
            page: paginator.page(),
            per_page: paginator.per_page(),
            per_block: paginator.per_block(),
            pages: paginator.pages(),
            block: paginator.block(),
            blocks: paginator.blocks(),
            first_page_in_block: paginator.first_page_in_block(),
            last_page_in_block: paginator.last_page_in_block(),
            pages_last_block: paginator.pages_last_block(),
            is_first_page: paginator.is_first_page(),
            is_last_page: paginator.is_last_page(),
            is_last_block: paginator.is_last_block(),
            first_row: paginator.first_row(),
            last_row: paginator.last_row(),
            rows_in_last_page: paginator.rows_in_last_page(),
            navigation: navigation(paginator),
            offsets: None,
        }
    }
}

/// Pages of the current block with the current one bracketed, e.g. `1 2 [3] 4`.
///
/// Stops at the last page, since the block range can run past it.
fn navigation(paginator: &Paginator) -> String {
    paginator
        .pages_in_block()
        .take_while(|page| *page <= paginator.pages())
        .map(|page| {
            if page == paginator.page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .join(" ")
}

fn load_config(path: &Path) -> anyhow::Result<PaginatorConfig> {
    let reader = BufReader::new(arg_context!(File::open(path))?);
    let value: Value = raw_context!(serde_json::from_reader(reader))?;
    let config = raw_context!(PaginatorConfig::from_json(&value, &LogSink))?;

    anyhow::Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => arg_context!(load_config(path))?,
        None => PaginatorConfig::default(),
    };

    if let Some(page) = args.page {
        config = config.page_set(page);
    }
    if let Some(per_page) = args.per_page {
        config = config.per_page_set(per_page);
    }
    if let Some(per_block) = args.per_block {
        config = config.per_block_set(per_block);
    }

    let paginator = arg_context!(Paginator::new(args.count, config))?;
    log::debug!("{:?}", paginator);

    let mut summary = Summary::from(&paginator);

    if args.offsets {
        let offsets = if paginator.pages() == 0 {
            Vec::new()
        } else {
            arg_context!(paginator.offsets(paginator.page()))?
                .map(<(usize, usize)>::from)
                .collect()
        };
        summary.offsets = Some(offsets);
    }

    println!("{}", raw_context!(serde_json::to_string_pretty(&summary))?);

    anyhow::Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paginator(count: usize, page: usize) -> Paginator {
        Paginator::new(count, PaginatorConfig::default().page_set(page)).unwrap()
    }

    #[test]
    fn navigation_stops_at_last_page() {
        assert_eq!(navigation(&paginator(25, 2)), "1 [2] 3");
        assert_eq!(navigation(&paginator(0, 1)), "");
    }

    #[test]
    fn navigation_of_a_full_block() {
        assert_eq!(navigation(&paginator(1000, 13)), "11 12 [13] 14 15 16 17 18 19 20");
    }
}
