//! Query a configured showcase collection from the command line.
//!
//! Applies the same search, facet, and flag filters as the site widgets and
//! prints the resulting page either as NDJSON (one catalog item per line) or
//! as a plain table. `--options` lists the selectable values of a facet the
//! way the dropdowns do.

use anyhow::{Context, Result, bail};
use showcase_filter::catalog::model::PRO_FLAG;
use showcase_filter::filter::DEFAULT_PAGE_SIZE;
use showcase_filter::{
    CatalogItem, CatalogView, Collection, FacetCatalog, FacetCode, FacetDimension, FilterState,
    FlagId, ShowcaseConfig, SortOrder, describe_facet_options, logging, parse_facet_selector,
};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::discover()?,
    };

    if args.list {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for entry in &config.collections {
            writeln!(out, "{}\t{}", entry.name, entry.kind.as_str())?;
        }
        return Ok(());
    }

    let Some(name) = args.collection.as_deref() else {
        bail!("--collection is required (use --list to see configured collections)");
    };
    let collection = Collection::load_named(&config, name)?;

    if let Some(dimension) = &args.options {
        return print_options(&collection, dimension, args.format);
    }

    let state = args.filter_state();
    let order = match &args.sort {
        Some(raw) => SortOrder::parse(raw)?,
        None => collection.default_sort().clone(),
    };
    let view = CatalogView::build(collection.items(), collection.labels(), &state, &order);
    tracing::debug!(
        collection = collection.name(),
        matched = view.matched(),
        total = view.total(),
        "query evaluated"
    );

    let page_size = if args.all {
        view.matched().max(1)
    } else {
        args.page_size.unwrap_or_else(|| collection.page_size())
    };
    let page = view.page(args.page, page_size);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            for item in page.items {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        }
        OutputFormat::Table => {
            for item in page.items {
                writeln!(out, "{}", table_row(item, collection.labels()))?;
            }
            if view.is_empty() {
                writeln!(out, "No matches. Try adjusting your search or filters.")?;
            }
        }
    }
    eprintln!(
        "{} of {} items match; page {}/{}",
        view.matched(),
        view.total(),
        page.index + 1,
        page.page_count
    );
    Ok(())
}

fn print_options(
    collection: &Collection,
    dimension: &FacetDimension,
    format: OutputFormat,
) -> Result<()> {
    let options = describe_facet_options(collection.items(), collection.labels(), dimension);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for option in &options {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(option)?)?,
            OutputFormat::Table => {
                writeln!(out, "{}\t{}\t{}", option.code, option.label, option.count)?
            }
        }
    }
    Ok(())
}

fn table_row(item: &CatalogItem, labels: &FacetCatalog) -> String {
    let mut columns = vec![item.name.clone()];
    for (dimension, codes) in &item.facets {
        if codes.is_empty() {
            continue;
        }
        let rendered = codes
            .iter()
            .map(|code| labels.label(dimension, code))
            .collect::<Vec<_>>()
            .join(", ");
        columns.push(format!("{dimension}: {rendered}"));
    }
    let flags: Vec<&str> = item
        .flags
        .iter()
        .filter(|(_, enabled)| **enabled)
        .map(|(flag, _)| flag.as_str())
        .collect();
    if !flags.is_empty() {
        columns.push(format!("[{}]", flags.join(", ")));
    }
    if let Some(rank) = &item.rank {
        columns.push(format!("({rank})"));
    }
    columns.join("\t")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    Json,
    #[default]
    Table,
}

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    collection: Option<String>,
    list: bool,
    search: String,
    toggles: Vec<(FacetDimension, Vec<FacetCode>)>,
    singles: Vec<(FacetDimension, FacetCode)>,
    flags: Vec<FlagId>,
    sort: Option<String>,
    page: usize,
    page_size: Option<usize>,
    all: bool,
    options: Option<FacetDimension>,
    format: OutputFormat,
    verbose: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut parsed = CliArgs::default();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(PathBuf::from(next_value(&mut args, "--config")?))
                }
                "--collection" | "-c" => {
                    parsed.collection = Some(next_value(&mut args, "--collection")?)
                }
                "--list" => parsed.list = true,
                "--search" | "-s" => parsed.search = next_value(&mut args, "--search")?,
                "--facet" | "-f" => {
                    let raw = next_value(&mut args, "--facet")?;
                    parsed.toggles.push(parse_facet_selector(&raw)?);
                }
                "--select" => {
                    let raw = next_value(&mut args, "--select")?;
                    let (dimension, mut codes) = parse_facet_selector(&raw)?;
                    if codes.len() != 1 {
                        bail!("--select takes exactly one code, got '{raw}'");
                    }
                    parsed.singles.push((dimension, codes.remove(0)));
                }
                "--flag" => {
                    let raw = next_value(&mut args, "--flag")?;
                    parsed.flags.push(FlagId::new(raw.trim()));
                }
                "--pro" => parsed.flags.push(FlagId::new(PRO_FLAG)),
                "--sort" => parsed.sort = Some(next_value(&mut args, "--sort")?),
                "--page" => {
                    let raw = next_value(&mut args, "--page")?;
                    let page: usize = raw
                        .parse()
                        .with_context(|| format!("--page expects a positive number, got {raw}"))?;
                    if page == 0 {
                        bail!("--page is 1-based");
                    }
                    parsed.page = page - 1;
                }
                "--page-size" => {
                    let raw = next_value(&mut args, "--page-size")?;
                    let size: usize = raw
                        .parse()
                        .with_context(|| format!("--page-size expects a number, got {raw}"))?;
                    if size == 0 {
                        bail!("--page-size must be at least 1");
                    }
                    parsed.page_size = Some(size);
                }
                "--all" => parsed.all = true,
                "--options" => {
                    let raw = next_value(&mut args, "--options")?;
                    parsed.options = Some(FacetDimension::parse(raw.trim()));
                }
                "--json" => parsed.format = OutputFormat::Json,
                "--table" => parsed.format = OutputFormat::Table,
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(parsed)
    }

    /// Fold the command-line selections into a `FilterState`, in argument order.
    fn filter_state(&self) -> FilterState {
        let mut state = FilterState::new().with_search(self.search.clone());
        for (dimension, codes) in &self.toggles {
            for code in codes {
                state = state.toggle_facet(dimension, code);
            }
        }
        for (dimension, code) in &self.singles {
            state = state.select_single(dimension, code);
        }
        for flag in &self.flags {
            state = state.set_flag(flag, true);
        }
        state
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> String {
    format!(
        "Usage: showcase-query [--config PATH] (--list | --collection NAME [options])\n\n\
Options:\n  \
--search, -s TEXT        Case-insensitive search over names, descriptions, labels, and tags.\n  \
--facet, -f DIM=CODES    Toggle codes in a facet (repeatable; codes comma-separated).\n  \
--select DIM=CODE        Replace a facet's selection with one code (dropdown behaviour).\n  \
--flag NAME              Require a boolean flag (repeatable); --pro is shorthand for --flag pro.\n  \
--sort SORT              name | count:<dim> | rank:complexity | rank:support_level, optional :desc.\n  \
--page N                 1-based page number (default 1).\n  \
--page-size N            Rows per page (default from config, else {DEFAULT_PAGE_SIZE}).\n  \
--all                    Print every match on one page.\n  \
--options DIM            List selectable values of a facet instead of items.\n  \
--json | --table         Output NDJSON or a tab-separated table (default).\n  \
--verbose, -v            Debug logging on stderr (see SHOWCASE_LOG).\n\n\
Examples:\n  \
showcase-query -c tutorials -f services=s3,lambda --pro --sort count:services\n  \
showcase-query -c applications --options services --json\n"
    )
}
