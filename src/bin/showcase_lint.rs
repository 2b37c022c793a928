//! Validate configured collections and report facet label coverage.
//!
//! Every collection (or the ones named with `--collection`) is loaded through
//! the same path the query tool uses, so schema violations and missing files
//! surface here first. Unlabelled facet codes are reported per dimension;
//! `--strict` turns them into a failure.

use anyhow::{Result, bail};
use showcase_filter::{
    Collection, LabelCoverage, ShowcaseConfig, build_label_coverage, logging,
    require_complete_labels,
};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
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

    let names: Vec<String> = if args.collections.is_empty() {
        config.names().map(str::to_string).collect()
    } else {
        args.collections.clone()
    };

    let mut failures = Vec::new();
    let mut reports = BTreeMap::new();
    for name in &names {
        match Collection::load_named(&config, name) {
            Ok(collection) => {
                let report = build_label_coverage(collection.items(), collection.labels());
                if args.strict {
                    if let Err(err) = require_complete_labels(&report) {
                        failures.push(format!("{name}: {err}"));
                    }
                }
                reports.insert(name.clone(), (collection.items().len(), report));
            }
            Err(err) => failures.push(format!("{name}: {err:#}")),
        }
    }

    if args.json {
        let value: BTreeMap<&String, &BTreeMap<_, LabelCoverage>> = reports
            .iter()
            .map(|(name, (_, report))| (name, report))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (name, (count, report)) in &reports {
            println!("{name}: {count} items");
            for (dimension, coverage) in report {
                let status = if coverage.is_complete() {
                    "ok".to_string()
                } else {
                    format!("{} unlabelled", coverage.unlabelled.len())
                };
                println!(
                    "  {dimension}: {} labelled, {status}",
                    coverage.labelled.len()
                );
                for code in &coverage.unlabelled {
                    let users = coverage
                        .referenced_by
                        .get(code)
                        .map(|names| names.join(", "))
                        .unwrap_or_default();
                    println!("    - {code} (used by {users})");
                }
            }
        }
    }

    if !failures.is_empty() {
        bail!("{} collection(s) failed:\n{}", failures.len(), failures.join("\n"));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    collections: Vec<String>,
    strict: bool,
    json: bool,
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
                    let value = next_value(&mut args, "--config")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--collection" | "-c" => {
                    let value = next_value(&mut args, "--collection")?;
                    parsed.collections.extend(showcase_filter::split_list(&value));
                }
                "--strict" => parsed.strict = true,
                "--json" => parsed.json = true,
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

fn usage() -> &'static str {
    "Usage: showcase-lint [--config PATH] [--collection NAME[,NAME]] [--strict] [--json] [--verbose]\n\
Loads each configured collection, validating files against the bundled schemas, and reports facet codes without labels.\n\
--strict fails when any code is unlabelled.\n"
}
