use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use py_license_lister::cli::{Cli, Options, OutputFormat};
use py_license_lister::config::load_config;
use py_license_lister::fields::{output_fields, project_row, sort_field};
use py_license_lister::packages::{
    collect_records, find_site_packages_path, read_distributions, summarize,
};
use py_license_lister::render::{renderer_for, sort_rows, Table};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let opts = Options::resolve(cli, &config)?;

    // The whole string is assembled before anything is written, so a
    // policy violation mid-enumeration never leaves partial output.
    let output_string = create_output_string(&opts)?;

    if let Some(path) = &opts.output_file {
        fs::write(path, &output_string)
            .with_context(|| format!("check path: --output-file {}", path.display()))?;
        println!("created path: {}", path.display());
        return Ok(());
    }

    println!("{}", output_string);
    for warning in advisory_warnings(&opts) {
        eprintln!("{}", warning);
    }

    Ok(())
}

/// Run the full pipeline: enumerate, resolve/filter, project, sort,
/// render.
fn create_output_string(opts: &Options) -> Result<String> {
    let site_packages = find_site_packages_path(opts.python_path.clone())?;
    let dists = read_distributions(&site_packages)?;
    let records = collect_records(opts, &dists)?;

    let fields = output_fields(opts);
    let rows: Vec<Vec<String>> = if opts.summary {
        summarize(&records)
            .into_iter()
            .map(|(count, license)| vec![count.to_string(), license])
            .collect()
    } else {
        records
            .iter()
            .map(|record| project_row(record, &fields, opts.from))
            .collect()
    };

    let mut table = Table { fields, rows };
    sort_rows(&mut table, sort_field(opts));

    renderer_for(opts.format).render(&table)
}

fn advisory_warnings(opts: &Options) -> Vec<String> {
    let mut warnings = Vec::new();

    if opts.with_license_file && opts.format != OutputFormat::Json {
        warnings.push(warn(
            "Due to the length of these fields, this option is best paired with --format=json.",
        ));
    }
    if opts.summary && (opts.with_authors || opts.with_urls) {
        warnings.push(warn(
            "When using --summary, only --order=count or --order=license has an effect, \
             and --with-authors and --with-urls will be ignored.",
        ));
    }

    warnings
}

// Yellow ANSI escape
fn warn(text: &str) -> String {
    format!("\x1b[33m{}\x1b[0m", text)
}
