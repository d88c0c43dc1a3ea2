use anyhow::{anyhow, Result};
use clap::Parser;
use encoding_rs::Encoding;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "py-license-lister")]
#[command(about = "Dump the software license list of installed Python packages")]
#[command(version)]
pub struct Cli {
    /// Path to site-packages directory or virtual environment
    #[arg(long, value_name = "PATH")]
    pub python_path: Option<PathBuf>,

    /// Where to find license information: "meta", "classifier", "mixed", "all"
    #[arg(long = "from", value_name = "SOURCE")]
    pub from: Option<String>,

    /// Dump with system packages
    #[arg(short = 's', long)]
    pub with_system: bool,

    /// Dump with package authors
    #[arg(short = 'a', long)]
    pub with_authors: bool,

    /// Dump with package urls
    #[arg(short = 'u', long)]
    pub with_urls: bool,

    /// Dump with short package description
    #[arg(short = 'd', long)]
    pub with_description: bool,

    /// Dump with location of license file and its contents
    #[arg(short = 'l', long)]
    pub with_license_file: bool,

    /// Suppress the license file location when using --with-license-file
    #[arg(long)]
    pub no_license_path: bool,

    /// Dump with location of notice file and its contents when using
    /// --with-license-file
    #[arg(long)]
    pub with_notice_file: bool,

    /// Ignore package names in dumped list
    #[arg(short = 'i', long, value_name = "PKG", num_args = 1..)]
    pub ignore_packages: Vec<String>,

    /// Order by column: "name", "license", "author", "url", "count"
    #[arg(short = 'o', long, value_name = "COL")]
    pub order: Option<String>,

    /// Dump as set format style: "plain", "plain-vertical", "markdown",
    /// "rst", "confluence", "html", "json", "json-license-finder", "csv"
    #[arg(short = 'f', long, value_name = "STYLE")]
    pub format: Option<String>,

    /// Filter input according to code page
    #[arg(long)]
    pub filter_strings: bool,

    /// Specify code page for filtering
    #[arg(long, value_name = "CODEC", default_value = "latin1")]
    pub filter_code_page: String,

    /// Dump summary of each license
    #[arg(long)]
    pub summary: bool,

    /// Save license list to file
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Fail (exit with code 1) on the first occurrence of the licenses of
    /// the semicolon-separated list
    #[arg(long, value_name = "LICENSES")]
    pub fail_on: Option<String>,

    /// Fail (exit with code 1) on the first occurrence of the licenses not
    /// in the semicolon-separated list
    #[arg(long, value_name = "LICENSES")]
    pub allow_only: Option<String>,
}

/// Which metadata field the displayed license is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromSource {
    Meta,
    Classifier,
    Mixed,
    All,
}

impl FromSource {
    /// Resolve case-insensitive labels and short aliases. Unrecognized
    /// labels fall back to the default source.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "meta" | "m" => Self::Meta,
            "classifier" | "c" => Self::Classifier,
            "all" => Self::All,
            _ => Self::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Count,
    License,
    Name,
    Author,
    Url,
}

impl OrderBy {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "count" | "c" => Self::Count,
            "license" | "l" => Self::License,
            "author" | "a" => Self::Author,
            "url" | "u" => Self::Url,
            _ => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    PlainVertical,
    Markdown,
    Rst,
    Confluence,
    Html,
    Json,
    JsonLicenseFinder,
    Csv,
}

impl OutputFormat {
    /// Unrecognized styles silently fall back to the plain table.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "plain-vertical" => Self::PlainVertical,
            "markdown" | "md" | "m" => Self::Markdown,
            "rst" | "rest" | "r" => Self::Rst,
            "confluence" | "c" => Self::Confluence,
            "html" | "h" => Self::Html,
            "json" | "j" => Self::Json,
            "json-license-finder" | "jlf" => Self::JsonLicenseFinder,
            "csv" => Self::Csv,
            _ => Self::Plain,
        }
    }
}

/// Fully resolved invocation options: CLI arguments merged with
/// pyproject.toml defaults, labels mapped to their enums, and the filter
/// code page validated.
#[derive(Debug)]
pub struct Options {
    pub python_path: Option<PathBuf>,
    pub from: FromSource,
    pub with_system: bool,
    pub with_authors: bool,
    pub with_urls: bool,
    pub with_description: bool,
    pub with_license_file: bool,
    pub no_license_path: bool,
    pub with_notice_file: bool,
    pub ignore_packages: Vec<String>,
    pub order: OrderBy,
    pub format: OutputFormat,
    pub filter_encoding: Option<&'static Encoding>,
    pub summary: bool,
    pub output_file: Option<PathBuf>,
    pub fail_on: Option<Vec<String>>,
    pub allow_only: Option<Vec<String>>,
}

impl Options {
    /// CLI arguments override config values.
    pub fn resolve(cli: Cli, defaults: &Config) -> Result<Self> {
        // Validate the code page before any package enumeration begins.
        let encoding = Encoding::for_label_no_replacement(cli.filter_code_page.as_bytes())
            .ok_or_else(|| {
                anyhow!(
                    "invalid code page '{}' given for --filter-code-page",
                    cli.filter_code_page
                )
            })?;

        let from_label = cli
            .from
            .or_else(|| defaults.from.clone())
            .unwrap_or_else(|| "mixed".to_string());
        let order_label = cli
            .order
            .or_else(|| defaults.order.clone())
            .unwrap_or_else(|| "name".to_string());
        let format_label = cli
            .format
            .or_else(|| defaults.format.clone())
            .unwrap_or_else(|| "plain".to_string());

        let ignore_packages = if cli.ignore_packages.is_empty() {
            defaults.ignore_packages.clone().unwrap_or_default()
        } else {
            cli.ignore_packages
        };

        Ok(Self {
            python_path: cli.python_path,
            from: FromSource::from_label(&from_label),
            with_system: cli.with_system || defaults.with_system.unwrap_or(false),
            with_authors: cli.with_authors,
            with_urls: cli.with_urls,
            with_description: cli.with_description,
            with_license_file: cli.with_license_file,
            no_license_path: cli.no_license_path,
            with_notice_file: cli.with_notice_file,
            ignore_packages,
            order: OrderBy::from_label(&order_label),
            format: OutputFormat::from_label(&format_label),
            filter_encoding: cli.filter_strings.then_some(encoding),
            summary: cli.summary || defaults.summary.unwrap_or(false),
            output_file: cli.output_file,
            fail_on: cli.fail_on.map(|raw| split_license_list(&raw)),
            allow_only: cli.allow_only.map(|raw| split_license_list(&raw)),
        })
    }
}

fn split_license_list(raw: &str) -> Vec<String> {
    raw.split(';').map(str::to_string).collect()
}
