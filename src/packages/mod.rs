use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::cli::Options;
use crate::license::select_license_by_source;

pub mod reader;

// Re-export the reader entry points
pub use reader::{find_site_packages_path, read_distributions, Distribution};

pub const LICENSE_UNKNOWN: &str = "UNKNOWN";

/// Packages that belong to the tooling chain itself, hidden unless
/// --with-system is given.
pub const SYSTEM_PACKAGES: &[&str] = &["pip", "setuptools", "wheel"];

/// One installed package, fully materialized. Every field holds the
/// "UNKNOWN" sentinel instead of being absent, so rendering never has to
/// deal with missing values.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub license_classifiers: Vec<String>,
    /// Free-text License: field from the metadata block
    pub license: String,
    pub author: String,
    pub home_page: String,
    pub summary: String,
    pub license_file: String,
    pub license_text: String,
    pub notice_file: String,
    pub notice_text: String,
}

/// Build the filtered record list from the enumerated distributions.
///
/// Checks run per package in enumeration order: ignore list, system
/// package filter, then the fail-on and allow-only gates. A policy hit is
/// a hard stop for the whole run, surfaced as an error so no output gets
/// written.
pub fn collect_records(opts: &Options, dists: &[Distribution]) -> Result<Vec<PackageRecord>> {
    let ignored: Vec<String> = opts
        .ignore_packages
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    let mut records = Vec::new();
    for dist in dists {
        if ignored.contains(&dist.name.to_lowercase()) {
            continue;
        }
        if !opts.with_system && SYSTEM_PACKAGES.contains(&dist.name.as_str()) {
            continue;
        }

        let record = reader::build_record(dist, opts.filter_encoding)?;
        let license = select_license_by_source(
            opts.from,
            &record.license_classifiers,
            &record.license,
        );

        if let Some(fail_on) = &opts.fail_on {
            if fail_on.iter().any(|name| *name == license) {
                bail!(
                    "fail-on license {} was found for package {}:{}",
                    license,
                    record.name,
                    record.version
                );
            }
        }
        if let Some(allow_only) = &opts.allow_only {
            if !allow_only.iter().any(|name| *name == license) {
                bail!(
                    "license {} not in allow-only licenses was found for package {}:{}",
                    license,
                    record.name,
                    record.version
                );
            }
        }

        records.push(record);
    }

    Ok(records)
}

/// Count packages per metadata license field, preserving first-seen order.
pub fn summarize(records: &[PackageRecord]) -> Vec<(usize, String)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.license.clone()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(license, count)| (count, license))
        .collect()
}
