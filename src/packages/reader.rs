use anyhow::{Context, Result};
use encoding_rs::Encoding;
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PackageRecord, LICENSE_UNKNOWN};
use crate::license::licenses_from_classifiers;

const LICENSE_FILE_PATTERNS: &[&str] = &["LICENSE*", "LICENCE*", "COPYING*"];
const NOTICE_FILE_PATTERNS: &[&str] = &["NOTICE*"];

/// Handle onto one installed distribution's metadata directory
/// (`*.dist-info` or `*.egg-info`).
#[derive(Debug, Clone)]
pub struct Distribution {
    /// Project name parsed from the directory name
    pub name: String,
    /// Version parsed from the directory name, UNKNOWN when missing
    pub version: String,
    /// The metadata directory itself
    pub location: PathBuf,
}

impl Distribution {
    /// Whether the given raw metadata block ("METADATA" or "PKG-INFO")
    /// exists for this distribution.
    pub fn has_metadata(&self, file: &str) -> bool {
        self.location.join(file).is_file()
    }

    /// Read the given raw metadata block.
    pub fn read_metadata(&self, file: &str) -> Result<String> {
        let path = self.location.join(file);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Locate a site-packages directory: use the given path directly, or
/// search a .venv under the current directory.
pub fn find_site_packages_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        if path.join("site-packages").exists() {
            return Ok(path.join("site-packages"));
        }
        return Ok(path);
    }

    let current_dir = std::env::current_dir()?;
    let venv_path = current_dir.join(".venv");

    if venv_path.exists() {
        // Unix-like systems
        let lib_path = venv_path.join("lib");
        if lib_path.exists() {
            for entry in fs::read_dir(&lib_path)? {
                let entry = entry?;
                if entry.file_name().to_string_lossy().starts_with("python") {
                    let site_packages = entry.path().join("site-packages");
                    if site_packages.exists() {
                        return Ok(site_packages);
                    }
                }
            }
        }

        // Windows
        let lib_path = venv_path.join("Lib").join("site-packages");
        if lib_path.exists() {
            return Ok(lib_path);
        }
    }

    anyhow::bail!("Could not find site-packages directory. Please specify with --python-path")
}

/// Enumerate installed distributions under a site-packages directory,
/// sorted by name for deterministic output.
pub fn read_distributions(site_packages: &Path) -> Result<Vec<Distribution>> {
    let mut dists = Vec::new();

    for entry in fs::read_dir(site_packages)
        .with_context(|| format!("Failed to read {}", site_packages.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let name_str = file_name.to_string_lossy();

        let stem = if let Some(stem) = name_str.strip_suffix(".dist-info") {
            stem
        } else if let Some(stem) = name_str.strip_suffix(".egg-info") {
            stem
        } else {
            continue;
        };
        if !entry.path().is_dir() {
            continue;
        }

        let (name, version) = split_name_version(stem);
        dists.push(Distribution {
            name,
            version,
            location: entry.path(),
        });
    }

    dists.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dists)
}

/// Materialize the full record for one distribution, applying the
/// optional code-page filter to every string field.
pub fn build_record(
    dist: &Distribution,
    filter: Option<&'static Encoding>,
) -> Result<PackageRecord> {
    // Prefer METADATA (dist-info) over PKG-INFO (egg-info)
    let content = if dist.has_metadata("METADATA") {
        Some(dist.read_metadata("METADATA")?)
    } else if dist.has_metadata("PKG-INFO") {
        Some(dist.read_metadata("PKG-INFO")?)
    } else {
        None
    };

    let fields = content.as_deref().map(parse_metadata).unwrap_or_default();
    let classifiers = licenses_from_classifiers(fields.classifiers.iter().map(String::as_str));

    let (license_file, license_text) = find_included_file(&dist.location, LICENSE_FILE_PATTERNS);
    let (notice_file, notice_text) = find_included_file(&dist.location, NOTICE_FILE_PATTERNS);

    let unknown = || LICENSE_UNKNOWN.to_string();
    let mut record = PackageRecord {
        name: fields.name.unwrap_or_else(|| dist.name.clone()),
        version: fields.version.unwrap_or_else(|| dist.version.clone()),
        license_classifiers: classifiers,
        license: fields.license.unwrap_or_else(unknown),
        author: fields.author.unwrap_or_else(unknown),
        home_page: fields.home_page.unwrap_or_else(unknown),
        summary: fields.summary.unwrap_or_else(unknown),
        license_file,
        license_text,
        notice_file,
        notice_text,
    };

    if let Some(encoding) = filter {
        apply_code_page_filter(&mut record, encoding);
    }

    Ok(record)
}

fn split_name_version(stem: &str) -> (String, String) {
    // dist-info directories use underscores in place of dashes
    match stem.rfind('-') {
        Some(idx) => (
            stem[..idx].replace('_', "-"),
            stem[idx + 1..].to_string(),
        ),
        None => (stem.replace('_', "-"), LICENSE_UNKNOWN.to_string()),
    }
}

#[derive(Debug, Default)]
struct MetadataFields {
    name: Option<String>,
    version: Option<String>,
    license: Option<String>,
    author: Option<String>,
    home_page: Option<String>,
    summary: Option<String>,
    classifiers: Vec<String>,
}

/// Parse the RFC-822-style header block of a METADATA / PKG-INFO file.
/// The body after the first blank line is the long description and is
/// ignored. First occurrence wins for scalar keys.
fn parse_metadata(content: &str) -> MetadataFields {
    let mut fields = MetadataFields::default();

    for line in header_lines(content) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.to_lowercase().as_str() {
            "name" => insert_first(&mut fields.name, value),
            "version" => insert_first(&mut fields.version, value),
            "license" => insert_first(&mut fields.license, value),
            "author" => insert_first(&mut fields.author, value),
            "home-page" => insert_first(&mut fields.home_page, value),
            "summary" => insert_first(&mut fields.summary, value),
            "classifier" => fields.classifiers.push(value),
            _ => {}
        }
    }

    fields
}

fn insert_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Unfold the header block: continuation lines (leading whitespace) join
/// the previous header value.
fn header_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.is_empty() {
            break;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = lines.last_mut() {
                last.push('\n');
                last.push_str(line.trim_start());
            }
            continue;
        }
        lines.push(line.to_string());
    }

    lines
}

/// Find the first on-disk file matching one of the patterns inside the
/// metadata directory, returning (path, contents). Both default to
/// UNKNOWN when no file exists.
fn find_included_file(location: &Path, patterns: &[&str]) -> (String, String) {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let full_pattern = location.join(pattern).to_string_lossy().into_owned();
        if let Ok(paths) = glob(&full_pattern) {
            let mut matched: Vec<PathBuf> = paths.flatten().collect();
            matched.sort();
            candidates.extend(matched);
        }
    }

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        if let Ok(bytes) = fs::read(&path) {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return (path.to_string_lossy().into_owned(), text);
        }
    }

    (LICENSE_UNKNOWN.to_string(), LICENSE_UNKNOWN.to_string())
}

fn apply_code_page_filter(record: &mut PackageRecord, encoding: &'static Encoding) {
    let fields = [
        &mut record.name,
        &mut record.version,
        &mut record.license,
        &mut record.author,
        &mut record.home_page,
        &mut record.summary,
        &mut record.license_file,
        &mut record.license_text,
        &mut record.notice_file,
        &mut record.notice_text,
    ];
    for value in fields {
        *value = filter_string(encoding, value);
    }
    for classifier in &mut record.license_classifiers {
        *classifier = filter_string(encoding, classifier);
    }
}

/// Drop characters that cannot be represented in the given encoding.
pub fn filter_string(encoding: &'static Encoding, value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            let mut buf = [0u8; 4];
            let (_, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
            !had_errors
        })
        .collect()
}
