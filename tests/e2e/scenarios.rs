use std::fs;

use super::helpers::{metadata, stderr, stdout, TestSite};

#[test]
fn test_default_plain_listing_sorted_by_name() {
    let site = TestSite::new();
    site.add_package("Beta", "2.0", "Metadata-Version: 2.1\nName: Beta\nVersion: 2.0\n");
    site.add_package("Alpha", "1.0", &metadata("Alpha", "1.0", "MIT"));

    let output = site.run(&[]);
    assert!(output.status.success());

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].contains("Name"));
    assert!(lines[0].contains("Version"));
    assert!(lines[0].contains("License"));
    assert!(lines[1].contains("Alpha") && lines[1].contains("MIT"));
    assert!(lines[2].contains("Beta") && lines[2].contains("UNKNOWN"));
}

#[test]
fn test_ignore_packages_are_skipped_silently() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));
    site.add_package("beta", "2.0", &metadata("beta", "2.0", "BSD"));

    let output = site.run(&["--ignore-packages", "alpha"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(!out.contains("alpha"));
    assert!(out.contains("beta"));
}

#[test]
fn test_system_packages_hidden_unless_requested() {
    let site = TestSite::new();
    site.add_package("pip", "23.0", &metadata("pip", "23.0", "MIT"));
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));

    let output = site.run(&[]);
    assert!(!stdout(&output).contains("pip"));

    let output = site.run(&["--with-system"]);
    assert!(stdout(&output).contains("pip"));
}

#[test]
fn test_fail_on_exits_one_and_writes_nothing() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));

    let out_path = site.path().join("licenses.txt");
    let output = site.run(&[
        "--fail-on",
        "MIT",
        "--output-file",
        out_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("fail-on license MIT"));
    assert!(stderr(&output).contains("alpha:1.0"));
    // Hard stop happens before any output is assembled or written
    assert!(!out_path.exists());
}

#[test]
fn test_allow_only_rejects_unlisted_licenses() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));
    site.add_package("beta", "2.0", &metadata("beta", "2.0", "GPL-3.0"));

    let output = site.run(&["--allow-only", "MIT;Apache-2.0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not in allow-only licenses"));
    assert!(stderr(&output).contains("beta:2.0"));

    let output = site.run(&["--allow-only", "MIT;GPL-3.0"]);
    assert!(output.status.success());
}

#[test]
fn test_summary_with_order_count() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));
    site.add_package("beta", "2.0", &metadata("beta", "2.0", "MIT"));
    site.add_package("gamma", "3.0", &metadata("gamma", "3.0", "Apache-2.0"));

    let output = site.run(&["--summary", "--order", "count", "--format", "json"]);
    assert!(output.status.success());

    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["Count"], 1);
    assert_eq!(parsed[0]["License"], "Apache-2.0");
    assert_eq!(parsed[1]["Count"], 2);
    assert_eq!(parsed[1]["License"], "MIT");
}

#[test]
fn test_output_file_writes_table_and_confirms() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));

    let out_path = site.path().join("licenses.md");
    let output = site.run(&[
        "--format",
        "markdown",
        "--output-file",
        out_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("created path:"));
    // The rendered table goes to the file, not to stdout
    assert!(!stdout(&output).contains("| alpha"));

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("| alpha"));
    assert!(written.contains("| MIT"));
}

#[test]
fn test_output_file_write_failure_exits_one() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));

    let bad_path = site.path().join("no-such-dir").join("licenses.txt");
    let output = site.run(&["--output-file", bad_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--output-file"));
}

#[test]
fn test_invalid_code_page_is_fatal_before_enumeration() {
    let site = TestSite::new();
    // No packages needed: the configuration error fires first
    let output = site.run(&["--filter-code-page", "klingon-8"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid code page 'klingon-8'"));
}

#[test]
fn test_filter_strings_drops_unencodable_chars() {
    let site = TestSite::new();
    site.add_package(
        "alpha",
        "1.0",
        "Metadata-Version: 2.1\nName: alpha\nVersion: 1.0\nLicense: MIT\nAuthor: R\u{e9}my \u{2605}\n",
    );

    let output = site.run(&[
        "--with-authors",
        "--filter-strings",
        "--filter-code-page",
        "latin1",
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    // latin1 keeps the accented e but drops the star
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["Author"], "R\u{e9}my ");
}

#[test]
fn test_from_classifier_uses_trove_classifiers() {
    let site = TestSite::new();
    site.add_package(
        "alpha",
        "1.0",
        "Metadata-Version: 2.1\nName: alpha\nVersion: 1.0\nLicense: WHATEVER\n\
         Classifier: License :: OSI Approved :: MIT License\n",
    );

    let output = site.run(&["--from", "classifier", "--format", "json"]);
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["License"], "MIT License");

    let output = site.run(&["--from", "meta", "--format", "json"]);
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["License"], "WHATEVER");
}

#[test]
fn test_pyproject_defaults_apply() {
    let site = TestSite::new();
    site.add_package("alpha", "1.0", &metadata("alpha", "1.0", "MIT"));

    fs::write(
        site.path().join("pyproject.toml"),
        "[tool.py-license-lister]\nformat = \"csv\"\n",
    )
    .unwrap();

    let output = site.run(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"Name\",\"Version\",\"License\""));

    // CLI still overrides the config default
    let output = site.run(&["--format", "markdown"]);
    assert!(stdout(&output).contains("| alpha"));
}
