use crate::cli::FromSource;
use crate::packages::LICENSE_UNKNOWN;

/// Pick the displayed license string per the configured source policy.
///
/// The classifier join wins for `classifier`, and for `mixed` when at
/// least one license classifier exists. Everything else falls through to
/// the free-text metadata field ("all" emits both raw fields upstream and
/// never reaches the joined value here).
pub fn select_license_by_source(
    source: FromSource,
    classifiers: &[String],
    metadata_license: &str,
) -> String {
    match source {
        FromSource::Classifier => join_classifiers(classifiers),
        FromSource::Mixed if !classifiers.is_empty() => join_classifiers(classifiers),
        _ => metadata_license.to_string(),
    }
}

pub fn join_classifiers(classifiers: &[String]) -> String {
    if classifiers.is_empty() {
        LICENSE_UNKNOWN.to_string()
    } else {
        classifiers.join(", ")
    }
}

/// Extract license names from trove classifiers, e.g.
/// "License :: OSI Approved :: MIT License" yields "MIT License".
///
/// The bare "License :: OSI Approved" declaration carries no license name
/// and is skipped.
pub fn licenses_from_classifiers<'a>(classifiers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut licenses = Vec::new();
    for classifier in classifiers {
        if !classifier.starts_with("License") {
            continue;
        }
        let license = classifier.rsplit(" :: ").next().unwrap_or(classifier);
        if license != "OSI Approved" {
            licenses.push(license.to_string());
        }
    }
    licenses
}
