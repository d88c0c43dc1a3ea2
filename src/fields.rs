use crate::cli::{FromSource, Options, OrderBy};
use crate::license::{join_classifiers, select_license_by_source};
use crate::packages::PackageRecord;

/// One output column. The set and order of columns is derived from the
/// invocation options; no column appears twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Name,
    Version,
    License,
    LicenseMetadata,
    LicenseClassifier,
    LicenseFile,
    LicenseText,
    NoticeFile,
    NoticeText,
    Author,
    Description,
    Url,
    Count,
}

impl OutputField {
    /// Display header for the column.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Version => "Version",
            Self::License => "License",
            Self::LicenseMetadata => "License-Metadata",
            Self::LicenseClassifier => "License-Classifier",
            Self::LicenseFile => "LicenseFile",
            Self::LicenseText => "LicenseText",
            Self::NoticeFile => "NoticeFile",
            Self::NoticeText => "NoticeText",
            Self::Author => "Author",
            Self::Description => "Description",
            Self::Url => "URL",
            Self::Count => "Count",
        }
    }
}

/// Compute the ordered column list for the given options.
pub fn output_fields(opts: &Options) -> Vec<OutputField> {
    if opts.summary {
        return vec![OutputField::Count, OutputField::License];
    }

    let mut fields = vec![OutputField::Name, OutputField::Version];

    if opts.from == FromSource::All {
        fields.push(OutputField::LicenseMetadata);
        fields.push(OutputField::LicenseClassifier);
    } else {
        fields.push(OutputField::License);
    }

    if opts.with_authors {
        fields.push(OutputField::Author);
    }
    if opts.with_urls {
        fields.push(OutputField::Url);
    }
    if opts.with_description {
        fields.push(OutputField::Description);
    }

    if opts.with_license_file {
        if !opts.no_license_path {
            fields.push(OutputField::LicenseFile);
        }
        fields.push(OutputField::LicenseText);

        if opts.with_notice_file {
            // Text before File here, the reverse of the license pair
            // above; kept as-is for output compatibility.
            fields.push(OutputField::NoticeText);
            if !opts.no_license_path {
                fields.push(OutputField::NoticeFile);
            }
        }
    }

    fields
}

/// The column the rendered rows are sorted by.
pub fn sort_field(opts: &Options) -> OutputField {
    if opts.summary && opts.order == OrderBy::Count {
        OutputField::Count
    } else if opts.summary || opts.order == OrderBy::License {
        OutputField::License
    } else if opts.order == OrderBy::Author && opts.with_authors {
        OutputField::Author
    } else if opts.order == OrderBy::Url && opts.with_urls {
        OutputField::Url
    } else {
        OutputField::Name
    }
}

/// Project one record onto the ordered column list.
pub fn project_row(
    record: &PackageRecord,
    fields: &[OutputField],
    from: FromSource,
) -> Vec<String> {
    fields
        .iter()
        .map(|field| match field {
            OutputField::Name => record.name.clone(),
            OutputField::Version => record.version.clone(),
            OutputField::License => {
                select_license_by_source(from, &record.license_classifiers, &record.license)
            }
            OutputField::LicenseMetadata => record.license.clone(),
            OutputField::LicenseClassifier => join_classifiers(&record.license_classifiers),
            OutputField::LicenseFile => record.license_file.clone(),
            OutputField::LicenseText => record.license_text.clone(),
            OutputField::NoticeFile => record.notice_file.clone(),
            OutputField::NoticeText => record.notice_text.clone(),
            OutputField::Author => record.author.clone(),
            OutputField::Description => record.summary.clone(),
            OutputField::Url => record.home_page.clone(),
            // Count rows come from the summary path, never from records
            OutputField::Count => String::new(),
        })
        .collect()
}
