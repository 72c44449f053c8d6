//! Error types for corechart.
#![allow(missing_docs)]

use std::path::PathBuf;

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        MissingFile(path: PathBuf) {
            description("benchmark table not found")
            display("benchmark table not found: {}", path.display())
        }
        MalformedTable(path: PathBuf, reason: String) {
            description("malformed benchmark table")
            display("malformed benchmark table {}: {}", path.display(), reason)
        }
        Misaligned(issues: String) {
            description("benchmark tables are not aligned")
            display("benchmark tables are not aligned: {}", issues)
        }
        Render(chart: String, reason: String) {
            description("error in rendering a chart")
            display("failed to render {}: {}", chart, reason)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Toml(::toml::de::Error);
    }
}
