// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[derive(Error, Debug)]
pub enum KebunError {
    #[error("Data format error: {0}")]
    DataFormat(#[from] DataFormatError),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Aggregate row error: {0}")]
    Aggregate(#[from] AggregateError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("Failed to read source file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Source '{path}' ends before the header row (expected {preamble} preamble lines)")]
    MissingHeader { path: String, preamble: usize },
    #[error("Malformed CSV near line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: row carries values but has no region name")]
    UnnamedRow { line: u64 },
    #[error("Line {line}: column {column} requires a number, found '{value}'")]
    RejectedCell {
        line: u64,
        column: String,
        value: String,
    },
    #[error("Region '{name}' appears more than once (lines {first_line} and {line})")]
    DuplicateRegion {
        name: String,
        first_line: u64,
        line: u64,
    },
}
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Expected {expected} columns, found {found} in header {header:?}")]
    ColumnCount {
        expected: usize,
        found: usize,
        header: Vec<String>,
    },
}
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("No row named '{name}' found")]
    NotFound { name: String },
    #[error("Row '{name}' appears {count} times (lines {lines:?})")]
    Ambiguous {
        name: String,
        count: usize,
        lines: Vec<u64>,
    },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: config::ConfigError,
    },
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    Invalid {
        field: String,
        value: String,
        reason: String,
    },
}

/// A numeric cell that could not be parsed and was treated as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub line: u64,
    pub column: String,
    pub value: String,
}
impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.is_empty() {
            write!(f, "line {}: blank {} kept", self.line, self.column)
        } else {
            write!(
                f,
                "line {}: '{}' in column {} is not numeric, treated as missing",
                self.line, self.value, self.column
            )
        }
    }
}

pub type Result<T> = std::result::Result<T, KebunError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl KebunError {
    pub fn category(&self) -> &'static str {
        match self {
            KebunError::DataFormat(_) => "Data",
            KebunError::Schema(_) => "Schema",
            KebunError::Aggregate(_) => "Aggregate",
            KebunError::Config(_) => "Configuration",
        }
    }
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KebunError::DataFormat(DataFormatError::Unreadable { .. })
            | KebunError::Aggregate(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            KebunError::DataFormat(DataFormatError::Unreadable { .. }) => vec![
                "Check that the CSV file exists in the working directory".to_string(),
                "Pass another file with --source".to_string(),
            ],
            KebunError::DataFormat(DataFormatError::MissingHeader { .. }) => vec![
                "The file should start with three descriptive lines followed by the header row"
                    .to_string(),
                "Adjust source.preamble_lines in the configuration file".to_string(),
            ],
            KebunError::Schema(SchemaError::ColumnCount { .. }) => vec![
                "The header must have a province column followed by eight commodity columns"
                    .to_string(),
                "Check the file was exported with ',' as delimiter".to_string(),
            ],
            KebunError::Aggregate(AggregateError::NotFound { .. }) => vec![
                "The national total row is required".to_string(),
                "Adjust source.aggregate_name if the total row uses a different label".to_string(),
            ],
            KebunError::Aggregate(AggregateError::Ambiguous { .. }) => {
                vec!["Keep exactly one national total row in the file".to_string()]
            }
            KebunError::DataFormat(DataFormatError::UnnamedRow { .. }) => vec![
                "Fill in the province name or delete the row".to_string(),
                "Set source.unnamed_rows = \"coerce\" to keep such rows".to_string(),
            ],
            _ => vec!["Fix the source file and restart the dashboard".to_string()],
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            KebunError::DataFormat(DataFormatError::Unreadable { path, .. }) => {
                format!("The data file '{path}' could not be opened.")
            }
            KebunError::Aggregate(AggregateError::NotFound { name }) => {
                format!("The data file has no '{name}' total row.")
            }
            _ => self.to_string(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}
impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
    pub fn color_code(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "\x1b[33m",
            ErrorSeverity::Error => "\x1b[31m",
            ErrorSeverity::Critical => "\x1b[35m",
        }
    }
}

/// Renders a load failure as the single message shown to the user.
pub struct ErrorReporter {
    pub show_suggestions: bool,
    pub colored_output: bool,
}
impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            colored_output: true,
        }
    }
    pub fn plain() -> Self {
        Self {
            show_suggestions: true,
            colored_output: false,
        }
    }
    pub fn report(&self, error: &KebunError) -> String {
        let severity = error.severity();
        let mut output = String::new();
        if self.colored_output {
            output.push_str(severity.color_code());
        }
        output.push_str(&format!(
            "[{}] {}: {}\n",
            severity.as_str(),
            error.category(),
            error.user_message()
        ));
        if self.colored_output {
            output.push_str("\x1b[0m");
        }
        if self.show_suggestions {
            let suggestions = error.suggestions();
            if !suggestions.is_empty() {
                output.push_str("\nSuggestions:\n");
                for suggestion in suggestions {
                    output.push_str(&format!("  • {suggestion}\n"));
                }
            }
        }
        output
    }
}
impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn plain_report_names_category_and_suggestions() {
        let error = KebunError::from(AggregateError::NotFound {
            name: "INDONESIA".to_string(),
        });
        let report = ErrorReporter::plain().report(&error);
        assert!(report.starts_with("[CRITICAL] Aggregate: The data file has no 'INDONESIA' total row."));
        assert!(report.contains("Suggestions:"));
        assert!(!report.contains("\x1b["));
    }
}
