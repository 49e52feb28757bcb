//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Ye Error Module
//!
//! This module defines the error types used throughout the Ye sync engine.
//!
//! ## Error Categories
//!
//! - **Lookup**: worksheet or label could not be resolved, or no usable value
//!   exists for the requested directive. Recoverable: the single binding is
//!   skipped and the run continues.
//! - **RepeatExpansion**: a repeat container could not be expanded. The
//!   container is rolled back before the error is reported.
//! - **Capability**: a host capability failed. Recoverable unless the host
//!   marks it otherwise, in which case the run aborts.
//! - **Validation / Io / Serde**: configuration and sheet ingestion failures.
//! - **Internal**: unexpected situations.
//!
//! ## Usage
//!
//! ```rust
//! use ye::errors::{Result, YeError};
//!
//! fn pick(values: &[String]) -> Result<&String> {
//!     values.first().ok_or_else(|| YeError::empty_values("Name", "Sheet1"))
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Ye.
pub type Result<T> = std::result::Result<T, YeError>;

/// Canonical error enumeration for Ye.
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum YeError {
    /// No worksheet could be selected, not even the active one.
    #[error("worksheet '{worksheet}' not found")]
    WorksheetNotFound { worksheet: String },

    /// The worksheet has no label matching the binding.
    #[error("label '{label}' not found in worksheet '{worksheet}'")]
    LabelNotFound { label: String, worksheet: String },

    /// The label exists but carries no rows.
    #[error("label '{label}' in worksheet '{worksheet}' has no values")]
    EmptyValues { label: String, worksheet: String },

    /// A skip-blank directive found only blank cells.
    #[error("label '{label}' in worksheet '{worksheet}' has no non-blank values")]
    NoNonBlankValues { label: String, worksheet: String },

    /// A repeat container could not be expanded; it was restored.
    #[error("repeat expansion of '{container}' failed: {message}")]
    RepeatExpansion { container: String, message: String },

    /// A host capability call failed.
    #[error("capability error: {message}")]
    Capability { message: String, recoverable: bool },

    /// Validation errors triggered by invalid configuration or input.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for YeError {
    fn from(err: io::Error) -> Self {
        YeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for YeError {
    fn from(err: serde_json::Error) -> Self {
        YeError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for YeError {
    fn from(err: serde_yaml::Error) -> Self {
        YeError::Serde(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for YeError {
    fn from(err: csv::Error) -> Self {
        YeError::Serde(err.to_string())
    }
}

impl YeError {
    pub fn worksheet_not_found(worksheet: impl Into<String>) -> Self {
        YeError::WorksheetNotFound {
            worksheet: worksheet.into(),
        }
    }

    pub fn label_not_found(label: impl Into<String>, worksheet: impl Into<String>) -> Self {
        YeError::LabelNotFound {
            label: label.into(),
            worksheet: worksheet.into(),
        }
    }

    pub fn empty_values(label: impl Into<String>, worksheet: impl Into<String>) -> Self {
        YeError::EmptyValues {
            label: label.into(),
            worksheet: worksheet.into(),
        }
    }

    pub fn no_non_blank(label: impl Into<String>, worksheet: impl Into<String>) -> Self {
        YeError::NoNonBlankValues {
            label: label.into(),
            worksheet: worksheet.into(),
        }
    }

    /// Helper to construct repeat expansion errors.
    pub fn repeat(container: impl Into<String>, message: impl Into<String>) -> Self {
        YeError::RepeatExpansion {
            container: container.into(),
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        YeError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        YeError::Internal(message.into())
    }

    /// Whether processing may continue with the next layer after this error.
    ///
    /// Only a capability failure explicitly flagged by the host aborts a run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            YeError::Capability {
                recoverable: false,
                ..
            }
        )
    }
}
