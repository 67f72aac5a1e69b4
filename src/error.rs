// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The error type used throughout the program. Errors are reported to the
/// user as a single line, so we only carry the message.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// The message without the `error:` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: message.into(),
    })
}

macro_rules! report_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ErrorReport {
                fn from(value: $source) -> Self {
                    ErrorReport {
                        message: value.to_string(),
                    }
                }
            }
        )*
    };
}

report_from!(
    std::io::Error,
    csv::Error,
    reqwest::Error,
    rusqlite::Error,
    serde_json::Error,
    tempfile::PersistError,
    toml::de::Error,
    zip::result::ZipError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_prefix() {
        let err = ErrorReport::new("input file does not exist.");
        assert_eq!(err.to_string(), "error: input file does not exist.");
        assert_eq!(err.message(), "input file does not exist.");
    }

    #[test]
    fn test_fail() {
        let result: Fallible<()> = fail(format!("bad value: {}", 42));
        assert_eq!(result, Err(ErrorReport::new("bad value: 42")));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ErrorReport = io.into();
        assert_eq!(err.message(), "gone");
    }
}
