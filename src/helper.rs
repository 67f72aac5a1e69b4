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

use std::cell::Cell;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::error::fail;
use crate::tts::Synthesizer;

/// A scratch directory, removed when the returned value is dropped.
pub fn create_tmp_directory() -> Fallible<TempDir> {
    Ok(tempdir()?)
}

/// Write `contents` to `sentences.csv` inside `dir`.
pub fn write_csv(dir: &Path, contents: &str) -> Fallible<PathBuf> {
    let path = dir.join("sentences.csv");
    write(&path, contents)?;
    Ok(path)
}

/// A synthesizer that never touches the network and counts its calls.
pub struct StubSynthesizer {
    calls: Cell<usize>,
    fail_on: Option<String>,
}

impl Default for StubSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StubSynthesizer {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
            fail_on: None,
        }
    }

    /// Fail whenever the text contains `needle`.
    pub fn failing_on(needle: &str) -> Self {
        Self {
            calls: Cell::new(0),
            fail_on: Some(needle.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Synthesizer for StubSynthesizer {
    fn synthesize(&self, text: &str, lang: &str) -> Fallible<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                return fail("speech service returned 500 Internal Server Error");
            }
        }
        Ok(format!("ID3 {lang}: {text}").into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(dir.path().is_dir());
        Ok(())
    }

    #[test]
    fn test_stub_counts_calls() -> Fallible<()> {
        let stub = StubSynthesizer::failing_on("bad");
        assert!(stub.synthesize("good", "en").is_ok());
        assert!(stub.synthesize("bad", "en").is_err());
        assert_eq!(stub.calls(), 2);
        Ok(())
    }
}
