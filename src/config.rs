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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::text::DEFAULT_SLUG_LEN;
use crate::tts::DEFAULT_ENDPOINT;

/// Settings for a build. Values come from the defaults, then an optional
/// TOML file, then command-line flags.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The CSV to read.
    pub input: PathBuf,
    /// Where to write the `.apkg`. Its stem is the deck name.
    pub output: PathBuf,
    /// Language code passed to the speech service.
    pub lang: String,
    /// Where synthesized audio is kept between runs.
    pub audio_dir: PathBuf,
    /// Maximum length of an audio file stem.
    pub max_slug_len: usize,
    /// Per-request limit for the speech service.
    pub timeout_secs: u64,
    /// URL of the speech endpoint.
    pub tts_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("sentences.csv"),
            output: PathBuf::from("English_Russian_Deck.apkg"),
            lang: "en".to_string(),
            audio_dir: PathBuf::from("temp_audio"),
            max_slug_len: DEFAULT_SLUG_LEN,
            timeout_secs: 30,
            tts_endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub lang: Option<String>,
    pub audio_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("config file {} does not exist.", path.display()));
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the effective configuration and check it.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Fallible<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(input) = overrides.input {
            config.input = input;
        }
        if let Some(output) = overrides.output {
            config.output = output;
        }
        if let Some(lang) = overrides.lang {
            config.lang = lang;
        }
        if let Some(audio_dir) = overrides.audio_dir {
            config.audio_dir = audio_dir;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Fallible<()> {
        if self.lang.trim().is_empty() {
            return fail("language code must not be empty.");
        }
        if self.max_slug_len == 0 {
            return fail("max_slug_len must be at least 1.");
        }
        if self.timeout_secs == 0 {
            return fail("timeout_secs must be at least 1.");
        }
        self.deck_name()?;
        Ok(())
    }

    /// The deck is named after the output file, without extension.
    pub fn deck_name(&self) -> Fallible<String> {
        let stem = self
            .output
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| ErrorReport::new("output path has no file name"))?;
        Ok(stem.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults() -> Fallible<()> {
        let config = Config::load(None, Overrides::default())?;
        assert_eq!(config, Config::default());
        assert_eq!(config.input, PathBuf::from("sentences.csv"));
        assert_eq!(config.lang, "en");
        assert_eq!(config.audio_dir, PathBuf::from("temp_audio"));
        assert_eq!(config.deck_name()?, "English_Russian_Deck");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn test_file_then_overrides() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.path().join("ankivoice.toml");
        write(&path, "lang = \"de\"\noutput = \"decks/Verbs.apkg\"\nmax_slug_len = 40\n")?;
        let overrides = Overrides {
            lang: Some("fr".to_string()),
            ..Overrides::default()
        };
        let config = Config::load(Some(&path), overrides)?;
        assert_eq!(config.lang, "fr");
        assert_eq!(config.max_slug_len, 40);
        assert_eq!(config.deck_name()?, "Verbs");
        assert_eq!(config.input, PathBuf::from("sentences.csv"));
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.path().join("ankivoice.toml");
        write(&path, "language = \"de\"\n")?;
        assert!(Config::load(Some(&path), Overrides::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Some(Path::new("./derpherp.toml")), Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values() {
        let overrides = Overrides {
            lang: Some("  ".to_string()),
            ..Overrides::default()
        };
        assert!(Config::load(None, overrides).is_err());
        let overrides = Overrides {
            output: Some(PathBuf::from("/")),
            ..Overrides::default()
        };
        assert!(Config::load(None, overrides).is_err());
    }
}
