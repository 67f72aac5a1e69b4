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

use std::fs::create_dir_all;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::error::Fallible;
use crate::tts::Synthesizer;

/// A spoken-audio file on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioAsset {
    path: PathBuf,
    file_name: String,
    lang: String,
}

impl AudioAsset {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The base name, which is how the package and the cards refer to it.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// The tag that makes Anki play this file.
    pub fn sound_tag(&self) -> String {
        format!("[sound:{}]", self.file_name)
    }
}

/// What happened when an audio file was requested.
#[derive(Debug, PartialEq)]
pub enum AudioOutcome {
    /// The file was synthesized during this call.
    Created(AudioAsset),
    /// A file with this slug already existed and was reused.
    Reused(AudioAsset),
    /// Synthesis failed. Nothing was written.
    Failed(String),
}

/// The working directory of synthesized audio, keyed by slug.
///
/// The directory is never cleaned up here: existing files make re-runs over
/// the same CSV skip the network. Two texts with the same slug share a file.
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    pub fn open(dir: &Path) -> Fallible<Self> {
        create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.mp3"))
    }

    /// Return the audio for `slug`, synthesizing `text` if the file is not
    /// there yet. Synthesis errors are returned as [`AudioOutcome::Failed`];
    /// errors writing to the directory are fatal.
    pub fn ensure(
        &self,
        synthesizer: &dyn Synthesizer,
        text: &str,
        lang: &str,
        slug: &str,
    ) -> Fallible<AudioOutcome> {
        let path = self.path_for(slug);
        let asset = AudioAsset {
            file_name: format!("{slug}.mp3"),
            path: path.clone(),
            lang: lang.to_string(),
        };
        if path.exists() {
            log::debug!("Reusing {}", path.display());
            return Ok(AudioOutcome::Reused(asset));
        }
        let bytes = match synthesizer.synthesize(text, lang) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(AudioOutcome::Failed(e.message().to_string())),
        };
        // Write next to the target and rename, so a partial download is never
        // mistaken for a finished file on the next run.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&path)?;
        Ok(AudioOutcome::Created(asset))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::read;
    use std::fs::write;

    use super::*;
    use crate::helper::StubSynthesizer;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_open_creates_directory() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let dir = root.path().join("temp_audio");
        AudioCache::open(&dir)?;
        assert!(dir.is_dir());
        // Opening again is fine.
        AudioCache::open(&dir)?;
        Ok(())
    }

    #[test]
    fn test_created_then_reused() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let cache = AudioCache::open(root.path())?;
        let stub = StubSynthesizer::new();

        let first = cache.ensure(&stub, "The cat sleeps", "en", "The-cat-sleeps")?;
        let AudioOutcome::Created(asset) = first else {
            panic!("expected a new file, got {first:?}");
        };
        assert_eq!(asset.file_name(), "The-cat-sleeps.mp3");
        assert_eq!(asset.sound_tag(), "[sound:The-cat-sleeps.mp3]");
        assert_eq!(asset.lang(), "en");
        assert_eq!(read(asset.path())?, b"ID3 en: The cat sleeps");

        let second = cache.ensure(&stub, "The cat sleeps", "en", "The-cat-sleeps")?;
        assert!(matches!(second, AudioOutcome::Reused(_)));
        assert_eq!(stub.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_existing_file_is_not_overwritten() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let cache = AudioCache::open(root.path())?;
        write(cache.path_for("sentence"), b"old")?;
        let stub = StubSynthesizer::new();
        let outcome = cache.ensure(&stub, "日本語", "ja", "sentence")?;
        assert!(matches!(outcome, AudioOutcome::Reused(_)));
        assert_eq!(read(cache.path_for("sentence"))?, b"old");
        assert_eq!(stub.calls(), 0);
        Ok(())
    }

    #[test]
    fn test_failure_writes_nothing() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let cache = AudioCache::open(root.path())?;
        let stub = StubSynthesizer::failing_on("cat");
        let outcome = cache.ensure(&stub, "The cat sleeps", "en", "The-cat-sleeps")?;
        assert_eq!(
            outcome,
            AudioOutcome::Failed("speech service returned 500 Internal Server Error".to_string())
        );
        assert!(!cache.path_for("The-cat-sleeps").exists());
        assert_eq!(root.path().read_dir()?.count(), 0);
        Ok(())
    }
}
