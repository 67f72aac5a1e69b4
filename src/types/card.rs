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

use crate::audio::AudioAsset;

/// Anki separates the fields of a note with this character.
const FIELD_SEPARATOR: char = '\x1f';

/// One flashcard, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct CardRecord {
    /// Display text followed by the sound tag.
    front: String,
    /// Display translation.
    back: String,
    /// Stable note identifier, so re-importing the same deck updates notes
    /// instead of duplicating them.
    guid: String,
}

impl CardRecord {
    pub fn new(display_front: &str, display_back: &str, audio: &AudioAsset) -> Self {
        let front = format!("{display_front} {}", audio.sound_tag());
        let back = display_back.to_string();
        let guid = note_guid(&front, &back);
        Self { front, back, guid }
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// The fields as Anki stores them in the `flds` column.
    pub fn joined_fields(&self) -> String {
        format!("{}{FIELD_SEPARATOR}{}", self.front, self.back)
    }
}

fn note_guid(front: &str, back: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(front.as_bytes());
    hasher.update(&[FIELD_SEPARATOR as u8]);
    hasher.update(back.as_bytes());
    let hex = hasher.finalize().to_hex();
    hex[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCache;
    use crate::audio::AudioOutcome;
    use crate::error::Fallible;
    use crate::helper::StubSynthesizer;
    use crate::helper::create_tmp_directory;

    fn asset(slug: &str) -> Fallible<AudioAsset> {
        let root = create_tmp_directory()?;
        let cache = AudioCache::open(root.path())?;
        match cache.ensure(&StubSynthesizer::new(), "text", "en", slug)? {
            AudioOutcome::Created(asset) => Ok(asset),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_fields() -> Fallible<()> {
        let audio = asset("The-cat-sleeps")?;
        let card = CardRecord::new("The <b>cat</b> sleeps", "Кот спит", &audio);
        assert_eq!(card.front(), "The <b>cat</b> sleeps [sound:The-cat-sleeps.mp3]");
        assert_eq!(card.back(), "Кот спит");
        assert_eq!(
            card.joined_fields(),
            "The <b>cat</b> sleeps [sound:The-cat-sleeps.mp3]\x1fКот спит"
        );
        Ok(())
    }

    #[test]
    fn test_guid() -> Fallible<()> {
        let audio = asset("a")?;
        let a = CardRecord::new("a", "b", &audio);
        let b = CardRecord::new("a", "b", &audio);
        let c = CardRecord::new("a", "c", &audio);
        assert_eq!(a.guid(), b.guid());
        assert_ne!(a.guid(), c.guid());
        assert_eq!(a.guid().len(), 16);
        Ok(())
    }
}
