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

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::audio::AudioAsset;
use crate::types::card::CardRecord;
use crate::types::deck_id::DeckId;

/// The cards of one run, in input order, and the audio they reference.
///
/// Cards can only be added together with their audio, so every sound tag
/// names a file that will be embedded.
pub struct Deck {
    name: String,
    id: DeckId,
    cards: Vec<CardRecord>,
    media: Vec<PathBuf>,
    media_names: HashSet<String>,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: DeckId::from_name(name),
            cards: Vec::new(),
            media: Vec::new(),
            media_names: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    /// Append a card. Rows that share a slug share one embedded file.
    pub fn add(&mut self, display_front: &str, display_back: &str, audio: &AudioAsset) {
        let card = CardRecord::new(display_front, display_back, audio);
        if self.media_names.insert(audio.file_name().to_string()) {
            self.media.push(audio.path().to_path_buf());
        }
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Paths of the audio files to embed, in first-use order.
    pub fn media(&self) -> impl Iterator<Item = &Path> {
        self.media.iter().map(|p| p.as_path())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
