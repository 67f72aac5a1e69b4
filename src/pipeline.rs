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

use std::path::PathBuf;

use crate::audio::AudioCache;
use crate::audio::AudioOutcome;
use crate::config::Config;
use crate::deck::Deck;
use crate::error::Fallible;
use crate::package::model::NoteModel;
use crate::package::write_package;
use crate::reader::RowReader;
use crate::reader::SourceRow;
use crate::text::clean_for_audio;
use crate::text::slugify;
use crate::text::to_presentation;
use crate::tts::Synthesizer;

/// How much of an offending sentence to show in a failure message.
const FAILURE_PREVIEW_CHARS: usize = 50;

/// What happened to one input row.
#[derive(Debug, PartialEq)]
pub enum RowOutcome {
    /// A card was added. `created` is false if the audio was reused.
    Added { created: bool },
    /// The row was malformed and ignored.
    Skipped,
    /// Audio could not be synthesized, so the row was abandoned.
    Failed { text: String, reason: String },
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub cards: usize,
    pub skipped: usize,
    pub failed: usize,
    pub audio_created: usize,
    pub audio_reused: usize,
    /// The package path, if one was written.
    pub written: Option<PathBuf>,
}

/// Read the CSV, synthesize audio, and write the package.
///
/// Row-level problems are counted and the run continues. If no card
/// survives, nothing is written and the run still succeeds.
pub fn run(
    config: &Config,
    model: &NoteModel,
    synthesizer: &dyn Synthesizer,
) -> Fallible<RunSummary> {
    let rows = RowReader::open(&config.input)?;
    let cache = AudioCache::open(&config.audio_dir)?;
    let mut deck = Deck::new(&config.deck_name()?);
    let mut summary = RunSummary::default();

    for record in rows.records() {
        let outcome = match record? {
            Some(row) => process_row(&row, config, &cache, synthesizer, &mut deck)?,
            None => RowOutcome::Skipped,
        };
        match outcome {
            RowOutcome::Added { created } => {
                summary.cards += 1;
                if created {
                    summary.audio_created += 1;
                } else {
                    summary.audio_reused += 1;
                }
            }
            RowOutcome::Skipped => {
                log::debug!("Skipping malformed row.");
                summary.skipped += 1;
            }
            RowOutcome::Failed { text, reason } => {
                let preview: String = text.chars().take(FAILURE_PREVIEW_CHARS).collect();
                log::warn!("Audio failed for '{preview}…': {reason}");
                summary.failed += 1;
            }
        }
    }

    if deck.is_empty() {
        return Ok(summary);
    }
    println!("Writing deck → {}", config.output.display());
    write_package(&config.output, &deck, model)?;
    summary.written = Some(config.output.clone());
    Ok(summary)
}

/// Turn one row into a card. Only I/O errors on the audio directory are
/// returned as errors; synthesis problems become [`RowOutcome::Failed`].
fn process_row(
    row: &SourceRow,
    config: &Config,
    cache: &AudioCache,
    synthesizer: &dyn Synthesizer,
    deck: &mut Deck,
) -> Fallible<RowOutcome> {
    let spoken = clean_for_audio(&row.front);
    let front = to_presentation(&row.front);
    let back = to_presentation(&row.back);
    let slug = slugify(&spoken, config.max_slug_len);

    let outcome = match cache.ensure(synthesizer, &spoken, &config.lang, &slug)? {
        AudioOutcome::Created(audio) => {
            println!("Created: {} ({})", audio.file_name(), audio.lang());
            deck.add(&front, &back, &audio);
            RowOutcome::Added { created: true }
        }
        AudioOutcome::Reused(audio) => {
            deck.add(&front, &back, &audio);
            RowOutcome::Added { created: false }
        }
        AudioOutcome::Failed(reason) => RowOutcome::Failed {
            text: spoken,
            reason,
        },
    };
    Ok(outcome)
}
