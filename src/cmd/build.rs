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

use crate::config::Config;
use crate::error::Fallible;
use crate::package::model::NoteModel;
use crate::pipeline::run;
use crate::tts::GoogleTts;

pub fn build_deck(config: &Config) -> Fallible<()> {
    let model = NoteModel::sentence_with_audio();
    let synthesizer = GoogleTts::new(&config.tts_endpoint, config.timeout())?;
    println!("Processing CSV and generating audio...");
    let summary = run(config, &model, &synthesizer)?;
    log::debug!(
        "{} skipped, {} failed, {} audio files created, {} reused.",
        summary.skipped,
        summary.failed,
        summary.audio_created,
        summary.audio_reused
    );
    if summary.written.is_none() {
        println!("No valid cards generated.");
        return Ok(());
    }
    println!("Success! Created {} cards + audio.", summary.cards);
    if summary.failed > 0 {
        println!("{} rows were skipped because their audio failed.", summary.failed);
    }
    println!("Import instructions:");
    println!("1. Double-click the .apkg file and Anki will import it");
    println!("   (or in Anki: File → Import → select the .apkg)");
    println!("2. The audio is already inside, no manual copying needed.");
    println!(
        "3. You can delete the '{}' folder afterwards (`ankivoice clean`).",
        config.audio_dir.display()
    );
    Ok(())
}
