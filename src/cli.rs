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

use clap::Parser;

use crate::cmd::build::build_deck;
use crate::cmd::check::check_csv;
use crate::cmd::clean::clean_audio_dir;
use crate::config::Config;
use crate::config::Overrides;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Build an Anki deck with audio from a CSV of sentences and translations.
    Build {
        /// Path to the CSV file. The first row is treated as a header.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Path of the .apkg to write. Its file name is the deck name.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Language code for the spoken audio.
        #[arg(long)]
        lang: Option<String>,
        /// Directory where audio files are kept between runs.
        #[arg(long)]
        audio_dir: Option<PathBuf>,
        /// Optional TOML file with default settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show what each row would become, without generating anything.
    Check {
        /// Path to the CSV file.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Optional TOML file with default settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Delete the audio directory.
    Clean {
        /// Directory to delete.
        #[arg(long)]
        audio_dir: Option<PathBuf>,
        /// Optional TOML file with default settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Build {
            input,
            output,
            lang,
            audio_dir,
            config,
        } => {
            let overrides = Overrides {
                input,
                output,
                lang,
                audio_dir,
            };
            let config = Config::load(config.as_deref(), overrides)?;
            build_deck(&config)
        }
        Command::Check { input, config } => {
            let overrides = Overrides {
                input,
                ..Overrides::default()
            };
            let config = Config::load(config.as_deref(), overrides)?;
            check_csv(&config.input, config.max_slug_len)?;
            Ok(())
        }
        Command::Clean { audio_dir, config } => {
            let overrides = Overrides {
                audio_dir,
                ..Overrides::default()
            };
            let config = Config::load(config.as_deref(), overrides)?;
            clean_audio_dir(&config.audio_dir)?;
            Ok(())
        }
    }
}
