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

use std::time::Duration;

use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::blocking::Client;

use crate::error::Fallible;
use crate::error::fail;

/// The Google Translate speech endpoint rejects longer inputs.
const MAX_CHUNK_CHARS: usize = 100;

pub const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Turns text into MP3 bytes.
pub trait Synthesizer {
    fn synthesize(&self, text: &str, lang: &str) -> Fallible<Vec<u8>>;
}

/// Speech from the Google Translate text-to-speech endpoint.
pub struct GoogleTts {
    client: Client,
    endpoint: String,
}

impl GoogleTts {
    pub fn new(endpoint: &str, timeout: Duration) -> Fallible<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; ankivoice)")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Synthesizer for GoogleTts {
    fn synthesize(&self, text: &str, lang: &str) -> Fallible<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            return fail("no text to speak.");
        }
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            log::debug!("Requesting speech chunk {}/{total}", idx + 1);
            let url = request_url(&self.endpoint, chunk, lang, idx, total);
            let response = self.client.get(&url).send()?;
            let status = response.status();
            if !status.is_success() {
                return fail(format!("speech service returned {status}"));
            }
            let bytes = response.bytes()?;
            if bytes.is_empty() {
                return fail("speech service returned no audio.");
            }
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

fn request_url(endpoint: &str, chunk: &str, lang: &str, idx: usize, total: usize) -> String {
    let q = utf8_percent_encode(chunk, NON_ALPHANUMERIC);
    let tl = utf8_percent_encode(lang, NON_ALPHANUMERIC);
    let len = chunk.chars().count();
    format!(
        "{endpoint}?ie=UTF-8&client=tw-ob&ttsspeed=1&tl={tl}&q={q}&total={total}&idx={idx}&textlen={len}"
    )
}

/// Split `text` into pieces of at most `max_chars` characters, breaking on
/// whitespace. Words longer than the limit are cut.
fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
        }
    }
    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}
