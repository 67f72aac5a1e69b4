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

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Slug used when nothing filesystem-safe survives.
pub const FALLBACK_SLUG: &str = "sentence";

/// Default maximum slug length, in characters.
pub const DEFAULT_SLUG_LEN: usize = 80;

// `(?s)`: emphasis may span lines.
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").expect("strong emphasis pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*(.*?)\*").expect("emphasis pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("html tag pattern"));
static SOUND_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[sound:[^\]]*\]").expect("sound tag pattern"));

/// Remove `**` delimiters, keeping the text between them, so the markup is
/// not read aloud.
pub fn clean_for_audio(text: &str) -> String {
    STRONG.replace_all(text, "$1").into_owned()
}

/// Convert `**text**` and then `*text*` into `<b>text</b>`.
///
/// The double-asterisk pass must run first, otherwise the single-asterisk
/// pattern would pair up the halves of each `**`.
pub fn to_presentation(text: &str) -> String {
    let text = STRONG.replace_all(text, "<b>$1</b>");
    EMPHASIS.replace_all(&text, "<b>$1</b>").into_owned()
}

/// Derive a filesystem-safe file stem from `text`.
///
/// Diacritics are dropped through NFKD decomposition, everything outside
/// ASCII letters, digits, whitespace and hyphens is removed, and whitespace
/// runs become single hyphens. The result is at most `max_len` characters
/// and never empty.
pub fn slugify(text: &str, max_len: usize) -> String {
    let text = clean_for_audio(text);
    let kept: String = text
        .nfkd()
        .filter(char::is_ascii)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let joined: String = kept.split_whitespace().collect::<Vec<_>>().join("-");
    let truncated: String = joined.chars().take(max_len).collect();
    let slug = truncated.trim_end_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Strip HTML tags and sound references from a field. Anki sorts and checks
/// duplicates on this form of the first field.
pub fn strip_html_media(field: &str) -> String {
    let text = SOUND_TAG.replace_all(field, "");
    HTML_TAG.replace_all(&text, "").trim().to_string()
}
