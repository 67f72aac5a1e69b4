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

use serde::Serialize;

use crate::error::Fallible;
use crate::types::deck_id::DeckId;

const MODEL_ID: i64 = 9876543210;
const MODEL_NAME: &str = "English → Translation (with audio)";

const CARD_CSS: &str = "
.card {
  font-family: Arial, sans-serif;
  font-size: 22px;
  text-align: center;
  color: black;
  background-color: white;
}
b { color: #0066cc; }
";

const LATEX_PRE: &str = "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n";
const LATEX_POST: &str = "\\end{document}";

/// A card template: how the question and answer sides are rendered.
#[derive(Clone, Debug)]
pub struct CardTemplate {
    pub name: String,
    pub question_format: String,
    pub answer_format: String,
}

/// The note type every generated note uses. Built once at startup and
/// handed to the package writer; it is never modified afterwards.
#[derive(Clone, Debug)]
pub struct NoteModel {
    id: i64,
    name: String,
    fields: Vec<String>,
    templates: Vec<CardTemplate>,
    css: String,
}

impl NoteModel {
    /// Two fields: the sentence with its audio, and the translation.
    pub fn sentence_with_audio() -> Self {
        Self {
            id: MODEL_ID,
            name: MODEL_NAME.to_string(),
            fields: vec!["Front".to_string(), "Back".to_string()],
            templates: vec![CardTemplate {
                name: "Card 1".to_string(),
                question_format: "{{Front}}".to_string(),
                answer_format: "{{FrontSide}}<hr id=answer>{{Back}}".to_string(),
            }],
            css: CARD_CSS.to_string(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// The model as Anki stores it in the `col.models` JSON column.
    pub fn to_json(&self, deck_id: DeckId, modified_secs: i64) -> Fallible<serde_json::Value> {
        let model = ModelJson {
            css: &self.css,
            did: deck_id.get(),
            flds: self
                .fields
                .iter()
                .enumerate()
                .map(|(ord, name)| FieldJson {
                    name,
                    ord,
                    font: "Liberation Sans",
                    media: Vec::new(),
                    rtl: false,
                    size: 20,
                    sticky: false,
                })
                .collect(),
            id: self.id.to_string(),
            latex_post: LATEX_POST,
            latex_pre: LATEX_PRE,
            latexsvg: false,
            modified: modified_secs,
            name: &self.name,
            // Each template needs the first field to be non-empty.
            req: self
                .templates
                .iter()
                .enumerate()
                .map(|(ord, _)| (ord, "any", vec![0]))
                .collect(),
            sortf: 0,
            tags: Vec::new(),
            tmpls: self
                .templates
                .iter()
                .enumerate()
                .map(|(ord, t)| TemplateJson {
                    name: &t.name,
                    qfmt: &t.question_format,
                    afmt: &t.answer_format,
                    ord,
                    bafmt: "",
                    bqfmt: "",
                    bfont: "",
                    bsize: 0,
                    did: None,
                })
                .collect(),
            kind: 0,
            usn: -1,
            vers: Vec::new(),
        };
        Ok(serde_json::to_value(&model)?)
    }
}

#[derive(Serialize)]
struct ModelJson<'a> {
    css: &'a str,
    did: i64,
    flds: Vec<FieldJson<'a>>,
    id: String,
    #[serde(rename = "latexPost")]
    latex_post: &'a str,
    #[serde(rename = "latexPre")]
    latex_pre: &'a str,
    latexsvg: bool,
    #[serde(rename = "mod")]
    modified: i64,
    name: &'a str,
    req: Vec<(usize, &'a str, Vec<usize>)>,
    sortf: usize,
    tags: Vec<String>,
    tmpls: Vec<TemplateJson<'a>>,
    #[serde(rename = "type")]
    kind: u8,
    usn: i64,
    vers: Vec<String>,
}

#[derive(Serialize)]
struct FieldJson<'a> {
    name: &'a str,
    ord: usize,
    font: &'a str,
    media: Vec<String>,
    rtl: bool,
    size: u32,
    sticky: bool,
}

#[derive(Serialize)]
struct TemplateJson<'a> {
    name: &'a str,
    qfmt: &'a str,
    afmt: &'a str,
    ord: usize,
    bafmt: &'a str,
    bqfmt: &'a str,
    bfont: &'a str,
    bsize: u32,
    did: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_json() -> Fallible<()> {
        let model = NoteModel::sentence_with_audio();
        let deck_id = DeckId::from_name("Deck");
        let json = model.to_json(deck_id, 1425279151)?;
        assert_eq!(json["id"], "9876543210");
        assert_eq!(json["name"], model.name());
        assert_eq!(json["did"], deck_id.get());
        assert_eq!(json["mod"], 1425279151);
        assert_eq!(json["type"], 0);
        assert_eq!(json["flds"][0]["name"], "Front");
        assert_eq!(json["flds"][1]["name"], "Back");
        assert_eq!(json["flds"][1]["ord"], 1);
        assert_eq!(json["tmpls"][0]["qfmt"], "{{Front}}");
        assert_eq!(json["tmpls"][0]["afmt"], "{{FrontSide}}<hr id=answer>{{Back}}");
        assert_eq!(json["req"][0][1], "any");
        assert!(json["css"].as_str().unwrap_or_default().contains("#0066cc"));
        Ok(())
    }
}
