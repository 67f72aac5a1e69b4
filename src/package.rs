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

mod collection;
pub mod model;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::io::copy;
use std::path::Path;

use tempfile::NamedTempFile;
use tempfile::tempdir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::deck::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::package::collection::write_collection;
use crate::package::model::NoteModel;
use crate::types::timestamp::Timestamp;

/// Write `deck` and its audio as an Anki package (`.apkg`) at `output`.
///
/// The archive is assembled in a temporary file in the destination
/// directory and renamed into place once complete, so `output` is either
/// the finished package or untouched.
pub fn write_package(output: &Path, deck: &Deck, model: &NoteModel) -> Fallible<()> {
    if deck.is_empty() {
        return fail("refusing to write an empty deck.");
    }
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return fail(format!(
            "output directory {} does not exist.",
            parent.display()
        ));
    }

    let scratch = tempdir()?;
    let collection_path = scratch.path().join("collection.anki2");
    write_collection(&collection_path, deck, model, Timestamp::now())?;

    let mut archive = NamedTempFile::new_in(parent)?;
    {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(archive.as_file_mut());

        zip.start_file("collection.anki2", options)?;
        copy(&mut File::open(&collection_path)?, &mut zip)?;

        // Media files are stored under their index; the `media` manifest maps
        // each index back to the name the sound tags use.
        let mut manifest: BTreeMap<String, String> = BTreeMap::new();
        for (index, path) in deck.media().enumerate() {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| ErrorReport::new("invalid media file name"))?;
            zip.start_file(index.to_string(), options)?;
            copy(&mut File::open(path)?, &mut zip)?;
            manifest.insert(index.to_string(), name.to_string());
        }
        zip.start_file("media", options)?;
        zip.write_all(serde_json::to_string(&manifest)?.as_bytes())?;
        zip.finish()?;
    }
    archive.as_file().sync_all()?;
    archive.persist(output)?;
    log::debug!("Package written to {}", output.display());
    Ok(())
}
