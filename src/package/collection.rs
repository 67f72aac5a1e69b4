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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::Transaction;
use serde_json::Value;
use serde_json::json;
use sha1::Digest;
use sha1::Sha1;

use crate::deck::Deck;
use crate::error::Fallible;
use crate::package::model::NoteModel;
use crate::text::strip_html_media;
use crate::types::card::CardRecord;
use crate::types::deck_id::DeckId;
use crate::types::timestamp::Timestamp;

/// Collection schema version understood by every Anki release that imports
/// `.apkg` files.
const SCHEMA_VERSION: i64 = 11;

/// Write `deck` into a fresh Anki collection database at `path`.
pub fn write_collection(
    path: &Path,
    deck: &Deck,
    model: &NoteModel,
    now: Timestamp,
) -> Fallible<()> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    tx.execute_batch(include_str!("schema.sql"))?;
    insert_col(&tx, deck, model, now)?;
    let base_id = now.millis();
    for (position, card) in deck.cards().iter().enumerate() {
        let note_id = base_id + position as i64;
        insert_note(&tx, note_id, card, model, now)?;
        for (ord, _) in model.templates().iter().enumerate() {
            let row = CardRow {
                id: base_id + (position * model.templates().len() + ord) as i64,
                note_id,
                deck_id: deck.id(),
                ord: ord as i64,
                due: position as i64 + 1,
            };
            insert_card(&tx, &row, now)?;
        }
    }
    tx.commit()?;
    log::debug!("Wrote {} notes to {}", deck.len(), path.display());
    Ok(())
}

fn insert_col(tx: &Transaction, deck: &Deck, model: &NoteModel, now: Timestamp) -> Fallible<()> {
    let model_json = model.to_json(deck.id(), now.secs())?;
    let models = json!({ model.id().to_string(): model_json });
    let decks = json!({
        "1": deck_json(1, "Default", now.secs()),
        deck.id().to_string(): deck_json(deck.id().get(), deck.name(), now.secs()),
    });
    let sql = "insert into col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags) values (null, ?, ?, ?, ?, 0, 0, 0, ?, ?, ?, ?, '{}');";
    tx.execute(
        sql,
        (
            now.secs(),
            now.millis(),
            now.millis(),
            SCHEMA_VERSION,
            collection_conf(model).to_string(),
            models.to_string(),
            decks.to_string(),
            deck_conf().to_string(),
        ),
    )?;
    Ok(())
}

fn insert_note(
    tx: &Transaction,
    id: i64,
    card: &CardRecord,
    model: &NoteModel,
    now: Timestamp,
) -> Fallible<()> {
    let sort_field = strip_html_media(card.front());
    let sql = "insert into notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data) values (?, ?, ?, ?, -1, '', ?, ?, ?, 0, '');";
    tx.execute(
        sql,
        (
            id,
            card.guid(),
            model.id(),
            now.secs(),
            card.joined_fields(),
            &sort_field,
            field_checksum(&sort_field),
        ),
    )?;
    Ok(())
}

struct CardRow {
    id: i64,
    note_id: i64,
    deck_id: DeckId,
    ord: i64,
    /// New cards are shown in ascending `due` order.
    due: i64,
}

fn insert_card(tx: &Transaction, card: &CardRow, now: Timestamp) -> Fallible<()> {
    let sql = "insert into cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data) values (?, ?, ?, ?, ?, -1, 0, 0, ?, 0, 0, 0, 0, 0, 0, 0, 0, '');";
    tx.execute(
        sql,
        (
            card.id,
            card.note_id,
            &card.deck_id,
            card.ord,
            now.secs(),
            card.due,
        ),
    )?;
    Ok(())
}

/// Anki's duplicate-detection checksum: the first 32 bits of the SHA-1 of
/// the stripped first field.
fn field_checksum(sort_field: &str) -> i64 {
    let digest = Sha1::digest(sort_field.as_bytes());
    let prefix = [digest[0], digest[1], digest[2], digest[3]];
    u32::from_be_bytes(prefix) as i64
}

fn collection_conf(model: &NoteModel) -> Value {
    json!({
        "activeDecks": [1],
        "addToCur": true,
        "collapseTime": 1200,
        "curDeck": 1,
        "curModel": model.id().to_string(),
        "dueCounts": true,
        "estTimes": true,
        "newBury": true,
        "newSpread": 0,
        "nextPos": 1,
        "sortBackwards": false,
        "sortType": "noteFld",
        "timeLim": 0,
    })
}

fn deck_json(id: i64, name: &str, modified_secs: i64) -> Value {
    json!({
        "collapsed": false,
        "conf": 1,
        "desc": "",
        "dyn": 0,
        "extendNew": 10,
        "extendRev": 50,
        "id": id,
        "lrnToday": [0, 0],
        "mod": modified_secs,
        "name": name,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "timeToday": [0, 0],
        "usn": -1,
    })
}

fn deck_conf() -> Value {
    json!({
        "1": {
            "autoplay": true,
            "id": 1,
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0,
            },
            "maxTaken": 60,
            "mod": 0,
            "name": "Default",
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "replayq": true,
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
            "timer": 0,
            "usn": 0,
        }
    })
}
