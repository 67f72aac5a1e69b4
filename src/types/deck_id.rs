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

use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

const DECK_ID_BASE: i64 = 2059400110;
const DECK_ID_RANGE: u64 = 100_000_000;

/// Identifier of the generated deck inside Anki.
///
/// Derived from the deck name with BLAKE3, so the same name yields the same
/// id on every platform and every run. Importing a deck with the same id
/// merges into the existing deck. Different names may collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DeckId(i64);

impl DeckId {
    pub fn from_name(name: &str) -> Self {
        let hash = blake3::hash(name.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        let offset = u64::from_le_bytes(prefix) % DECK_ID_RANGE;
        Self(DECK_ID_BASE + offset as i64)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl ToSql for DeckId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
