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

use crate::error::Fallible;
use crate::reader::RowReader;
use crate::text::clean_for_audio;
use crate::text::slugify;
use crate::text::to_presentation;

/// Print what each usable row would become, without synthesizing audio or
/// writing anything. Returns the number of usable rows.
pub fn check_csv(input: &Path, max_slug_len: usize) -> Fallible<usize> {
    let mut count = 0;
    for row in RowReader::open(input)?.rows() {
        let row = row?;
        let slug = slugify(&clean_for_audio(&row.front), max_slug_len);
        println!("{slug}.mp3\t{}\t{}", to_presentation(&row.front), to_presentation(&row.back));
        count += 1;
    }
    println!("{count} usable rows.");
    Ok(count)
}
