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

use std::fs::remove_dir_all;
use std::path::Path;

use crate::error::Fallible;
use crate::error::fail;

/// Delete the audio working directory. Returns whether anything was removed.
pub fn clean_audio_dir(dir: &Path) -> Fallible<bool> {
    if !dir.exists() {
        println!("Nothing to clean: {} does not exist.", dir.display());
        return Ok(false);
    }
    if !dir.is_dir() {
        return fail(format!("{} is not a directory.", dir.display()));
    }
    remove_dir_all(dir)?;
    println!("Removed {}.", dir.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_removes_directory() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let dir = root.path().join("temp_audio");
        create_dir(&dir)?;
        write(dir.join("Hello.mp3"), b"ID3")?;
        assert!(clean_audio_dir(&dir)?);
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn test_missing_directory() -> Fallible<()> {
        let root = create_tmp_directory()?;
        assert!(!clean_audio_dir(&root.path().join("temp_audio"))?);
        Ok(())
    }

    #[test]
    fn test_refuses_files() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let file = root.path().join("temp_audio");
        write(&file, b"not a directory")?;
        assert!(clean_audio_dir(&file).is_err());
        assert!(file.exists());
        Ok(())
    }
}
