use crate::core::models::TimeBlock;
use crate::core::store::{Sort, TimeBlockStore};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default = "default_next_id")]
    pub next_id: u32,
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
}

fn default_next_id() -> u32 {
    1
}

pub fn save_state(store: &TimeBlockStore, path: &Path) -> Result<PathBuf> {
    let file = SaveFile {
        next_id: store.peek_next_id(),
        blocks: store
            .query()
            .order(Sort::Inserted)
            .collect()
            .into_iter()
            .cloned()
            .collect(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(&file)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Load every block or none: the store only changes once the whole file
/// has been decoded and validated.
pub fn load_state(store: &mut TimeBlockStore, path: &Path) -> Result<usize> {
    let save_file = load_save_file(path)?;
    check_blocks(&save_file.blocks)?;
    let count = save_file.blocks.len();
    store.replace_all(save_file.blocks, save_file.next_id);
    Ok(count)
}

fn check_blocks(blocks: &[TimeBlock]) -> Result<()> {
    let mut seen = HashSet::new();
    for block in blocks {
        if !seen.insert(block.id) {
            return Err(Error::Parse(format!(
                "Block with id {} appears more than once.",
                block.id
            )));
        }
        block.validate().map_err(|e| {
            Error::Parse(format!("Block with id {} is invalid. {}", block.id, e))
        })?;
    }
    Ok(())
}

fn load_save_file(path: &Path) -> Result<SaveFile> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
