use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::record::read_record;

/// All record files in the store, sorted lexicographically by filename.
/// `list` positions and positional tokens both come from this ordering.
pub fn record_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && entry.path().extension().and_then(|s| s.to_str())
                == Some("txt")
        {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Map a token to exactly one record file. The authoritative `Escalation:`
/// header id is checked first across the whole store; only a token that
/// matches no id is tried as a 1-based position in the sorted listing.
pub fn resolve(dir: &Path, token: &str) -> Result<PathBuf, Error> {
    let files = record_files(dir)?;

    let mut matches: Vec<&PathBuf> = Vec::new();
    for path in &files {
        if read_record(path)?.id == token {
            matches.push(path);
        }
    }
    match matches.len() {
        1 => return Ok(matches[0].clone()),
        0 => {}
        count => {
            return Err(Error::Ambiguous { id: token.to_string(), count });
        }
    }

    if let Ok(position) = token.parse::<usize>() {
        if position >= 1 && position <= files.len() {
            return Ok(files[position - 1].clone());
        }
    }

    Err(Error::NotFound(token.to_string()))
}
