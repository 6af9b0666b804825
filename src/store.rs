use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::record::{
    Record, parse_record, read_record, timestamp_string, write_record,
};
use crate::resolve::{record_files, resolve};
use crate::slug::sanitize;

/// One row of the `list` enumeration; `position` is the 1-based index
/// positional tokens resolve against.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub position: usize,
    pub id: String,
    pub title: String,
}

/// One matching file from a search: identity plus every line containing
/// the term, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub lines: Vec<String>,
}

/// Handle to one store directory. Every operation goes through a value of
/// this type; there is no module-global store state.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store, creating the directory if absent. Idempotent.
    pub fn open(dir: PathBuf) -> io::Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resolve(&self, token: &str) -> Result<PathBuf, Error> {
        resolve(&self.dir, token)
    }

    /// Create a fresh record with an empty update section; fails if the
    /// exact target filename already exists.
    pub fn create(&self, id: &str, title: &str) -> Result<PathBuf, Error> {
        let path = self.dir.join(format!("{id}_{}.txt", sanitize(title)));
        if path.exists() {
            return Err(Error::AlreadyExists(id.to_string()));
        }
        let record = Record {
            id: id.to_string(),
            title: title.to_string(),
            tags: Vec::new(),
            created: timestamp_string(),
            updates: Vec::new(),
        };
        write_record(&path, &record)?;
        Ok(path)
    }

    /// Splice a timestamped entry right after the marker line and persist.
    /// Returns the path and the 1-based line the entry landed on, which is
    /// the editor position hint.
    pub fn append_update(
        &self,
        token: &str,
    ) -> Result<(PathBuf, usize), Error> {
        let path = self.resolve(token)?;
        let mut record = read_record(&path)?;
        record.insert_update(&timestamp_string());
        write_record(&path, &record)?;
        Ok((path, record.first_entry_line()))
    }

    /// Union new tags into the record's set; returns the merged set.
    pub fn tag(
        &self,
        token: &str,
        tags: &[String],
    ) -> Result<Vec<String>, Error> {
        let path = self.resolve(token)?;
        let mut record = read_record(&path)?;
        record.merge_tags(tags);
        write_record(&path, &record)?;
        Ok(record.tags)
    }

    /// Case-insensitive substring scan over every record's full content,
    /// header lines included. An empty term matches every file and every
    /// line.
    pub fn search(&self, term: &str) -> Result<Vec<SearchHit>, Error> {
        let needle = term.to_lowercase();
        let mut hits = Vec::new();
        for path in record_files(&self.dir)? {
            let raw = fs::read_to_string(&path)?;
            if !raw.to_lowercase().contains(&needle) {
                continue;
            }
            let record = parse_record(&raw);
            let lines = raw
                .lines()
                .filter(|l| l.to_lowercase().contains(&needle))
                .map(str::to_string)
                .collect();
            hits.push(SearchHit {
                id: record.id,
                title: record.title,
                lines,
            });
        }
        Ok(hits)
    }

    /// 1-based, sorted-by-filename enumeration; the same ordering the
    /// resolver uses for positional tokens.
    pub fn list(&self) -> Result<Vec<ListEntry>, Error> {
        let mut entries = Vec::new();
        for (idx, path) in record_files(&self.dir)?.iter().enumerate() {
            let record = read_record(path)?;
            entries.push(ListEntry {
                position: idx + 1,
                id: record.id,
                title: record.title,
            });
        }
        Ok(entries)
    }

    /// Resolve a token and return the raw file contents.
    pub fn show(&self, token: &str) -> Result<(PathBuf, String), Error> {
        let path = self.resolve(token)?;
        let contents = fs::read_to_string(&path)?;
        Ok((path, contents))
    }

    /// Remove a record file. Confirmation happens at the CLI layer.
    pub fn remove(&self, path: &Path) -> Result<(), Error> {
        fs::remove_file(path)?;
        Ok(())
    }
}
