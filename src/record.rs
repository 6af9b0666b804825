//! On-disk record format: a fixed header block, the `Status Updates:`
//! marker line, then the update log verbatim (newest entry first).

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;

pub const TIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Literal line separating the header fields from the update log.
pub const MARKER: &str = "Status Updates:";

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub created: String,
    /// Lines after the marker, byte-for-byte and in file order.
    pub updates: Vec<String>,
}

impl Record {
    /// Splice a bare `[stamp]` entry immediately after the marker line,
    /// ahead of every earlier entry.
    pub fn insert_update(&mut self, stamp: &str) {
        self.updates.insert(0, format!("[{stamp}]"));
    }

    /// Union `new` into the tag set; the set stays sorted and deduplicated.
    pub fn merge_tags(&mut self, new: &[String]) -> &[String] {
        self.tags.extend(new.iter().cloned());
        self.tags.sort();
        self.tags.dedup();
        &self.tags
    }

    /// Serialize in fixed field order, trailing newline included.
    pub fn render(&self) -> String {
        let tags_line = if self.tags.is_empty() {
            "Tags:".to_string()
        } else {
            format!("Tags: {}", self.tags.join(" "))
        };
        let mut out = format!(
            "Escalation: {}\nTitle: {}\n{}\nCreated: {}\n\n{MARKER}\n",
            self.id, self.title, tags_line, self.created
        );
        for line in &self.updates {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// 1-based line number the next inserted entry lands on: the line
    /// right after the marker.
    pub fn first_entry_line(&self) -> usize {
        self.render()
            .lines()
            .position(|l| l == MARKER)
            .map(|idx| idx + 2)
            .unwrap_or(1)
    }
}

pub fn read_record(path: &Path) -> io::Result<Record> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_record(&raw))
}

/// Persist the rendered record. A file that went through `read_record`
/// comes back out with a canonical header (fixed field order, known
/// fields only); only the update section survives verbatim.
pub fn write_record(path: &Path, record: &Record) -> io::Result<()> {
    fs::write(path, record.render())
}

/// Lenient line parser: the first occurrence of each header field wins,
/// missing fields stay empty, and everything after the marker is kept
/// verbatim. Pre-marker lines that match no known field (and duplicate
/// field lines) are dropped, so the next rewrite canonicalizes the
/// header. Never fails on content.
pub fn parse_record(raw: &str) -> Record {
    let mut id: Option<String> = None;
    let mut title: Option<String> = None;
    let mut tags: Option<Vec<String>> = None;
    let mut created: Option<String> = None;
    let mut updates: Vec<String> = Vec::new();
    let mut in_updates = false;

    for line in raw.lines() {
        if in_updates {
            updates.push(line.to_string());
        } else if line == MARKER {
            in_updates = true;
        } else if let Some(val) = line.strip_prefix("Escalation:") {
            if id.is_none() {
                id = Some(val.trim().to_string());
            }
        } else if let Some(val) = line.strip_prefix("Title:") {
            if title.is_none() {
                title = Some(val.trim().to_string());
            }
        } else if let Some(val) = line.strip_prefix("Tags:") {
            if tags.is_none() {
                let mut parsed: Vec<String> =
                    val.split_whitespace().map(str::to_string).collect();
                parsed.sort();
                parsed.dedup();
                tags = Some(parsed);
            }
        } else if let Some(val) = line.strip_prefix("Created:") {
            if created.is_none() {
                created = Some(val.trim().to_string());
            }
        }
    }

    Record {
        id: id.unwrap_or_default(),
        title: title.unwrap_or_default(),
        tags: tags.unwrap_or_default(),
        created: created.unwrap_or_default(),
        updates,
    }
}

/// Wall-clock stamp in the `YYYY-MM-DD HH:MM` form the file format uses.
pub fn timestamp_string() -> String {
    Local::now().format(TIME_FMT).to_string()
}
