//! Roster loading and parsing.
//!
//! A roster is a comma-separated file whose first line is a header. Files
//! authored on Windows keep a trailing carriage return on every line and
//! spreadsheet exports may start with a byte order mark; neither reaches
//! an entry's fields.

use crate::error::{RosterError, RunError};
use crate::models::RosterEntry;
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Strip trailing carriage-return characters. Idempotent.
pub fn strip_trailing_cr(value: &str) -> &str {
    value.trim_end_matches('\r')
}

/// One data line of the roster after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterLine {
    Entry(RosterEntry),
    Malformed {
        line: usize,
        raw: String,
        error: RosterError,
    },
}

/// Where each field lives in a roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLayout {
    width: usize,
    email: Option<usize>,
    name: Option<usize>,
    username: usize,
}

impl RosterLayout {
    /// Derive the layout from the header record.
    ///
    /// A header naming a `username` column is matched by name (`email` and
    /// `name` are optional). Otherwise the canonical positional layout
    /// `email,name,username` applies, with the username always last.
    pub fn from_header(header: &ByteRecord) -> Self {
        let columns: Vec<String> = header
            .iter()
            .map(|column| {
                String::from_utf8_lossy(column)
                    .trim_start_matches(BYTE_ORDER_MARK)
                    .trim()
                    .to_lowercase()
            })
            .collect();
        let width = columns.len().max(1);

        let find = |names: &[&str]| columns.iter().position(|c| names.contains(&c.as_str()));

        if let Some(username) = find(&["username", "user", "login"]) {
            return Self {
                width,
                email: find(&["email", "e-mail", "mail"]),
                name: find(&["name", "display_name", "displayname", "full name"]),
                username,
            };
        }

        Self {
            width,
            email: (width >= 2).then_some(0),
            name: (width >= 3).then_some(1),
            username: width - 1,
        }
    }

    /// Turn one data record into an entry.
    pub fn parse_record(&self, line: usize, record: &ByteRecord) -> Result<RosterEntry, RosterError> {
        if record.len() != self.width {
            return Err(RosterError::FieldCount {
                expected: self.width,
                found: record.len(),
            });
        }

        let fields = decode_fields(record)?;
        let username = strip_trailing_cr(&fields[self.username]).to_string();
        validate_username(&username)?;

        let field = |idx: Option<usize>| idx.map(|i| fields[i].clone()).unwrap_or_default();

        Ok(RosterEntry {
            line,
            email: field(self.email),
            display_name: field(self.name),
            username,
        })
    }
}

/// Decode every field as UTF-8; the first bad field rejects the row.
fn decode_fields(record: &ByteRecord) -> Result<Vec<String>, RosterError> {
    record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            std::str::from_utf8(field)
                .map(str::to_string)
                .map_err(|_| RosterError::NotUtf8 { field: idx + 1 })
        })
        .collect()
}

fn validate_username(username: &str) -> Result<(), RosterError> {
    if username.is_empty() {
        return Err(RosterError::MissingUsername);
    }
    if username == "." || username == ".." || username.contains(['/', '\\', '\0']) {
        return Err(RosterError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

fn is_blank(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|field| field.iter().all(u8::is_ascii_whitespace))
}

/// The record as a lossy comma-joined line, for diagnostics.
fn raw_text(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

/// A parsed roster file.
#[derive(Debug, Clone)]
pub struct Roster {
    path: PathBuf,
    lines: Vec<RosterLine>,
}

impl Roster {
    /// Read and parse a roster file.
    ///
    /// Only failing to read the file is an error; bad lines become
    /// [`RosterLine::Malformed`].
    pub fn load(path: &Path) -> Result<Self, RunError> {
        let content = std::fs::read(path).map_err(|source| RunError::RosterUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(path, &content))
    }

    /// Parse roster bytes. The first record is the header.
    ///
    /// Rows are decoded one at a time, so a row with bad bytes only marks
    /// that line as malformed.
    pub fn parse(path: &Path, content: &[u8]) -> Self {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);
        let mut roster = Self {
            path: path.to_path_buf(),
            lines: Vec::new(),
        };

        let layout = match reader.byte_headers() {
            Ok(header) if !is_blank(header) => RosterLayout::from_header(header),
            Ok(_) => {
                warn!("Roster {} has no header line", path.display());
                return roster;
            }
            Err(e) => {
                warn!("Cannot read the header of roster {}: {}", path.display(), e);
                return roster;
            }
        };
        debug!("Roster layout: {:?}", layout);

        for result in reader.byte_records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    // No further records can be read once the reader fails.
                    let line = e.position().map_or(0, |pos| pos.line() as usize);
                    roster.lines.push(RosterLine::Malformed {
                        line,
                        raw: String::new(),
                        error: RosterError::Csv(e.to_string()),
                    });
                    break;
                }
            };
            if is_blank(&record) {
                continue;
            }

            let line = record.position().map_or(0, |pos| pos.line() as usize);
            match layout.parse_record(line, &record) {
                Ok(entry) => roster.lines.push(RosterLine::Entry(entry)),
                Err(error) => roster.lines.push(RosterLine::Malformed {
                    line,
                    raw: raw_text(&record),
                    error,
                }),
            }
        }

        roster
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All data lines in roster order.
    pub fn lines(&self) -> &[RosterLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Well-formed entries in roster order.
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.lines.iter().filter_map(|l| match l {
            RosterLine::Entry(entry) => Some(entry),
            RosterLine::Malformed { .. } => None,
        })
    }

    /// Usernames that appear more than once, in first-seen order.
    pub fn duplicate_usernames(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for entry in self.entries() {
            if !seen.insert(entry.username.as_str()) && reported.insert(entry.username.as_str()) {
                duplicates.push(entry.username.clone());
            }
        }

        duplicates
    }
}
