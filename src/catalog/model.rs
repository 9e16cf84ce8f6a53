//! Raw catalog records and the data sources that produce them.
//!
//! Parsing is lenient: field names match without regard to case or
//! underscores, missing fields become empty strings (or 0), unknown fields are
//! ignored and a top-level `null` is an empty list. When two keys name the
//! same field the later one wins. Only unreadable or structurally broken input
//! is a [`LoadError`].

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Numeric key used by the page to refer to an entry without exposing its
/// command.
pub type LaunchId = usize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// One launchable title.
///
/// `category` and `launch_id` are assigned by the catalog builder; whatever
/// the source file carries in those fields is overwritten.
pub struct Entry {
    /// Path or URL of the box art image.
    pub box_art: String,
    pub platform: String,
    pub category: String,
    pub title: String,
    /// Program followed by whitespace-separated arguments.
    pub exec: String,
    pub launch_id: LaunchId,
}

impl Entry {
    pub fn new(title: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exec: exec.into(),
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_box_art(mut self, box_art: impl Into<String>) -> Self {
        self.box_art = box_art.into();
        self
    }
}

/// Fold a source key to the form field names are matched in: `BoxArt`,
/// `boxart` and `box_art` all become `boxart`.
fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// Keys are matched case-insensitively and in document order, so a repeated
// field keeps its last value. A `null` value leaves the field untouched.
impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = Entry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a game entry object")
            }

            fn visit_unit<E>(self) -> Result<Entry, E>
            where
                E: de::Error,
            {
                Ok(Entry::default())
            }

            fn visit_map<M>(self, mut map: M) -> Result<Entry, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entry = Entry::default();
                while let Some(key) = map.next_key::<String>()? {
                    let slot = match fold_key(&key).as_str() {
                        "boxart" => &mut entry.box_art,
                        "platform" => &mut entry.platform,
                        "category" => &mut entry.category,
                        "title" => &mut entry.title,
                        "exec" => &mut entry.exec,
                        "launchid" => {
                            // Reassigned by the builder; any integer is accepted.
                            if let Some(id) = map.next_value::<Option<i64>>()? {
                                entry.launch_id = LaunchId::try_from(id).unwrap_or_default();
                            }
                            continue;
                        }
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                            continue;
                        }
                    };
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        *slot = value;
                    }
                }
                Ok(entry)
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A display bucket. Entries point at it through `Entry::category == name`.
pub struct Category {
    pub icon: String,
    pub name: String,
}

impl Category {
    pub(crate) fn keyed(key: &str) -> Self {
        Self {
            icon: key.to_string(),
            name: key.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read catalog source {origin}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse catalog source {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand the builder a list of raw entries.
///
/// The builder reads a source exactly once and keeps nothing from it besides
/// the returned entries.
pub trait EntrySource {
    fn read_entries(&self) -> Result<Vec<Entry>, LoadError>;
}

impl EntrySource for [Entry] {
    fn read_entries(&self) -> Result<Vec<Entry>, LoadError> {
        Ok(self.to_vec())
    }
}

impl EntrySource for Vec<Entry> {
    fn read_entries(&self) -> Result<Vec<Entry>, LoadError> {
        Ok(self.clone())
    }
}

#[derive(Clone, Debug)]
/// A JSON array of entries on disk.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntrySource for JsonFile {
    fn read_entries(&self) -> Result<Vec<Entry>, LoadError> {
        let origin = self.path.display().to_string();
        let data = fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        parse_entries(&data, &origin)
    }
}

/// Decode a JSON entry list. `origin` only labels errors.
pub fn parse_entries(data: &str, origin: &str) -> Result<Vec<Entry>, LoadError> {
    let entries: Option<Vec<Entry>> =
        serde_json::from_str(data).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    Ok(entries.unwrap_or_default())
}
