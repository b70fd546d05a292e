//! Read-only store of pre-authored thematic summaries.
//!
//! Texts are keyed by thematic area and answer pattern. Each area has
//! either one table (`<area>.json`) or several partial tables
//! (`<area>_part1.json`, `<area>_part2.json`, ...) that each cover a
//! consecutive slice of the pattern.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Text used when an area has no table at all.
pub const AREA_FALLBACK: &str = "Summary content will be available soon.";

/// Text used when the table has no entry for the pattern.
pub const PATTERN_FALLBACK: &str =
    "Summary content for this response pattern will be available soon.";

const COUNTRY_PLACEHOLDER: &str = "{country}";

/// Pattern key → summary text.
pub type SummaryTable = HashMap<String, String>;

/// Errors raised while loading summary tables.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Failed to read summary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse summary file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to scan summary directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, Default)]
struct AreaTables {
    whole: Option<SummaryTable>,
    parts: BTreeMap<u32, SummaryTable>,
}

/// Summary texts for every thematic area, loaded once.
#[derive(Debug, Clone, Default)]
pub struct SummaryStore {
    areas: HashMap<String, AreaTables>,
}

impl SummaryStore {
    /// Create an empty store. Every lookup returns a fallback text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every `*.json` table directly inside `dir`.
    ///
    /// A missing directory gives an empty store.
    pub fn load(dir: &Path) -> Result<Self, SummaryError> {
        let mut store = Self::empty();

        if !dir.is_dir() {
            warn!("Summary directory not found: {}", dir.display());
            return Ok(store);
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                debug!("Skipping non-file entry: {}", path.display());
                continue;
            }
            let Some(stem) = json_stem(path) else {
                debug!("Skipping non-JSON file: {}", path.display());
                continue;
            };

            let content = fs::read_to_string(path).map_err(|source| SummaryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let table: SummaryTable =
                serde_json::from_str(&content).map_err(|source| SummaryError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;

            debug!("Loaded {} patterns from {}", table.len(), path.display());
            match split_part(&stem) {
                Some((area, part)) => store.insert_part(area, part, table),
                None => store.insert(&stem, table),
            }
        }

        info!(
            "Loaded summaries for {} thematic areas from {}",
            store.areas.len(),
            dir.display()
        );
        Ok(store)
    }

    /// Register the full pattern table for an area.
    pub fn insert(&mut self, thematic: &str, table: SummaryTable) {
        self.areas.entry(thematic.to_string()).or_default().whole = Some(table);
    }

    /// Register partial table number `part` (1-based) for an area.
    pub fn insert_part(&mut self, thematic: &str, part: u32, table: SummaryTable) {
        self.areas
            .entry(thematic.to_string())
            .or_default()
            .parts
            .insert(part, table);
    }

    /// Number of areas with at least one table.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Look up the summary for `thematic` and answer `pattern`.
    ///
    /// Never fails: unknown areas and patterns yield fallback texts. When
    /// `country` is given it replaces every `{country}` placeholder.
    pub fn lookup(&self, thematic: &str, pattern: &str, country: Option<&str>) -> String {
        let text = match self.areas.get(thematic) {
            Some(tables) if !tables.parts.is_empty() => lookup_parts(&tables.parts, pattern),
            Some(AreaTables {
                whole: Some(table), ..
            }) => table
                .get(pattern)
                .cloned()
                .unwrap_or_else(|| PATTERN_FALLBACK.to_string()),
            _ => AREA_FALLBACK.to_string(),
        };

        match country {
            Some(country) => text.replace(COUNTRY_PLACEHOLDER, country),
            None => text,
        }
    }
}

/// Split the pattern into one consecutive chunk per part and join the texts.
fn lookup_parts(parts: &BTreeMap<u32, SummaryTable>, pattern: &str) -> String {
    let count = parts.keys().copied().max().unwrap_or(1) as usize;
    let chars: Vec<char> = pattern.chars().collect();
    let chunk_len = chars.len().div_ceil(count).max(1);

    (1..=count)
        .map(|part| {
            let start = ((part - 1) * chunk_len).min(chars.len());
            let end = (part * chunk_len).min(chars.len());
            let chunk: String = chars[start..end].iter().collect();

            match parts.get(&(part as u32)) {
                Some(table) => table
                    .get(&chunk)
                    .cloned()
                    .unwrap_or_else(|| PATTERN_FALLBACK.to_string()),
                None => format!("Summary for part {} will be available soon.", part),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn json_stem(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(".json").map(str::to_string)
}

/// `"Area_part2"` → `("Area", 2)`.
fn split_part(stem: &str) -> Option<(&str, u32)> {
    let (area, part) = stem.rsplit_once("_part")?;
    let part: u32 = part.parse().ok()?;
    (part > 0).then_some((area, part))
}
