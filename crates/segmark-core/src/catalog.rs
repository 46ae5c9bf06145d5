// crates/segmark-core/src/catalog.rs
//
// Action label taxonomy.
//
// The catalog file groups techniques under categories:
//
//   Category,Technique,Color
//   Jump,Toe Loop,#FF0000
//   Jump,Axel,#00FF00
//   Spin,Camel,#0000FF
//
// and is flattened into one pick list with synthetic header and separator
// entries between groups:
//
//   📁 Jump / Toe Loop / Axel / ─── / 📁 Spin / Camel
//
// Only Technique entries can be picked. ActionSelection enforces that by
// keeping the previous choice whenever a header or separator is requested.

use std::path::Path;
use serde::Deserialize;
use crate::error::Result;
use crate::segment::Rgb;

/// Color for labels the catalog does not know about (and rows without one).
pub const DEFAULT_ACTION_COLOR: Rgb = Rgb::new(136, 136, 146);

/// Built-in labels used when no catalog rows are available.
pub const FALLBACK_ACTIONS: [(&str, Rgb); 4] = [
    ("jump",       Rgb::new(230,  84,  64)),
    ("spin",       Rgb::new( 64, 140, 230)),
    ("footwork",   Rgb::new( 84, 190, 112)),
    ("transition", Rgb::new(210, 170,  60)),
];

const HEADER_PREFIX: &str = "📁 ";
const SEPARATOR_TEXT: &str = "───";
const TECHNIQUE_INDENT: &str = "  ";

// ── Entries ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEntry {
    Header(String),
    Separator,
    Technique { label: String, color: Rgb },
}

impl CatalogEntry {
    pub fn is_selectable(&self) -> bool {
        matches!(self, CatalogEntry::Technique { .. })
    }

    /// Text shown in the pick list.
    pub fn display_text(&self) -> String {
        match self {
            CatalogEntry::Header(name)             => format!("{HEADER_PREFIX}{name}"),
            CatalogEntry::Separator                => SEPARATOR_TEXT.to_string(),
            CatalogEntry::Technique { label, .. }  => format!("{TECHNIQUE_INDENT}{label}"),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            CatalogEntry::Technique { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// One input row: a technique and the category it is grouped under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRow {
    pub category:  String,
    pub technique: String,
    pub color:     Option<Rgb>,
}

impl CatalogRow {
    pub fn new(category: &str, technique: &str, color: Option<Rgb>) -> Self {
        Self { category: category.to_string(), technique: technique.to_string(), color }
    }
}

/// Raw CSV record. Color stays textual until it has been validated.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Category")]
    category:  String,
    #[serde(rename = "Technique")]
    technique: String,
    #[serde(rename = "Color", default)]
    color:     Option<String>,
}

// ── ActionCatalog ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionCatalog {
    entries:  Vec<CatalogEntry>,
    fallback: bool,
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ActionCatalog {
    /// The four built-in labels, ungrouped.
    pub fn builtin() -> Self {
        let entries = FALLBACK_ACTIONS.iter()
            .map(|(label, color)| CatalogEntry::Technique { label: label.to_string(), color: *color })
            .collect();
        Self { entries, fallback: true }
    }

    /// Build the flattened pick list from grouped rows.
    ///
    /// A header is emitted every time the category differs from the previous
    /// row's; a separator precedes every header except the first. No rows at
    /// all yields [`ActionCatalog::builtin`].
    pub fn load<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CatalogRow>,
    {
        let mut entries = Vec::new();
        let mut current: Option<String> = None;

        for row in rows {
            if current.as_deref() != Some(row.category.as_str()) {
                if current.is_some() {
                    entries.push(CatalogEntry::Separator);
                }
                entries.push(CatalogEntry::Header(row.category.clone()));
                current = Some(row.category);
            }
            entries.push(CatalogEntry::Technique {
                label: row.technique,
                color: row.color.unwrap_or(DEFAULT_ACTION_COLOR),
            });
        }

        if entries.is_empty() {
            log::info!("[catalog] no rows supplied, using built-in labels");
            return Self::builtin();
        }
        Self { entries, fallback: false }
    }

    /// Read a `Category,Technique,Color` CSV file.
    ///
    /// Rows without a technique are skipped. A missing or unparsable color
    /// falls back to [`DEFAULT_ACTION_COLOR`].
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.deserialize::<CsvRow>() {
            let raw = record?;
            if raw.technique.is_empty() {
                log::warn!("[catalog] skipping row without technique in category {:?}", raw.category);
                continue;
            }
            let color = match raw.color.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => {
                    let parsed = Rgb::from_hex(text);
                    if parsed.is_none() {
                        log::warn!("[catalog] bad color {text:?} for {:?}, using default", raw.technique);
                    }
                    parsed
                }
            };
            rows.push(CatalogRow { category: raw.category, technique: raw.technique, color });
        }

        log::info!("[catalog] {} techniques loaded from {}", rows.len(), path.display());
        Ok(Self::load(rows))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// True when the catalog is the built-in fallback list.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.entry(index).is_some_and(CatalogEntry::is_selectable)
    }

    pub fn first_selectable(&self) -> Option<usize> {
        self.entries.iter().position(CatalogEntry::is_selectable)
    }

    /// Flattened display strings, in list order.
    pub fn display_list(&self) -> Vec<String> {
        self.entries.iter().map(CatalogEntry::display_text).collect()
    }

    /// Every selectable label, in list order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(CatalogEntry::label)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label() == Some(label))
    }

    pub fn color_for(&self, label: &str) -> Rgb {
        self.entries.iter()
            .find_map(|e| match e {
                CatalogEntry::Technique { label: l, color } if l.as_str() == label => Some(*color),
                _ => None,
            })
            .unwrap_or(DEFAULT_ACTION_COLOR)
    }
}

// ── ActionSelection ───────────────────────────────────────────────────────────

/// The effective pick-list choice. Never points at a header or separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionSelection {
    index: Option<usize>,
}

impl ActionSelection {
    /// Start on the first selectable entry of `catalog`.
    pub fn first_of(catalog: &ActionCatalog) -> Self {
        Self { index: catalog.first_selectable() }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Try to move the selection to `index`. Headers, separators and
    /// out-of-range indices are rejected and the previous choice is kept.
    pub fn choose(&mut self, catalog: &ActionCatalog, index: usize) -> bool {
        if catalog.is_selectable(index) {
            self.index = Some(index);
            true
        } else {
            log::debug!("[catalog] rejected non-selectable entry {index}");
            false
        }
    }

    pub fn label<'c>(&self, catalog: &'c ActionCatalog) -> Option<&'c str> {
        self.index.and_then(|i| catalog.entry(i)).and_then(CatalogEntry::label)
    }
}
