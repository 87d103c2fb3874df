//! Descriptions of the tabular files the vocabulary is harvested from.
//!
//! Each listing export has its own layout. `SourceKind` names the known
//! layouts; `custom` lets a config describe any other file by hand.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::IngestError;

/// Physical file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    /// Any workbook calamine can open (xlsx, xlsm, xls, ods).
    Xlsx,
}

impl SourceFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Xlsx),
            _ => None,
        }
    }
}

/// Known listing layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// RE/MAX export: address and details in columns 1-2.
    Remax,
    /// Merged scrape: every column is free text.
    Combined,
    /// Scraper output: address, location, type, listing in columns 1-4.
    Scraped,
    /// Workbook with the description in the first column.
    Spreadsheet,
    /// Zolo Windsor listings: descriptive fields in columns 4-9.
    Zolo,
    /// Layout given entirely by `columns` / `require_all_columns`.
    Custom,
}

impl FromStr for SourceKind {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remax" => Ok(SourceKind::Remax),
            "combined" => Ok(SourceKind::Combined),
            "scraped" => Ok(SourceKind::Scraped),
            "spreadsheet" | "excel" | "xlsx" => Ok(SourceKind::Spreadsheet),
            "zolo" => Ok(SourceKind::Zolo),
            "custom" => Ok(SourceKind::Custom),
            other => Err(IngestError::UnknownKind(other.to_string())),
        }
    }
}

/// Which cells of a row carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    All,
    Columns(Vec<usize>),
}

impl ColumnSelection {
    /// Cells of `row` selected by this layout. Columns past the end of the
    /// row are silently absent.
    pub fn pick<'r, S: AsRef<str>>(&self, row: &'r [S]) -> Vec<&'r str> {
        match self {
            ColumnSelection::All => row.iter().map(|c| c.as_ref()).collect(),
            ColumnSelection::Columns(cols) => cols
                .iter()
                .filter_map(|&i| row.get(i).map(|c| c.as_ref()))
                .collect(),
        }
    }

    fn highest(&self) -> Option<usize> {
        match self {
            ColumnSelection::All => None,
            ColumnSelection::Columns(cols) => cols.iter().copied().max(),
        }
    }
}

/// Fully resolved reading instructions for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub format: SourceFormat,
    pub columns: ColumnSelection,
    /// Skip rows that do not reach the highest selected column.
    pub require_all_columns: bool,
    pub has_header: bool,
    pub sheet: Option<String>,
}

impl Layout {
    /// Whether `row_len` cells are enough for this layout.
    pub fn accepts(&self, row_len: usize) -> bool {
        if !self.require_all_columns {
            return true;
        }
        match self.columns.highest() {
            Some(max) => row_len > max,
            None => true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One data source as written in the config file or on the command line.
///
/// ```toml
/// [[sources]]
/// kind = "zolo"
/// path = "data/zolo_windsor_listings.csv"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub kind: SourceKind,
    /// Overrides the format implied by `kind` / the file extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,
    /// Overrides the kind's column set. Zero-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_all_columns: Option<bool>,
    #[serde(default = "default_true")]
    pub has_header: bool,
    /// Worksheet name; the first sheet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl SourceSpec {
    pub fn new<P: Into<PathBuf>>(kind: SourceKind, path: P) -> Self {
        Self {
            path: path.into(),
            kind,
            format: None,
            columns: None,
            require_all_columns: None,
            has_header: true,
            sheet: None,
        }
    }

    /// Resolve the kind preset plus overrides into a concrete layout.
    pub fn layout(&self) -> Result<Layout, IngestError> {
        let (preset_format, preset_columns, preset_require) = match self.kind {
            SourceKind::Remax => (Some(SourceFormat::Csv), ColumnSelection::Columns(vec![1, 2]), true),
            SourceKind::Combined => (Some(SourceFormat::Csv), ColumnSelection::All, false),
            SourceKind::Scraped => (
                Some(SourceFormat::Csv),
                ColumnSelection::Columns(vec![1, 2, 3, 4]),
                true,
            ),
            SourceKind::Spreadsheet => (Some(SourceFormat::Xlsx), ColumnSelection::Columns(vec![0]), false),
            SourceKind::Zolo => (
                Some(SourceFormat::Csv),
                ColumnSelection::Columns((4..=9).collect()),
                false,
            ),
            SourceKind::Custom => (None, ColumnSelection::All, false),
        };

        let format = self
            .format
            .or_else(|| SourceFormat::from_path(&self.path))
            .or(preset_format)
            .ok_or_else(|| IngestError::UnknownFormat(self.path.clone()))?;

        Ok(Layout {
            format,
            columns: self
                .columns
                .clone()
                .map(ColumnSelection::Columns)
                .unwrap_or(preset_columns),
            require_all_columns: self.require_all_columns.unwrap_or(preset_require),
            has_header: self.has_header,
            sheet: self.sheet.clone(),
        })
    }
}

impl FromStr for SourceSpec {
    type Err = IngestError;

    /// Parse the command-line form `KIND=PATH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, path) = s
            .split_once('=')
            .ok_or_else(|| IngestError::InvalidSpec(s.to_string()))?;
        if path.trim().is_empty() {
            return Err(IngestError::InvalidSpec(s.to_string()));
        }
        Ok(SourceSpec::new(kind.parse()?, path.trim()))
    }
}

/// The five Windsor listing exports read by the default config.
pub fn reference_sources(data_dir: &Path) -> Vec<SourceSpec> {
    vec![
        SourceSpec::new(SourceKind::Remax, data_dir.join("remax_listings.csv")),
        SourceSpec::new(SourceKind::Combined, data_dir.join("combined_scraped_data.csv")),
        SourceSpec::new(SourceKind::Scraped, data_dir.join("scraped_data.csv")),
        SourceSpec::new(SourceKind::Spreadsheet, data_dir.join("ScrapedData.xlsx")),
        SourceSpec::new(SourceKind::Zolo, data_dir.join("zolo_windsor_listings.csv")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remax_requires_three_columns() {
        let layout = SourceSpec::new(SourceKind::Remax, "r.csv").layout().unwrap();
        assert_eq!(layout.format, SourceFormat::Csv);
        assert!(!layout.accepts(2));
        assert!(layout.accepts(3));
    }

    #[test]
    fn scraped_requires_five_columns() {
        let layout = SourceSpec::new(SourceKind::Scraped, "s.csv").layout().unwrap();
        assert!(!layout.accepts(4));
        assert!(layout.accepts(5));
    }

    #[test]
    fn zolo_takes_whatever_columns_exist() {
        let layout = SourceSpec::new(SourceKind::Zolo, "z.csv").layout().unwrap();
        assert!(layout.accepts(0));
        let row = ["0", "1", "2", "3", "four", "five"];
        assert_eq!(layout.columns.pick(row.as_slice()), vec!["four", "five"]);
    }

    #[test]
    fn spreadsheet_defaults_to_first_column() {
        let layout = SourceSpec::new(SourceKind::Spreadsheet, "data/ScrapedData.xlsx")
            .layout()
            .unwrap();
        assert_eq!(layout.format, SourceFormat::Xlsx);
        assert_eq!(layout.columns, ColumnSelection::Columns(vec![0]));
    }

    #[test]
    fn custom_needs_a_known_extension_or_format() {
        let spec = SourceSpec::new(SourceKind::Custom, "listings.dat");
        assert!(matches!(spec.layout(), Err(IngestError::UnknownFormat(_))));

        let mut spec = SourceSpec::new(SourceKind::Custom, "listings.dat");
        spec.format = Some(SourceFormat::Csv);
        spec.columns = Some(vec![3]);
        let layout = spec.layout().unwrap();
        assert_eq!(layout.columns, ColumnSelection::Columns(vec![3]));
        assert!(!layout.require_all_columns);
    }

    #[test]
    fn parse_cli_form() {
        let spec: SourceSpec = "zolo=data/zolo.csv".parse().unwrap();
        assert_eq!(spec.kind, SourceKind::Zolo);
        assert_eq!(spec.path, PathBuf::from("data/zolo.csv"));

        assert!(matches!(
            "data/zolo.csv".parse::<SourceSpec>(),
            Err(IngestError::InvalidSpec(_))
        ));
        assert!(matches!(
            "mls=data/x.csv".parse::<SourceSpec>(),
            Err(IngestError::UnknownKind(_))
        ));
    }

    #[test]
    fn spec_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            sources: Vec<SourceSpec>,
        }
        let w: Wrapper = toml::from_str(
            r#"
            [[sources]]
            kind = "custom"
            path = "notes.csv"
            columns = [0, 2]
            has_header = false
            "#,
        )
        .unwrap();
        let layout = w.sources[0].layout().unwrap();
        assert!(!layout.has_header);
        assert_eq!(layout.columns.pick(&["a", "b", "c"][..]), vec!["a", "c"]);
    }
}
