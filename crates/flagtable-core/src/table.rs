// crates/flagtable-core/src/table.rs

//! # Tabular View
//!
//! [`CountryTable`] exposes a [`Directory`] as a row/column source for a
//! display widget. The column set is fixed:
//!
//! | # | kind  | content                              |
//! |---|-------|--------------------------------------|
//! | 0 | Image | decoded flag, or nothing             |
//! | 1 | Text  | country name                         |
//! | 2 | Link  | article URL derived from the name    |
//!
//! Rows are append-only. Cell values are computed on every query; nothing
//! derived is cached.

use crate::common::TableStats;
use crate::config::DEFAULT_LOCALE;
use crate::model::{Country, Directory, Flag};
use crate::traits::NameMatch;

pub const COLUMN_COUNT: usize = 3;
pub const FLAG_COLUMN: usize = 0;
pub const NAME_COLUMN: usize = 1;
pub const LINK_COLUMN: usize = 2;

/// What a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Image,
    Text,
    Link,
}

/// How a widget should render a column. Links render as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Image,
    Text,
}

impl ColumnKind {
    pub fn cell_type(self) -> CellType {
        match self {
            ColumnKind::Image => CellType::Image,
            ColumnKind::Text | ColumnKind::Link => CellType::Text,
        }
    }
}

const COLUMNS: [ColumnKind; COLUMN_COUNT] = [ColumnKind::Image, ColumnKind::Text, ColumnKind::Link];

/// One cell, tagged by column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    /// `None` when the flag could not be loaded; render a placeholder.
    Image(Option<&'a Flag>),
    Text(&'a str),
    Link(String),
}

impl CellValue<'_> {
    /// Textual content of text and link cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Link(s) => Some(s.as_str()),
            CellValue::Image(_) => None,
        }
    }
}

fn headers_for(locale: &str) -> [&'static str; COLUMN_COUNT] {
    match locale {
        "pl" => ["Flaga", "Państwo", "Link do artykułu"],
        _ => ["Flag", "Country", "Article link"],
    }
}

#[derive(Debug, Clone)]
pub struct CountryTable {
    rows: Vec<Country>,
    headers: [&'static str; COLUMN_COUNT],
    article_base: String,
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, format!("https://{DEFAULT_LOCALE}.wikipedia.org/wiki/"))
    }
}

impl CountryTable {
    /// Empty table. `locale` picks the column headers, `article_base` is
    /// the prefix of every derived link (e.g. `https://pl.wikipedia.org/wiki/`).
    pub fn new(locale: &str, article_base: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            headers: headers_for(locale),
            article_base: article_base.into(),
        }
    }

    pub fn from_directory(directory: Directory, locale: &str, article_base: impl Into<String>) -> Self {
        let mut table = Self::new(locale, article_base);
        table.rows.reserve(directory.len());
        for country in directory {
            table.add_row(country);
        }
        table
    }

    pub fn add_row(&mut self, country: Country) {
        self.rows.push(country);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.headers.get(col).copied()
    }

    pub fn column_kind(&self, col: usize) -> Option<ColumnKind> {
        COLUMNS.get(col).copied()
    }

    pub fn column_type(&self, col: usize) -> Option<CellType> {
        self.column_kind(col).map(ColumnKind::cell_type)
    }

    /// The cell at `(row, col)`, or `None` when either index is out of range.
    pub fn value_at(&self, row: usize, col: usize) -> Option<CellValue<'_>> {
        let country = self.rows.get(row)?;
        let value = match self.column_kind(col)? {
            ColumnKind::Image => CellValue::Image(country.flag()),
            ColumnKind::Text => CellValue::Text(country.name()),
            ColumnKind::Link => CellValue::Link(country.wiki_link(&self.article_base)),
        };
        Some(value)
    }

    // --- Typed accessors, one per column ---

    /// `Some(None)` means the row exists but has no flag.
    pub fn flag_at(&self, row: usize) -> Option<Option<&Flag>> {
        self.rows.get(row).map(Country::flag)
    }

    pub fn name_at(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(Country::name)
    }

    pub fn link_at(&self, row: usize) -> Option<String> {
        self.rows.get(row).map(|c| c.wiki_link(&self.article_base))
    }

    /// URL the shell should open when the cell at `(row, col)` is activated.
    /// Only link cells open anything.
    pub fn activate(&self, row: usize, col: usize) -> Option<String> {
        match self.column_kind(col)? {
            ColumnKind::Link => self.link_at(row),
            ColumnKind::Image | ColumnKind::Text => None,
        }
    }

    pub fn country_at(&self, row: usize) -> Option<&Country> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[Country] {
        &self.rows
    }

    pub fn article_base(&self) -> &str {
        &self.article_base
    }

    /// Row of the country with `code`, compared case-insensitively.
    pub fn find_by_code(&self, code: &str) -> Option<usize> {
        let code = code.trim();
        self.rows
            .iter()
            .position(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Rows whose name contains `query` (accent- and case-insensitive) or
    /// whose code equals it. An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name_contains(query) || c.code().eq_ignore_ascii_case(query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn stats(&self) -> TableStats {
        let with_flag = self.rows.iter().filter(|c| c.has_flag()).count();
        TableStats {
            rows: self.rows.len(),
            with_flag,
            without_flag: self.rows.len() - with_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const BASE: &str = "https://pl.wikipedia.org/wiki/";

    fn flag(w: u32, h: u32) -> Flag {
        Flag::from_rgba("t", RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))).unwrap()
    }

    fn sample() -> CountryTable {
        let mut table = CountryTable::new("pl", BASE);
        table.add_row(Country::new("United States", "us").with_flag(flag(8, 4)));
        table.add_row(Country::new("Polska", "pl"));
        table.add_row(Country::new("Wybrzeże Kości Słoniowej", "ci"));
        table
    }

    #[test]
    fn columns_are_fixed() {
        let t = sample();
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.column_name(0), Some("Flaga"));
        assert_eq!(t.column_name(1), Some("Państwo"));
        assert_eq!(t.column_name(2), Some("Link do artykułu"));
        assert_eq!(t.column_name(3), None);

        assert_eq!(t.column_type(FLAG_COLUMN), Some(CellType::Image));
        assert_eq!(t.column_type(NAME_COLUMN), Some(CellType::Text));
        assert_eq!(t.column_type(LINK_COLUMN), Some(CellType::Text));
        assert_eq!(t.column_kind(LINK_COLUMN), Some(ColumnKind::Link));
        assert_eq!(t.column_type(7), None);
    }

    #[test]
    fn english_headers_for_other_locales() {
        let t = CountryTable::new("de", "https://de.wikipedia.org/wiki/");
        assert_eq!(t.column_name(1), Some("Country"));
    }

    #[test]
    fn row_count_tracks_add_row() {
        let mut t = CountryTable::default();
        assert_eq!(t.row_count(), 0);
        for i in 0..5 {
            t.add_row(Country::new(format!("Kraj {i}"), format!("k{i}")));
            assert_eq!(t.row_count(), i + 1);
        }
    }

    #[test]
    fn value_at_dispatches_by_kind() {
        let t = sample();
        assert!(matches!(t.value_at(0, 0), Some(CellValue::Image(Some(f))) if f.dimensions() == (8, 4)));
        assert_eq!(t.value_at(1, 0), Some(CellValue::Image(None)));
        assert_eq!(t.value_at(1, 1), Some(CellValue::Text("Polska")));
        assert_eq!(
            t.value_at(0, 2),
            Some(CellValue::Link("https://pl.wikipedia.org/wiki/United_States".into()))
        );
        assert_eq!(t.value_at(3, 1), None);
        assert_eq!(t.value_at(0, 3), None);
    }

    #[test]
    fn typed_accessors_agree_with_value_at() {
        let t = sample();
        assert_eq!(t.name_at(2), Some("Wybrzeże Kości Słoniowej"));
        assert_eq!(
            t.link_at(2).as_deref(),
            Some("https://pl.wikipedia.org/wiki/Wybrzeże_Kości_Słoniowej")
        );
        assert_eq!(t.flag_at(1), Some(None));
        assert_eq!(t.flag_at(9), None);
        assert_eq!(t.value_at(2, 2).as_ref().and_then(CellValue::as_text), t.link_at(2).as_deref());
    }

    #[test]
    fn only_link_cells_activate() {
        let t = sample();
        assert_eq!(t.activate(1, LINK_COLUMN).as_deref(), Some("https://pl.wikipedia.org/wiki/Polska"));
        assert_eq!(t.activate(1, NAME_COLUMN), None);
        assert_eq!(t.activate(1, FLAG_COLUMN), None);
        assert_eq!(t.activate(42, LINK_COLUMN), None);
    }

    #[test]
    fn search_folds_accents_and_case() {
        let t = sample();
        assert_eq!(t.search("kosci"), vec![2]);
        assert_eq!(t.search("POL"), vec![1]);
        assert_eq!(t.search("us"), vec![0]);
        assert!(t.search("   ").is_empty());
        assert_eq!(t.find_by_code("PL"), Some(1));
        assert_eq!(t.find_by_code("zz"), None);
    }

    #[test]
    fn stats_count_flags() {
        assert_eq!(
            sample().stats(),
            TableStats { rows: 3, with_flag: 1, without_flag: 2 }
        );
    }
}
