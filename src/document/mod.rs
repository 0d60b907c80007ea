//! # Document Model
//!
//! An in-memory structural view of a word-processing document: an ordered
//! sequence of [`Block`]s, each a paragraph, a table or a page break, with the
//! formatting attributes the composition engine carries between documents.
//!
//! Every formatting field is an `Option`. `None` means "inherit from the
//! style or document defaults", never "off" or "zero", so copying a block
//! cannot introduce a default that the source did not state.
//!
//! Documents persist either as Flat OPC WordprocessingML (`.xml`) or as
//! zipped `.docx` packages, both handled by [`package::WordPackage`]. The
//! reader and writer submodules translate between XML nodes and this model.

mod docx;
pub mod format;
mod names;
pub mod package;
mod reader;
mod writer;

use serde::Serialize;
use std::path::Path;

pub use format::{Alignment, Highlight, Length, LineSpacing, RgbColor};
pub use package::WordPackage;

/// On-disk container of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Single-file Flat OPC XML
    FlatXml,
    /// Zipped package
    Docx,
}

impl DocumentFormat {
    /// Extensions a library scan accepts when none is configured.
    pub const EXTENSIONS: [&'static str; 2] = ["docx", "xml"];

    /// `.docx` in any case is zipped; every other extension is Flat OPC.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::FlatXml,
        }
    }

    pub fn is_known_extension(extension: &str) -> bool {
        Self::EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }
}

/// A document body: blocks in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentTree {
    pub blocks: Vec<Block>,
    /// Embedded images and objects found while loading; never copied
    pub media: usize,
    /// Tables nested inside table cells that were flattened to paragraphs
    pub flattened_tables: usize,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Number of page-break separators at the top level.
    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }

    /// Top-level blocks grouped into the segments between page breaks.
    pub fn segments(&self) -> Vec<&[Block]> {
        self.blocks
            .split(|b| matches!(b, Block::PageBreak))
            .collect()
    }

    /// Plain text of every paragraph and table, one entry per block.
    pub fn block_texts(&self) -> Vec<String> {
        self.blocks.iter().map(Block::text).collect()
    }
}

/// One top-level unit of a document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// A paragraph holding nothing but a page break
    PageBreak,
}

impl Block {
    pub fn text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text(),
            Block::Table(t) => t.text(),
            Block::PageBreak => String::new(),
        }
    }
}

/// A paragraph and its direct formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    /// Style *name* (not id); bound against the target's style table on copy
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub space_before: Option<Length>,
    pub space_after: Option<Length>,
    pub line_spacing: Option<LineSpacing>,
    pub left_indent: Option<Length>,
    pub right_indent: Option<Length>,
    /// Negative for a hanging indent
    pub first_line_indent: Option<Length>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph with a single unformatted run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Paragraph {
            runs: vec![Run::new(text)],
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A span of text sharing one set of character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Text with tabs as `\t` and line breaks as `\n`
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_name: Option<String>,
    pub font_size: Option<Length>,
    pub color: Option<RgbColor>,
    pub highlight: Option<Highlight>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A rectangular table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub rows: usize,
    pub cols: usize,
    pub style: Option<String>,
    /// Row-major, always `rows * cols` long
    pub cells: Vec<Cell>,
}

impl Table {
    /// An empty `rows` x `cols` table.
    pub fn new(rows: usize, cols: usize) -> Self {
        Table {
            rows,
            cols,
            style: None,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Cell texts, row by row.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(Cell::text).collect())
            .collect()
    }

    pub fn text(&self) -> String {
        self.cell_texts()
            .into_iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table cell; content is restricted to paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn with_text(text: impl Into<String>) -> Self {
        Cell {
            paragraphs: vec![Paragraph::with_text(text)],
        }
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Which kind of content a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleKind {
    pub(crate) fn from_wml(value: &str) -> Option<Self> {
        match value {
            "paragraph" => Some(StyleKind::Paragraph),
            "character" => Some(StyleKind::Character),
            "table" => Some(StyleKind::Table),
            "numbering" => Some(StyleKind::Numbering),
            _ => None,
        }
    }

    pub(crate) fn as_wml(self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Character => "character",
            StyleKind::Table => "table",
            StyleKind::Numbering => "numbering",
        }
    }
}

/// A style definition as far as the merge needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Style {
    pub id: String,
    pub name: String,
    pub kind: StyleKind,
    pub is_default: bool,
}

/// The style definitions of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, style: Style) {
        self.styles.push(style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn by_id(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Look a style up by name. Word treats style names case-insensitively.
    pub fn by_name(&self, name: &str, kind: StyleKind) -> Option<&Style> {
        self.styles
            .iter()
            .find(|s| s.kind == kind && s.name.eq_ignore_ascii_case(name))
    }

    pub fn default_for(&self, kind: StyleKind) -> Option<&Style> {
        self.styles.iter().find(|s| s.kind == kind && s.is_default)
    }

    /// Name for a style id, falling back to the id itself when the table
    /// has no definition for it.
    pub fn name_for_id(&self, id: &str) -> String {
        self.by_id(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(id: &str, name: &str, kind: StyleKind, is_default: bool) -> Style {
        Style {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            is_default,
        }
    }

    #[test]
    fn test_segments_split_on_page_breaks() {
        let tree = DocumentTree {
            blocks: vec![
                Block::Paragraph(Paragraph::with_text("a")),
                Block::PageBreak,
                Block::Paragraph(Paragraph::with_text("b")),
                Block::Table(Table::new(1, 1)),
            ],
            ..DocumentTree::default()
        };
        assert_eq!(tree.page_breaks(), 1);
        let segments = tree.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_table_cell_addressing() {
        let mut table = Table::new(2, 3);
        *table.cell_mut(1, 2).unwrap() = Cell::with_text("last");
        assert_eq!(table.cells.len(), 6);
        assert_eq!(table.cell(1, 2).unwrap().text(), "last");
        assert!(table.cell(2, 0).is_none());
        assert!(table.cell(0, 3).is_none());
        assert_eq!(table.cell_texts()[1], vec!["", "", "last"]);
    }

    #[test]
    fn test_paragraph_text_joins_runs() {
        let paragraph = Paragraph {
            runs: vec![Run::new("Hello, "), Run::new("world")],
            ..Paragraph::default()
        };
        assert_eq!(paragraph.text(), "Hello, world");
    }

    #[test]
    fn test_style_table_lookup() {
        let mut styles = StyleTable::new();
        styles.insert(style("Normal", "Normal", StyleKind::Paragraph, true));
        styles.insert(style("Heading1", "heading 1", StyleKind::Paragraph, false));
        styles.insert(style("TableGrid", "Table Grid", StyleKind::Table, false));

        assert_eq!(
            styles.by_name("Heading 1", StyleKind::Paragraph).unwrap().id,
            "Heading1"
        );
        assert!(styles.by_name("Table Grid", StyleKind::Paragraph).is_none());
        assert_eq!(
            styles.default_for(StyleKind::Paragraph).unwrap().name,
            "Normal"
        );
        assert!(styles.default_for(StyleKind::Table).is_none());
        assert_eq!(styles.name_for_id("Heading1"), "heading 1");
        assert_eq!(styles.name_for_id("Unknown"), "Unknown");
    }
}
