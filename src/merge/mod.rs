//! # Merge Engine
//!
//! Appends the content of resolved source documents onto the master package,
//! one document at a time, in manifest order.
//!
//! ## Segment Separators
//!
//! The engine tracks whether the master holds any content yet:
//!
//! - [`SegmentState::Empty`]: the master template had no blocks and nothing
//!   has been merged. The next document is appended without a separator.
//! - [`SegmentState::Populated`]: every following document is preceded by a
//!   page break.
//!
//! Merging K documents therefore adds K - 1 separators to an empty template
//! and K separators to a template with content.
//!
//! ## Copy Semantics
//!
//! Blocks are rebuilt against the master's style table rather than cloned:
//!
//! - **Paragraphs** keep alignment, spacing and indents that the source sets.
//!   A style name unknown to the master falls back to the master's default
//!   paragraph style.
//! - **Runs** keep their text and only the character formatting the source
//!   sets explicitly.
//! - **Tables** keep their dimensions and cell text. Cell runs keep bold,
//!   italic, underline and size. An unknown table style is dropped.
//!
//! Embedded media and flattened nested tables are never copied; they are
//! reported back as warnings.

use log::{debug, warn};
use serde::Serialize;

use crate::document::{Block, Cell, Paragraph, Run, StyleKind, StyleTable, Table, WordPackage};
use crate::error::Result;

/// Whether the master has received any content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    Empty,
    Populated,
}

/// What merging one source document did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Blocks appended from the source, separator excluded
    pub blocks: usize,
    /// Whether a separator was inserted before the blocks
    pub separated: bool,
    /// Recoverable issues, e.g. content that was not carried over
    pub warnings: Vec<String>,
}

/// Owns the master package for the duration of one composition.
#[derive(Debug)]
pub struct MergeEngine {
    master: WordPackage,
    state: SegmentState,
    merged: usize,
}

impl MergeEngine {
    pub fn new(master: WordPackage) -> Self {
        let state = if master.tree().is_empty() {
            SegmentState::Empty
        } else {
            SegmentState::Populated
        };
        debug!("Merge engine starts {:?}", state);
        MergeEngine {
            master,
            state,
            merged: 0,
        }
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    /// Number of documents merged so far.
    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn master(&self) -> &WordPackage {
        &self.master
    }

    /// Append every block of `source`, preceded by a separator unless the
    /// master is still empty.
    ///
    /// `label` only names the source in warnings.
    pub fn merge(&mut self, source: &WordPackage, label: &str) -> Result<MergeOutcome> {
        let mut outcome = MergeOutcome::default();

        let blocks: Vec<Block> = source
            .tree()
            .blocks
            .iter()
            .map(|block| copy_block(block, self.master.styles()))
            .collect();

        if self.state == SegmentState::Populated {
            self.master.append(Block::PageBreak)?;
            outcome.separated = true;
        }
        for block in blocks {
            self.master.append(block)?;
            outcome.blocks += 1;
        }

        let tree = source.tree();
        if tree.media > 0 {
            let message = format!(
                "'{label}' contains {} embedded image(s) or object(s) that were not copied",
                tree.media
            );
            warn!("{message}");
            outcome.warnings.push(message);
        }
        if tree.flattened_tables > 0 {
            let message = format!(
                "'{label}' contains {} nested table(s); only their text was copied",
                tree.flattened_tables
            );
            warn!("{message}");
            outcome.warnings.push(message);
        }

        self.state = SegmentState::Populated;
        self.merged += 1;
        debug!("Merged '{}': {} blocks", label, outcome.blocks);
        Ok(outcome)
    }

    /// Release the composed master.
    pub fn finish(self) -> WordPackage {
        self.master
    }
}

fn copy_block(block: &Block, target: &StyleTable) -> Block {
    match block {
        Block::Paragraph(p) => Block::Paragraph(copy_paragraph(p, target)),
        Block::Table(t) => Block::Table(copy_table(t, target)),
        Block::PageBreak => Block::PageBreak,
    }
}

/// Bind a paragraph style name in the target, falling back to its default
/// paragraph style.
fn bind_paragraph_style(name: Option<&str>, target: &StyleTable) -> Option<String> {
    let name = name?;
    if let Some(style) = target.by_name(name, StyleKind::Paragraph) {
        return Some(style.name.clone());
    }
    let fallback = target
        .default_for(StyleKind::Paragraph)
        .map(|s| s.name.clone());
    debug!(
        "Style '{}' not in master, using {}",
        name,
        fallback.as_deref().unwrap_or("document defaults")
    );
    fallback
}

fn copy_paragraph(source: &Paragraph, target: &StyleTable) -> Paragraph {
    Paragraph {
        style: bind_paragraph_style(source.style.as_deref(), target),
        alignment: source.alignment,
        space_before: source.space_before,
        space_after: source.space_after,
        line_spacing: source.line_spacing,
        left_indent: source.left_indent,
        right_indent: source.right_indent,
        first_line_indent: source.first_line_indent,
        runs: source.runs.iter().map(copy_run).collect(),
    }
}

fn copy_run(source: &Run) -> Run {
    Run {
        text: source.text.clone(),
        bold: source.bold,
        italic: source.italic,
        underline: source.underline,
        font_name: source.font_name.clone(),
        font_size: source.font_size,
        color: source.color,
        highlight: source.highlight,
    }
}

fn copy_table(source: &Table, target: &StyleTable) -> Table {
    let mut table = Table::new(source.rows, source.cols);
    table.style = source
        .style
        .as_deref()
        .and_then(|name| target.by_name(name, StyleKind::Table))
        .map(|s| s.name.clone());

    for row in 0..source.rows {
        for col in 0..source.cols {
            if let (Some(from), Some(to)) = (source.cell(row, col), table.cell_mut(row, col)) {
                *to = copy_cell(from);
            }
        }
    }
    table
}

/// Cell paragraphs keep their text and basic run formatting only.
fn copy_cell(source: &Cell) -> Cell {
    let paragraphs = source
        .paragraphs
        .iter()
        .map(|p| Paragraph {
            runs: p
                .runs
                .iter()
                .map(|r| Run {
                    text: r.text.clone(),
                    bold: r.bold,
                    italic: r.italic,
                    underline: r.underline,
                    font_size: r.font_size,
                    ..Run::default()
                })
                .collect(),
            ..Paragraph::default()
        })
        .collect();
    Cell { paragraphs }
}
