//! Model to WordprocessingML
//!
//! Child elements are emitted in schema order (`w:pPr`: pStyle, spacing, ind,
//! jc; `w:rPr`: rFonts, b, i, color, sz, highlight, u) so Word accepts the
//! output without repair. Only fields that are set produce XML.

use xot::{NameId, Node, Xot};

use super::names::Names;
use super::{Block, Cell, LineSpacing, Paragraph, Run, Style, StyleKind, StyleTable, Table};
use crate::error::{Error, Result};

fn xml_error(e: xot::Error) -> Error {
    Error::parse(format!("cannot build document XML: {e}"))
}

/// Builds detached XML nodes for model blocks, binding style names against
/// the style table of the document the nodes will be inserted into.
pub(crate) struct Writer<'a> {
    xot: &'a mut Xot,
    names: &'a Names,
    styles: &'a StyleTable,
}

impl<'a> Writer<'a> {
    pub fn new(xot: &'a mut Xot, names: &'a Names, styles: &'a StyleTable) -> Self {
        Writer { xot, names, styles }
    }

    fn element(&mut self, name: NameId) -> Node {
        self.xot.new_element(name)
    }

    fn set(&mut self, node: Node, name: NameId, value: impl Into<String>) {
        self.xot.attributes_mut(node).insert(name, value.into());
    }

    fn append(&mut self, parent: Node, child: Node) -> Result<()> {
        self.xot.append(parent, child).map_err(xml_error)
    }

    /// Append `<name w:val="value"/>` to `parent`.
    fn append_val(&mut self, parent: Node, name: NameId, value: &str) -> Result<()> {
        let node = self.element(name);
        self.set(node, self.names.val, value);
        self.append(parent, node)
    }

    fn append_toggle(&mut self, parent: Node, name: NameId, on: bool) -> Result<()> {
        let node = self.element(name);
        if !on {
            self.set(node, self.names.val, "0");
        }
        self.append(parent, node)
    }

    pub fn block(&mut self, block: &Block) -> Result<Node> {
        match block {
            Block::Paragraph(p) => self.paragraph(p),
            Block::Table(t) => self.table(t),
            Block::PageBreak => self.page_break(),
        }
    }

    fn page_break(&mut self) -> Result<Node> {
        let p = self.element(self.names.p);
        let r = self.element(self.names.r);
        let br = self.element(self.names.br);
        self.set(br, self.names.w_type, "page");
        self.append(r, br)?;
        self.append(p, r)?;
        Ok(p)
    }

    pub fn paragraph(&mut self, paragraph: &Paragraph) -> Result<Node> {
        let names = self.names;
        let p = self.element(names.p);

        let style_id = paragraph
            .style
            .as_deref()
            .and_then(|name| self.styles.by_name(name, StyleKind::Paragraph))
            .map(|s| s.id.clone());

        let has_spacing = paragraph.space_before.is_some()
            || paragraph.space_after.is_some()
            || paragraph.line_spacing.is_some();
        let has_indent = paragraph.left_indent.is_some()
            || paragraph.right_indent.is_some()
            || paragraph.first_line_indent.is_some();

        if style_id.is_some() || has_spacing || has_indent || paragraph.alignment.is_some() {
            let ppr = self.element(names.p_pr);

            if let Some(id) = style_id {
                self.append_val(ppr, names.p_style, &id)?;
            }

            if has_spacing {
                let spacing = self.element(names.spacing);
                if let Some(before) = paragraph.space_before {
                    self.set(spacing, names.before, before.to_twips().to_string());
                }
                if let Some(after) = paragraph.space_after {
                    self.set(spacing, names.after, after.to_twips().to_string());
                }
                match paragraph.line_spacing {
                    Some(LineSpacing::Multiple(ratio)) => {
                        self.set(spacing, names.line, ((ratio * 240.0).round() as i64).to_string());
                        self.set(spacing, names.line_rule, "auto");
                    }
                    Some(LineSpacing::Exactly(len)) => {
                        self.set(spacing, names.line, len.to_twips().to_string());
                        self.set(spacing, names.line_rule, "exact");
                    }
                    Some(LineSpacing::AtLeast(len)) => {
                        self.set(spacing, names.line, len.to_twips().to_string());
                        self.set(spacing, names.line_rule, "atLeast");
                    }
                    None => {}
                }
                self.append(ppr, spacing)?;
            }

            if has_indent {
                let ind = self.element(names.ind);
                if let Some(left) = paragraph.left_indent {
                    self.set(ind, names.left, left.to_twips().to_string());
                }
                if let Some(right) = paragraph.right_indent {
                    self.set(ind, names.right, right.to_twips().to_string());
                }
                match paragraph.first_line_indent {
                    Some(first) if first.emu() < 0 => {
                        self.set(ind, names.hanging, (-first.to_twips()).to_string());
                    }
                    Some(first) => {
                        self.set(ind, names.first_line, first.to_twips().to_string());
                    }
                    None => {}
                }
                self.append(ppr, ind)?;
            }

            if let Some(alignment) = paragraph.alignment {
                self.append_val(ppr, names.jc, alignment.as_wml())?;
            }

            self.append(p, ppr)?;
        }

        for run in &paragraph.runs {
            let r = self.run(run)?;
            self.append(p, r)?;
        }

        Ok(p)
    }

    fn run(&mut self, run: &Run) -> Result<Node> {
        let names = self.names;
        let r = self.element(names.r);

        let has_props = run.font_name.is_some()
            || run.bold.is_some()
            || run.italic.is_some()
            || run.color.is_some()
            || run.font_size.is_some()
            || run.highlight.is_some()
            || run.underline.is_some();

        if has_props {
            let rpr = self.element(names.r_pr);
            if let Some(font) = &run.font_name {
                let fonts = self.element(names.r_fonts);
                self.set(fonts, names.ascii, font.as_str());
                self.set(fonts, names.h_ansi, font.as_str());
                self.set(fonts, names.cs, font.as_str());
                self.append(rpr, fonts)?;
            }
            if let Some(bold) = run.bold {
                self.append_toggle(rpr, names.b, bold)?;
            }
            if let Some(italic) = run.italic {
                self.append_toggle(rpr, names.i, italic)?;
            }
            if let Some(color) = run.color {
                self.append_val(rpr, names.color, &color.to_hex())?;
            }
            if let Some(size) = run.font_size {
                self.append_val(rpr, names.sz, &size.to_half_points().to_string())?;
            }
            if let Some(highlight) = run.highlight {
                self.append_val(rpr, names.highlight, highlight.as_wml())?;
            }
            if let Some(underline) = run.underline {
                self.append_val(rpr, names.u, if underline { "single" } else { "none" })?;
            }
            self.append(r, rpr)?;
        }

        self.run_text(r, &run.text)?;
        Ok(r)
    }

    /// Emit `w:t`, `w:tab` and `w:br` children for text with `\t` and `\n`.
    fn run_text(&mut self, r: Node, text: &str) -> Result<()> {
        let mut segment = String::new();
        for c in text.chars() {
            match c {
                '\t' | '\n' => {
                    self.flush_text(r, &mut segment)?;
                    let name = if c == '\t' { self.names.tab } else { self.names.br };
                    let node = self.element(name);
                    self.append(r, node)?;
                }
                _ => segment.push(c),
            }
        }
        self.flush_text(r, &mut segment)
    }

    fn flush_text(&mut self, r: Node, segment: &mut String) -> Result<()> {
        if segment.is_empty() {
            return Ok(());
        }
        let t = self.element(self.names.t);
        if segment.starts_with(char::is_whitespace) || segment.ends_with(char::is_whitespace) {
            self.set(t, self.names.xml_space, "preserve");
        }
        let text = self.xot.new_text(segment);
        self.append(t, text)?;
        self.append(r, t)?;
        segment.clear();
        Ok(())
    }

    pub fn table(&mut self, table: &Table) -> Result<Node> {
        let names = self.names;
        let tbl = self.element(names.tbl);

        let tbl_pr = self.element(names.tbl_pr);
        let style_id = table
            .style
            .as_deref()
            .and_then(|name| self.styles.by_name(name, StyleKind::Table))
            .map(|s| s.id.clone());
        if let Some(id) = style_id {
            self.append_val(tbl_pr, names.tbl_style, &id)?;
        }
        let width = self.element(names.tbl_w);
        self.set(width, names.w_w, "0");
        self.set(width, names.w_type, "auto");
        self.append(tbl_pr, width)?;
        self.append(tbl, tbl_pr)?;

        let grid = self.element(names.tbl_grid);
        for _ in 0..table.cols {
            let col = self.element(names.grid_col);
            self.append(grid, col)?;
        }
        self.append(tbl, grid)?;

        for row in 0..table.rows {
            let tr = self.element(names.tr);
            for col in 0..table.cols {
                let tc = match table.cell(row, col) {
                    Some(cell) => self.cell(cell)?,
                    None => self.cell(&Cell::default())?,
                };
                self.append(tr, tc)?;
            }
            self.append(tbl, tr)?;
        }

        Ok(tbl)
    }

    fn cell(&mut self, cell: &Cell) -> Result<Node> {
        let tc = self.element(self.names.tc);
        if cell.paragraphs.is_empty() {
            // a cell must end with a paragraph
            let p = self.element(self.names.p);
            self.append(tc, p)?;
        }
        for paragraph in &cell.paragraphs {
            let p = self.paragraph(paragraph)?;
            self.append(tc, p)?;
        }
        Ok(tc)
    }

    /// Build a `w:style` definition.
    pub fn style(&mut self, style: &Style) -> Result<Node> {
        let names = self.names;
        let node = self.element(names.style);
        self.set(node, names.w_type, style.kind.as_wml());
        if style.is_default {
            self.set(node, names.default, "1");
        }
        self.set(node, names.style_id, style.id.as_str());
        self.append_val(node, names.name, &style.name)?;
        Ok(node)
    }
}
