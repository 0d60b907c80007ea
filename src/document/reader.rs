//! WordprocessingML to model
//!
//! Reading is lenient: elements the model has no place for are skipped, and
//! malformed attribute values read as "unset" rather than failing the load.

use xot::{NameId, Node, Xot};

use super::format::parse_on_off;
use super::names::{Names, IMAGE_REL_SUFFIX};
use super::{
    Block, Cell, DocumentTree, Length, LineSpacing, Paragraph, Run, Style, StyleKind, StyleTable,
    Table,
};

/// Walks one document body, resolving style ids through `styles`.
pub(crate) struct Reader<'a> {
    xot: &'a Xot,
    names: &'a Names,
    styles: &'a StyleTable,
}

impl<'a> Reader<'a> {
    pub fn new(xot: &'a Xot, names: &'a Names, styles: &'a StyleTable) -> Self {
        Reader { xot, names, styles }
    }

    fn is(&self, node: Node, name: NameId) -> bool {
        self.xot.element(node).is_some_and(|e| e.name() == name)
    }

    fn child(&self, node: Node, name: NameId) -> Option<Node> {
        self.xot.children(node).find(|&c| self.is(c, name))
    }

    fn children_named(&self, node: Node, name: NameId) -> impl Iterator<Item = Node> + '_ {
        self.xot.children(node).filter(move |&c| self.is(c, name))
    }

    fn attr(&self, node: Node, name: NameId) -> Option<&'a str> {
        self.xot.get_attribute(node, name)
    }

    fn val(&self, node: Node) -> Option<&'a str> {
        self.attr(node, self.names.val)
    }

    fn twips(&self, node: Node, name: NameId) -> Option<Length> {
        self.attr(node, name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(Length::checked_twips)
    }

    /// Read every top-level paragraph and table of a `w:body`.
    pub fn read_body(&self, body: Node) -> DocumentTree {
        let mut tree = DocumentTree::new();
        for node in self.xot.children(body) {
            if self.is(node, self.names.p) {
                let block = self.read_paragraph_block(node, &mut tree);
                tree.blocks.push(block);
            } else if self.is(node, self.names.tbl) {
                let table = self.read_table(node, &mut tree);
                tree.blocks.push(Block::Table(table));
            }
        }
        tree
    }

    fn read_paragraph_block(&self, p: Node, tree: &mut DocumentTree) -> Block {
        if self.is_page_break_paragraph(p) {
            return Block::PageBreak;
        }
        Block::Paragraph(self.read_paragraph(p, tree))
    }

    /// A paragraph whose only content is one run holding a page break.
    fn is_page_break_paragraph(&self, p: Node) -> bool {
        let runs: Vec<Node> = self.children_named(p, self.names.r).collect();
        let [run] = runs.as_slice() else {
            return false;
        };
        let content: Vec<Node> = self
            .xot
            .children(*run)
            .filter(|&c| self.xot.element(c).is_some() && !self.is(c, self.names.r_pr))
            .collect();
        matches!(content.as_slice(), [br] if self.is_page_break(*br))
    }

    fn is_page_break(&self, node: Node) -> bool {
        self.is(node, self.names.br) && self.attr(node, self.names.w_type) == Some("page")
    }

    pub fn read_paragraph(&self, p: Node, tree: &mut DocumentTree) -> Paragraph {
        let mut paragraph = Paragraph::new();

        if let Some(ppr) = self.child(p, self.names.p_pr) {
            self.read_paragraph_properties(ppr, &mut paragraph);
        }

        for node in self.xot.children(p) {
            if self.is(node, self.names.r) {
                paragraph.runs.push(self.read_run(node, tree));
            } else if self.is(node, self.names.hyperlink) {
                for run in self.children_named(node, self.names.r) {
                    paragraph.runs.push(self.read_run(run, tree));
                }
            }
        }

        paragraph
    }

    fn read_paragraph_properties(&self, ppr: Node, paragraph: &mut Paragraph) {
        let names = self.names;

        paragraph.style = self
            .child(ppr, names.p_style)
            .and_then(|n| self.val(n))
            .map(|id| self.styles.name_for_id(id));

        paragraph.alignment = self
            .child(ppr, names.jc)
            .and_then(|n| self.val(n))
            .and_then(|v| v.parse().ok());

        if let Some(spacing) = self.child(ppr, names.spacing) {
            paragraph.space_before = self.twips(spacing, names.before);
            paragraph.space_after = self.twips(spacing, names.after);
            paragraph.line_spacing = self.read_line_spacing(spacing);
        }

        if let Some(ind) = self.child(ppr, names.ind) {
            paragraph.left_indent = self
                .twips(ind, names.left)
                .or_else(|| self.twips(ind, names.start));
            paragraph.right_indent = self
                .twips(ind, names.right)
                .or_else(|| self.twips(ind, names.end));
            paragraph.first_line_indent = match self.twips(ind, names.hanging) {
                Some(hanging) => hanging.emu().checked_neg().map(Length),
                None => self.twips(ind, names.first_line),
            };
        }
    }

    fn read_line_spacing(&self, spacing: Node) -> Option<LineSpacing> {
        let line = self.attr(spacing, self.names.line)?.trim().parse::<i64>().ok()?;
        match self.attr(spacing, self.names.line_rule) {
            None | Some("auto") => Some(LineSpacing::Multiple(line as f64 / 240.0)),
            Some("exact") => Length::checked_twips(line).map(LineSpacing::Exactly),
            Some("atLeast") => Length::checked_twips(line).map(LineSpacing::AtLeast),
            Some(_) => None,
        }
    }

    fn read_run(&self, r: Node, tree: &mut DocumentTree) -> Run {
        let names = self.names;
        let mut run = Run::default();

        if let Some(rpr) = self.child(r, names.r_pr) {
            let toggle = |name: NameId| self.child(rpr, name).map(|n| parse_on_off(self.val(n)));
            run.bold = toggle(names.b);
            run.italic = toggle(names.i);
            run.underline = self
                .child(rpr, names.u)
                .map(|n| !matches!(self.val(n), Some("none")));
            run.font_name = self.child(rpr, names.r_fonts).and_then(|n| {
                self.attr(n, names.ascii)
                    .or_else(|| self.attr(n, names.h_ansi))
                    .or_else(|| self.attr(n, names.cs))
                    .map(str::to_string)
            });
            run.font_size = self
                .child(rpr, names.sz)
                .and_then(|n| self.val(n))
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(Length::checked_half_points);
            run.color = self
                .child(rpr, names.color)
                .and_then(|n| self.val(n))
                .and_then(super::RgbColor::from_hex);
            run.highlight = self
                .child(rpr, names.highlight)
                .and_then(|n| self.val(n))
                .and_then(|v| v.parse().ok());
        }

        let mut has_media = false;
        for node in self.xot.children(r) {
            if self.is(node, names.t) {
                for text in self.xot.children(node) {
                    if let Some(s) = self.xot.text_str(text) {
                        run.text.push_str(s);
                    }
                }
            } else if self.is(node, names.tab) {
                run.text.push('\t');
            } else if self.is(node, names.br) {
                run.text.push('\n');
            } else if self.xot.element(node).is_some() {
                let is_media = |d: Node| {
                    self.is(d, names.drawing) || self.is(d, names.pict) || self.is(d, names.object)
                };
                has_media |= is_media(node) || self.xot.descendants(node).any(is_media);
            }
        }
        if has_media {
            tree.media += 1;
        }

        run
    }

    fn read_table(&self, tbl: Node, tree: &mut DocumentTree) -> Table {
        let names = self.names;

        let style = self
            .child(tbl, names.tbl_pr)
            .and_then(|pr| self.child(pr, names.tbl_style))
            .and_then(|n| self.val(n))
            .map(|id| self.styles.name_for_id(id));

        let grid_cols = self
            .child(tbl, names.tbl_grid)
            .map(|g| self.children_named(g, names.grid_col).count())
            .unwrap_or(0);

        let rows: Vec<Vec<Cell>> = self
            .children_named(tbl, names.tr)
            .map(|tr| {
                self.children_named(tr, names.tc)
                    .map(|tc| self.read_cell(tc, tree))
                    .collect()
            })
            .collect();

        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cols = grid_cols.max(widest);
        let row_count = rows.len();

        let mut cells = Vec::with_capacity(row_count * cols);
        for mut row in rows {
            row.resize_with(cols, Cell::default);
            cells.extend(row);
        }

        Table {
            rows: row_count,
            cols,
            style,
            cells,
        }
    }

    fn read_cell(&self, tc: Node, tree: &mut DocumentTree) -> Cell {
        let mut cell = Cell::default();
        for node in self.xot.children(tc) {
            if self.is(node, self.names.p) {
                let paragraph = self.read_paragraph(node, tree);
                cell.paragraphs.push(paragraph);
            } else if self.is(node, self.names.tbl) {
                // nested tables keep their text, not their structure
                tree.flattened_tables += 1;
                let nested = self.read_table(node, tree);
                cell.paragraphs
                    .extend(nested.cells.into_iter().flat_map(|c| c.paragraphs));
            }
        }
        cell
    }
}

/// Read the style definitions of a `w:styles` element.
pub(crate) fn read_styles(xot: &Xot, names: &Names, styles: Node) -> StyleTable {
    let mut table = StyleTable::new();
    let is = |node: Node, name: NameId| xot.element(node).is_some_and(|e| e.name() == name);

    for node in xot.children(styles).filter(|&n| is(n, names.style)) {
        let Some(id) = xot.get_attribute(node, names.style_id) else {
            continue;
        };
        let Some(kind) = xot
            .get_attribute(node, names.w_type)
            .and_then(StyleKind::from_wml)
        else {
            continue;
        };
        let name = xot
            .children(node)
            .find(|&c| is(c, names.name))
            .and_then(|n| xot.get_attribute(n, names.val))
            .unwrap_or(id);
        let is_default = xot
            .get_attribute(node, names.default)
            .is_some_and(|v| parse_on_off(Some(v)));

        table.insert(Style {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            is_default,
        });
    }

    table
}

/// Count image relationships in a `Relationships` element.
pub(crate) fn count_image_relationships(xot: &Xot, names: &Names, relationships: Node) -> usize {
    xot.children(relationships)
        .filter(|&n| xot.element(n).is_some_and(|e| e.name() == names.rel_relationship))
        .filter(|&n| {
            xot.get_attribute(n, names.rel_type)
                .is_some_and(|t| t.ends_with(IMAGE_REL_SUFFIX))
        })
        .count()
}
