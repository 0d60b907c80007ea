//! Package load and save
//!
//! A [`WordPackage`] keeps the complete parsed XML of a document next to the
//! model view of its body. Parts the model does not cover (headers, footers,
//! settings, section properties, binary media) stay in the XML tree untouched,
//! and [`WordPackage::append`] inserts rendered blocks into the body right
//! before the trailing `w:sectPr`. Saving therefore preserves the template
//! around the appended content.
//!
//! The tree is always Flat OPC; `.docx` archives are converted on the way in
//! and out by the `docx` module.

use std::fs;
use std::path::Path;

use log::debug;
use xot::{NameId, Node, Xot};

use super::docx::{self, Part, FALLBACK_CONTENT_TYPE};
use super::names::{Names, DOCUMENT_PART, DOCUMENT_RELS_PART, STYLES_PART};
use super::reader::{count_image_relationships, read_styles, Reader};
use super::writer::Writer;
use super::{Block, DocumentFormat, DocumentTree, Style, StyleTable};
use crate::error::{Error, Result};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Skeleton of a blank package with an empty body and style table.
const BLANK_PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<?mso-application progid="Word.Document"?>
<pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage">
<pkg:part pkg:name="/_rels/.rels" pkg:contentType="application/vnd.openxmlformats-package.relationships+xml"><pkg:xmlData><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships></pkg:xmlData></pkg:part>
<pkg:part pkg:name="/word/_rels/document.xml.rels" pkg:contentType="application/vnd.openxmlformats-package.relationships+xml"><pkg:xmlData><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships></pkg:xmlData></pkg:part>
<pkg:part pkg:name="/word/document.xml" pkg:contentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"><pkg:xmlData><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:sectPr/></w:body></w:document></pkg:xmlData></pkg:part>
<pkg:part pkg:name="/word/styles.xml" pkg:contentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"><pkg:xmlData><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"></w:styles></pkg:xmlData></pkg:part>
</pkg:package>
"#;

const DOCUMENT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Package relationships for a bare `w:document` saved as `.docx`.
const BARE_PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Roots of the parts the engine reads, located inside one XML tree.
struct Parts {
    document: Node,
    styles: Option<Node>,
    relationships: Option<Node>,
}

/// A parsed document package.
pub struct WordPackage {
    xot: Xot,
    names: Names,
    root: Node,
    body: Node,
    /// Trailing `w:sectPr`; appended blocks go before it
    section: Option<Node>,
    styles_root: Option<Node>,
    styles: StyleTable,
    tree: DocumentTree,
}

impl std::fmt::Debug for WordPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPackage")
            .field("styles", &self.styles.len())
            .field("blocks", &self.tree.len())
            .finish()
    }
}

impl WordPackage {
    /// Load a package from disk; `.docx` files are unzipped first.
    pub fn open(path: &Path) -> Result<Self> {
        let package = match DocumentFormat::for_path(path) {
            DocumentFormat::Docx => {
                let parts = docx::read_parts(&fs::read(path)?)?;
                Self::parse(&docx::to_flat_xml(&parts))?
            }
            DocumentFormat::FlatXml => Self::parse(&fs::read_to_string(path)?)?,
        };
        debug!(
            "Loaded {}: {} blocks, {} styles, {} media",
            path.display(),
            package.tree.len(),
            package.styles.len(),
            package.tree.media
        );
        Ok(package)
    }

    /// Parse a Flat OPC package, or a bare `w:document`.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let names = Names::register(&mut xot);

        let root = xot
            .parse(xml)
            .map_err(|e| Error::parse(format!("invalid XML: {e}")))?;
        let element = xot
            .document_element(root)
            .map_err(|e| Error::parse(format!("no document element: {e}")))?;

        let parts = locate_parts(&xot, &names, element)?;

        let body = first_child(&xot, parts.document, names.body)
            .ok_or_else(|| Error::parse("w:document has no w:body"))?;
        let section = xot
            .children(body)
            .filter(|&n| xot.element(n).is_some())
            .last()
            .filter(|&n| is(&xot, n, names.sect_pr));

        let styles = parts
            .styles
            .map(|s| read_styles(&xot, &names, s))
            .unwrap_or_default();

        let mut tree = Reader::new(&xot, &names, &styles).read_body(body);
        if let Some(rels) = parts.relationships {
            tree.media = tree.media.max(count_image_relationships(&xot, &names, rels));
        }

        Ok(WordPackage {
            xot,
            names,
            root,
            body,
            section,
            styles_root: parts.styles,
            styles,
            tree,
        })
    }

    /// A blank package declaring `styles` and holding no content.
    pub fn blank(styles: &StyleTable) -> Result<Self> {
        let mut package = Self::parse(BLANK_PACKAGE)?;
        for style in styles.iter() {
            package.add_style(style.clone())?;
        }
        Ok(package)
    }

    /// A package with `styles` whose body is `blocks`.
    pub fn from_blocks(blocks: &[Block], styles: &StyleTable) -> Result<Self> {
        let mut package = Self::blank(styles)?;
        for block in blocks {
            package.append(block.clone())?;
        }
        Ok(package)
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Add a style definition to the package's style table.
    pub fn add_style(&mut self, style: Style) -> Result<()> {
        let styles_root = self
            .styles_root
            .ok_or_else(|| Error::parse("document has no styles part"))?;
        let node = Writer::new(&mut self.xot, &self.names, &self.styles).style(&style)?;
        self.xot
            .append(styles_root, node)
            .map_err(|e| Error::parse(format!("cannot add style: {e}")))?;
        self.styles.insert(style);
        Ok(())
    }

    /// Render `block` at the end of the body and record it in the tree.
    pub fn append(&mut self, block: Block) -> Result<()> {
        let node = Writer::new(&mut self.xot, &self.names, &self.styles).block(&block)?;
        let placed = match self.section {
            Some(section) => self.xot.insert_before(section, node),
            None => self.xot.append(self.body, node),
        };
        placed.map_err(|e| Error::parse(format!("cannot insert block: {e}")))?;
        self.tree.blocks.push(block);
        Ok(())
    }

    /// Serialize the whole package, XML declaration included.
    pub fn to_xml(&self) -> Result<String> {
        let xml = self
            .xot
            .to_string(self.root)
            .map_err(|e| Error::parse(format!("cannot serialize document: {e}")))?;
        if xml.starts_with("<?xml") {
            Ok(xml)
        } else {
            Ok(format!("{XML_DECLARATION}\n{xml}"))
        }
    }

    /// Serialize in the given on-disk format.
    pub fn to_bytes(&self, format: DocumentFormat) -> Result<Vec<u8>> {
        match format {
            DocumentFormat::FlatXml => Ok(self.to_xml()?.into_bytes()),
            DocumentFormat::Docx => docx::write_archive(&self.parts()?),
        }
    }

    fn serialize_part(&self, node: Node) -> Result<Vec<u8>> {
        let xml = self
            .xot
            .to_string(node)
            .map_err(|e| Error::parse(format!("cannot serialize part: {e}")))?;
        Ok(format!("{XML_DECLARATION}\n{xml}").into_bytes())
    }

    /// The package split into its parts, for writing an archive.
    fn parts(&self) -> Result<Vec<Part>> {
        let xot = &self.xot;
        let names = &self.names;
        let element = xot
            .document_element(self.root)
            .map_err(|e| Error::parse(format!("no document element: {e}")))?;

        if is(xot, element, names.document) {
            return Ok(vec![
                Part {
                    name: "/_rels/.rels".to_string(),
                    content_type: "application/vnd.openxmlformats-package.relationships+xml"
                        .to_string(),
                    data: BARE_PACKAGE_RELS.as_bytes().to_vec(),
                },
                Part {
                    name: DOCUMENT_PART.to_string(),
                    content_type: DOCUMENT_CONTENT_TYPE.to_string(),
                    data: self.serialize_part(element)?,
                },
            ]);
        }

        let mut parts = Vec::new();
        for part in xot.children(element).filter(|&p| is(xot, p, names.pkg_part)) {
            let Some(name) = xot.get_attribute(part, names.pkg_name) else {
                continue;
            };
            let content_type = xot
                .get_attribute(part, names.pkg_content_type)
                .unwrap_or(FALLBACK_CONTENT_TYPE);

            let data = if let Some(xml_data) = first_child(xot, part, names.pkg_xml_data) {
                let root = first_element(xot, xml_data)
                    .ok_or_else(|| Error::parse(format!("part {name} has no XML content")))?;
                self.serialize_part(root)?
            } else if let Some(binary) = first_child(xot, part, names.pkg_binary_data) {
                let encoded: String = xot
                    .children(binary)
                    .filter_map(|c| xot.text_str(c))
                    .collect();
                docx::decode_binary(&encoded)?
            } else {
                continue;
            };

            parts.push(Part {
                name: name.to_string(),
                content_type: content_type.to_string(),
                data,
            });
        }
        Ok(parts)
    }
}

fn is(xot: &Xot, node: Node, name: NameId) -> bool {
    xot.element(node).is_some_and(|e| e.name() == name)
}

fn first_child(xot: &Xot, node: Node, name: NameId) -> Option<Node> {
    xot.children(node).find(|&c| is(xot, c, name))
}

fn first_element(xot: &Xot, node: Node) -> Option<Node> {
    xot.children(node).find(|&c| xot.element(c).is_some())
}

fn locate_parts(xot: &Xot, names: &Names, element: Node) -> Result<Parts> {
    if is(xot, element, names.document) {
        return Ok(Parts {
            document: element,
            styles: None,
            relationships: None,
        });
    }
    if !is(xot, element, names.pkg_package) {
        return Err(Error::parse(
            "expected a pkg:package or w:document root element",
        ));
    }

    let part_root = |part_name: &str| {
        xot.children(element)
            .filter(|&p| is(xot, p, names.pkg_part))
            .find(|&p| xot.get_attribute(p, names.pkg_name) == Some(part_name))
            .and_then(|p| first_child(xot, p, names.pkg_xml_data))
            .and_then(|data| first_element(xot, data))
    };

    let document = part_root(DOCUMENT_PART)
        .filter(|&d| is(xot, d, names.document))
        .ok_or_else(|| Error::parse(format!("package has no {DOCUMENT_PART} part")))?;
    let styles = part_root(STYLES_PART).filter(|&s| is(xot, s, names.styles));
    let relationships = part_root(DOCUMENT_RELS_PART);

    Ok(Parts {
        document,
        styles,
        relationships,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        Alignment, Cell, Highlight, Length, LineSpacing, Paragraph, RgbColor, Run, StyleKind,
        Table,
    };

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn bare(body: &str) -> String {
        format!(r#"<w:document xmlns:w="{W}"><w:body>{body}</w:body></w:document>"#)
    }

    fn styles() -> StyleTable {
        let mut table = StyleTable::new();
        for (id, name, kind, is_default) in [
            ("Normal", "Normal", StyleKind::Paragraph, true),
            ("Heading1", "heading 1", StyleKind::Paragraph, false),
            ("TableGrid", "Table Grid", StyleKind::Table, false),
        ] {
            table.insert(Style {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                is_default,
            });
        }
        table
    }

    #[test]
    fn test_parse_bare_document_paragraph_formatting() {
        let xml = bare(
            r#"<w:p><w:pPr><w:spacing w:before="240" w:after="120" w:line="360" w:lineRule="auto"/>
                 <w:ind w:left="720" w:hanging="360"/><w:jc w:val="center"/></w:pPr>
                 <w:r><w:rPr><w:b/><w:sz w:val="24"/></w:rPr><w:t>Hello</w:t></w:r>
                 <w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        let tree = package.tree();
        assert_eq!(tree.len(), 1);

        let Block::Paragraph(p) = &tree.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "Hello world");
        assert_eq!(p.alignment, Some(Alignment::Center));
        assert_eq!(p.space_before, Some(Length::pt(12.0)));
        assert_eq!(p.space_after, Some(Length::pt(6.0)));
        assert_eq!(p.line_spacing, Some(LineSpacing::Multiple(1.5)));
        assert_eq!(p.left_indent, Some(Length::from_twips(720)));
        assert_eq!(p.first_line_indent, Some(Length::from_twips(-360)));
        assert_eq!(p.right_indent, None);
        assert_eq!(p.runs[0].bold, Some(true));
        assert_eq!(p.runs[0].font_size, Some(Length::pt(12.0)));
        assert_eq!(p.runs[1], Run::new(" world"));
    }

    #[test]
    fn test_parse_out_of_range_lengths_read_as_unset() {
        let xml = bare(
            r#"<w:p><w:pPr><w:spacing w:before="20000000000000000" w:after="120"
                 w:line="20000000000000000" w:lineRule="exact"/>
                 <w:ind w:left="-20000000000000000" w:hanging="20000000000000000"/></w:pPr>
                 <w:r><w:rPr><w:sz w:val="9000000000000000000"/></w:rPr><w:t>big</w:t></w:r></w:p>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        let Block::Paragraph(p) = &package.tree().blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "big");
        assert_eq!(p.space_before, None);
        assert_eq!(p.space_after, Some(Length::pt(6.0)));
        assert_eq!(p.line_spacing, None);
        assert_eq!(p.left_indent, None);
        assert_eq!(p.first_line_indent, None);
        assert_eq!(p.runs[0].font_size, None);
    }

    #[test]
    fn test_parse_run_toggles_and_colors() {
        let xml = bare(
            r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="Arial"/><w:b w:val="0"/><w:i/>
                 <w:color w:val="003366"/><w:highlight w:val="yellow"/><w:u w:val="none"/>
                 </w:rPr><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        let Block::Paragraph(p) = &package.tree().blocks[0] else {
            panic!("expected paragraph");
        };
        let run = &p.runs[0];
        assert_eq!(run.text, "a\tb\nc");
        assert_eq!(run.font_name.as_deref(), Some("Arial"));
        assert_eq!(run.bold, Some(false));
        assert_eq!(run.italic, Some(true));
        assert_eq!(run.underline, Some(false));
        assert_eq!(run.color, Some(RgbColor(0, 0x33, 0x66)));
        assert_eq!(run.highlight, Some(Highlight::Yellow));
    }

    #[test]
    fn test_page_break_paragraph_is_separator() {
        let xml = bare(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p>
               <w:p><w:r><w:br w:type="page"/></w:r></w:p>
               <w:p><w:r><w:t>two</w:t></w:r></w:p>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        assert_eq!(package.tree().page_breaks(), 1);
        assert_eq!(package.tree().block_texts(), vec!["one", "", "two"]);
    }

    #[test]
    fn test_ragged_table_is_padded() {
        let xml = bare(
            r#"<w:tbl><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>
                 <w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>
                 <w:tr><w:tc><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        let Block::Table(table) = &package.tree().blocks[0] else {
            panic!("expected table");
        };
        assert_eq!((table.rows, table.cols), (2, 2));
        assert_eq!(table.cell_texts(), vec![vec!["a", ""], vec!["c", ""]]);
    }

    #[test]
    fn test_nested_table_is_flattened() {
        let xml = bare(
            r#"<w:tbl><w:tr><w:tc>
                 <w:p><w:r><w:t>outer</w:t></w:r></w:p>
                 <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                 <w:p/></w:tc></w:tr></w:tbl>"#,
        );
        let package = WordPackage::parse(&xml).unwrap();
        let tree = package.tree();
        assert_eq!(tree.flattened_tables, 1);
        let Block::Table(table) = &tree.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.cell(0, 0).unwrap().text(), "outer\ninner\n");
    }

    #[test]
    fn test_drawing_counts_as_media() {
        let xml = bare(r#"<w:p><w:r><w:drawing><inline/></w:drawing></w:r></w:p>"#);
        let package = WordPackage::parse(&xml).unwrap();
        assert_eq!(package.tree().media, 1);
    }

    #[test]
    fn test_rejects_unknown_root() {
        let result = WordPackage::parse("<html><body/></html>");
        assert!(matches!(result, Err(Error::DocumentParse { .. })));
    }

    #[test]
    fn test_rejects_malformed_xml() {
        let result = WordPackage::parse("<w:document");
        assert!(matches!(result, Err(Error::DocumentParse { .. })));
    }

    #[test]
    fn test_document_without_body_is_error() {
        let xml = format!(r#"<w:document xmlns:w="{W}"/>"#);
        assert!(WordPackage::parse(&xml).is_err());
    }

    #[test]
    fn test_blank_package_round_trips_styles() {
        let package = WordPackage::blank(&styles()).unwrap();
        assert!(package.tree().is_empty());

        let reparsed = WordPackage::parse(&package.to_xml().unwrap()).unwrap();
        assert_eq!(reparsed.styles(), &styles());
        assert!(reparsed.tree().is_empty());
    }

    #[test]
    fn test_appended_blocks_survive_save() {
        let mut heading = Paragraph::with_text("Title");
        heading.style = Some("heading 1".to_string());
        heading.alignment = Some(Alignment::Right);
        heading.first_line_indent = Some(Length::from_twips(-240));

        let mut bold = Run::new("  padded\ttext ");
        bold.bold = Some(true);
        bold.font_size = Some(Length::pt(11.0));
        let body = Paragraph {
            runs: vec![bold],
            line_spacing: Some(LineSpacing::Exactly(Length::pt(14.0))),
            ..Paragraph::default()
        };

        let mut table = Table::new(1, 2);
        table.style = Some("Table Grid".to_string());
        *table.cell_mut(0, 0).unwrap() = Cell::with_text("left");
        *table.cell_mut(0, 1).unwrap() = Cell::with_text("right");

        let blocks = vec![
            Block::Paragraph(heading.clone()),
            Block::PageBreak,
            Block::Paragraph(body.clone()),
            Block::Table(table.clone()),
        ];
        let package = WordPackage::from_blocks(&blocks, &styles()).unwrap();
        let xml = package.to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));

        let reparsed = WordPackage::parse(&xml).unwrap();
        assert_eq!(reparsed.tree().blocks, blocks);
    }

    #[test]
    fn test_append_goes_before_section_properties() {
        let xml = bare(r#"<w:p><w:r><w:t>first</w:t></w:r></w:p><w:sectPr/>"#);
        let mut package = WordPackage::parse(&xml).unwrap();
        package
            .append(Block::Paragraph(Paragraph::with_text("second")))
            .unwrap();

        let out = package.to_xml().unwrap();
        let second = out.find("second").unwrap();
        let sect = out.find("sectPr").unwrap();
        assert!(second < sect, "appended block must precede w:sectPr");

        let reparsed = WordPackage::parse(&out).unwrap();
        assert_eq!(reparsed.tree().block_texts(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_style_name_is_not_written() {
        let mut paragraph = Paragraph::with_text("x");
        paragraph.style = Some("Fancy".to_string());
        let package =
            WordPackage::from_blocks(&[Block::Paragraph(paragraph)], &styles()).unwrap();
        let xml = package.to_xml().unwrap();
        assert!(!xml.contains("pStyle"));
    }

    #[test]
    fn test_docx_round_trip_keeps_blocks_and_styles() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("section.DOCX");

        let mut paragraph = Paragraph::with_text("Zipped");
        paragraph.style = Some("heading 1".to_string());
        let mut table = Table::new(1, 2);
        *table.cell_mut(0, 0).unwrap() = Cell::with_text("left");
        *table.cell_mut(0, 1).unwrap() = Cell::with_text("right");
        let blocks = vec![Block::Paragraph(paragraph), Block::Table(table)];

        let package = WordPackage::from_blocks(&blocks, &styles()).unwrap();
        let bytes = package.to_bytes(DocumentFormat::Docx).unwrap();
        assert!(bytes.starts_with(b"PK"));
        fs::write(&path, bytes).unwrap();

        let reopened = WordPackage::open(&path).unwrap();
        assert_eq!(reopened.tree().blocks, blocks);
        assert_eq!(reopened.styles(), &styles());
    }

    #[test]
    fn test_docx_keeps_binary_parts() {
        let xml = format!(
            r#"<pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage">
<pkg:part pkg:name="/word/document.xml" pkg:contentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"><pkg:xmlData><w:document xmlns:w="{W}"><w:body><w:p><w:r><w:t>logo</w:t></w:r></w:p></w:body></w:document></pkg:xmlData></pkg:part>
<pkg:part pkg:name="/word/media/image1.png" pkg:contentType="image/png"><pkg:binaryData>iVBO
Rw==</pkg:binaryData></pkg:part>
</pkg:package>"#
        );
        let package = WordPackage::parse(&xml).unwrap();
        let parts = docx::read_parts(&package.to_bytes(DocumentFormat::Docx).unwrap()).unwrap();

        let image = parts
            .iter()
            .find(|p| p.name == "/word/media/image1.png")
            .unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.data, vec![0x89, 0x50, 0x4e, 0x47]);

        let reparsed = WordPackage::parse(&docx::to_flat_xml(&parts)).unwrap();
        assert_eq!(reparsed.tree().block_texts(), vec!["logo"]);
    }

    #[test]
    fn test_bare_document_saves_as_docx() {
        let xml = bare(r#"<w:p><w:r><w:t>bare</w:t></w:r></w:p><w:sectPr/>"#);
        let package = WordPackage::parse(&xml).unwrap();
        let parts = docx::read_parts(&package.to_bytes(DocumentFormat::Docx).unwrap()).unwrap();

        let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["/_rels/.rels", DOCUMENT_PART]);
        let reparsed = WordPackage::parse(&docx::to_flat_xml(&parts)).unwrap();
        assert_eq!(reparsed.tree().block_texts(), vec!["bare"]);
    }

    #[test]
    fn test_flat_format_bytes_match_xml() {
        let package = WordPackage::blank(&styles()).unwrap();
        assert_eq!(
            package.to_bytes(DocumentFormat::FlatXml).unwrap(),
            package.to_xml().unwrap().into_bytes()
        );
    }
}
