//! Zipped `.docx` packages
//!
//! A `.docx` file is the zip form of the parts a Flat OPC document carries
//! inline. Loading turns the archive into Flat OPC text (XML parts inline,
//! everything else as base64 `pkg:binaryData`) so a single
//! [`WordPackage`](super::WordPackage) handles both forms. Saving walks the
//! parts back out into a new archive with a generated `[Content_Types].xml`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{Cursor, Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use xot::Xot;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::names::PKG_NS;
use crate::error::{Error, Result};

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELATIONSHIPS_CONTENT_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub(crate) const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// One package part, named by its absolute part name (`/word/document.xml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Part {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

fn is_xml_content_type(content_type: &str) -> bool {
    content_type.ends_with("+xml") || content_type == "application/xml" || content_type == "text/xml"
}

/// UTF-8 text of a part, without a byte order mark.
fn decode_text(data: &[u8]) -> Option<&str> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    std::str::from_utf8(data).ok()
}

fn strip_declaration(text: &str) -> &str {
    let text = text.trim_start();
    if text.starts_with("<?xml") {
        if let Some(end) = text.find("?>") {
            return text[end + 2..].trim_start();
        }
    }
    text
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `[Content_Types].xml`: defaults by extension, overrides by part name.
#[derive(Debug, Default)]
struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    fn parse(data: &[u8]) -> Result<Self> {
        let text = decode_text(data)
            .ok_or_else(|| Error::parse(format!("{CONTENT_TYPES_ENTRY} is not UTF-8")))?;

        let mut xot = Xot::new();
        let ns = xot.add_namespace(CONTENT_TYPES_NS);
        let default = xot.add_name_ns("Default", ns);
        let override_ = xot.add_name_ns("Override", ns);
        let extension = xot.add_name("Extension");
        let part_name = xot.add_name("PartName");
        let content_type = xot.add_name("ContentType");

        let root = xot
            .parse(text)
            .map_err(|e| Error::parse(format!("invalid {CONTENT_TYPES_ENTRY}: {e}")))?;
        let types = xot
            .document_element(root)
            .map_err(|e| Error::parse(format!("invalid {CONTENT_TYPES_ENTRY}: {e}")))?;

        let mut table = ContentTypes::default();
        for node in xot.children(types) {
            let Some(element) = xot.element(node) else {
                continue;
            };
            let Some(value) = xot.get_attribute(node, content_type) else {
                continue;
            };
            if element.name() == default {
                if let Some(ext) = xot.get_attribute(node, extension) {
                    table
                        .defaults
                        .insert(ext.to_ascii_lowercase(), value.to_string());
                }
            } else if element.name() == override_ {
                if let Some(name) = xot.get_attribute(node, part_name) {
                    table
                        .overrides
                        .insert(name.to_ascii_lowercase(), value.to_string());
                }
            }
        }
        Ok(table)
    }

    /// Part names compare case-insensitively.
    fn lookup(&self, part_name: &str) -> String {
        let lower = part_name.to_ascii_lowercase();
        if let Some(found) = self.overrides.get(&lower) {
            return found.clone();
        }
        lower
            .rsplit_once('.')
            .and_then(|(_, ext)| self.defaults.get(ext))
            .cloned()
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
    }
}

/// Every file entry of a `.docx` archive as a part, in archive order.
pub(crate) fn read_parts(bytes: &[u8]) -> Result<Vec<Part>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::parse(format!("not a .docx archive: {e}")))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::parse(format!("unreadable archive entry: {e}")))?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        entries.push((name, data));
    }

    let content_types = match entries.iter().find(|(name, _)| name == CONTENT_TYPES_ENTRY) {
        Some((_, data)) => ContentTypes::parse(data)?,
        None => return Err(Error::parse(format!("archive has no {CONTENT_TYPES_ENTRY}"))),
    };

    Ok(entries
        .into_iter()
        .filter(|(name, _)| name != CONTENT_TYPES_ENTRY)
        .map(|(name, data)| {
            let name = format!("/{}", name.trim_start_matches('/'));
            let content_type = content_types.lookup(&name);
            Part {
                name,
                content_type,
                data,
            }
        })
        .collect())
}

/// Flat OPC text holding `parts`.
///
/// XML parts that are not valid UTF-8 are carried as binary data instead.
pub(crate) fn to_flat_xml(parts: &[Part]) -> String {
    let mut xml = String::new();
    let _ = write!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><pkg:package xmlns:pkg="{PKG_NS}">"#
    );
    for part in parts {
        let _ = write!(
            xml,
            r#"<pkg:part pkg:name="{}" pkg:contentType="{}">"#,
            escape_attr(&part.name),
            escape_attr(&part.content_type)
        );
        let text = is_xml_content_type(&part.content_type)
            .then(|| decode_text(&part.data))
            .flatten();
        match text {
            Some(text) => {
                xml.push_str("<pkg:xmlData>");
                xml.push_str(strip_declaration(text));
                xml.push_str("</pkg:xmlData>");
            }
            None => {
                xml.push_str("<pkg:binaryData>");
                xml.push_str(&STANDARD.encode(&part.data));
                xml.push_str("</pkg:binaryData>");
            }
        }
        xml.push_str("</pkg:part>");
    }
    xml.push_str("</pkg:package>");
    xml
}

/// Bytes of a `pkg:binaryData` payload; whitespace between lines is ignored.
pub(crate) fn decode_binary(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| Error::parse(format!("invalid binary part: {e}")))
}

fn content_types_xml(parts: &[Part]) -> String {
    let mut xml = String::new();
    let _ = write!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="{CONTENT_TYPES_NS}"><Default Extension="rels" ContentType="{RELATIONSHIPS_CONTENT_TYPE}"/><Default Extension="xml" ContentType="application/xml"/>"#
    );
    for part in parts {
        let _ = write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            escape_attr(&part.name),
            escape_attr(&part.content_type)
        );
    }
    xml.push_str("</Types>");
    xml
}

fn archive_error(e: ZipError) -> Error {
    Error::parse(format!("cannot build .docx archive: {e}"))
}

fn add_entry(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    writer.start_file(name, options).map_err(archive_error)?;
    writer.write_all(data)?;
    Ok(())
}

/// A `.docx` archive of `parts`, content types first.
pub(crate) fn write_archive(parts: &[Part]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    add_entry(
        &mut writer,
        CONTENT_TYPES_ENTRY,
        content_types_xml(parts).as_bytes(),
        options,
    )?;
    for part in parts {
        add_entry(
            &mut writer,
            part.name.trim_start_matches('/'),
            &part.data,
            options,
        )?;
    }

    let cursor = writer.finish().map_err(archive_error)?;
    Ok(cursor.into_inner())
}
