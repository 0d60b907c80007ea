//! Interned XML names for WordprocessingML and Flat OPC
//!
//! `xot` compares names by id, so every element and attribute the reader or
//! writer touches is registered once per `Xot` instance.

use xot::{NameId, Xot};

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const PKG_NS: &str = "http://schemas.microsoft.com/office/2006/xmlPackage";
pub(crate) const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub(crate) const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Relationship types ending in this suffix point at embedded images.
pub(crate) const IMAGE_REL_SUFFIX: &str = "/image";

pub(crate) const DOCUMENT_PART: &str = "/word/document.xml";
pub(crate) const STYLES_PART: &str = "/word/styles.xml";
pub(crate) const DOCUMENT_RELS_PART: &str = "/word/_rels/document.xml.rels";

#[derive(Debug, Clone, Copy)]
pub(crate) struct Names {
    // package
    pub pkg_package: NameId,
    pub pkg_part: NameId,
    pub pkg_name: NameId,
    pub pkg_xml_data: NameId,
    pub pkg_binary_data: NameId,
    pub pkg_content_type: NameId,
    pub rel_relationship: NameId,
    pub rel_type: NameId,

    // body structure
    pub document: NameId,
    pub body: NameId,
    pub sect_pr: NameId,
    pub p: NameId,
    pub p_pr: NameId,
    pub p_style: NameId,
    pub jc: NameId,
    pub spacing: NameId,
    pub ind: NameId,
    pub hyperlink: NameId,

    // runs
    pub r: NameId,
    pub r_pr: NameId,
    pub b: NameId,
    pub i: NameId,
    pub u: NameId,
    pub r_fonts: NameId,
    pub sz: NameId,
    pub color: NameId,
    pub highlight: NameId,
    pub t: NameId,
    pub tab: NameId,
    pub br: NameId,
    pub drawing: NameId,
    pub pict: NameId,
    pub object: NameId,

    // tables
    pub tbl: NameId,
    pub tbl_pr: NameId,
    pub tbl_style: NameId,
    pub tbl_w: NameId,
    pub tbl_grid: NameId,
    pub grid_col: NameId,
    pub tr: NameId,
    pub tc: NameId,

    // styles
    pub styles: NameId,
    pub style: NameId,
    pub name: NameId,

    // attributes
    pub val: NameId,
    pub before: NameId,
    pub after: NameId,
    pub line: NameId,
    pub line_rule: NameId,
    pub left: NameId,
    pub start: NameId,
    pub right: NameId,
    pub end: NameId,
    pub first_line: NameId,
    pub hanging: NameId,
    pub ascii: NameId,
    pub h_ansi: NameId,
    pub cs: NameId,
    pub w_type: NameId,
    pub w_w: NameId,
    pub style_id: NameId,
    pub default: NameId,
    pub xml_space: NameId,
}

impl Names {
    pub fn register(xot: &mut Xot) -> Self {
        let w_ns = xot.add_namespace(W_NS);
        let pkg_ns = xot.add_namespace(PKG_NS);
        let rel_ns = xot.add_namespace(REL_NS);
        let xml_ns = xot.add_namespace(XML_NS);
        let mut w = |local: &str| xot.add_name_ns(local, w_ns);

        let document = w("document");
        let body = w("body");
        let sect_pr = w("sectPr");
        let p = w("p");
        let p_pr = w("pPr");
        let p_style = w("pStyle");
        let jc = w("jc");
        let spacing = w("spacing");
        let ind = w("ind");
        let hyperlink = w("hyperlink");
        let r = w("r");
        let r_pr = w("rPr");
        let b = w("b");
        let i = w("i");
        let u = w("u");
        let r_fonts = w("rFonts");
        let sz = w("sz");
        let color = w("color");
        let highlight = w("highlight");
        let t = w("t");
        let tab = w("tab");
        let br = w("br");
        let drawing = w("drawing");
        let pict = w("pict");
        let object = w("object");
        let tbl = w("tbl");
        let tbl_pr = w("tblPr");
        let tbl_style = w("tblStyle");
        let tbl_w = w("tblW");
        let tbl_grid = w("tblGrid");
        let grid_col = w("gridCol");
        let tr = w("tr");
        let tc = w("tc");
        let styles = w("styles");
        let style = w("style");
        let name = w("name");
        let val = w("val");
        let before = w("before");
        let after = w("after");
        let line = w("line");
        let line_rule = w("lineRule");
        let left = w("left");
        let start = w("start");
        let right = w("right");
        let end = w("end");
        let first_line = w("firstLine");
        let hanging = w("hanging");
        let ascii = w("ascii");
        let h_ansi = w("hAnsi");
        let cs = w("cs");
        let w_type = w("type");
        let w_w = w("w");
        let style_id = w("styleId");
        let default = w("default");

        Names {
            pkg_package: xot.add_name_ns("package", pkg_ns),
            pkg_part: xot.add_name_ns("part", pkg_ns),
            pkg_name: xot.add_name_ns("name", pkg_ns),
            pkg_xml_data: xot.add_name_ns("xmlData", pkg_ns),
            pkg_binary_data: xot.add_name_ns("binaryData", pkg_ns),
            pkg_content_type: xot.add_name_ns("contentType", pkg_ns),
            rel_relationship: xot.add_name_ns("Relationship", rel_ns),
            rel_type: xot.add_name("Type"),
            document,
            body,
            sect_pr,
            p,
            p_pr,
            p_style,
            jc,
            spacing,
            ind,
            hyperlink,
            r,
            r_pr,
            b,
            i,
            u,
            r_fonts,
            sz,
            color,
            highlight,
            t,
            tab,
            br,
            drawing,
            pict,
            object,
            tbl,
            tbl_pr,
            tbl_style,
            tbl_w,
            tbl_grid,
            grid_col,
            tr,
            tc,
            styles,
            style,
            name,
            val,
            before,
            after,
            line,
            line_rule,
            left,
            start,
            right,
            end,
            first_line,
            hanging,
            ascii,
            h_ansi,
            cs,
            w_type,
            w_w,
            style_id,
            default,
            xml_space: xot.add_name_ns("space", xml_ns),
        }
    }
}
