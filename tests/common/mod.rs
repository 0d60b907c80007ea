//! Shared test utilities for integration and E2E tests.
//!
//! Fixtures build real Flat OPC documents through the library's own writer,
//! so the tests exercise the same format the binary reads.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ComposeFixture::new()
//!         .with_section("cover-page", &["Cover"])
//!         .with_manifest("- Cover Page\n");
//!     fixture.compose_cmd().assert().success();
//! }
//! ```

#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::{Path, PathBuf};

use doc_composer::document::{
    Block, DocumentFormat, Paragraph, Style, StyleKind, StyleTable, WordPackage,
};

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::{paragraphs, write_document, write_docx, ComposeFixture};
}

/// Paragraph blocks with the given texts.
pub fn paragraphs(texts: &[&str]) -> Vec<Block> {
    texts
        .iter()
        .map(|t| Block::Paragraph(Paragraph::with_text(*t)))
        .collect()
}

/// Style table with a default `Normal` paragraph style.
pub fn default_styles() -> StyleTable {
    let mut styles = StyleTable::new();
    styles.insert(Style {
        id: "Normal".to_string(),
        name: "Normal".to_string(),
        kind: StyleKind::Paragraph,
        is_default: true,
    });
    styles
}

/// Write a Flat OPC package holding `blocks`.
pub fn write_document(path: &Path, blocks: &[Block]) {
    let package = WordPackage::from_blocks(blocks, &default_styles()).unwrap();
    std::fs::write(path, package.to_xml().unwrap()).unwrap();
}

/// Write a zipped `.docx` package holding `blocks`.
pub fn write_docx(path: &Path, blocks: &[Block]) {
    let package = WordPackage::from_blocks(blocks, &default_styles()).unwrap();
    std::fs::write(path, package.to_bytes(DocumentFormat::Docx).unwrap()).unwrap();
}

/// A working directory with `library/`, `master.xml` and `manifest.md`.
pub struct ComposeFixture {
    pub temp: TempDir,
}

impl ComposeFixture {
    /// Empty library directory and an empty master template.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        temp.child("library").create_dir_all().unwrap();
        write_document(&temp.path().join("master.xml"), &[]);
        Self { temp }
    }

    pub fn with_section(self, stem: &str, texts: &[&str]) -> Self {
        self.with_section_blocks(stem, &paragraphs(texts))
    }

    pub fn with_section_blocks(self, stem: &str, blocks: &[Block]) -> Self {
        let path = self.path("library").join(format!("{stem}.xml"));
        write_document(&path, blocks);
        self
    }

    pub fn with_docx_section(self, stem: &str, texts: &[&str]) -> Self {
        let path = self.path("library").join(format!("{stem}.docx"));
        write_docx(&path, &paragraphs(texts));
        self
    }

    pub fn with_master_text(self, texts: &[&str]) -> Self {
        write_document(&self.path("master.xml"), &paragraphs(texts));
        self
    }

    pub fn with_manifest(self, content: &str) -> Self {
        self.temp.child("manifest.md").write_str(content).unwrap();
        self
    }

    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.temp.child(name).write_str(content).unwrap();
        self
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path("out/composed.xml")
    }

    /// The binary, run in the fixture directory without inherited settings.
    pub fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("doc-composer");
        cmd.current_dir(self.temp.path())
            .env_remove("DOC_COMPOSER_LIBRARY")
            .env_remove("DOC_COMPOSER_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }

    /// `compose` with the fixture's manifest, library, master and output.
    pub fn compose_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("compose")
            .arg("--manifest")
            .arg(self.path("manifest.md"))
            .arg("--library")
            .arg(self.path("library"))
            .arg("--master")
            .arg(self.path("master.xml"))
            .arg("--output")
            .arg(self.output_path());
        cmd
    }

    /// The composed output, parsed.
    pub fn output(&self) -> WordPackage {
        WordPackage::open(&self.output_path()).unwrap()
    }
}
