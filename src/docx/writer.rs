//! Docx Writer
//!
//! `DocxDocument`をWordprocessingMLパッケージ（DOCX）としてシリアライズする
//! モジュール。DOCXはZIPアーカイブであり、本文（document.xml）、ヘッダー・
//! フッター、メタデータ（docProps）、およびそれらを結ぶリレーションシップ
//! から構成されます。XML生成にはquick-xml、パッケージングにはzipを使用します。

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::ZipWriter;

use super::document::{Alignment, Block, DocxDocument, Paragraph, Run, RunContent, Table};
use crate::error::KahootError;

const NS_WORDPROCESSINGML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_OFFICE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// フッターのリレーションシップID
const REL_ID_FOOTER: &str = "rId1";
/// ヘッダーのリレーションシップID
const REL_ID_HEADER: &str = "rId2";

fn xml_err(e: impl std::fmt::Display) -> KahootError {
    KahootError::Xml(e.to_string())
}

fn zip_err(e: impl std::fmt::Display) -> KahootError {
    KahootError::Zip(e.to_string())
}

/// quick-xmlの薄いラッパー（XML宣言付きのパート生成用）
struct XmlBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlBuilder {
    fn new() -> Result<Self, KahootError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                Some("yes"),
            )))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), KahootError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_err)
    }

    fn close(&mut self, name: &str) -> Result<(), KahootError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), KahootError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Empty(elem)).map_err(xml_err)
    }

    fn text(&mut self, text: &str) -> Result<(), KahootError> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

impl DocxDocument {
    /// ドキュメントをDOCXバイト列としてメモリ上にシリアライズする
    pub fn save_to_buffer(&self) -> Result<Vec<u8>, KahootError> {
        let mut cursor = Cursor::new(Vec::new());
        write_docx(self, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// ドキュメントをDOCXファイルとして保存する
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), KahootError> {
        let file = File::create(path.as_ref())?;
        write_docx(self, file)
    }
}

/// `DocxDocument`をDOCXパッケージとして書き出す
///
/// # 引数
///
/// * `document` - シリアライズするドキュメント
/// * `writer` - 出力先（`Write + Seek`、ZIPアーカイブの要件）
pub fn write_docx<W: Write + Seek>(
    document: &DocxDocument,
    writer: W,
) -> Result<(), KahootError> {
    let mut zip = ZipWriter::new(writer);
    let options =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let has_header = document.header.is_some();
    let has_footer = document.footer.is_some();

    let parts: Vec<(&str, Vec<u8>)> = {
        let mut parts = vec![
            (
                "[Content_Types].xml",
                content_types_xml(has_header, has_footer)?,
            ),
            ("_rels/.rels", root_rels_xml()?),
            ("docProps/core.xml", core_props_xml(document)?),
            ("docProps/app.xml", app_props_xml()?),
            ("word/document.xml", document_xml(document)?),
            (
                "word/_rels/document.xml.rels",
                document_rels_xml(has_header, has_footer)?,
            ),
        ];

        if let Some(footer) = &document.footer {
            parts.push(("word/footer1.xml", header_footer_xml("w:ftr", footer)?));
        }
        if let Some(header) = &document.header {
            parts.push(("word/header1.xml", header_footer_xml("w:hdr", header)?));
        }

        parts
    };

    for (name, data) in parts {
        zip.start_file(name, options).map_err(zip_err)?;
        zip.write_all(&data)?;
    }

    zip.finish().map_err(zip_err)?;
    Ok(())
}

fn content_types_xml(has_header: bool, has_footer: bool) -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;

    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    xml.empty(
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;

    if has_footer {
        xml.empty(
            "Override",
            &[
                ("PartName", "/word/footer1.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml",
                ),
            ],
        )?;
    }
    if has_header {
        xml.empty(
            "Override",
            &[
                ("PartName", "/word/header1.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml",
                ),
            ],
        )?;
    }

    xml.empty(
        "Override",
        &[
            ("PartName", "/docProps/core.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.core-properties+xml",
            ),
        ],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/docProps/app.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            ),
        ],
    )?;

    xml.close("Types")?;
    Ok(xml.finish())
}

fn root_rels_xml() -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;

    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            ),
            ("Target", "word/document.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            ),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId3"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            ),
            ("Target", "docProps/app.xml"),
        ],
    )?;

    xml.close("Relationships")?;
    Ok(xml.finish())
}

fn document_rels_xml(has_header: bool, has_footer: bool) -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;

    if has_footer {
        xml.empty(
            "Relationship",
            &[
                ("Id", REL_ID_FOOTER),
                (
                    "Type",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer",
                ),
                ("Target", "footer1.xml"),
            ],
        )?;
    }
    if has_header {
        xml.empty(
            "Relationship",
            &[
                ("Id", REL_ID_HEADER),
                (
                    "Type",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header",
                ),
                ("Target", "header1.xml"),
            ],
        )?;
    }

    xml.close("Relationships")?;
    Ok(xml.finish())
}

fn core_props_xml(document: &DocxDocument) -> Result<Vec<u8>, KahootError> {
    // W3CDTF形式のタイムスタンプ（dcterms:createdの要求形式）
    let created = document.created.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut xml = XmlBuilder::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;

    xml.open("dc:creator", &[])?;
    xml.text(&document.creator)?;
    xml.close("dc:creator")?;

    xml.open("cp:lastModifiedBy", &[])?;
    xml.text(&document.creator)?;
    xml.close("cp:lastModifiedBy")?;

    xml.open("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")])?;
    xml.text(&created)?;
    xml.close("dcterms:created")?;

    xml.open("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")])?;
    xml.text(&created)?;
    xml.close("dcterms:modified")?;

    xml.close("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_props_xml() -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;

    xml.open("Application", &[])?;
    xml.text("kahoot2docx")?;
    xml.close("Application")?;

    xml.close("Properties")?;
    Ok(xml.finish())
}

fn document_xml(document: &DocxDocument) -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open(
        "w:document",
        &[
            ("xmlns:w", NS_WORDPROCESSINGML),
            ("xmlns:r", NS_OFFICE_RELATIONSHIPS),
        ],
    )?;
    xml.open("w:body", &[])?;

    for block in &document.blocks {
        match block {
            Block::Paragraph(paragraph) => write_paragraph(&mut xml, paragraph)?,
            Block::Table(table) => write_table(&mut xml, table)?,
        }
    }

    // セクションプロパティ（ヘッダー・フッター参照、A4縦、標準余白）
    xml.open("w:sectPr", &[])?;
    if document.header.is_some() {
        xml.empty(
            "w:headerReference",
            &[("w:type", "default"), ("r:id", REL_ID_HEADER)],
        )?;
    }
    if document.footer.is_some() {
        xml.empty(
            "w:footerReference",
            &[("w:type", "default"), ("r:id", REL_ID_FOOTER)],
        )?;
    }
    xml.empty("w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1417"),
            ("w:right", "1417"),
            ("w:bottom", "1134"),
            ("w:left", "1417"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.close("w:sectPr")?;

    xml.close("w:body")?;
    xml.close("w:document")?;
    Ok(xml.finish())
}

fn header_footer_xml(root: &str, paragraph: &Paragraph) -> Result<Vec<u8>, KahootError> {
    let mut xml = XmlBuilder::new()?;
    xml.open(
        root,
        &[
            ("xmlns:w", NS_WORDPROCESSINGML),
            ("xmlns:r", NS_OFFICE_RELATIONSHIPS),
        ],
    )?;
    write_paragraph(&mut xml, paragraph)?;
    xml.close(root)?;
    Ok(xml.finish())
}

fn write_paragraph(xml: &mut XmlBuilder, paragraph: &Paragraph) -> Result<(), KahootError> {
    xml.open("w:p", &[])?;

    if paragraph.alignment == Alignment::Center {
        xml.open("w:pPr", &[])?;
        xml.empty("w:jc", &[("w:val", "center")])?;
        xml.close("w:pPr")?;
    }

    for run in &paragraph.runs {
        write_run(xml, run)?;
    }

    xml.close("w:p")?;
    Ok(())
}

fn write_run(xml: &mut XmlBuilder, run: &Run) -> Result<(), KahootError> {
    match &run.content {
        RunContent::Text(text) => write_text_run(xml, run, text),
        // ページ番号フィールドは表示時に評価される（事前計算文字列ではない）
        RunContent::PageNumber => write_field_run(xml, run, " PAGE "),
        RunContent::PageCount => write_field_run(xml, run, " NUMPAGES "),
    }
}

fn write_text_run(xml: &mut XmlBuilder, run: &Run, text: &str) -> Result<(), KahootError> {
    xml.open("w:r", &[])?;
    write_run_props(xml, run)?;
    xml.open("w:t", &[("xml:space", "preserve")])?;
    xml.text(text)?;
    xml.close("w:t")?;
    xml.close("w:r")?;
    Ok(())
}

fn write_field_run(xml: &mut XmlBuilder, run: &Run, instruction: &str) -> Result<(), KahootError> {
    xml.open("w:fldSimple", &[("w:instr", instruction)])?;

    // フィールド未更新時のプレースホルダー値
    xml.open("w:r", &[])?;
    write_run_props(xml, run)?;
    xml.open("w:t", &[])?;
    xml.text("1")?;
    xml.close("w:t")?;
    xml.close("w:r")?;

    xml.close("w:fldSimple")?;
    Ok(())
}

fn write_run_props(xml: &mut XmlBuilder, run: &Run) -> Result<(), KahootError> {
    if !run.bold && !run.italic && run.size.is_none() {
        return Ok(());
    }

    xml.open("w:rPr", &[])?;
    if run.bold {
        xml.empty("w:b", &[])?;
    }
    if run.italic {
        xml.empty("w:i", &[])?;
    }
    if let Some(size) = run.size {
        let value = size.to_string();
        xml.empty("w:sz", &[("w:val", value.as_str())])?;
        xml.empty("w:szCs", &[("w:val", value.as_str())])?;
    }
    xml.close("w:rPr")?;
    Ok(())
}

fn write_table(xml: &mut XmlBuilder, table: &Table) -> Result<(), KahootError> {
    // 2列テーブル（A4本文幅をおよそ半分ずつ）
    const COLUMN_WIDTH: &str = "4536";

    xml.open("w:tbl", &[])?;

    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.close("w:tblPr")?;

    xml.open("w:tblGrid", &[])?;
    xml.empty("w:gridCol", &[("w:w", COLUMN_WIDTH)])?;
    xml.empty("w:gridCol", &[("w:w", COLUMN_WIDTH)])?;
    xml.close("w:tblGrid")?;

    for row in &table.rows {
        xml.open("w:tr", &[])?;
        for cell_text in row {
            xml.open("w:tc", &[])?;
            xml.open("w:tcPr", &[])?;
            xml.empty("w:tcW", &[("w:w", COLUMN_WIDTH), ("w:type", "dxa")])?;
            xml.close("w:tcPr")?;
            write_paragraph(xml, &Paragraph::new().add_run(Run::text(cell_text.clone())))?;
            xml.close("w:tc")?;
        }
        xml.close("w:tr")?;
    }

    xml.close("w:tbl")?;
    Ok(())
}
