//! Document Model
//!
//! ページ分割されたリッチテキストドキュメントの受動的なモデル。
//! レンダラーがこのモデルを構築し、ライターがDOCXへシリアライズします。
//! スタイル属性は太字・斜体・フォントサイズのみをサポートします。

use chrono::{DateTime, Utc};

/// 段落の水平揃え
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// 左揃え（デフォルト）
    #[default]
    Left,

    /// 中央揃え
    Center,
}

/// ラン（書式が一様なテキスト断片）の内容
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// 固定テキスト
    Text(String),

    /// 現在のページ番号（ライブフィールド、表示時に評価される）
    PageNumber,

    /// 総ページ数（ライブフィールド、表示時に評価される）
    PageCount,
}

/// ラン（書式付きテキスト断片）
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub(crate) content: RunContent,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    /// フォントサイズ（half-point単位、`w:sz`の値）。`None`はデフォルト。
    pub(crate) size: Option<u32>,
}

impl Run {
    /// テキストのランを生成
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            bold: false,
            italic: false,
            size: None,
        }
    }

    /// 現在ページ番号のフィールドランを生成
    pub fn page_number() -> Self {
        Self {
            content: RunContent::PageNumber,
            bold: false,
            italic: false,
            size: None,
        }
    }

    /// 総ページ数のフィールドランを生成
    pub fn page_count() -> Self {
        Self {
            content: RunContent::PageCount,
            bold: false,
            italic: false,
            size: None,
        }
    }

    /// 太字を有効にする
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// 斜体を有効にする
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// フォントサイズを設定する（half-point単位、例: 11ptなら22）
    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }
}

/// 段落（ランの列 + 揃え）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub(crate) runs: Vec<Run>,
    pub(crate) alignment: Alignment,
}

impl Paragraph {
    /// 空の段落を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// ランを末尾に追加する
    pub fn add_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// 揃えを設定する
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// 2列テーブル（回答選択肢 | 正誤ラベル）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub(crate) rows: Vec<[String; 2]>,
}

impl Table {
    /// 空のテーブルを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を末尾に追加する
    pub fn add_row(&mut self, left: impl Into<String>, right: impl Into<String>) {
        self.rows.push([left.into(), right.into()]);
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// ドキュメント本文のブロック
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// 段落
    Paragraph(Paragraph),

    /// テーブル
    Table(Table),
}

/// ページ分割されたドキュメント
///
/// 本文ブロックの列、全ページ共通のヘッダー（任意）とフッター、
/// およびメタデータ（作成者・作成日時）を保持します。
///
/// # 使用例
///
/// ```rust
/// use kahoot2docx::docx::{Alignment, DocxDocument, Paragraph, Run};
///
/// let mut doc = DocxDocument::new();
/// doc.add_paragraph(
///     Paragraph::new()
///         .add_run(Run::text("Hello").bold().size(40))
///         .align(Alignment::Center),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DocxDocument {
    pub(crate) blocks: Vec<Block>,
    pub(crate) header: Option<Paragraph>,
    pub(crate) footer: Option<Paragraph>,
    pub(crate) creator: String,
    pub(crate) created: DateTime<Utc>,
}

impl Default for DocxDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxDocument {
    /// 空のドキュメントを生成（作成日時は現在時刻）
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            header: None,
            footer: None,
            creator: String::new(),
            created: Utc::now(),
        }
    }

    /// 段落を本文末尾に追加する
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// テーブルを本文末尾に追加する
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// 全ページ共通のヘッダー段落を設定する
    pub fn set_header(&mut self, paragraph: Paragraph) {
        self.header = Some(paragraph);
    }

    /// 全ページ共通のフッター段落を設定する
    pub fn set_footer(&mut self, paragraph: Paragraph) {
        self.footer = Some(paragraph);
    }

    /// 作成者メタデータを設定する
    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.creator = creator.into();
    }

    /// 作成日時メタデータを設定する
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = created;
    }

    /// 本文ブロックの列
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// ヘッダー段落（設定されている場合）
    pub fn header(&self) -> Option<&Paragraph> {
        self.header.as_ref()
    }

    /// フッター段落（設定されている場合）
    pub fn footer(&self) -> Option<&Paragraph> {
        self.footer.as_ref()
    }

    /// 作成者メタデータ
    pub fn creator(&self) -> &str {
        &self.creator
    }
}
