//! Docx Module
//!
//! レンダリング結果を受け取る「ドキュメントシンク」の実装。
//! 受動的なドキュメントモデル（`document`）と、それをWordprocessingML
//! （DOCX = ZIP + XML）としてシリアライズするライター（`writer`）から
//! 構成されます。ページ番号は事前計算した文字列ではなくライブフィールド
//! （PAGE / NUMPAGES）として埋め込まれます。

mod document;
mod writer;

pub use document::{Alignment, Block, DocxDocument, Paragraph, Run, RunContent, Table};
