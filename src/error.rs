//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// kahoot2docxクレート全体で使用するエラー型
///
/// このエラー型は、Kahoot結果ファイルの読み込み、抽出、DOCX書き出し処理中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
/// 抽出とレンダリングはfail-fastで、部分的な成功モードはありません。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Structure`: 固定レイアウトからの逸脱（期待したセルが空、型違いなど）
/// - `Model`: 質問モデルの不変条件違反（5個目の回答選択肢の追加など）
/// - `Config`: 設定・引数の検証に失敗したエラー（拡張子違い、フォルダ無しなど）
///
/// # 使用例
///
/// ```rust,no_run
/// use kahoot2docx::KahootError;
/// use std::fs::File;
///
/// fn read_result_file(path: &str) -> Result<(), KahootError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum KahootError {
    /// I/O操作中に発生したエラー
    ///
    /// ファイルの読み込み失敗、書き込み失敗など、標準ライブラリの
    /// `std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがXLSXファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::XlsxError),

    /// ZIPアーカイブの書き込みエラー
    ///
    /// DOCXファイル（ZIPアーカイブ）の書き込み中に発生したエラーです。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// XMLの書き込みエラー
    ///
    /// WordprocessingML（DOCX内部のXML）の生成中に発生したエラーです。
    #[error("XML write error: {0}")]
    Xml(String),

    /// Kahoot固定レイアウトからの構造的な逸脱
    ///
    /// 期待した固定位置のセルが存在しない、型が違う、マーカー記号が
    /// 認識できないなど、入力シートがKahootエクスポートのレイアウトに
    /// 従っていない場合に発生します。エラーメッセージには、シート番号、
    /// セル座標（A1記法）、詳細なメッセージが含まれます。
    ///
    /// # 例
    ///
    /// ```rust
    /// use kahoot2docx::KahootError;
    ///
    /// let error = KahootError::Structure {
    ///     sheet: 3,
    ///     cell: "B2".to_string(),
    ///     message: "Question text cell is empty".to_string(),
    /// };
    ///
    /// println!("{}", error);
    /// // 出力: "Malformed sheet 3 at cell B2: Question text cell is empty"
    /// ```
    #[error("Malformed sheet {sheet} at cell {cell}: {message}")]
    Structure {
        /// エラーが発生したシートのインデックス（0始まり）
        sheet: usize,
        /// エラーが発生したセルの座標（A1記法）
        cell: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// 質問モデルの不変条件違反
    ///
    /// 5個目の回答選択肢の追加、単一選択問題への2個目の正解追加など、
    /// データモデルの不変条件に違反する変更が試みられた場合に発生します。
    /// 失敗した操作は状態を変更しません。
    #[error("Question model violation: {0}")]
    Model(String),

    /// 質問リストへの範囲外インデックスアクセス
    #[error("Question index {index} out of range (list has {count} questions)")]
    IndexOutOfRange {
        /// 要求されたインデックス
        index: usize,
        /// リスト内の質問数
        count: usize,
    },

    /// 質問リストへの型違いアクセス
    ///
    /// 例えば、true/false問題を選択問題用アクセサで取得しようとした場合に
    /// 発生します。
    #[error("Question at index {index} is a {actual} question, not a {expected} question")]
    TypeMismatch {
        /// 要求されたインデックス
        index: usize,
        /// アクセサが期待した種別
        expected: &'static str,
        /// 実際の種別
        actual: &'static str,
    },

    /// 設定・引数の検証に失敗したエラー
    ///
    /// 入力ファイル名の拡張子が`.xlsx`でない、出力フォルダが存在しない
    /// などの場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),
}
