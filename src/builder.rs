//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。
//! `Converter`は「XLSX読み込み → 抽出 → レンダリング → DOCX書き出し」の
//! パイプライン全体を1ファイル単位で実行します。複数ファイルは逐次処理
//! されます（各変換は安価で、対象ファイル数は少数という前提）。

use std::path::{Path, PathBuf};

use log::info;

use crate::error::KahootError;
use crate::extract::extract_question_list;
use crate::grid::XlsxGrid;
use crate::i18n::Language;
use crate::paths;
use crate::render::{render, RenderConfig};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 出力ドキュメントの言語
    pub language: Language,

    /// 全ページのヘッダーに表示する行（任意）
    pub topline: Option<String>,

    /// 出力フォルダの上書き（Noneなら入力ファイルと同じ場所）
    pub output_folder: Option<PathBuf>,
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use kahoot2docx::{ConverterBuilder, Language};
///
/// # fn main() -> Result<(), kahoot2docx::KahootError> {
/// let converter = ConverterBuilder::new()
///     .with_language(Language::German)
///     .with_topline("Summer Course 2026")
///     .build()?;
///
/// let written = converter.convert_file("kahoot_result.xlsx")?;
/// println!("Wrote {}", written.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 言語: 英語
    /// - ヘッダー行: なし
    /// - 出力フォルダ: 入力ファイルと同じ場所
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力ドキュメントの言語を設定する
    pub fn with_language(mut self, language: Language) -> Self {
        self.config.language = language;
        self
    }

    /// 言語コードから言語を設定する
    ///
    /// サポートされていないコードの場合は警告を出して英語へ
    /// フォールバックします。
    pub fn with_language_code(mut self, code: &str) -> Self {
        self.config.language = Language::from_code_or_default(code);
        self
    }

    /// 全ページのヘッダーに表示する行を設定する
    pub fn with_topline(mut self, topline: impl Into<String>) -> Self {
        self.config.topline = Some(topline.into());
        self
    }

    /// 出力フォルダを設定する
    ///
    /// 設定すると、出力ファイルはベース名のみでこのフォルダに
    /// 書き込まれます。
    pub fn with_output_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.output_folder = Some(folder.into());
        self
    }

    /// 設定を検証して`Converter`を構築する
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Config)` - 出力フォルダが指定されているのに
    ///   存在しない場合
    pub fn build(self) -> Result<Converter, KahootError> {
        if let Some(folder) = &self.config.output_folder {
            if !paths::directory_exists(folder) {
                return Err(KahootError::Config(format!(
                    "Output folder \"{}\" does not exist",
                    folder.display()
                )));
            }
        }

        Ok(Converter {
            config: self.config,
        })
    }
}

/// Kahoot結果ファイルをWordドキュメントへ変換するコンバーター
///
/// `ConverterBuilder`で構築します。変換は純粋に逐次的で、変換間で
/// 共有される可変状態はありません。
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// 1個のXLSXファイルを変換してDOCXファイルを書き出す
    ///
    /// ターゲットパスは入力ファイル名の`.xlsx`サフィックスを`.docx`に
    /// 置き換えて導出され、出力フォルダが設定されていればベース名のみで
    /// そのフォルダに移動されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き出したDOCXファイルのパス
    /// * `Err(KahootError)` - 読み込み・抽出・書き出しのいずれかが
    ///   失敗した場合
    pub fn convert_file(&self, input: impl AsRef<Path>) -> Result<PathBuf, KahootError> {
        let input = input.as_ref();
        info!("Converting \"{}\"", input.display());

        let grid = XlsxGrid::open(input)?;
        let list = extract_question_list(&grid)?;

        let render_config = RenderConfig {
            language: self.config.language,
            topline: self.config.topline.clone(),
        };
        let document = render(&list, &render_config);

        let target = self.target_path(input)?;
        document.save_to_file(&target)?;
        info!("Wrote \"{}\"", target.display());

        Ok(target)
    }

    /// フォルダ内のすべてのXLSXファイルを逐次変換する
    ///
    /// ファイルはソート順に処理されます。最初のファイルの失敗で
    /// バッチ全体が中断されます（ファイル単位の分離は行わない、
    /// 意図的な設計判断）。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<PathBuf>)` - 書き出したDOCXファイルのパス（処理順）
    pub fn convert_folder(&self, directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, KahootError> {
        let files = paths::find_xlsx_files(directory.as_ref())?;
        info!(
            "Found {} xlsx file(s) in \"{}\"",
            files.len(),
            directory.as_ref().display()
        );

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            written.push(self.convert_file(&file)?);
        }

        Ok(written)
    }

    /// 入力パスから出力パスを導出する
    fn target_path(&self, input: &Path) -> Result<PathBuf, KahootError> {
        let target = paths::change_suffix_xlsx_to_docx(&input.to_string_lossy())?;

        match &self.config.output_folder {
            Some(folder) => Ok(PathBuf::from(paths::change_output_folder(
                &target,
                &folder.to_string_lossy(),
            ))),
            None => Ok(PathBuf::from(target)),
        }
    }
}
