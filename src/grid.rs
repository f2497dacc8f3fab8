//! Grid Module
//!
//! 抽出ロジックが読み取る「型付きセルの2次元グリッド」抽象を提供するモジュール。
//! calamineをバックエンドとするXLSX実装と、テスト・組み込み用のインメモリ実装を
//! 含みます。抽出側はこの抽象のみに依存し、ファイル形式を知りません。

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::KahootError;

/// セルの値を表す列挙型
///
/// Kahootエクスポートの読み取りに必要な3種のみを区別します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル（存在しないセルを含む）
    Empty,

    /// 文字列セル
    Text(String),

    /// 数値セル（f64）
    Number(f64),
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空白のみの文字列セルも空として扱います（元データの
    /// 空セル判定と同じ規則）。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 文字列セルの内容を取得（文字列セルでなければ`None`）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 数値セルの内容を取得（数値セルでなければ`None`）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// セル座標をA1記法の文字列に変換（例: (0, 0) -> "A1"）
///
/// エラーメッセージでのセル位置報告に使用します。
pub fn a1_notation(row: u32, col: u32) -> String {
    let mut col_str = String::new();
    let mut c = col;
    loop {
        let remainder = c % 26;
        col_str.insert(0, (b'A' + remainder as u8) as char);
        if c < 26 {
            break;
        }
        c = c / 26 - 1;
    }
    format!("{}{}", col_str, row + 1)
}

/// 1枚のシート（型付きセルの2次元グリッド）
pub trait SheetGrid {
    /// 指定座標のセル値を取得する（0始まり）
    ///
    /// 存在しないセルは`CellValue::Empty`として返されます。
    fn cell(&self, row: u32, col: u32) -> CellValue;
}

/// シートの列（グリッドソース）
///
/// 抽出ロジックへの入力となる、読み込み済みワークブックの抽象です。
pub trait GridSource {
    /// シート数
    fn sheet_count(&self) -> usize;

    /// 指定インデックスのシートを取得する
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Config)` - インデックスが範囲外の場合
    fn sheet(&self, index: usize) -> Result<&dyn SheetGrid, KahootError>;
}

/// calamineのセル値を`CellValue`に変換する
///
/// 文字列・数値以外の型は次のように正規化されます:
/// 論理値はリテラル文字列、日付はシリアル値、エラーセルは空。
fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

/// XLSXファイルをバックエンドとするシート実装
pub struct XlsxSheet {
    range: Range<Data>,
}

impl SheetGrid for XlsxSheet {
    fn cell(&self, row: u32, col: u32) -> CellValue {
        match self.range.get_value((row, col)) {
            Some(data) => convert_data(data),
            None => CellValue::Empty,
        }
    }
}

/// XLSXファイルをバックエンドとするグリッドソース
///
/// ワークブックの全シートを読み込み、シート順を保持します。
///
/// # 使用例
///
/// ```rust,no_run
/// use kahoot2docx::grid::{GridSource, XlsxGrid};
///
/// # fn main() -> Result<(), kahoot2docx::KahootError> {
/// let grid = XlsxGrid::open("kahoot_result.xlsx")?;
/// println!("Sheets: {}", grid.sheet_count());
/// # Ok(())
/// # }
/// ```
pub struct XlsxGrid {
    sheets: Vec<XlsxSheet>,
}

impl XlsxGrid {
    /// XLSXファイルを開き、全シートを読み込む
    ///
    /// # 引数
    ///
    /// * `path` - 読み込むXLSXファイルのパス
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Config)` - ファイルが存在しない場合
    /// * `Err(KahootError::Parse)` - calamineが解析に失敗した場合
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KahootError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(KahootError::Config(format!(
                "Input file \"{}\" not found",
                path.display()
            )));
        }

        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;

        let sheets = workbook
            .worksheets()
            .into_iter()
            .map(|(_, range)| XlsxSheet { range })
            .collect();

        Ok(Self { sheets })
    }
}

impl GridSource for XlsxGrid {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet(&self, index: usize) -> Result<&dyn SheetGrid, KahootError> {
        self.sheets
            .get(index)
            .map(|s| s as &dyn SheetGrid)
            .ok_or_else(|| {
                KahootError::Config(format!(
                    "Sheet index {} out of range ({} sheets)",
                    index,
                    self.sheets.len()
                ))
            })
    }
}

/// インメモリのシート実装（テスト・組み込み用）
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: HashMap<(u32, u32), CellValue>,
}

impl MemorySheet {
    /// 空のシートを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列セルを設定する
    pub fn set_text(&mut self, row: u32, col: u32, text: impl Into<String>) {
        self.cells.insert((row, col), CellValue::Text(text.into()));
    }

    /// 数値セルを設定する
    pub fn set_number(&mut self, row: u32, col: u32, value: f64) {
        self.cells.insert((row, col), CellValue::Number(value));
    }
}

impl SheetGrid for MemorySheet {
    fn cell(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }
}

/// インメモリのグリッドソース（テスト・組み込み用）
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    sheets: Vec<MemorySheet>,
}

impl MemoryGrid {
    /// 空のグリッドを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// シートを末尾に追加する
    pub fn push_sheet(&mut self, sheet: MemorySheet) {
        self.sheets.push(sheet);
    }
}

impl GridSource for MemoryGrid {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet(&self, index: usize) -> Result<&dyn SheetGrid, KahootError> {
        self.sheets
            .get(index)
            .map(|s| s as &dyn SheetGrid)
            .ok_or_else(|| {
                KahootError::Config(format!(
                    "Sheet index {} out of range ({} sheets)",
                    index,
                    self.sheets.len()
                ))
            })
    }
}
