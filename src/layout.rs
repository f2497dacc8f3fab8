//! Layout Module
//!
//! Kahootエクスポートの固定レイアウト座標を一箇所に集約するモジュール。
//! フォーマットのレイアウトが変わった場合の編集箇所はここだけです。
//! 座標はすべて0始まり（セルB2は行1・列1）。

/// 先頭の非質問シート数（"Overview", "Final Scores", "Kahoot! Summary"）
pub const LEADING_SHEETS: usize = 3;

/// 末尾の非質問シート数（"RawReportData Data"）
pub const TRAILING_SHEETS: usize = 1;

/// 最初の質問シートのインデックス
pub const FIRST_QUESTION_SHEET: usize = LEADING_SHEETS;

/// ゲームタイトルはセルA1（最終シート以外の全シートで同じ値）
pub const ROW_TITLE: u32 = 0;
/// ゲームタイトルはセルA1
pub const COL_TITLE: u32 = 0;

/// 質問文はセルB2
pub const ROW_QUESTION_TEXT: u32 = 1;
/// 質問文はセルB2
pub const COL_QUESTION_TEXT: u32 = 1;

/// 回答選択肢は行8（セルD8, F8, H8, J8）
pub const ROW_ANSWER_OPTIONS: u32 = 7;

/// 回答選択肢の列（左から右へ: D, F, H, J）
pub const COLS_ANSWER_OPTIONS: [u32; 4] = [3, 5, 7, 9];

/// 正誤マーカーは行9（セルC9, E9, G9, I9）
pub const ROW_ANSWER_MARKERS: u32 = 8;

/// 正誤マーカーの列（左から右へ: C, E, G, I）
pub const COLS_ANSWER_MARKERS: [u32; 4] = [2, 4, 6, 8];

/// 正答率はセルC4（0.0〜1.0の割合として格納される）
pub const ROW_PERCENTAGE: u32 = 3;
/// 正答率はセルC4
pub const COL_PERCENTAGE: u32 = 2;

/// 正解マーカーの記号（"Heavy Check Mark", U+2714）
pub const MARKER_RIGHT: char = '\u{2714}';

/// 不正解マーカーの記号（"Heavy Ballot X", U+2718）
pub const MARKER_WRONG: char = '\u{2718}';
