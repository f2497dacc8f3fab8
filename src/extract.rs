//! Extract Module
//!
//! 固定レイアウトのグリッドからKahoot質問レコードを抽出するモジュール。
//! シートごとに質問の形状（単一選択 / 複数選択 / true/false）を判定し、
//! 内部整合性を検証しながら`QuestionList`を組み立てます。
//! 構造的な不整合はすべて`KahootError`としてfail-fastで報告されます。

use log::{debug, info};

use crate::error::KahootError;
use crate::grid::{a1_notation, CellValue, GridSource, SheetGrid};
use crate::layout;
use crate::model::{ChoiceQuestion, Question, QuestionKind, QuestionList, TrueFalseQuestion};

/// グリッド全体から質問リストを抽出する
///
/// 先頭3シート（概要・スコア・サマリー）と末尾1シート（生レポート）は
/// 質問シートではないため、質問数は「シート数 − 4」となります。
///
/// # 引数
///
/// * `grid` - 読み込み済みのグリッドソース
///
/// # 戻り値
///
/// * `Ok(QuestionList)` - 全質問シートの抽出に成功した場合
/// * `Err(KahootError)` - シート数が不足、またはいずれかのシートが
///   固定レイアウトに従っていない場合
pub fn extract_question_list(grid: &dyn GridSource) -> Result<QuestionList, KahootError> {
    let sheet_count = grid.sheet_count();
    let non_question_sheets = layout::LEADING_SHEETS + layout::TRAILING_SHEETS;

    if sheet_count < non_question_sheets + 1 {
        return Err(KahootError::Config(format!(
            "Workbook has {} sheets, but at least {} are required (less than 1 question sheet)",
            sheet_count,
            non_question_sheets + 1
        )));
    }

    let question_count = sheet_count - non_question_sheets;
    info!("Number of sheets with questions: {}", question_count);

    let mut list = QuestionList::with_capacity(question_count);

    for question_no in 0..question_count {
        let sheet_index = layout::FIRST_QUESTION_SHEET + question_no;
        let sheet = grid.sheet(sheet_index)?;

        let question = extract_question_from_sheet(sheet, sheet_index)?;
        debug!(
            "Found {} question on sheet with index={}",
            question.kind().label(),
            sheet_index
        );

        list.push(question);
    }

    let title = extract_title(grid.sheet(0)?, 0)?;
    list.set_title(title);

    Ok(list)
}

/// タイトルセル（A1）からゲームタイトルを抽出する
///
/// タイトルは最終シート以外の全シートのA1に同じ値が入っているため、
/// 先頭シートから読み取ります。前後の空白は除去されます。
fn extract_title(sheet: &dyn SheetGrid, sheet_index: usize) -> Result<String, KahootError> {
    let text = require_text(
        sheet,
        sheet_index,
        layout::ROW_TITLE,
        layout::COL_TITLE,
        "game title",
    )?;
    Ok(text.trim().to_string())
}

/// 1枚の質問シートから質問を抽出する（形状判定を含む）
///
/// # 引数
///
/// * `sheet` - 質問シート（概要・サマリーシートは不可）
/// * `sheet_index` - エラー報告用のシートインデックス
fn extract_question_from_sheet(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
) -> Result<Question, KahootError> {
    let question_text = extract_question_text(sheet, sheet_index)?;
    let option_texts = extract_option_texts(sheet, sheet_index)?;
    let percentage = extract_percentage_right(sheet, sheet_index)?;

    if is_true_false_shape(&option_texts) {
        let statement_is_true = extract_true_false_answer(sheet, sheet_index)?;

        let mut question = TrueFalseQuestion::new(question_text, statement_is_true);
        question.set_percentage_right(percentage);

        return Ok(Question::TrueFalse(question));
    }

    // ここに到達した場合、質問は単一選択または複数選択
    let markers = extract_markers(sheet, sheet_index, option_texts.len())?;
    let num_right = count_right_options(&markers)?;

    let kind = if num_right == 1 {
        QuestionKind::SingleChoice
    } else {
        QuestionKind::MultipleChoice
    };

    let mut question = ChoiceQuestion::new(kind, question_text)?;
    question.set_percentage_right(percentage);

    for (text, is_right) in option_texts.into_iter().zip(markers.into_iter()) {
        question.add_option(text, is_right)?;
    }

    Ok(Question::Choice(question))
}

/// 質問文をセルB2から抽出する（前後の空白は除去）
fn extract_question_text(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
) -> Result<String, KahootError> {
    let text = require_text(
        sheet,
        sheet_index,
        layout::ROW_QUESTION_TEXT,
        layout::COL_QUESTION_TEXT,
        "question text",
    )?;
    Ok(text.trim().to_string())
}

/// 回答選択肢を行8（D8, F8, H8, J8）から左から右へ抽出する
///
/// 最初の空セルで打ち切ります。埋まっているセル数（2〜4）が選択肢の
/// 個数となります。2個未満の場合はエラーです。
fn extract_option_texts(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
) -> Result<Vec<String>, KahootError> {
    let mut texts = Vec::with_capacity(layout::COLS_ANSWER_OPTIONS.len());

    for &col in layout::COLS_ANSWER_OPTIONS.iter() {
        let value = sheet.cell(layout::ROW_ANSWER_OPTIONS, col);
        if value.is_empty() {
            break;
        }

        match value.as_text() {
            Some(text) => texts.push(text.trim().to_string()),
            None => {
                return Err(structure_error(
                    sheet_index,
                    layout::ROW_ANSWER_OPTIONS,
                    col,
                    "Answer option cell does not contain a string",
                ))
            }
        }
    }

    if texts.len() < 2 {
        return Err(structure_error(
            sheet_index,
            layout::ROW_ANSWER_OPTIONS,
            layout::COLS_ANSWER_OPTIONS[texts.len()],
            &format!(
                "Only {} answer option(s) found, at least 2 are required",
                texts.len()
            ),
        ));
    }

    Ok(texts)
}

/// 正答率をセルC4から抽出する
///
/// セルには0.0〜1.0の割合が格納されているため、100倍して
/// 人間可読なパーセント値に変換します。
fn extract_percentage_right(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
) -> Result<f32, KahootError> {
    let value = sheet.cell(layout::ROW_PERCENTAGE, layout::COL_PERCENTAGE);

    match value.as_number() {
        Some(fraction) => Ok((fraction * 100.0) as f32),
        None => Err(structure_error(
            sheet_index,
            layout::ROW_PERCENTAGE,
            layout::COL_PERCENTAGE,
            "No numeric percentage value found",
        )),
    }
}

/// 正誤マーカーを行9（C9, E9, G9, I9）から抽出してboolに変換する
///
/// # 引数
///
/// * `arity` - 選択肢の個数（2〜4）。この個数分のマーカーセルが
///   すべて埋まっている必要があります。
fn extract_markers(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
    arity: usize,
) -> Result<Vec<bool>, KahootError> {
    let mut markers = Vec::with_capacity(arity);

    for &col in layout::COLS_ANSWER_MARKERS.iter().take(arity) {
        markers.push(extract_marker_at(sheet, sheet_index, col)?);
    }

    Ok(markers)
}

/// 1個のマーカーセルを読み取り、記号をboolにデコードする
fn extract_marker_at(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
    col: u32,
) -> Result<bool, KahootError> {
    let value = sheet.cell(layout::ROW_ANSWER_MARKERS, col);

    let text = match &value {
        CellValue::Text(s) if !value.is_empty() => s,
        _ => {
            return Err(structure_error(
                sheet_index,
                layout::ROW_ANSWER_MARKERS,
                col,
                "Right/wrong marker cell is empty or not a string",
            ))
        }
    };

    let first_char = match text.chars().next() {
        Some(ch) => ch,
        None => {
            return Err(structure_error(
                sheet_index,
                layout::ROW_ANSWER_MARKERS,
                col,
                "Right/wrong marker cell is empty",
            ))
        }
    };

    decode_marker(first_char).ok_or_else(|| {
        structure_error(
            sheet_index,
            layout::ROW_ANSWER_MARKERS,
            col,
            &format!(
                "Could not recognize marker symbol \"{}\" (U+{:04X})",
                first_char, first_char as u32
            ),
        )
    })
}

/// マーカー記号を正誤にデコードする
///
/// # 戻り値
///
/// * `Some(true)` - "Heavy Check Mark"（正解マーカー）の場合
/// * `Some(false)` - "Heavy Ballot X"（不正解マーカー）の場合
/// * `None` - どちらの記号でもない場合（呼び出し側で致命的エラー）
pub fn decode_marker(ch: char) -> Option<bool> {
    match ch {
        layout::MARKER_RIGHT => Some(true),
        layout::MARKER_WRONG => Some(false),
        _ => None,
    }
}

/// 正解マーカーの個数を数える
///
/// 単体テストを容易にするため公開関数としています。
///
/// # 戻り値
///
/// * `Ok(n)` - 正解が1〜3個の場合
/// * `Err(KahootError::Model)` - 正解が0個、または3個を超える場合
///   （どちらも破損シートとして扱われる）
pub fn count_right_options(markers: &[bool]) -> Result<usize, KahootError> {
    let count = markers.iter().filter(|m| **m).count();

    if count == 0 {
        return Err(KahootError::Model(
            "No right answer options found".to_string(),
        ));
    }

    if count > 3 {
        return Err(KahootError::Model(format!(
            "More than three right answer options, namely {}",
            count
        )));
    }

    Ok(count)
}

/// 選択肢テキストがtrue/false問題の形状かを判定する
///
/// ちょうど2個の選択肢が、大文字小文字を無視して{"true", "false"}の
/// ペア（順不同）である場合のみtrueを返します。これが形状判定の唯一の
/// 規則です。選択肢が文字通り"True"/"False"である2択の選択問題は
/// true/false問題として分類されますが、これはKahootエクスポート自体の
/// 慣習を踏襲した意図的な挙動です。
///
/// 単体テストを容易にするため公開関数としています。
pub fn is_true_false_shape(option_texts: &[String]) -> bool {
    if option_texts.len() != 2 {
        return false;
    }

    let first = option_texts[0].to_lowercase();
    let second = option_texts[1].to_lowercase();

    (first == "false" && second == "true") || (first == "true" && second == "false")
}

/// true/false問題の主張の真偽を抽出する
///
/// 2個のマーカー（C9, E9）は必ず食い違っている必要があります
/// （ちょうど一方が正解）。片方だけでも真偽は決定できますが、両方を
/// 検査することで簡単な整合性チェックになります。正解マーカーの列と、
/// 行8の選択肢テキスト（"true"/"false"）の組み合わせから主張の真偽を
/// 決定します。
fn extract_true_false_answer(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
) -> Result<bool, KahootError> {
    // まず、正解マーカーが1列目と2列目のどちらにあるかを判定する
    let marker1 = extract_marker_at(sheet, sheet_index, layout::COLS_ANSWER_MARKERS[0])?;
    let marker2 = extract_marker_at(sheet, sheet_index, layout::COLS_ANSWER_MARKERS[1])?;

    let right_option_is_first = match (marker1, marker2) {
        (true, false) => true,
        (false, true) => false,
        _ => {
            return Err(structure_error(
                sheet_index,
                layout::ROW_ANSWER_MARKERS,
                layout::COLS_ANSWER_MARKERS[0],
                "Could not determine for true/false question if the right option is the first or second one",
            ))
        }
    };

    // 次に、正解マーカーの付いた選択肢が"true"と"false"のどちらを表すかを調べる
    let text1 = require_text(
        sheet,
        sheet_index,
        layout::ROW_ANSWER_OPTIONS,
        layout::COLS_ANSWER_OPTIONS[0],
        "first true/false option",
    )?;
    let text2 = require_text(
        sheet,
        sheet_index,
        layout::ROW_ANSWER_OPTIONS,
        layout::COLS_ANSWER_OPTIONS[1],
        "second true/false option",
    )?;

    if text1.trim().eq_ignore_ascii_case("true") && right_option_is_first {
        return Ok(true);
    }
    if text2.trim().eq_ignore_ascii_case("true") && !right_option_is_first {
        return Ok(true);
    }
    if text1.trim().eq_ignore_ascii_case("false") && right_option_is_first {
        return Ok(false);
    }
    if text2.trim().eq_ignore_ascii_case("false") && !right_option_is_first {
        return Ok(false);
    }

    Err(structure_error(
        sheet_index,
        layout::ROW_ANSWER_OPTIONS,
        layout::COLS_ANSWER_OPTIONS[0],
        "Could not determine if the statement of the true/false question is right or wrong",
    ))
}

/// 指定セルから非空の文字列値を取得する（取得できなければ構造エラー）
fn require_text(
    sheet: &dyn SheetGrid,
    sheet_index: usize,
    row: u32,
    col: u32,
    what: &str,
) -> Result<String, KahootError> {
    let value = sheet.cell(row, col);

    if value.is_empty() {
        return Err(structure_error(
            sheet_index,
            row,
            col,
            &format!("Cell with {} is empty", what),
        ));
    }

    match value.as_text() {
        Some(text) => Ok(text.to_string()),
        None => Err(structure_error(
            sheet_index,
            row,
            col,
            &format!("Cell with {} does not contain a string", what),
        )),
    }
}

/// 構造エラーを生成するヘルパー（セル座標はA1記法で報告）
fn structure_error(sheet_index: usize, row: u32, col: u32, message: &str) -> KahootError {
    KahootError::Structure {
        sheet: sheet_index,
        cell: a1_notation(row, col),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MemoryGrid, MemorySheet};

    // テスト用フィクスチャ: 質問シートをインメモリで組み立てるヘルパー群

    fn summary_sheet(title: &str) -> MemorySheet {
        let mut sheet = MemorySheet::new();
        sheet.set_text(layout::ROW_TITLE, layout::COL_TITLE, title);
        sheet
    }

    fn choice_sheet(title: &str, question: &str, options: &[(&str, bool)]) -> MemorySheet {
        let mut sheet = MemorySheet::new();
        sheet.set_text(layout::ROW_TITLE, layout::COL_TITLE, title);
        sheet.set_text(layout::ROW_QUESTION_TEXT, layout::COL_QUESTION_TEXT, question);
        sheet.set_number(layout::ROW_PERCENTAGE, layout::COL_PERCENTAGE, 0.5);

        for (i, (text, is_right)) in options.iter().enumerate() {
            sheet.set_text(layout::ROW_ANSWER_OPTIONS, layout::COLS_ANSWER_OPTIONS[i], *text);
            let marker = if *is_right {
                layout::MARKER_RIGHT
            } else {
                layout::MARKER_WRONG
            };
            sheet.set_text(
                layout::ROW_ANSWER_MARKERS,
                layout::COLS_ANSWER_MARKERS[i],
                marker.to_string(),
            );
        }

        sheet
    }

    fn true_false_sheet(title: &str, statement: &str, is_true: bool) -> MemorySheet {
        // Kahootは選択肢を ["false", "true"] の順で出力する
        choice_sheet(title, statement, &[("false", !is_true), ("true", is_true)])
    }

    fn grid_with_questions(sheets: Vec<MemorySheet>) -> MemoryGrid {
        let mut grid = MemoryGrid::new();
        grid.push_sheet(summary_sheet("Test Game"));
        grid.push_sheet(summary_sheet("Test Game"));
        grid.push_sheet(summary_sheet("Test Game"));
        for sheet in sheets {
            grid.push_sheet(sheet);
        }
        grid.push_sheet(MemorySheet::new()); // 末尾の生レポートシート
        grid
    }

    #[test]
    fn test_extract_three_question_fixture() {
        let grid = grid_with_questions(vec![
            choice_sheet(
                "Test Game",
                "Which city is the capital of France?",
                &[
                    ("Paris", true),
                    ("London", false),
                    ("Rome", false),
                    ("Madrid", false),
                ],
            ),
            choice_sheet(
                "Test Game",
                "Which of these countries are in Europe?",
                &[
                    ("France", true),
                    ("Japan", false),
                    ("Spain", true),
                    ("Brazil", false),
                ],
            ),
            true_false_sheet("Test Game", "Beijing is the capital of China.", true),
        ]);

        let list = extract_question_list(&grid).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.title(), "Test Game");

        // 質問1: 単一選択、選択肢4個、正解1・不正解3
        assert_eq!(list.kind_at(0).unwrap(), QuestionKind::SingleChoice);
        let q1 = list.choice_at(0).unwrap();
        assert_eq!(q1.num_answered(), 4);
        assert_eq!(q1.num_right(), 1);
        assert_eq!(q1.num_wrong(), 3);
        assert_eq!(q1.percentage_right(), 50.0);

        // 質問2: 複数選択、選択肢4個、正解2・不正解2
        assert_eq!(list.kind_at(1).unwrap(), QuestionKind::MultipleChoice);
        let q2 = list.choice_at(1).unwrap();
        assert_eq!(q2.num_answered(), 4);
        assert_eq!(q2.num_right(), 2);
        assert_eq!(q2.num_wrong(), 2);

        // 質問3: true/false、主張は真
        assert_eq!(list.kind_at(2).unwrap(), QuestionKind::TrueOrFalse);
        let q3 = list.true_false_at(2).unwrap();
        assert!(q3.statement_is_true());
        assert!(q3.statement().contains("Beijing"));
    }

    // 選択肢が4個未満のシートでもスロット数が実数と一致する
    #[test]
    fn test_extract_short_option_lists() {
        let grid = grid_with_questions(vec![
            choice_sheet("Game", "Yes or no?", &[("Yes", true), ("No", false)]),
            choice_sheet(
                "Game",
                "Pick two",
                &[("A", true), ("B", true), ("C", false)],
            ),
        ]);

        let list = extract_question_list(&grid).unwrap();

        let q1 = list.choice_at(0).unwrap();
        assert_eq!(q1.num_answered(), 2);
        assert_eq!(q1.options().count(), 2);
        assert_eq!(q1.kind(), QuestionKind::SingleChoice);

        let q2 = list.choice_at(1).unwrap();
        assert_eq!(q2.num_answered(), 3);
        assert_eq!(q2.num_right(), 2);
        assert_eq!(q2.num_wrong(), 1);
        assert_eq!(q2.kind(), QuestionKind::MultipleChoice);
    }

    #[test]
    fn test_extract_true_false_reversed_order() {
        // 選択肢が ["true", "false"] の順でも真偽は正しく決まる
        let grid = grid_with_questions(vec![choice_sheet(
            "Game",
            "The moon is made of cheese.",
            &[("true", false), ("false", true)],
        )]);

        let list = extract_question_list(&grid).unwrap();
        let q = list.true_false_at(0).unwrap();
        assert!(!q.statement_is_true());
    }

    #[test]
    fn test_too_few_sheets() {
        let mut grid = MemoryGrid::new();
        for _ in 0..4 {
            grid.push_sheet(summary_sheet("Game"));
        }

        // 4シート = 質問シート0枚
        let result = extract_question_list(&grid);
        assert!(matches!(result, Err(KahootError::Config(_))));
    }

    #[test]
    fn test_missing_question_text_fails() {
        // 質問文セル（B2）だけが欠けたシート
        let mut sheet = MemorySheet::new();
        sheet.set_text(layout::ROW_TITLE, layout::COL_TITLE, "Game");
        sheet.set_number(layout::ROW_PERCENTAGE, layout::COL_PERCENTAGE, 0.5);
        for (i, text) in ["A", "B"].iter().enumerate() {
            sheet.set_text(layout::ROW_ANSWER_OPTIONS, layout::COLS_ANSWER_OPTIONS[i], *text);
            sheet.set_text(
                layout::ROW_ANSWER_MARKERS,
                layout::COLS_ANSWER_MARKERS[i],
                layout::MARKER_WRONG.to_string(),
            );
        }

        let grid = grid_with_questions(vec![sheet]);
        let result = extract_question_list(&grid);

        match result {
            Err(KahootError::Structure { sheet, cell, .. }) => {
                assert_eq!(sheet, 3);
                assert_eq!(cell, "B2");
            }
            other => panic!("Expected Structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_option_fails() {
        let grid = grid_with_questions(vec![choice_sheet("Game", "q", &[("Only", true)])]);
        let result = extract_question_list(&grid);
        assert!(matches!(result, Err(KahootError::Structure { .. })));
    }

    #[test]
    fn test_unknown_marker_glyph_fails() {
        let mut sheet = choice_sheet("Game", "q", &[("A", true), ("B", false)]);
        sheet.set_text(
            layout::ROW_ANSWER_MARKERS,
            layout::COLS_ANSWER_MARKERS[1],
            "?",
        );

        let grid = grid_with_questions(vec![sheet]);
        let result = extract_question_list(&grid);

        match result {
            Err(KahootError::Structure { cell, message, .. }) => {
                assert_eq!(cell, "E9");
                assert!(message.contains("marker symbol"));
            }
            other => panic!("Expected Structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_right_marker_fails() {
        let grid = grid_with_questions(vec![choice_sheet(
            "Game",
            "q",
            &[("A", false), ("B", false), ("C", false)],
        )]);

        let result = extract_question_list(&grid);
        assert!(matches!(result, Err(KahootError::Model(_))));
    }

    #[test]
    fn test_all_right_markers_fail() {
        let grid = grid_with_questions(vec![choice_sheet(
            "Game",
            "q",
            &[("A", true), ("B", true), ("C", true), ("D", true)],
        )]);

        let result = extract_question_list(&grid);
        assert!(matches!(result, Err(KahootError::Model(_))));
    }

    #[test]
    fn test_true_false_agreeing_markers_fail() {
        // true/false問題で両マーカーが一致していたらデコード失敗
        let grid = grid_with_questions(vec![choice_sheet(
            "Game",
            "Statement",
            &[("false", true), ("true", true)],
        )]);

        let result = extract_question_list(&grid);
        assert!(matches!(result, Err(KahootError::Structure { .. })));
    }

    #[test]
    fn test_count_right_options() {
        assert_eq!(count_right_options(&[false, true, false, false]).unwrap(), 1);
        assert_eq!(count_right_options(&[false, true, true, false]).unwrap(), 2);
        assert!(count_right_options(&[false, false, false, false]).is_err());
        assert!(count_right_options(&[true, true, true, true]).is_err());
    }

    #[test]
    fn test_is_true_false_shape() {
        let pair = |a: &str, b: &str| vec![a.to_string(), b.to_string()];

        assert!(is_true_false_shape(&pair("false", "true")));
        assert!(is_true_false_shape(&pair("true", "false")));
        assert!(is_true_false_shape(&pair("True", "FALSE")));
        assert!(!is_true_false_shape(&[
            "Beijing".to_string(),
            "Paris".to_string(),
            "London".to_string(),
            "Rome".to_string(),
        ]));
        // 要素数がちょうど2でなければ形状は成立しない
        assert!(!is_true_false_shape(&[
            "false".to_string(),
            "true".to_string(),
            "x".to_string(),
        ]));
        assert!(!is_true_false_shape(&pair("yes", "no")));
    }

    #[test]
    fn test_decode_marker() {
        assert_eq!(decode_marker('\u{2714}'), Some(true));
        assert_eq!(decode_marker('\u{2718}'), Some(false));
        assert_eq!(decode_marker('x'), None);
        assert_eq!(decode_marker('✓'), None); // 似て非なる記号は拒否
    }
}
