//! Render Module
//!
//! 抽出済みの`QuestionList`をページ分割されたドキュメントモデルに変換する
//! モジュール。質問種別ごとのレイアウト規則（選択問題は回答テーブル、
//! true/false問題は主張と判定文）を適用します。出力順はリスト順
//! （= 元のシート順）であり、並べ替え・重複排除は行いません。
//! 構造的に妥当なリストに対してレンダリングが失敗することはありません。

use chrono::Utc;

use crate::docx::{Alignment, DocxDocument, Paragraph, Run, Table};
use crate::i18n::{percentage_line, text, Language, TextKey};
use crate::model::{ChoiceQuestion, Question, QuestionList, TrueFalseQuestion};

/// タイトルブロックのフォントサイズ（half-point、= 20pt）
const SIZE_TITLE: u32 = 40;

/// 質問見出しのフォントサイズ（half-point、= 14pt）
const SIZE_HEADING: u32 = 28;

/// レンダリング設定
///
/// 言語はグローバル状態ではなく、この設定値として明示的に渡されます。
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// 固定UIテキストの言語
    pub language: Language,

    /// 全ページのヘッダーに繰り返し表示する行（任意）
    pub topline: Option<String>,
}

/// 質問リストをドキュメントモデルに変換する
///
/// # 引数
///
/// * `list` - 抽出済みの質問リスト（以降読み取り専用）
/// * `config` - 言語とヘッダー行の設定
///
/// # 出力構成
///
/// 1. 中央揃えのタイトルブロック（固定ラベル + ゲームタイトル、太字・大）
/// 2. 質問ごとに: 太字の番号付き見出し、本文（種別ごとのレイアウト）、
///    正答率の行
/// 3. 全ページのフッター: "Page {n} of {total}"（ライブフィールド、中央揃え）
/// 4. 設定されていれば全ページのヘッダー行（中央揃え）
/// 5. メタデータ: 作成者識別子とレンダリング時刻
pub fn render(list: &QuestionList, config: &RenderConfig) -> DocxDocument {
    let language = config.language;
    let mut doc = DocxDocument::new();

    doc.set_creator(concat!("kahoot2docx ", env!("CARGO_PKG_VERSION")));
    doc.set_created(Utc::now());

    // タイトルブロック
    doc.add_paragraph(
        Paragraph::new()
            .add_run(
                Run::text(format!(
                    "{}: {}",
                    text(language, TextKey::TitleLabel),
                    list.title()
                ))
                .bold()
                .size(SIZE_TITLE),
            )
            .align(Alignment::Center),
    );

    for (index, question) in list.iter().enumerate() {
        // 質問番号は1始まり
        doc.add_paragraph(
            Paragraph::new().add_run(
                Run::text(format!(
                    "{} {}",
                    text(language, TextKey::QuestionNo),
                    index + 1
                ))
                .bold()
                .size(SIZE_HEADING),
            ),
        );

        match question {
            Question::Choice(choice) => render_choice(&mut doc, language, choice),
            Question::TrueFalse(tf) => render_true_false(&mut doc, language, tf),
        }

        doc.add_paragraph(Paragraph::new().add_run(Run::text(percentage_line(
            language,
            question.percentage_right(),
        ))));
    }

    doc.set_footer(
        Paragraph::new()
            .add_run(Run::text(format!("{} ", text(language, TextKey::Page))))
            .add_run(Run::page_number())
            .add_run(Run::text(format!(" {} ", text(language, TextKey::PageOf))))
            .add_run(Run::page_count())
            .align(Alignment::Center),
    );

    if let Some(topline) = &config.topline {
        doc.set_header(
            Paragraph::new()
                .add_run(Run::text(topline.clone()))
                .align(Alignment::Center),
        );
    }

    doc
}

/// 選択問題のブロック: 質問文 + 2列の回答テーブル
fn render_choice(doc: &mut DocxDocument, language: Language, question: &ChoiceQuestion) {
    doc.add_paragraph(Paragraph::new().add_run(Run::text(question.prompt())));

    let mut table = Table::new();
    for option in question.options() {
        let label = if option.is_right() {
            text(language, TextKey::AnswerRight)
        } else {
            text(language, TextKey::AnswerWrong)
        };
        table.add_row(option.text(), label);
    }

    doc.add_table(table);
}

/// true/false問題のブロック: 導入行 + 斜体の主張 + 判定文
fn render_true_false(doc: &mut DocxDocument, language: Language, question: &TrueFalseQuestion) {
    doc.add_paragraph(
        Paragraph::new().add_run(Run::text(text(language, TextKey::StatementPrompt))),
    );

    doc.add_paragraph(
        Paragraph::new().add_run(Run::text(format!("\u{201C}{}\u{201D}", question.statement())).italic()),
    );

    let verdict = if question.statement_is_true() {
        text(language, TextKey::VerdictRight)
    } else {
        text(language, TextKey::VerdictWrong)
    };

    doc.add_paragraph(
        Paragraph::new()
            .add_run(Run::text(text(language, TextKey::StatementIs)))
            .add_run(Run::text(verdict).bold().italic())
            .add_run(Run::text(".")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{Block, RunContent};
    use crate::model::{ChoiceQuestion, QuestionKind, TrueFalseQuestion};

    fn sample_list() -> QuestionList {
        let mut list = QuestionList::new();
        list.set_title("Geography Quiz");

        let mut q1 = ChoiceQuestion::new(QuestionKind::SingleChoice, "Capital of France?").unwrap();
        q1.add_option("Paris", true).unwrap();
        q1.add_option("London", false).unwrap();
        q1.set_percentage_right(80.0);
        list.push(Question::Choice(q1));

        let mut q2 = TrueFalseQuestion::new("Beijing is the capital of China.", true);
        q2.set_percentage_right(60.0);
        list.push(Question::TrueFalse(q2));

        list
    }

    fn paragraph_text(paragraph: &Paragraph) -> String {
        paragraph
            .runs
            .iter()
            .filter_map(|run| match &run.content {
                RunContent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    fn all_text(doc: &DocxDocument) -> Vec<String> {
        doc.blocks()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(paragraph_text(p)),
                Block::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_title_block() {
        let doc = render(&sample_list(), &RenderConfig::default());

        let first = match &doc.blocks()[0] {
            Block::Paragraph(p) => p,
            other => panic!("Expected paragraph, got {:?}", other),
        };

        assert_eq!(first.alignment, Alignment::Center);
        assert!(first.runs[0].bold);
        assert_eq!(first.runs[0].size, Some(SIZE_TITLE));
        assert!(paragraph_text(first).contains("Geography Quiz"));
        assert!(paragraph_text(first).contains("Results of Kahoot Game"));
    }

    #[test]
    fn test_question_order_and_headings() {
        let doc = render(&sample_list(), &RenderConfig::default());
        let texts = all_text(&doc);

        let pos1 = texts.iter().position(|t| t == "Question No 1").unwrap();
        let pos2 = texts.iter().position(|t| t == "Question No 2").unwrap();
        assert!(pos1 < pos2);
    }

    #[test]
    fn test_choice_question_table() {
        let doc = render(&sample_list(), &RenderConfig::default());

        let table = doc
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], ["Paris".to_string(), "Right".to_string()]);
        assert_eq!(table.rows[1], ["London".to_string(), "Wrong".to_string()]);
    }

    #[test]
    fn test_true_false_verdict() {
        let doc = render(&sample_list(), &RenderConfig::default());

        // 判定語のランは太字 + 斜体
        let verdict_paragraph = doc
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Paragraph(p) if paragraph_text(p).contains("The statement is") => Some(p),
                _ => None,
            })
            .unwrap();

        let verdict_run = verdict_paragraph
            .runs
            .iter()
            .find(|run| run.bold && run.italic)
            .unwrap();
        assert_eq!(verdict_run.content, RunContent::Text("RIGHT".to_string()));
    }

    #[test]
    fn test_statement_is_quoted_and_italic() {
        let doc = render(&sample_list(), &RenderConfig::default());
        let statement = doc
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Paragraph(p) if paragraph_text(p).contains("Beijing") => Some(p),
                _ => None,
            })
            .unwrap();

        assert!(statement.runs[0].italic);
        assert!(paragraph_text(statement).starts_with('\u{201C}'));
    }

    #[test]
    fn test_percentage_lines() {
        let doc = render(&sample_list(), &RenderConfig::default());
        let texts = all_text(&doc);

        assert!(texts
            .iter()
            .any(|t| t == "80.0% of players gave the correct answer"));
        assert!(texts
            .iter()
            .any(|t| t == "60.0% of players gave the correct answer"));
    }

    #[test]
    fn test_footer_and_topline() {
        let config = RenderConfig {
            language: Language::English,
            topline: Some("Summer Course 2026".to_string()),
        };
        let doc = render(&sample_list(), &config);

        let footer = doc.footer().unwrap();
        assert_eq!(footer.alignment, Alignment::Center);
        assert!(footer
            .runs
            .iter()
            .any(|run| run.content == RunContent::PageNumber));
        assert!(footer
            .runs
            .iter()
            .any(|run| run.content == RunContent::PageCount));

        let header = doc.header().unwrap();
        assert_eq!(paragraph_text(header), "Summer Course 2026");
    }

    #[test]
    fn test_no_topline_means_no_header() {
        let doc = render(&sample_list(), &RenderConfig::default());
        assert!(doc.header().is_none());
    }

    #[test]
    fn test_german_rendering() {
        let config = RenderConfig {
            language: Language::German,
            topline: None,
        };
        let doc = render(&sample_list(), &config);
        let texts = all_text(&doc);

        assert!(texts.iter().any(|t| t.starts_with("Frage Nr. 1")));
        assert!(texts
            .iter()
            .any(|t| t.contains("Ergebnisse des Kahoot-Spiels")));
    }

    #[test]
    fn test_creator_metadata() {
        let doc = render(&sample_list(), &RenderConfig::default());
        assert!(doc.creator().starts_with("kahoot2docx "));
    }
}
