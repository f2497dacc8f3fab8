//! I18n Module
//!
//! 出力ドキュメント内の固定UIテキストのローカライズを提供するモジュール。
//! 元データの「プロセス全体で1回ロードされるリソースバンドル」方式ではなく、
//! 明示的な`Language`値をレンダラー設定に通す方式を採用しています。
//! これによりグローバル状態なしで複数言語を安全にテスト・再利用できます。
//! 翻訳テーブルは閉じたキー列挙型に対する網羅的な`match`であり、
//! 翻訳漏れは実行時フォールバックではなくコンパイルエラーになります。

use log::warn;

/// 出力ドキュメントの言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// 英語（デフォルト）
    #[default]
    English,

    /// ドイツ語
    German,
}

impl Language {
    /// ISO言語コードから言語を解決する
    ///
    /// # 引数
    ///
    /// * `code` - 言語コード（例: "en", "de"）。大文字小文字は無視されます。
    ///
    /// # 戻り値
    ///
    /// * `None` - サポートされていないコードの場合
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "en" => Some(Language::English),
            "de" => Some(Language::German),
            _ => None,
        }
    }

    /// 言語コードから解決し、未サポートなら警告を出して英語へフォールバックする
    pub fn from_code_or_default(code: &str) -> Self {
        match Self::from_code(code) {
            Some(language) => language,
            None => {
                warn!(
                    "No language bundle for locale \"{}\", will use fallback \"en\"",
                    code
                );
                Language::default()
            }
        }
    }
}

/// 固定UIテキストのキー（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    /// タイトルブロックのラベル（ゲームタイトルの前置テキスト）
    TitleLabel,

    /// 質問見出しの前置テキスト（"Question No"）
    QuestionNo,

    /// true/false問題の導入行
    StatementPrompt,

    /// "The statement is " の部分（判定語の前置テキスト）
    StatementIs,

    /// 判定語: 主張が正しい場合
    VerdictRight,

    /// 判定語: 主張が誤りの場合
    VerdictWrong,

    /// 回答テーブルのラベル: 正解
    AnswerRight,

    /// 回答テーブルのラベル: 不正解
    AnswerWrong,

    /// フッターの"Page"
    Page,

    /// フッターの"of"
    PageOf,
}

/// 指定言語の固定テキストを取得する
pub fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::English => match key {
            TextKey::TitleLabel => "Results of Kahoot Game",
            TextKey::QuestionNo => "Question No",
            TextKey::StatementPrompt => "Is the following statement right or wrong?",
            TextKey::StatementIs => "The statement is ",
            TextKey::VerdictRight => "RIGHT",
            TextKey::VerdictWrong => "WRONG",
            TextKey::AnswerRight => "Right",
            TextKey::AnswerWrong => "Wrong",
            TextKey::Page => "Page",
            TextKey::PageOf => "of",
        },
        Language::German => match key {
            TextKey::TitleLabel => "Ergebnisse des Kahoot-Spiels",
            TextKey::QuestionNo => "Frage Nr.",
            TextKey::StatementPrompt => "Ist die folgende Aussage richtig oder falsch?",
            TextKey::StatementIs => "Die Aussage ist ",
            TextKey::VerdictRight => "RICHTIG",
            TextKey::VerdictWrong => "FALSCH",
            TextKey::AnswerRight => "Richtig",
            TextKey::AnswerWrong => "Falsch",
            TextKey::Page => "Seite",
            TextKey::PageOf => "von",
        },
    }
}

/// 正答率の表示行を生成する（小数第1位まで）
pub fn percentage_line(language: Language, percentage: f32) -> String {
    match language {
        Language::English => format!("{:.1}% of players gave the correct answer", percentage),
        Language::German => format!(
            "{:.1} % der Spieler gaben die richtige Antwort",
            percentage
        ),
    }
}
