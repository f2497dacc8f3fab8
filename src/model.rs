//! Question Model Module
//!
//! Kahoot結果ファイルから抽出される質問データモデルを定義するモジュール。
//! すべてのエンティティは抽出時に一度だけ構築され、レンダリング段階からは
//! 読み取り専用として扱われます。不変条件は変更操作時に検証されます。

use crate::error::KahootError;

/// 質問の種別
///
/// Kahootがサポートする3種類の質問形式を表す閉じた列挙型です。
/// 種別の判定ロジックは抽出側（`extract`モジュール）にあります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// 単一選択問題（正解の選択肢がちょうど1個）
    SingleChoice,

    /// 複数選択問題（正解の選択肢が2個または3個）
    MultipleChoice,

    /// true/false問題（提示された主張が正しいか否か）
    TrueOrFalse,
}

impl QuestionKind {
    /// 種別の表示名（エラーメッセージ用）
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single-choice",
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::TrueOrFalse => "true/false",
        }
    }
}

/// 回答スロットの状態
///
/// 選択問題は常に4個の固定スロットを持ちますが、実際の選択肢は2〜4個です。
/// 未使用スロットは`Unknown`のままとなり、`AnswerOption`としては決して
/// 外部に公開されません（「不正解と判明」と「未提供」の区別）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    /// 正解としてマークされた選択肢
    Right,

    /// 不正解としてマークされた選択肢
    Wrong,

    /// 未使用スロット
    Unknown,
}

/// 回答選択肢（値型）
///
/// 選択肢のテキストと正誤を保持します。構築後は不変です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    text: String,
    is_right: bool,
}

impl AnswerOption {
    /// 新しい回答選択肢を生成
    pub fn new(text: impl Into<String>, is_right: bool) -> Self {
        Self {
            text: text.into(),
            is_right,
        }
    }

    /// 選択肢のテキスト
    pub fn text(&self) -> &str {
        &self.text
    }

    /// この選択肢が正解かどうか
    pub fn is_right(&self) -> bool {
        self.is_right
    }
}

/// 回答スロットの最大数（Kahootの固定仕様）
pub const MAX_ANSWER_OPTIONS: usize = 4;

/// 単一選択・複数選択問題
///
/// 最大4個の回答スロットを持つ質問です。スロットは追加専用で、
/// 一度追加した選択肢の正誤は変更できません。派生カウント
/// （回答数・正解数・不正解数）はスロット配列と常に一致します。
///
/// # 不変条件
///
/// - 回答スロットは最大4個（5個目の追加は状態を変更せずに失敗）
/// - 単一選択問題では正解の選択肢は最大1個（2個目の正解追加は失敗）
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceQuestion {
    kind: QuestionKind,
    prompt: String,
    percentage_right: f32,
    texts: [String; MAX_ANSWER_OPTIONS],
    statuses: [AnswerStatus; MAX_ANSWER_OPTIONS],
    num_answered: usize,
    num_right: usize,
    num_wrong: usize,
}

impl ChoiceQuestion {
    /// 新しい選択問題を生成
    ///
    /// # 引数
    ///
    /// * `kind` - `SingleChoice`または`MultipleChoice`のみ有効
    /// * `prompt` - 質問文
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Model)` - `kind`が`TrueOrFalse`の場合
    pub fn new(kind: QuestionKind, prompt: impl Into<String>) -> Result<Self, KahootError> {
        if kind == QuestionKind::TrueOrFalse {
            return Err(KahootError::Model(format!(
                "Illegal question kind {} for a choice question",
                kind.label()
            )));
        }

        Ok(Self {
            kind,
            prompt: prompt.into(),
            percentage_right: 0.0,
            texts: Default::default(),
            statuses: [AnswerStatus::Unknown; MAX_ANSWER_OPTIONS],
            num_answered: 0,
            num_right: 0,
            num_wrong: 0,
        })
    }

    /// 回答選択肢を次の空きスロットに追加する
    ///
    /// スロットは左から右へ（シート上の出現順で）埋まります。
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Model)` - すでに4スロット埋まっている場合、
    ///   または単一選択問題に2個目の正解を追加しようとした場合。
    ///   失敗時は状態を変更しません。
    pub fn add_option(&mut self, text: impl Into<String>, is_right: bool) -> Result<(), KahootError> {
        if self.num_answered >= MAX_ANSWER_OPTIONS {
            return Err(KahootError::Model(
                "Attempt to add more than four answer options to a question".to_string(),
            ));
        }

        if is_right && self.kind == QuestionKind::SingleChoice && self.num_right > 0 {
            return Err(KahootError::Model(
                "Added more than one right answer option to a single-choice question".to_string(),
            ));
        }

        self.texts[self.num_answered] = text.into();
        self.statuses[self.num_answered] = if is_right {
            AnswerStatus::Right
        } else {
            AnswerStatus::Wrong
        };
        self.num_answered += 1;

        if is_right {
            self.num_right += 1;
        } else {
            self.num_wrong += 1;
        }

        Ok(())
    }

    /// 質問の種別（`SingleChoice`または`MultipleChoice`）
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// 質問文
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 埋まっている回答スロットの数（2〜4）
    pub fn num_answered(&self) -> usize {
        self.num_answered
    }

    /// 正解としてマークされた選択肢の数
    pub fn num_right(&self) -> usize {
        self.num_right
    }

    /// 不正解としてマークされた選択肢の数
    pub fn num_wrong(&self) -> usize {
        self.num_wrong
    }

    /// 番号指定で回答選択肢を取得する（1始まり、シート上の出現順）
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::Model)` - `number`が1未満、または埋まっている
    ///   スロット数を超える場合
    pub fn option(&self, number: usize) -> Result<AnswerOption, KahootError> {
        if number < 1 {
            return Err(KahootError::Model(format!(
                "Attempt to obtain answer option with too low number {}",
                number
            )));
        }
        if number > self.num_answered {
            return Err(KahootError::Model(format!(
                "Attempt to obtain answer option with too high number {}",
                number
            )));
        }

        let index = number - 1;
        Ok(AnswerOption::new(
            self.texts[index].clone(),
            self.statuses[index] == AnswerStatus::Right,
        ))
    }

    /// 埋まっているスロットを出現順にイテレートする
    ///
    /// `Unknown`状態の未使用スロットは決して返されません。
    pub fn options(&self) -> impl Iterator<Item = AnswerOption> + '_ {
        self.texts[..self.num_answered]
            .iter()
            .zip(self.statuses[..self.num_answered].iter())
            .map(|(text, status)| AnswerOption::new(text.clone(), *status == AnswerStatus::Right))
    }

    /// 正解の選択肢テキストの一覧（出現順）
    pub fn right_option_texts(&self) -> Vec<&str> {
        self.texts[..self.num_answered]
            .iter()
            .zip(self.statuses[..self.num_answered].iter())
            .filter(|(_, status)| **status == AnswerStatus::Right)
            .map(|(text, _)| text.as_str())
            .collect()
    }

    /// 不正解の選択肢テキストの一覧（出現順）
    pub fn wrong_option_texts(&self) -> Vec<&str> {
        self.texts[..self.num_answered]
            .iter()
            .zip(self.statuses[..self.num_answered].iter())
            .filter(|(_, status)| **status == AnswerStatus::Wrong)
            .map(|(text, _)| text.as_str())
            .collect()
    }

    /// この質問に正答したプレイヤーの割合（0.0〜100.0）
    pub fn percentage_right(&self) -> f32 {
        self.percentage_right
    }

    /// 正答率を設定する
    pub fn set_percentage_right(&mut self, percentage: f32) {
        self.percentage_right = percentage;
    }
}

/// true/false問題
///
/// 主張文とその真偽のみを持ち、回答スロットはありません。
#[derive(Debug, Clone, PartialEq)]
pub struct TrueFalseQuestion {
    statement: String,
    statement_is_true: bool,
    percentage_right: f32,
}

impl TrueFalseQuestion {
    /// 新しいtrue/false問題を生成
    pub fn new(statement: impl Into<String>, statement_is_true: bool) -> Self {
        Self {
            statement: statement.into(),
            statement_is_true,
            percentage_right: 0.0,
        }
    }

    /// 主張文
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// 主張が正しいかどうか
    pub fn statement_is_true(&self) -> bool {
        self.statement_is_true
    }

    /// この質問に正答したプレイヤーの割合（0.0〜100.0）
    pub fn percentage_right(&self) -> f32 {
        self.percentage_right
    }

    /// 正答率を設定する
    pub fn set_percentage_right(&mut self, percentage: f32) {
        self.percentage_right = percentage;
    }
}

/// 質問（タグ付き直和型）
///
/// 元データの「抽象基底クラス + 種別ごとのサブクラス」構造を、網羅的な
/// `match`が可能な直和型として表現します。将来種別が追加された場合、
/// すべてのディスパッチ箇所がコンパイルエラーとして可視化されます。
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    /// 単一選択・複数選択問題
    Choice(ChoiceQuestion),

    /// true/false問題
    TrueFalse(TrueFalseQuestion),
}

impl Question {
    /// 質問の種別
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Choice(q) => q.kind(),
            Question::TrueFalse(_) => QuestionKind::TrueOrFalse,
        }
    }

    /// 質問文（選択問題は質問文、true/false問題は主張文）
    pub fn prompt(&self) -> &str {
        match self {
            Question::Choice(q) => q.prompt(),
            Question::TrueFalse(q) => q.statement(),
        }
    }

    /// この質問に正答したプレイヤーの割合（0.0〜100.0）
    pub fn percentage_right(&self) -> f32 {
        match self {
            Question::Choice(q) => q.percentage_right(),
            Question::TrueFalse(q) => q.percentage_right(),
        }
    }
}

/// 質問リスト
///
/// シート順（挿入順）に並んだ質問の列と、ゲーム全体のタイトルを保持する
/// コンテナです。インデックスアクセサは範囲と型を検証します。
#[derive(Debug, Clone, Default)]
pub struct QuestionList {
    questions: Vec<Question>,
    title: String,
}

impl QuestionList {
    /// 空の質問リストを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量ヒント付きで空の質問リストを生成
    ///
    /// `capacity`は純粋な性能ヒントであり、リストの成長は制限されません。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            questions: Vec::with_capacity(capacity),
            title: String::new(),
        }
    }

    /// ゲームのタイトルを設定する
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// ゲームのタイトル
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 質問を末尾に追加する（シート順を保持）
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// リスト内の質問数
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// リストが空かどうか
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 質問をシート順にイテレートする
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    fn check_index(&self, index: usize) -> Result<(), KahootError> {
        if index >= self.questions.len() {
            return Err(KahootError::IndexOutOfRange {
                index,
                count: self.questions.len(),
            });
        }
        Ok(())
    }

    /// 指定インデックスの質問の種別を取得する
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::IndexOutOfRange)` - インデックスが範囲外の場合
    pub fn kind_at(&self, index: usize) -> Result<QuestionKind, KahootError> {
        self.check_index(index)?;
        Ok(self.questions[index].kind())
    }

    /// 指定インデックスの質問を取得する
    pub fn question_at(&self, index: usize) -> Result<&Question, KahootError> {
        self.check_index(index)?;
        Ok(&self.questions[index])
    }

    /// 指定インデックスのtrue/false問題を取得する
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::IndexOutOfRange)` - インデックスが範囲外の場合
    /// * `Err(KahootError::TypeMismatch)` - 質問がtrue/false問題でない場合
    pub fn true_false_at(&self, index: usize) -> Result<&TrueFalseQuestion, KahootError> {
        self.check_index(index)?;
        match &self.questions[index] {
            Question::TrueFalse(q) => Ok(q),
            Question::Choice(q) => Err(KahootError::TypeMismatch {
                index,
                expected: QuestionKind::TrueOrFalse.label(),
                actual: q.kind().label(),
            }),
        }
    }

    /// 指定インデックスの選択問題を取得する
    ///
    /// 単一選択・複数選択の両方を受け付けます。
    ///
    /// # 戻り値
    ///
    /// * `Err(KahootError::IndexOutOfRange)` - インデックスが範囲外の場合
    /// * `Err(KahootError::TypeMismatch)` - 質問が選択問題でない場合
    pub fn choice_at(&self, index: usize) -> Result<&ChoiceQuestion, KahootError> {
        self.check_index(index)?;
        match &self.questions[index] {
            Question::Choice(q) => Ok(q),
            Question::TrueFalse(_) => Err(KahootError::TypeMismatch {
                index,
                expected: "choice",
                actual: QuestionKind::TrueOrFalse.label(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_choice(kind: QuestionKind) -> ChoiceQuestion {
        ChoiceQuestion::new(kind, "Which city is the capital of France?").unwrap()
    }

    #[test]
    fn test_choice_question_rejects_true_false_kind() {
        let result = ChoiceQuestion::new(QuestionKind::TrueOrFalse, "Bad");
        assert!(matches!(result, Err(KahootError::Model(_))));
    }

    #[test]
    fn test_add_option_counts_stay_consistent() {
        let mut q = sample_choice(QuestionKind::MultipleChoice);
        q.add_option("Paris", true).unwrap();
        q.add_option("London", false).unwrap();
        q.add_option("Rome", true).unwrap();

        assert_eq!(q.num_answered(), 3);
        assert_eq!(q.num_right(), 2);
        assert_eq!(q.num_wrong(), 1);
        assert_eq!(q.right_option_texts(), vec!["Paris", "Rome"]);
        assert_eq!(q.wrong_option_texts(), vec!["London"]);
    }

    // 5個目の選択肢の追加は状態を変更せずに失敗する
    #[test]
    fn test_fifth_option_fails_without_mutation() {
        let mut q = sample_choice(QuestionKind::MultipleChoice);
        for i in 0..4 {
            q.add_option(format!("Option {}", i + 1), i == 0).unwrap();
        }

        let before = q.clone();
        let result = q.add_option("Option 5", false);

        assert!(matches!(result, Err(KahootError::Model(_))));
        assert_eq!(q, before);
        assert_eq!(q.num_answered(), 4);
    }

    // 単一選択問題への2個目の正解追加は状態を変更せずに失敗する
    #[test]
    fn test_second_right_option_fails_for_single_choice() {
        let mut q = sample_choice(QuestionKind::SingleChoice);
        q.add_option("Paris", true).unwrap();
        q.add_option("London", false).unwrap();

        let before = q.clone();
        let result = q.add_option("Rome", true);

        assert!(matches!(result, Err(KahootError::Model(_))));
        assert_eq!(q, before);
        assert_eq!(q.num_right(), 1);
    }

    #[test]
    fn test_second_right_option_allowed_for_multiple_choice() {
        let mut q = sample_choice(QuestionKind::MultipleChoice);
        q.add_option("Paris", true).unwrap();
        q.add_option("London", true).unwrap();
        assert_eq!(q.num_right(), 2);
    }

    // 未使用スロットがAnswerOptionとして漏れ出ないことの確認
    #[test]
    fn test_unknown_slots_never_surface() {
        let mut q = sample_choice(QuestionKind::SingleChoice);
        q.add_option("Yes", true).unwrap();
        q.add_option("No", false).unwrap();

        assert_eq!(q.options().count(), 2);
        assert!(q.option(3).is_err());
        assert!(q.option(0).is_err());

        let opt = q.option(1).unwrap();
        assert_eq!(opt.text(), "Yes");
        assert!(opt.is_right());
    }

    #[test]
    fn test_true_false_question() {
        let mut q = TrueFalseQuestion::new("Beijing is the capital of China.", true);
        q.set_percentage_right(75.0);

        assert!(q.statement_is_true());
        assert_eq!(q.statement(), "Beijing is the capital of China.");
        assert_eq!(q.percentage_right(), 75.0);
    }

    #[test]
    fn test_question_kind_dispatch() {
        let choice = Question::Choice(sample_choice(QuestionKind::SingleChoice));
        let tf = Question::TrueFalse(TrueFalseQuestion::new("Statement", false));

        assert_eq!(choice.kind(), QuestionKind::SingleChoice);
        assert_eq!(tf.kind(), QuestionKind::TrueOrFalse);
        assert_eq!(tf.prompt(), "Statement");
    }

    #[test]
    fn test_question_list_accessors() {
        let mut list = QuestionList::with_capacity(2);
        list.set_title("Test Game");

        let mut choice = sample_choice(QuestionKind::SingleChoice);
        choice.add_option("Paris", true).unwrap();
        choice.add_option("London", false).unwrap();
        list.push(Question::Choice(choice));
        list.push(Question::TrueFalse(TrueFalseQuestion::new("S", true)));

        assert_eq!(list.len(), 2);
        assert_eq!(list.title(), "Test Game");
        assert_eq!(list.kind_at(0).unwrap(), QuestionKind::SingleChoice);
        assert_eq!(list.kind_at(1).unwrap(), QuestionKind::TrueOrFalse);
        assert!(list.choice_at(0).is_ok());
        assert!(list.true_false_at(1).is_ok());
    }

    #[test]
    fn test_question_list_index_out_of_range() {
        let list = QuestionList::new();

        assert!(matches!(
            list.kind_at(0),
            Err(KahootError::IndexOutOfRange { index: 0, count: 0 })
        ));
        assert!(list.true_false_at(5).is_err());
        assert!(list.choice_at(5).is_err());
    }

    #[test]
    fn test_question_list_type_mismatch() {
        let mut list = QuestionList::new();
        list.push(Question::TrueFalse(TrueFalseQuestion::new("S", true)));

        match list.choice_at(0) {
            Err(KahootError::TypeMismatch {
                index, expected, ..
            }) => {
                assert_eq!(index, 0);
                assert_eq!(expected, "choice");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }

        let mut list2 = QuestionList::new();
        list2.push(Question::Choice(sample_choice(QuestionKind::SingleChoice)));
        assert!(matches!(
            list2.true_false_at(0),
            Err(KahootError::TypeMismatch { .. })
        ));
    }
}
