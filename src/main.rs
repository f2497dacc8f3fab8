//! kahoot2docx CLI
//!
//! Kahoot結果ファイル（XLSX）をWordドキュメント（DOCX）へ変換する
//! コマンドラインツール。単一ファイル（`-f`）またはフォルダ一括（`-i`）の
//! どちらかを指定します。
//!
//! # 終了コード
//!
//! * `0` - 成功（ヘルプ表示を含む）
//! * `1` - コマンドライン引数が不正
//! * `2` - 変換処理が失敗
//! * `3` - 指定された出力フォルダが存在しない

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use kahoot2docx::{paths, ConverterBuilder, KahootError};

/// 成功
const EXIT_OK: i32 = 0;

/// 引数不正
const EXIT_USAGE: i32 = 1;

/// 変換処理の失敗
const EXIT_PROCESSING: i32 = 2;

/// 出力フォルダが存在しない
const EXIT_OUTPUT_FOLDER: i32 = 3;

/// Convert Kahoot quiz result files (xlsx) into Word documents (docx).
#[derive(Parser, Debug)]
#[command(name = "kahoot2docx")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Single Excel file (xlsx) to be processed; not compatible with -i
    #[arg(
        short = 'f',
        long = "infile",
        value_name = "FILE",
        conflicts_with = "infolder",
        required_unless_present = "infolder"
    )]
    infile: Option<PathBuf>,

    /// Folder from which all Excel files (xlsx) are read; not compatible with -f
    #[arg(short = 'i', long = "infolder", value_name = "FOLDER")]
    infolder: Option<PathBuf>,

    /// Folder into which the output files (docx) are written; must exist
    #[arg(short = 'o', long = "outfolder", value_name = "FOLDER")]
    outfolder: Option<PathBuf>,

    /// Language for the fixed texts in the output files ("en" or "de")
    #[arg(short = 'l', long = "locale", value_name = "LOCALE", default_value = "en")]
    locale: String,

    /// Header line repeated on every page of the output documents
    #[arg(short = 't', long = "topline", value_name = "TEXT")]
    topline: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    process::exit(run());
}

/// 引数解析から変換までを実行し、終了コードを返す
fn run() -> i32 {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // -h / -V はエラーではない
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            return code;
        }
    };

    // 出力フォルダの存在は変換開始前に検証する
    if let Some(outfolder) = &args.outfolder {
        if !paths::directory_exists(outfolder) {
            eprintln!("Output folder \"{}\" does not exist.", outfolder.display());
            return EXIT_OUTPUT_FOLDER;
        }
    }

    let mut builder = ConverterBuilder::new().with_language_code(&args.locale);
    if let Some(outfolder) = &args.outfolder {
        builder = builder.with_output_folder(outfolder);
    }
    if let Some(topline) = &args.topline {
        builder = builder.with_topline(topline.clone());
    }

    let converter = match builder.build() {
        Ok(converter) => converter,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_PROCESSING;
        }
    };

    let result: Result<Vec<PathBuf>, KahootError> = match (&args.infile, &args.infolder) {
        (Some(infile), _) => converter.convert_file(infile).map(|written| vec![written]),
        (None, Some(infolder)) => converter.convert_folder(infolder),
        (None, None) => {
            // clapの制約でここには来ない
            eprintln!("Either -f or -i must be supplied.");
            return EXIT_USAGE;
        }
    };

    match result {
        Ok(written) => {
            for path in &written {
                println!("Wrote \"{}\"", path.display());
            }
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            EXIT_PROCESSING
        }
    }
}
