//! Paths Module
//!
//! 入出力ファイル名の導出とディレクトリ走査を提供するモジュール。
//! ターゲットファイル名は「ソースの`.xlsx`サフィックスを`.docx`に
//! 置き換える」規則で決まり、出力フォルダ指定時はベース名のみで
//! 移動されます。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::KahootError;

/// 入力ファイルの拡張子（大文字小文字は無視して照合）
const SUFFIX_XLSX: &str = ".xlsx";

/// 出力ファイルの拡張子
const SUFFIX_DOCX: &str = ".docx";

/// ファイル名の`.xlsx`サフィックスを`.docx`に置き換える
///
/// サフィックスの照合は大文字小文字を無視し、最後のサフィックスのみを
/// 置き換えます（例: `input.old.xlsx` -> `input.old.docx`）。ベース名と
/// パス部分はそのまま保持されます。
///
/// # 戻り値
///
/// * `Err(KahootError::Config)` - ファイル名が`.xlsx`で終わらない場合
///
/// # 使用例
///
/// ```rust
/// use kahoot2docx::paths::change_suffix_xlsx_to_docx;
///
/// # fn main() -> Result<(), kahoot2docx::KahootError> {
/// let target = change_suffix_xlsx_to_docx("path/to/input.XLSX")?;
/// assert_eq!(target, "path/to/input.docx");
/// # Ok(())
/// # }
/// ```
pub fn change_suffix_xlsx_to_docx(filename: &str) -> Result<String, KahootError> {
    if !has_xlsx_suffix(filename) {
        return Err(KahootError::Config(format!(
            "Filename \"{}\" does not have suffix \"{}\"",
            filename, SUFFIX_XLSX
        )));
    }

    let without_suffix = &filename[..filename.len() - SUFFIX_XLSX.len()];
    Ok(format!("{}{}", without_suffix, SUFFIX_DOCX))
}

/// ファイル名が`.xlsx`で終わるかを判定する（大文字小文字は無視）
pub fn has_xlsx_suffix(filename: &str) -> bool {
    filename.len() > SUFFIX_XLSX.len() && filename.to_lowercase().ends_with(SUFFIX_XLSX)
}

/// ターゲットファイルを出力フォルダへ移動したパスを導出する
///
/// 元のパス部分は破棄され、ベース名のみが出力フォルダに結合されます
/// （マージではなく移動）。
pub fn change_output_folder(filename: &str, output_folder: &str) -> String {
    let base_name = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let mut result = PathBuf::from(output_folder);
    result.push(base_name);
    result.to_string_lossy().into_owned()
}

/// ディレクトリが存在するかを判定する
pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// ディレクトリ直下の`.xlsx`ファイルをすべて列挙する（非再帰）
///
/// 拡張子の照合は大文字小文字を無視します。バッチ実行を決定的にするため、
/// 結果はソート済みで返されます。
///
/// # 戻り値
///
/// * `Err(KahootError::Config)` - パスが存在しないかディレクトリでない場合
pub fn find_xlsx_files(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, KahootError> {
    let directory = directory.as_ref();

    if !directory_exists(directory) {
        return Err(KahootError::Config(format!(
            "Folder \"{}\" not found or is not a folder",
            directory.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && has_xlsx_suffix(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
