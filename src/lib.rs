//! kahoot2docx - Convert Kahoot quiz result files (XLSX) into Word documents (DOCX)
//!
//! The Kahoot platform exports the results of a quiz game as an Excel workbook
//! with one sheet per question. This crate reads such a workbook, reconstructs
//! the questions (single choice, multiple choice, true/false) from their fixed
//! cell positions, and renders them as a paginated Word document.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kahoot2docx::ConverterBuilder;
//!
//! fn main() -> Result<(), kahoot2docx::KahootError> {
//!     // Create a converter with default settings (English, no header line)
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Writes "kahoot_result.docx" next to the input file
//!     let written = converter.convert_file("kahoot_result.xlsx")?;
//!     println!("Wrote {}", written.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use kahoot2docx::{ConverterBuilder, Language};
//!
//! fn main() -> Result<(), kahoot2docx::KahootError> {
//!     let converter = ConverterBuilder::new()
//!         .with_language(Language::German)            // Fixed texts in German
//!         .with_topline("Summer Course 2026")         // Header line on every page
//!         .with_output_folder("results")              // Write into this folder
//!         .build()?;
//!
//!     // Convert every xlsx file in a folder
//!     for written in converter.convert_folder("downloads")? {
//!         println!("Wrote {}", written.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with the Intermediate Model
//!
//! The pipeline stages are exposed individually, so the extracted questions
//! can be inspected or rendered with custom settings:
//!
//! ```rust,no_run
//! use kahoot2docx::extract::extract_question_list;
//! use kahoot2docx::grid::XlsxGrid;
//! use kahoot2docx::render::{render, RenderConfig};
//!
//! # fn main() -> Result<(), kahoot2docx::KahootError> {
//! let grid = XlsxGrid::open("kahoot_result.xlsx")?;
//! let list = extract_question_list(&grid)?;
//! println!("{}: {} question(s)", list.title(), list.len());
//!
//! let document = render(&list, &RenderConfig::default());
//! document.save_to_file("kahoot_result.docx")?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;

pub mod docx;
pub mod extract;
pub mod grid;
pub mod i18n;
pub mod layout;
pub mod model;
pub mod paths;
pub mod render;

// 公開API
pub use builder::{Converter, ConverterBuilder};
pub use error::KahootError;
pub use i18n::Language;
pub use model::{
    AnswerOption, AnswerStatus, ChoiceQuestion, Question, QuestionKind, QuestionList,
    TrueFalseQuestion,
};
pub use render::RenderConfig;
