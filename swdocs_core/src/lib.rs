//! `swdocs_core` turns component definition files into documentation: a
//! markdown page per collection of components and a spreadsheet-style
//! export with one row per component.
//!
//! ## Processing Pipeline
//!
//! ```text
//! definition XML files
//!   → Parser (attributes → Definition / LogicNode)
//!   → Project scanner (walks the definitions directory, loads overlays)
//!   → Generator (Definition → Document tree or sheet rows, applying overlays)
//!   → Renderer (Document → markdown, rows → CSV / TSV)
//! ```
//!
//! ## Overlays
//!
//! Three independent, optional tables change the generated text:
//!
//! - [`Label`]: display strings for table headers and fixed labels, looked
//!   up by key. Without a label table the keys themselves are shown.
//! - [`Language`]: translations, looked up by text identifier. Missing
//!   translations fall back to English.
//! - [`Context`]: values for `$[name]` placeholders inside descriptions.
//!
//! Text is always translated first and templated second, so translated
//! strings may contain placeholders too.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use swdocs_core::generate_document;
//! use swdocs_core::project::scan_project_with_config;
//! use swdocs_core::render_markdown;
//!
//! let ctx = scan_project_with_config(Path::new("."))?;
//! let doc = generate_document(&ctx.definitions, &ctx.overlays())?;
//! println!("{}", render_markdown(&doc));
//! # Ok::<(), swdocs_core::SwError>(())
//! ```

pub use config::*;
pub use definition::*;
pub use document::*;
pub use error::*;
pub use generator::*;
pub use overlay::*;
pub use parser::*;
pub use render::*;
pub use text::*;

pub mod config;
mod definition;
mod document;
#[allow(unused_assignments)]
mod error;
mod generator;
mod overlay;
mod parser;
pub mod project;
mod render;
mod text;

#[cfg(test)]
mod __fixtures;
