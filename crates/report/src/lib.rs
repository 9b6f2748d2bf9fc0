//! # DocLine Report
//!
//! HTML report of duplicate comment clusters: one page per graph component with
//! the component graph, the archetype, and word diffs of every member against it.
//!
//! ## Architecture
//!
//! ```text
//! CommentGraph + Component + Archetype
//!     │
//!     ├──> Word Diff (archetype matcher opcodes)
//!     │      └─ <span class="diffminus|diffplus"> markup, HTML-escaped
//!     │
//!     ├──> Page Template ({title}, {nodes}, {edges}, {codes})
//!     │
//!     └──> Report Writer
//!            ├─ style.css
//!            ├─ NNNN.html per component
//!            └─ index.html
//! ```

mod config;
mod diff;
mod error;
mod template;
mod writer;

pub use config::ReportConfig;
pub use diff::{escape_html, html_diff, word_diff, DiffToken};
pub use error::{ReportError, Result};
pub use template::{PageTemplate, TemplateKind};
pub use writer::{page_file_name, IndexEntry, ReportWriter};
