//! # DocLine Archetype
//!
//! Archetype extraction for clusters of near-duplicate comments.
//!
//! An archetype is the wording shared by every member of a cluster. Computing a
//! true multi-sequence LCS is intractable, so the engine folds the members pairwise
//! with a Ratcliff/Obershelp matcher, tries a bounded set of fold orders and keeps
//! the longest result.
//!
//! ## Architecture
//!
//! ```text
//! Cluster (TokenSequence[])
//!     │
//!     ├──> Canonicalization (sort + dedup)
//!     │
//!     ├──> Order Strategy (C(n, cover) fold orders, first positions volatile)
//!     │      └─ capped at `max_orders` per cluster
//!     │
//!     ├──> Fold (left reduction with the pairwise matcher)
//!     │      └─ MemoCache: pairs, whole clusters
//!     │
//!     └──> Scorer (joined character length, strict improvement only)
//!            └─> Archetype
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docline_archetype::{ArchetypeConfig, ArchetypeSearch, TokenSequence};
//!
//! let search = ArchetypeSearch::new(&ArchetypeConfig::default()).unwrap();
//! let archetype = search.extract_archetype([
//!     TokenSequence::from_text("the quick fox jumps"),
//!     TokenSequence::from_text("the slow fox jumps"),
//!     TokenSequence::from_text("the lazy fox jumps"),
//! ]);
//! assert_eq!(archetype.joined(), "the fox jumps");
//! ```

mod cache;
mod config;
mod error;
mod matcher;
mod orders;
mod search;
mod tokenize;
mod types;

pub use cache::{CacheStats, MemoCache, TableStats};
pub use config::{ArchetypeConfig, CacheConfig, DEFAULT_MAX_ORDERS};
pub use error::{ArchetypeError, Result};
pub use matcher::{combine, Match, OpTag, Opcode, SequenceMatcher};
pub use orders::{
    enumerate_orders, order_count, FirstVolatileOrders, FoldOrder, OrderStrategy, DEFAULT_COVER,
};
pub use search::{extract_archetype, ArchetypeSearch, JoinedLengthScorer, Scorer, SearchOutcome};
pub use tokenize::words;
pub use types::{Cluster, Token, TokenSequence};
