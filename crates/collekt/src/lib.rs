//! Collekt - Fluent collection wrapper over JSON sequences and mappings.
//!
//! A [`Collection`] holds either an ordered list of values or an
//! insertion-ordered mapping of string keys to values, and layers about
//! sixty chainable operations over it:
//!
//! - Access: `get`, `has`, `contains`, `first`, `last`, `search`
//! - Transformation: `map`, `filter`, `group_by`, `key_by`, `sort_by`, `flatten`, `chunk`
//! - Aggregation: `sum`, `avg`, `median`, `mode`, `max`, `min`
//! - Set algebra: `unique`, `diff`, `intersect`, `where_op`, `only`, `merge`, `union`
//! - In-place mutation: `push`, `put`, `pull`, `splice`, `shuffle`, `times`
//!
//! # Quick Start
//!
//! ```rust
//! use collekt::{collect, Collection};
//! use serde_json::json;
//!
//! let mut scores = collect(json!([
//!     {"team": "red", "points": 3},
//!     {"team": "blue", "points": 5},
//!     {"team": "red", "points": 4},
//! ]));
//!
//! assert_eq!(scores.sum_by("points"), 12.0);
//! assert_eq!(scores.pluck("team").unique().count(), 2);
//!
//! let top = scores.sort_by_desc("points").first().cloned();
//! assert_eq!(top, Some(json!({"team": "blue", "points": 5})));
//!
//! scores.push(json!({"team": "blue", "points": 1}));
//! let by_team = scores.group_by("team");
//! assert_eq!(by_team.get("blue").as_array().map(Vec::len), Some(2));
//!
//! let round_trip = Collection::from_json(&scores.to_json().unwrap()).unwrap();
//! assert_eq!(round_trip, scores);
//! ```
//!
//! # Mutators and Transformers
//!
//! Methods taking `&mut self` change the receiver in place. Those that
//! return `&mut Self` can be chained:
//!
//! ```rust
//! use collekt::Collection;
//! use serde_json::json;
//!
//! let mut list = Collection::new();
//! list.push(1).push(2).times(2, |n| json!(n * 10));
//! assert_eq!(list.implode(","), "1,2,10,20");
//! ```
//!
//! Methods taking `&self` return a new collection or a plain value.
//! `chunk` and `splice` are the exceptions worth knowing: both look like
//! transformers but drain or rewrite the receiver.
//!
//! # Script Semantics
//!
//! Element comparisons follow loosely typed scripting rules, described in
//! the [`value`] module:
//!
//! | Operation | Rule |
//! |-----------|------|
//! | `contains`, `diff`, `unique`, `where_eq` | strict equality (`===`) |
//! | `search`, `where_op("==")` | loose equality (`==`) |
//! | `sort` | string forms, lexical |
//! | `sort_by`, `<`, `>` | strings lexically, everything else numerically |
//! | `sum`, `avg`, `median`, `max` | numeric conversion, `NaN` on failure |
//!
//! Both equalities compare arrays and objects structurally: two objects
//! with the same fields are equal, since JSON values carry no identity.
//!
//! # Randomness
//!
//! `shuffle`, `random` and `random_n` draw from the thread-local generator.
//! Their `*_with` variants take any [`rand::Rng`], so a seeded generator
//! gives reproducible results.

mod collection;
mod error;
mod items;
mod key;
mod op;
mod ordering;
pub mod value;

// Re-export public API
pub use collection::{collect, Collection};
pub use error::{CollectionError, Result};
pub use items::{Items, Iter};
pub use key::{Key, Resolver};
pub use op::Op;
pub use ordering::{compare_values, default_order, sort_order, Dir};
