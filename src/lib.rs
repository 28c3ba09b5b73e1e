//! White-Grey-Black trees: a hash-bucketed, self-balancing ordered map.
//!
//! This crate provides [`WgbTreeMap`], an in-memory ordered map with point lookups
//! and ascending or descending range queries:
//!
//! - [`greater_than`](WgbTreeMap::greater_than), [`greater_than_or_equal`](WgbTreeMap::greater_than_or_equal)
//! - [`less_than`](WgbTreeMap::less_than), [`less_than_or_equal`](WgbTreeMap::less_than_or_equal)
//! - [`between`](WgbTreeMap::between) (inclusive at both ends)
//! - [`not_equal`](WgbTreeMap::not_equal), [`all_ascending`](WgbTreeMap::all_ascending),
//!   [`all_descending`](WgbTreeMap::all_descending)
//!
//! The operations are also available through the [`QueryableMap`] trait.
//!
//! # Example
//!
//! ```
//! use wgb_tree::{Order, QueryableMap, WgbTreeMap};
//!
//! let scores = WgbTreeMap::new();
//! scores.put("Alice", 100);
//! scores.put("Bob", 85);
//! scores.put("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob").map(|entry| *entry.value()), Some(85));
//! assert_eq!(scores.size(), 3);
//!
//! // Everyone after "Alice", largest name first.
//! let names: Vec<&str> = scores
//!     .greater_than(&"Alice", Order::Descending)
//!     .into_iter()
//!     .map(|entry| *entry.key())
//!     .collect();
//! assert_eq!(names, ["Carol", "Bob"]);
//!
//! fn total(map: &impl QueryableMap<&'static str, i32>) -> i32 {
//!     map.value_collection().iter().sum()
//! }
//! assert_eq!(total(&scores), 277);
//! ```
//!
//! # Implementation
//!
//! The tree alternates comparison-ordered *Grey* nodes with hash-bucketed *White*
//! and *Black* nodes. A Grey node sends smaller keys to its White child and larger
//! keys to its Black child. A White node keeps the minimum of its subtree as pivot
//! (a Black node the maximum) and hashes every other key into one of a prime number
//! of buckets, each holding a Grey subtree. Bucket counts grow by one prime per
//! layer. Grey nodes rebalance by moving their pivot toward the shallower side
//! whenever the depths of their children drift apart. Range queries prune whole
//! subtrees by comparison at Grey and bucket pivots, and merge the sorted results
//! of sibling buckets.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod entry;
mod error;
mod order;
mod queryable_map;
mod raw;

pub mod wgb_tree_map;

pub use entry::Entry;
pub use error::WgbError;
pub use order::Order;
pub use queryable_map::QueryableMap;
pub use wgb_tree_map::{WgbConfig, WgbTreeMap};
