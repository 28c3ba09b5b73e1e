mod bucket;
mod capacity;
mod grey;
mod merge;
mod node;
mod prime;
mod query;
mod raw_wgb_tree;

pub(crate) use capacity::Capacity;
pub(crate) use query::Query;
pub(crate) use raw_wgb_tree::RawWgbTree;
