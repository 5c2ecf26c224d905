mod compile;
mod eval;
mod filter;

pub use compile::{Predicate, compile};
pub use eval::{find, find_by_id, find_by_ids, find_one, matches};
pub use filter::FilterOp;
