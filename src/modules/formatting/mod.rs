//! Pure text formatting: keyword highlighting and Arabic relative time.

pub mod highlight;
pub mod plural;
pub mod relative_time;

pub use highlight::{Highlighted, KeywordColorMap, KeywordStat, PALETTE, highlight};
pub use plural::{GrammaticalNumber, counted_phrase};
pub use relative_time::{
    Direction, TimeMagnitude, TimeUnit, relative, relative_or_passthrough,
};
