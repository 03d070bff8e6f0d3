pub mod formatting;
pub mod rank_sync;
pub mod reverser;
