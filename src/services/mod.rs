pub mod recommendations;
pub mod stats;
pub mod title_search;
