//! Various configuration options to control tagweave

mod parse_options;

pub use parse_options::ParseOptions;
