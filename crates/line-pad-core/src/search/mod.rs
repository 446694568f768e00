mod finder;

pub use finder::{LineReplacer, SearchOptions};
