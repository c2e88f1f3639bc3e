pub mod line;
pub mod shorthand;

pub use line::{is_item, scrap, trim};
pub use shorthand::{expand_shorthands, parse_repeat};
