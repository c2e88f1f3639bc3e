pub mod config;
pub mod item;
pub mod tag;

pub use config::*;
pub use item::*;
pub use tag::*;
