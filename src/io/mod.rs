pub mod config_io;
pub mod line_io;
pub mod walker;
