pub mod page;
pub mod select;

pub use page::{Page, PageEntry, Paged, paginate, wrap_label};
pub use select::{Selection, ViewKind};
