pub mod dnd;
pub mod history;

pub use dnd::*;
pub use history::*;
