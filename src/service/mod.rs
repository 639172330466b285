pub mod latest;
pub mod rows;
pub mod store;

pub use latest::*;
pub use rows::*;
pub use store::*;
