pub mod rules;
pub mod session;

pub use rules::*;
pub use session::*;
