pub mod definition;
pub mod factory;
pub mod node;

pub use definition::*;
pub use factory::*;
pub use node::*;
