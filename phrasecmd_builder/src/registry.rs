mod core;
mod node;

pub use self::core::*;
pub use node::*;
