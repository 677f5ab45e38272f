mod arguments;
mod catalog;
mod command;
mod tool;

pub use arguments::*;
pub use catalog::*;
pub use command::*;
pub use tool::*;

pub(crate) use command::invoke;

#[cfg(test)]
pub(crate) use catalog::test;
