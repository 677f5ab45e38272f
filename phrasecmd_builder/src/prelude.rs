//! Traits which, typically, may be imported without concern: `use phrasecmd::prelude::*`.

pub use crate::api::{Command, CommandLoader, Describe};
