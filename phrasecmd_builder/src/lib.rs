//! Builder module for `phrasecmd`.
//! See [documentation root](https://docs.rs/phrasecmd/latest/phrasecmd/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod console;
mod constant;
mod document;
mod model;
mod registry;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use document::*;
pub use model::*;
pub use registry::*;

/// The option parser library, re-exported for defining options/arguments.
pub use clap;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
