/// Tokens which, when they cannot be matched as a phrase word, ask for the command listing.
pub(crate) const HELP_TOKENS: [&str; 3] = ["help", "-h", "--help"];

/// Argument builders are reported under this prefix (ex: `arg_name`).
pub(crate) const ARGUMENT_BUILDER_PREFIX: &str = "arg_";

/// Separator for argument builder names declared in a single string.
pub(crate) const ARGUMENTS_SEPARATOR: char = ',';

pub(crate) const PACKAGE_KEY: &str = "_package";
pub(crate) const DIRECTIVE_PREFIX: char = '_';
pub(crate) const PHRASES_KEY: &str = "phrases";
pub(crate) const INCLUDE_TAG: &str = "include";

pub(crate) const VALID_COMMANDS: &str = "Valid commands:";
