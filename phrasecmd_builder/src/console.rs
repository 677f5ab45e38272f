mod interface;
mod printer;

pub(crate) use interface::*;
pub(crate) use printer::*;
