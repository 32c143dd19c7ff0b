pub(crate) mod names;
pub(crate) mod parse;
pub(crate) mod resolve;
