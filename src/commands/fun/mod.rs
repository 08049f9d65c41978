//! Text toys: saved quotes and reaction GIFs.

pub(crate) mod gif;
pub(crate) mod quote;
