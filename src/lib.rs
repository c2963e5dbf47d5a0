#[macro_use]
extern crate derive_more;
#[cfg(feature = "serialize")]
#[macro_use]
extern crate serde_derive;

pub mod utils;
pub mod fuzz;
pub mod encoding;
