pub(crate) mod hex;
pub mod pushback;
