pub mod number;

pub use number::{parse_int, parse_uint, ParseIntError};
