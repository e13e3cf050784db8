//! Terminal front-end — line input parsing and output rendering.

pub mod input;
pub mod printer;
pub mod stdin;
