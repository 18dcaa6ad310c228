#![forbid(unsafe_code)]

pub mod catalog;
pub mod links;
pub mod matching;
pub mod model;
pub mod names;
