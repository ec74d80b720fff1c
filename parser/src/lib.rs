pub mod model;
pub mod parse_error;
pub mod parser;
pub mod plugin;
mod util;
pub use reqwest::Url;

#[macro_use]
extern crate log;
