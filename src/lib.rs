pub mod args;
pub mod builder;
pub mod card;
pub mod config;
pub mod dict;
pub mod error;
pub mod lang;
pub mod llm;
#[cfg(test)]
mod log_capture;
pub mod nlp;
pub mod normalize;
pub mod reflexive;
pub mod spelling;
pub mod translate;

pub use builder::{WordData, WordDataBuilder};
pub use error::{Error, Result};
