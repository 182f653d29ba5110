#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[cfg(feature = "parser")]
pub mod ast;
#[cfg(feature = "codegen")]
pub mod codegen;
#[cfg(feature = "lexer")]
pub mod lexer;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "codegen")]
mod pipeline;

#[cfg(feature = "codegen")]
pub use pipeline::{compile, Compilation, Diagnostic};
