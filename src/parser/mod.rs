// Parser module for extracting import statements from source files

pub mod ast;
mod python;

pub use ast::*;
pub use python::PythonParser;
