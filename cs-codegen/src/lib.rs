//! Emits C# source text from a language-neutral program tree.
//!
//! The tree lives in [`ast`] and is usually loaded from JSON with
//! [`loader::load_compile_unit`]; [`emit_cs::generate`] turns it into a
//! complete source file.
pub mod ast;
pub mod emit_cs;
pub mod loader;
pub mod options;

pub use emit_cs::{generate, EmitError, Generated};
pub use loader::LoadError;
pub use options::GeneratorOptions;
