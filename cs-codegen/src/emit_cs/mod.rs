/// C# emitter over the CodeDom-style program tree.
mod context;
mod emit;
mod error;
mod expressions;
mod identifiers;
mod members;
mod statements;
mod types;
mod writer;

pub use context::EmitContext;
pub use emit::{
    generate, generate_expression, generate_namespace, generate_statement, generate_type,
    Generated,
};
pub use error::{EmitError, Unsupported, UnsupportedKind};
pub use expressions::{emit_expression, literal_output};
pub use identifiers::{
    create_escaped_identifier, create_valid_identifier, is_keyword, is_valid_identifier,
};
pub use members::{emit_member, emit_type_declaration};
pub use statements::{emit_statement, emit_statements};
pub use types::{keyword_for, type_output};
pub use writer::{quote_char, quote_string, CodeWriter};
