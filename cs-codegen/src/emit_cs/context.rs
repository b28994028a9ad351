/// EmitContext: the data threaded through each emit function.
///
/// Holds the indentation depth, the options, and the enclosing type.
/// Descending into a block produces a new context via pure methods, so a
/// caller's depth is unchanged when a child returns, on every path.
use std::borrow::Cow;

use super::identifiers::create_escaped_identifier;
use crate::ast::{TypeDeclaration, TypeKind};
use crate::options::GeneratorOptions;

#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub options: &'a GeneratorOptions,
    /// Indentation level of the line being written.
    pub depth: usize,
    /// Name of the innermost enclosing type, used for constructors.
    pub type_name: Option<&'a str>,
    pub type_kind: Option<TypeKind>,
}

impl<'a> EmitContext<'a> {
    /// Context for the top of a compilation unit.
    pub fn root(options: &'a GeneratorOptions) -> Self {
        Self {
            options,
            depth: 0,
            type_name: None,
            type_kind: None,
        }
    }

    /// One indentation level deeper.
    pub fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// The body of `decl`: one level deeper, with `decl` as the enclosing type.
    pub fn type_body(&self, decl: &'a TypeDeclaration) -> Self {
        Self {
            depth: self.depth + 1,
            type_name: Some(decl.name.as_str()),
            type_kind: Some(decl.kind),
            ..*self
        }
    }

    pub fn in_interface(&self) -> bool {
        self.type_kind == Some(TypeKind::Interface)
    }

    pub fn in_enum(&self) -> bool {
        self.type_kind == Some(TypeKind::Enum)
    }

    /// An identifier as it should appear in output.
    pub fn ident<'n>(&self, name: &'n str) -> Cow<'n, str> {
        if self.options.escape_identifiers {
            create_escaped_identifier(name)
        } else {
            Cow::Borrowed(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_context() {
        let opts = GeneratorOptions::default();
        let ctx = EmitContext::root(&opts);
        assert_eq!(ctx.depth, 0);
        assert!(ctx.type_name.is_none());
    }

    #[test]
    fn test_nested_leaves_parent_untouched() {
        let opts = GeneratorOptions::default();
        let ctx = EmitContext::root(&opts);
        let child = ctx.nested().nested();
        assert_eq!(child.depth, 2);
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn test_type_body() {
        let opts = GeneratorOptions::default();
        let mut decl = TypeDeclaration::class("IShape");
        decl.kind = TypeKind::Interface;
        let ctx = EmitContext::root(&opts).nested();
        let body = ctx.type_body(&decl);
        assert_eq!(body.depth, 2);
        assert_eq!(body.type_name, Some("IShape"));
        assert!(body.in_interface());
        assert!(!ctx.in_interface());
    }

    #[test]
    fn test_ident_escaping_follows_options() {
        let plain = GeneratorOptions::default();
        assert_eq!(EmitContext::root(&plain).ident("class"), "class");

        let escaping = GeneratorOptions {
            escape_identifiers: true,
            ..GeneratorOptions::default()
        };
        let ctx = EmitContext::root(&escaping);
        assert_eq!(ctx.ident("class"), "@class");
        assert_eq!(ctx.ident("total"), "total");
    }
}
