/// Top-level composition: walks a CompileUnit and produces a complete C#
/// source file by dispatching to the per-node emitters.
use std::slice;

use super::context::EmitContext;
use super::error::{EmitError, Unsupported};
use super::expressions::{emit_attribute_list, emit_expression};
use super::members::emit_type_declaration;
use super::statements::{emit_comment, emit_comments, emit_statement};
use super::writer::CodeWriter;
use crate::ast::{Comment, CompileUnit, Expression, Namespace, Statement, TypeDeclaration};
use crate::options::GeneratorOptions;

/// Emitted source plus the members that were written as placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub code: String,
    pub unsupported: Vec<Unsupported>,
}

impl Generated {
    /// True when no member was degraded to a placeholder.
    pub fn is_complete(&self) -> bool {
        self.unsupported.is_empty()
    }
}

const BANNER_RULE: &str =
    "------------------------------------------------------------------------------";

/// Emit a complete C# file: banner, assembly attributes, then each namespace.
#[tracing::instrument(skip_all, fields(namespaces = unit.namespaces.len()))]
pub fn generate(unit: &CompileUnit, options: &GeneratorOptions) -> Result<Generated, EmitError> {
    let ctx = EmitContext::root(options);
    let mut w = CodeWriter::new();
    let mut unsupported = Vec::new();

    emit_banner(&mut w, &ctx);

    if !unit.assembly_custom_attributes.is_empty() {
        for attr in &unit.assembly_custom_attributes {
            emit_attribute_list(&mut w, &ctx, slice::from_ref(attr), "assembly: ")?;
            w.end_line();
        }
        w.end_line();
    }

    for (i, ns) in unit.namespaces.iter().enumerate() {
        if i > 0 {
            w.end_line();
        }
        emit_namespace(&mut w, &ctx, ns, &mut unsupported)?;
    }

    if !unsupported.is_empty() {
        tracing::warn!(count = unsupported.len(), "output contains placeholders");
    }
    Ok(Generated {
        code: w.finish(),
        unsupported,
    })
}

/// Emit one namespace on its own, without the file banner.
#[tracing::instrument(skip_all, fields(namespace = %ns.name))]
pub fn generate_namespace(ns: &Namespace, options: &GeneratorOptions) -> Result<Generated, EmitError> {
    let ctx = EmitContext::root(options);
    let mut w = CodeWriter::new();
    let mut unsupported = Vec::new();
    emit_namespace(&mut w, &ctx, ns, &mut unsupported)?;
    Ok(Generated {
        code: w.finish(),
        unsupported,
    })
}

/// Emit one type declaration at column 0.
#[tracing::instrument(skip_all, fields(type_name = %decl.name))]
pub fn generate_type(decl: &TypeDeclaration, options: &GeneratorOptions) -> Result<Generated, EmitError> {
    let ctx = EmitContext::root(options);
    let mut w = CodeWriter::new();
    let mut unsupported = Vec::new();
    emit_type_declaration(&mut w, &ctx, decl, &mut unsupported)?;
    Ok(Generated {
        code: w.finish(),
        unsupported,
    })
}

pub fn generate_statement(stmt: &Statement, options: &GeneratorOptions) -> Result<String, EmitError> {
    let ctx = EmitContext::root(options);
    let mut w = CodeWriter::new();
    emit_statement(&mut w, &ctx, stmt)?;
    Ok(w.finish())
}

/// A single expression, with no trailing newline.
pub fn generate_expression(expr: &Expression, options: &GeneratorOptions) -> Result<String, EmitError> {
    let ctx = EmitContext::root(options);
    let mut w = CodeWriter::new();
    emit_expression(&mut w, &ctx, expr)?;
    Ok(w.finish())
}

fn emit_banner(w: &mut CodeWriter, ctx: &EmitContext) {
    let version = format!("     Generator Version: {}", ctx.options.banner_version);
    let lines = [
        BANNER_RULE,
        " <autogenerated>",
        "     This code was generated by a tool.",
        version.as_str(),
        "",
        "     Changes to this file may cause incorrect behavior and will be lost if",
        "     the code is regenerated.",
        " </autogenerated>",
        BANNER_RULE,
    ];
    for line in lines {
        emit_comment(w, ctx, &Comment::new(line));
    }
    w.end_line();
}

fn emit_namespace<'a>(
    w: &mut CodeWriter,
    ctx: &EmitContext<'a>,
    ns: &'a Namespace,
    unsupported: &mut Vec<Unsupported>,
) -> Result<(), EmitError> {
    emit_comments(w, ctx, &ns.comments);

    let wrapped = !ns.name.is_empty();
    let body = if wrapped {
        w.open(ctx, &format!("namespace {}", ns.name));
        ctx.nested()
    } else {
        *ctx
    };

    for import in &ns.imports {
        w.line(&body, &format!("using {import};"));
    }
    if !ns.imports.is_empty() && !ns.types.is_empty() {
        w.end_line();
    }

    for (i, decl) in ns.types.iter().enumerate() {
        if i > 0 && ctx.options.blank_lines_between_members {
            w.end_line();
        }
        emit_type_declaration(w, &body, decl, unsupported)?;
    }

    if wrapped {
        w.close(ctx);
    }
    Ok(())
}
