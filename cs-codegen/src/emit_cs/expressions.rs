/// Per-expression emit rules. Expressions are written inline on the
/// current line; only array initializers break across lines.
use super::context::EmitContext;
use super::error::EmitError;
use super::types::type_output;
use super::writer::{quote_char, quote_string, CodeWriter};
use crate::ast::{
    AttributeDeclaration, EventReference, Expression, FieldDirection, Literal, MethodReference,
    ParameterDeclaration, TypeReference,
};

/// Dispatch one expression to its rule.
pub fn emit_expression(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    expr: &Expression,
) -> Result<(), EmitError> {
    match expr {
        Expression::ArgumentReference { name } | Expression::VariableReference { name } => {
            w.write(ctx, &ctx.ident(name));
        }

        Expression::ArrayCreate {
            create_type,
            initializers,
            size,
            size_expression,
        } => {
            emit_array_create(w, ctx, create_type, initializers, *size, size_expression.as_deref())?;
        }

        Expression::ArrayIndexer { target, indices } => {
            emit_indexer(w, ctx, "array indexer", target, indices)?;
        }

        Expression::BaseReference => w.write(ctx, "base"),

        Expression::BinaryOperator { left, op, right } => {
            w.write(ctx, "(");
            emit_expression(w, ctx, left)?;
            w.write(ctx, &format!(" {} ", op.as_str()));
            emit_expression(w, ctx, right)?;
            w.write(ctx, ")");
        }

        // Always `((T)(e))`, whatever the precedence of `e`.
        Expression::Cast {
            target_type,
            expression,
        } => {
            w.write(ctx, &format!("(({})(", type_output(target_type)));
            emit_expression(w, ctx, expression)?;
            w.write(ctx, "))");
        }

        Expression::DelegateCreate {
            delegate_type,
            target,
            method_name,
        } => {
            w.write(ctx, &format!("new {}(", type_output(delegate_type)));
            emit_member_access(w, ctx, target.as_deref(), method_name)?;
            w.write(ctx, ")");
        }

        Expression::DelegateInvoke { target, arguments } => {
            emit_expression(w, ctx, target)?;
            emit_arguments(w, ctx, arguments)?;
        }

        Expression::Direction {
            direction,
            expression,
        } => {
            w.write(ctx, direction_keyword(*direction));
            emit_expression(w, ctx, expression)?;
        }

        Expression::EventReference(event) => emit_event_reference(w, ctx, event)?,

        Expression::FieldReference { target, name }
        | Expression::PropertyReference { target, name } => {
            emit_member_access(w, ctx, target.as_deref(), name)?;
        }

        Expression::Indexer { target, indices } => {
            emit_indexer(w, ctx, "indexer", target, indices)?;
        }

        Expression::MethodInvoke { method, arguments } => {
            emit_method_reference(w, ctx, method)?;
            emit_arguments(w, ctx, arguments)?;
        }

        Expression::MethodReference(method) => emit_method_reference(w, ctx, method)?,

        Expression::ObjectCreate {
            create_type,
            arguments,
        } => {
            w.write(ctx, &format!("new {}", type_output(create_type)));
            emit_arguments(w, ctx, arguments)?;
        }

        Expression::ParameterDeclaration(param) => emit_parameter(w, ctx, param)?,

        Expression::Primitive { value } => w.write(ctx, &literal_output(value)),

        Expression::PropertySetValue => w.write(ctx, "value"),

        // Trusted as already-valid C#.
        Expression::Snippet { text } => w.write(ctx, text),

        Expression::ThisReference => w.write(ctx, "this"),

        Expression::TypeOf { type_ref } => {
            w.write(ctx, &format!("typeof({})", type_output(type_ref)));
        }

        Expression::TypeReference { type_ref } => w.write(ctx, &type_output(type_ref)),
    }
    Ok(())
}

/// Comma-separated expressions on the current line.
pub fn emit_expression_list(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    exprs: &[Expression],
) -> Result<(), EmitError> {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            w.write(ctx, ", ");
        }
        emit_expression(w, ctx, expr)?;
    }
    Ok(())
}

fn emit_arguments(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    arguments: &[Expression],
) -> Result<(), EmitError> {
    w.write(ctx, "(");
    emit_expression_list(w, ctx, arguments)?;
    w.write(ctx, ")");
    Ok(())
}

/// `target.name`, or just `name` when there is no target.
fn emit_member_access(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    target: Option<&Expression>,
    name: &str,
) -> Result<(), EmitError> {
    if let Some(target) = target {
        emit_expression(w, ctx, target)?;
        w.write(ctx, ".");
    }
    w.write(ctx, &ctx.ident(name));
    Ok(())
}

pub fn emit_method_reference(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    method: &MethodReference,
) -> Result<(), EmitError> {
    emit_member_access(w, ctx, method.target.as_deref(), &method.method_name)
}

pub fn emit_event_reference(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    event: &EventReference,
) -> Result<(), EmitError> {
    emit_member_access(w, ctx, event.target.as_deref(), &event.event_name)
}

fn emit_indexer(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    node: &'static str,
    target: &Expression,
    indices: &[Expression],
) -> Result<(), EmitError> {
    if indices.is_empty() {
        return Err(EmitError::malformed(node, "at least one index is required"));
    }
    emit_expression(w, ctx, target)?;
    w.write(ctx, "[");
    emit_expression_list(w, ctx, indices)?;
    w.write(ctx, "]");
    Ok(())
}

/// With initializers: `new T[] {` then one initializer per line one level
/// deeper, then `}`. Without: `new Elem[size]`, where `Elem` is the
/// innermost non-array element type.
fn emit_array_create(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    create_type: &TypeReference,
    initializers: &[Expression],
    size: u32,
    size_expression: Option<&Expression>,
) -> Result<(), EmitError> {
    w.write(ctx, "new ");

    if !initializers.is_empty() {
        let mut ty = type_output(create_type);
        if create_type.array_rank == 0 {
            ty.push_str("[]");
        }
        w.write(ctx, &ty);
        w.write(ctx, " {");
        w.end_line();

        let inner = ctx.nested();
        for (i, init) in initializers.iter().enumerate() {
            emit_expression(w, &inner, init)?;
            if i + 1 < initializers.len() {
                w.write(&inner, ",");
            }
            w.end_line();
        }
        w.write(ctx, "}");
        return Ok(());
    }

    w.write(ctx, &type_output(create_type.innermost_element()));
    w.write(ctx, "[");
    match size_expression {
        Some(expr) => emit_expression(w, ctx, expr)?,
        None => w.write(ctx, &size.to_string()),
    }
    w.write(ctx, "]");
    Ok(())
}

fn direction_keyword(direction: FieldDirection) -> &'static str {
    match direction {
        FieldDirection::In => "",
        FieldDirection::Out => "out ",
        FieldDirection::Ref => "ref ",
    }
}

/// `[Attr] ref Type name`
pub fn emit_parameter(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    param: &ParameterDeclaration,
) -> Result<(), EmitError> {
    if param.name.is_empty() {
        return Err(EmitError::MissingName { node: "parameter" });
    }
    if !param.custom_attributes.is_empty() {
        emit_attribute_list(w, ctx, &param.custom_attributes, "")?;
        w.write(ctx, " ");
    }
    w.write(ctx, direction_keyword(param.direction));
    w.write(
        ctx,
        &format!("{} {}", type_output(&param.param_type), ctx.ident(&param.name)),
    );
    Ok(())
}

pub fn emit_parameters(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    params: &[ParameterDeclaration],
) -> Result<(), EmitError> {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            w.write(ctx, ", ");
        }
        emit_parameter(w, ctx, param)?;
    }
    Ok(())
}

/// `[prefixA(x), B(Name=y)]` on the current line. `prefix` is
/// `"assembly: "` for assembly-level attributes.
pub fn emit_attribute_list(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    attrs: &[AttributeDeclaration],
    prefix: &str,
) -> Result<(), EmitError> {
    w.write(ctx, "[");
    w.write(ctx, prefix);
    for (i, attr) in attrs.iter().enumerate() {
        if attr.name.is_empty() {
            return Err(EmitError::MissingName { node: "attribute" });
        }
        if i > 0 {
            w.write(ctx, ", ");
        }
        w.write(ctx, &attr.name);
        if !attr.arguments.is_empty() {
            w.write(ctx, "(");
            for (j, arg) in attr.arguments.iter().enumerate() {
                if j > 0 {
                    w.write(ctx, ", ");
                }
                if !arg.name.is_empty() {
                    w.write(ctx, &format!("{}=", arg.name));
                }
                emit_expression(w, ctx, &arg.value)?;
            }
            w.write(ctx, ")");
        }
    }
    w.write(ctx, "]");
    Ok(())
}

/// C# spelling of a primitive constant.
pub fn literal_output(value: &Literal) -> String {
    match value {
        Literal::Null => "null".into(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Long(n) => format!("{n}L"),
        Literal::Float(f) => {
            if f.is_nan() {
                "float.NaN".into()
            } else if *f == f32::INFINITY {
                "float.PositiveInfinity".into()
            } else if *f == f32::NEG_INFINITY {
                "float.NegativeInfinity".into()
            } else {
                format!("{f:?}F")
            }
        }
        Literal::Double(d) => {
            if d.is_nan() {
                "double.NaN".into()
            } else if *d == f64::INFINITY {
                "double.PositiveInfinity".into()
            } else if *d == f64::NEG_INFINITY {
                "double.NegativeInfinity".into()
            } else {
                // Debug formatting always keeps a `.` or an exponent.
                format!("{d:?}")
            }
        }
        Literal::Decimal(digits) => format!("{digits}m"),
        Literal::Char(c) => quote_char(*c),
        Literal::String(s) => quote_string(s),
    }
}
