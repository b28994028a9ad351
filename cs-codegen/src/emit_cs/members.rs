/// Type declarations and the members inside them.
use super::context::EmitContext;
use super::error::{EmitError, Unsupported, UnsupportedKind};
use super::expressions::{emit_attribute_list, emit_expression, emit_expression_list, emit_parameters};
use super::statements::{emit_comments, emit_statements};
use super::types::type_output;
use super::writer::CodeWriter;
use crate::ast::{
    Access, AttributeDeclaration, Constructor, Event, Field, Member, MemberAttributes, Method,
    Property, Scope, TypeConstructor, TypeDeclaration, TypeKind, TypeVisibility,
};

/// Emit `decl` and everything nested in it. Members that cannot be
/// expressed are written as placeholders and appended to `unsupported`.
pub fn emit_type_declaration<'a>(
    w: &mut CodeWriter,
    ctx: &EmitContext<'a>,
    decl: &'a TypeDeclaration,
    unsupported: &mut Vec<Unsupported>,
) -> Result<(), EmitError> {
    if decl.name.is_empty() {
        return Err(EmitError::MissingName {
            node: "type declaration",
        });
    }
    tracing::debug!(
        name = %decl.name,
        kind = ?decl.kind,
        members = decl.members.len(),
        "emitting type"
    );

    emit_comments(w, ctx, &decl.comments);
    emit_attribute_lines(w, ctx, &decl.custom_attributes)?;

    let mut header = type_modifiers(decl);
    header.push_str(&ctx.ident(&decl.name));
    if !decl.base_types.is_empty() {
        let bases: Vec<String> = decl.base_types.iter().map(type_output).collect();
        header.push_str(" : ");
        header.push_str(&bases.join(", "));
    }
    w.open(ctx, &header);

    let body = ctx.type_body(decl);
    let mut previous: Option<&Member> = None;
    for member in &decl.members {
        if let Some(prev) = previous {
            if wants_blank_line(&body, prev, member) {
                w.end_line();
            }
        }
        emit_member(w, &body, member, unsupported)?;
        previous = Some(member);
    }
    w.close(ctx);
    Ok(())
}

/// Enum values are kept together; everything else is separated when the
/// option is on.
fn wants_blank_line(ctx: &EmitContext, prev: &Member, next: &Member) -> bool {
    if !ctx.options.blank_lines_between_members {
        return false;
    }
    let both_fields = matches!((prev, next), (Member::Field(_), Member::Field(_)));
    !(ctx.in_enum() && both_fields)
}

/// Dispatch one member to its rule. `ctx` is the body of the enclosing type.
pub fn emit_member<'a>(
    w: &mut CodeWriter,
    ctx: &EmitContext<'a>,
    member: &'a Member,
    unsupported: &mut Vec<Unsupported>,
) -> Result<(), EmitError> {
    match member {
        Member::Field(field) => emit_field(w, ctx, field),
        Member::Method(method) => emit_method(w, ctx, method, &method.name),
        Member::EntryPoint(method) => emit_method(w, ctx, method, "Main"),
        Member::Property(property) => emit_property(w, ctx, property),
        Member::Constructor(ctor) => emit_constructor(w, ctx, ctor),
        Member::TypeConstructor(ctor) => emit_type_constructor(w, ctx, ctor),
        Member::Event(event) => {
            emit_unsupported_event(w, ctx, event, unsupported);
            Ok(())
        }
        Member::NestedType(decl) => emit_type_declaration(w, ctx, decl, unsupported),
        Member::Snippet { text } => {
            w.raw(text);
            if !w.is_at_line_start() {
                w.end_line();
            }
            Ok(())
        }
    }
}

/// `[A, B(x)]` on a line of its own, or nothing when there are no attributes.
fn emit_attribute_lines(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    attrs: &[AttributeDeclaration],
) -> Result<(), EmitError> {
    if attrs.is_empty() {
        return Ok(());
    }
    emit_attribute_list(w, ctx, attrs, "")?;
    w.end_line();
    Ok(())
}

// ── Modifiers ──────────────────────────────────────────────────────────

fn access_keyword(access: Access) -> &'static str {
    match access {
        Access::Assembly | Access::FamilyAndAssembly => "internal ",
        Access::Family => "protected ",
        Access::FamilyOrAssembly => "protected internal ",
        Access::Private => "private ",
        Access::Public => "public ",
    }
}

/// Scope modifiers for methods and properties. A member with no scope bits
/// is virtual unless it is private.
fn member_scope_keywords(attrs: &MemberAttributes) -> String {
    let mut out = String::new();
    if attrs.new_slot {
        out.push_str("new ");
    }
    match attrs.scope {
        Some(Scope::Abstract) => out.push_str("abstract "),
        Some(Scope::Static) => out.push_str("static "),
        Some(Scope::Override) => out.push_str("override "),
        Some(Scope::Final) | Some(Scope::Const) => {}
        None => {
            if matches!(attrs.access, Access::Assembly | Access::Family | Access::Public) {
                out.push_str("virtual ");
            }
        }
    }
    out
}

fn field_scope_keywords(attrs: &MemberAttributes) -> String {
    let mut out = String::new();
    if attrs.new_slot {
        out.push_str("new ");
    }
    match attrs.scope {
        Some(Scope::Static) => out.push_str("static "),
        Some(Scope::Const) => out.push_str("const "),
        _ => {}
    }
    out
}

/// Access and scope prefix for a method or property, empty inside interfaces.
fn member_modifiers(ctx: &EmitContext, attrs: &MemberAttributes) -> String {
    if ctx.in_interface() {
        return String::new();
    }
    format!("{}{}", access_keyword(attrs.access), member_scope_keywords(attrs))
}

/// Everything before the type name: `public sealed class `.
fn type_modifiers(decl: &TypeDeclaration) -> String {
    let attrs = &decl.type_attributes;
    let mut out = String::from(match attrs.visibility {
        TypeVisibility::Public | TypeVisibility::NestedPublic => "public ",
        TypeVisibility::NotPublic | TypeVisibility::NestedAssembly => "internal ",
        TypeVisibility::NestedPrivate => "private ",
        TypeVisibility::NestedFamily => "protected ",
        TypeVisibility::NestedFamilyOrAssembly => "protected internal ",
    });
    match decl.kind {
        TypeKind::Struct => out.push_str("struct "),
        TypeKind::Enum => out.push_str("enum "),
        TypeKind::Interface => out.push_str("interface "),
        TypeKind::Class => {
            if attrs.sealed {
                out.push_str("sealed ");
            }
            if attrs.is_abstract {
                out.push_str("abstract ");
            }
            out.push_str("class ");
        }
    }
    out
}

// ── Member rules ───────────────────────────────────────────────────────

fn emit_field(w: &mut CodeWriter, ctx: &EmitContext, field: &Field) -> Result<(), EmitError> {
    if field.name.is_empty() {
        return Err(EmitError::MissingName { node: "field" });
    }
    emit_comments(w, ctx, &field.comments);
    emit_attribute_lines(w, ctx, &field.custom_attributes)?;

    if ctx.in_enum() {
        w.write(ctx, &ctx.ident(&field.name));
        if let Some(init) = &field.init_expression {
            w.write(ctx, " = ");
            emit_expression(w, ctx, init)?;
        }
        w.line(ctx, ",");
        return Ok(());
    }

    w.write(ctx, access_keyword(field.attributes.access));
    w.write(ctx, &field_scope_keywords(&field.attributes));
    w.write(
        ctx,
        &format!("{} {}", type_output(&field.field_type), ctx.ident(&field.name)),
    );
    if let Some(init) = &field.init_expression {
        w.write(ctx, " = ");
        emit_expression(w, ctx, init)?;
    }
    w.line(ctx, ";");
    Ok(())
}

/// Methods and entry points. `name` is the emitted name, which differs from
/// `method.name` for entry points.
fn emit_method(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    method: &Method,
    name: &str,
) -> Result<(), EmitError> {
    if name.is_empty() {
        return Err(EmitError::MissingName { node: "method" });
    }
    emit_comments(w, ctx, &method.comments);
    emit_attribute_lines(w, ctx, &method.custom_attributes)?;

    // explicit interface implementations take no modifiers
    if method.private_implementation_type.is_none() {
        w.write(ctx, &member_modifiers(ctx, &method.attributes));
    }
    w.write(ctx, &type_output(&method.return_type));
    w.write(ctx, " ");
    if let Some(iface) = &method.private_implementation_type {
        w.write(ctx, &type_output(iface));
        w.write(ctx, ".");
    }
    w.write(ctx, &ctx.ident(name));
    w.write(ctx, "(");
    emit_parameters(w, ctx, &method.parameters)?;
    w.write(ctx, ")");

    if ctx.in_interface() || method.attributes.is_abstract() {
        w.line(ctx, ";");
        return Ok(());
    }
    w.open_brace(ctx);
    emit_statements(w, &ctx.nested(), &method.statements)?;
    w.close(ctx);
    Ok(())
}

fn emit_property(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    property: &Property,
) -> Result<(), EmitError> {
    if property.name.is_empty() {
        return Err(EmitError::MissingName { node: "property" });
    }
    emit_comments(w, ctx, &property.comments);
    emit_attribute_lines(w, ctx, &property.custom_attributes)?;

    let header = format!(
        "{}{} {}",
        member_modifiers(ctx, &property.attributes),
        type_output(&property.property_type),
        ctx.ident(&property.name)
    );
    w.open(ctx, &header);

    let inner = ctx.nested();
    let bodiless = ctx.in_interface() || property.attributes.is_abstract();
    for (keyword, statements) in [
        ("get", &property.get_statements),
        ("set", &property.set_statements),
    ] {
        let Some(statements) = statements else {
            continue;
        };
        if bodiless {
            w.line(&inner, &format!("{keyword};"));
        } else {
            w.open(&inner, keyword);
            emit_statements(w, &inner.nested(), statements)?;
            w.close(&inner);
        }
    }
    w.close(ctx);
    Ok(())
}

fn emit_constructor(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    ctor: &Constructor,
) -> Result<(), EmitError> {
    let Some(type_name) = ctx.type_name else {
        return Err(EmitError::malformed(
            "constructor",
            "constructors must be declared inside a type",
        ));
    };
    emit_comments(w, ctx, &ctor.comments);
    emit_attribute_lines(w, ctx, &ctor.custom_attributes)?;

    w.write(ctx, access_keyword(ctor.attributes.access));
    w.write(ctx, &ctx.ident(type_name));
    w.write(ctx, "(");
    emit_parameters(w, ctx, &ctor.parameters)?;
    w.write(ctx, ")");

    // base and this chaining are mutually exclusive in C#; base wins
    if !ctor.base_constructor_args.is_empty() {
        w.write(ctx, " : base(");
        emit_expression_list(w, ctx, &ctor.base_constructor_args)?;
        w.write(ctx, ")");
    } else if !ctor.chained_constructor_args.is_empty() {
        w.write(ctx, " : this(");
        emit_expression_list(w, ctx, &ctor.chained_constructor_args)?;
        w.write(ctx, ")");
    }

    w.open_brace(ctx);
    emit_statements(w, &ctx.nested(), &ctor.statements)?;
    w.close(ctx);
    Ok(())
}

fn emit_type_constructor(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    ctor: &TypeConstructor,
) -> Result<(), EmitError> {
    let Some(type_name) = ctx.type_name else {
        return Err(EmitError::malformed(
            "type constructor",
            "constructors must be declared inside a type",
        ));
    };
    emit_comments(w, ctx, &ctor.comments);
    w.open(ctx, &format!("static {}()", ctx.ident(type_name)));
    emit_statements(w, &ctx.nested(), &ctor.statements)?;
    w.close(ctx);
    Ok(())
}

fn emit_unsupported_event(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    event: &Event,
    unsupported: &mut Vec<Unsupported>,
) {
    let kind = UnsupportedKind::Event;
    let type_name = ctx.type_name.unwrap_or_default();
    tracing::warn!(
        member = %event.name,
        type_name = %type_name,
        "events are not supported; writing a placeholder"
    );
    w.line(ctx, &format!("/* {} {} */", kind.marker(), event.name));
    unsupported.push(Unsupported {
        kind,
        type_name: type_name.to_string(),
        member_name: event.name.clone(),
    });
}
