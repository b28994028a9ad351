/// Per-statement emit rules. Every rule starts at the beginning of a line
/// and leaves the writer at the beginning of a line.
use super::context::EmitContext;
use super::error::EmitError;
use super::expressions::{emit_event_reference, emit_expression};
use super::types::type_output;
use super::writer::CodeWriter;
use crate::ast::{CatchClause, Comment, EventReference, Expression, LinePragma, Statement};

pub fn emit_statements(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    statements: &[Statement],
) -> Result<(), EmitError> {
    for stmt in statements {
        emit_statement(w, ctx, stmt)?;
    }
    Ok(())
}

/// Dispatch one statement to its rule.
pub fn emit_statement(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    stmt: &Statement,
) -> Result<(), EmitError> {
    match stmt {
        Statement::Assign { .. }
        | Statement::Expression { .. }
        | Statement::VariableDeclaration { .. } => {
            emit_inline_statement(w, ctx, stmt)?;
            w.line(ctx, ";");
        }

        Statement::AttachEvent { event, listener } => {
            emit_event_hookup(w, ctx, event, "+=", listener)?;
        }

        Statement::RemoveEvent { event, listener } => {
            emit_event_hookup(w, ctx, event, "-=", listener)?;
        }

        Statement::Comment(comment) => emit_comment(w, ctx, comment),

        Statement::Condition {
            condition,
            true_statements,
            false_statements,
        } => emit_condition(w, ctx, condition, true_statements, false_statements)?,

        Statement::Goto { label } => {
            if label.is_empty() {
                return Err(EmitError::MissingName { node: "goto target" });
            }
            w.line(ctx, &format!("goto {label};"));
        }

        Statement::Iteration {
            init,
            test,
            increment,
            statements,
        } => emit_iteration(
            w,
            ctx,
            init.as_deref(),
            test.as_ref(),
            increment.as_deref(),
            statements,
        )?,

        Statement::Labeled { label, statement } => {
            if label.is_empty() {
                return Err(EmitError::MissingName { node: "label" });
            }
            match statement {
                Some(inner) => {
                    w.line(ctx, &format!("{label}:"));
                    emit_statement(w, ctx, inner)?;
                }
                // a label must prefix a statement
                None => w.line(ctx, &format!("{label}: ;")),
            }
        }

        Statement::LinePragma { pragma, statements } => {
            emit_line_pragma(w, ctx, pragma, statements)?;
        }

        Statement::MethodReturn { expression } => match expression {
            Some(expr) => {
                w.write(ctx, "return ");
                emit_expression(w, ctx, expr)?;
                w.line(ctx, ";");
            }
            None => w.line(ctx, "return;"),
        },

        Statement::Snippet { text } => {
            for line in text.lines() {
                w.line(ctx, line);
            }
        }

        Statement::ThrowException { to_throw } => match to_throw {
            Some(expr) => {
                w.write(ctx, "throw ");
                emit_expression(w, ctx, expr)?;
                w.line(ctx, ";");
            }
            None => w.line(ctx, "throw;"),
        },

        Statement::TryCatchFinally {
            try_statements,
            catch_clauses,
            finally_statements,
        } => emit_try_catch_finally(w, ctx, try_statements, catch_clauses, finally_statements)?,
    }
    Ok(())
}

/// The statement forms that can also sit inside a `for (...)` header,
/// written without the terminating `;`.
fn emit_inline_statement(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    stmt: &Statement,
) -> Result<(), EmitError> {
    match stmt {
        Statement::Assign { left, right } => {
            emit_expression(w, ctx, left)?;
            w.write(ctx, " = ");
            emit_expression(w, ctx, right)?;
        }
        Statement::Expression { expression } => emit_expression(w, ctx, expression)?,
        Statement::VariableDeclaration {
            var_type,
            name,
            init,
        } => {
            if name.is_empty() {
                return Err(EmitError::MissingName {
                    node: "variable declaration",
                });
            }
            w.write(ctx, &format!("{} {}", type_output(var_type), ctx.ident(name)));
            if let Some(init) = init {
                w.write(ctx, " = ");
                emit_expression(w, ctx, init)?;
            }
        }
        other => {
            return Err(EmitError::malformed(
                "for loop",
                format!("a {} statement cannot appear in the loop header", other.kind()),
            ));
        }
    }
    Ok(())
}

/// `// text`, or `/// text` for doc comments, one output line per line of text.
pub fn emit_comment(w: &mut CodeWriter, ctx: &EmitContext, comment: &Comment) {
    let prefix = if comment.doc { "///" } else { "//" };
    for line in comment.text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            w.line(ctx, prefix);
        } else {
            w.line(ctx, &format!("{prefix} {line}"));
        }
    }
}

pub fn emit_comments(w: &mut CodeWriter, ctx: &EmitContext, comments: &[Comment]) {
    for comment in comments {
        emit_comment(w, ctx, comment);
    }
}

fn emit_condition(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    condition: &Expression,
    true_statements: &[Statement],
    false_statements: &[Statement],
) -> Result<(), EmitError> {
    w.write(ctx, "if (");
    emit_expression(w, ctx, condition)?;
    w.write(ctx, ")");
    w.open_brace(ctx);
    emit_statements(w, &ctx.nested(), true_statements)?;

    if !false_statements.is_empty() {
        w.close_inline(ctx);
        w.continue_block(ctx, "else");
        emit_statements(w, &ctx.nested(), false_statements)?;
    }
    w.close(ctx);
    Ok(())
}

fn emit_iteration(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    init: Option<&Statement>,
    test: Option<&Expression>,
    increment: Option<&Statement>,
    body: &[Statement],
) -> Result<(), EmitError> {
    w.write(ctx, "for (");
    if let Some(init) = init {
        emit_inline_statement(w, ctx, init)?;
    }
    w.write(ctx, ";");
    if let Some(test) = test {
        w.write(ctx, " ");
        emit_expression(w, ctx, test)?;
    }
    w.write(ctx, ";");
    if let Some(increment) = increment {
        w.write(ctx, " ");
        emit_inline_statement(w, ctx, increment)?;
    }
    w.write(ctx, ")");
    w.open_brace(ctx);
    emit_statements(w, &ctx.nested(), body)?;
    w.close(ctx);
    Ok(())
}

fn emit_try_catch_finally(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    try_statements: &[Statement],
    catch_clauses: &[CatchClause],
    finally_statements: &[Statement],
) -> Result<(), EmitError> {
    w.open(ctx, "try");
    emit_statements(w, &ctx.nested(), try_statements)?;
    w.close_inline(ctx);

    for clause in catch_clauses {
        let ty = type_output(&clause.exception_type);
        let header = if clause.local_name.is_empty() {
            format!("catch ({ty})")
        } else {
            format!("catch ({ty} {})", ctx.ident(&clause.local_name))
        };
        w.continue_block(ctx, &header);
        emit_statements(w, &ctx.nested(), &clause.statements)?;
        w.close_inline(ctx);
    }

    if !finally_statements.is_empty() {
        w.continue_block(ctx, "finally");
        emit_statements(w, &ctx.nested(), finally_statements)?;
        w.close_inline(ctx);
    }
    w.end_line();
    Ok(())
}

fn emit_event_hookup(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    event: &EventReference,
    op: &str,
    listener: &Expression,
) -> Result<(), EmitError> {
    emit_event_reference(w, ctx, event)?;
    w.write(ctx, &format!(" {op} "));
    emit_expression(w, ctx, listener)?;
    w.line(ctx, ";");
    Ok(())
}

fn emit_line_pragma(
    w: &mut CodeWriter,
    ctx: &EmitContext,
    pragma: &LinePragma,
    statements: &[Statement],
) -> Result<(), EmitError> {
    w.directive(&format!(
        "#line {} \"{}\"",
        pragma.line_number, pragma.file_name
    ));
    emit_statements(w, ctx, statements)?;
    w.directive("#line default");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Literal, TypeReference};
    use crate::options::GeneratorOptions;

    fn t(name: &str) -> TypeReference {
        TypeReference::new(name)
    }

    fn emit_with(opts: &GeneratorOptions, depth: usize, stmt: &Statement) -> Result<String, EmitError> {
        let mut ctx = EmitContext::root(opts);
        for _ in 0..depth {
            ctx = ctx.nested();
        }
        let mut w = CodeWriter::new();
        emit_statement(&mut w, &ctx, stmt)?;
        Ok(w.finish())
    }

    fn emit(stmt: &Statement) -> String {
        emit_with(&GeneratorOptions::default(), 0, stmt).unwrap()
    }

    fn call(name: &str) -> Statement {
        Statement::expr(Expression::invoke(None, name, vec![]))
    }

    // ── Simple statements ──────────────────────────────────────────────

    #[test]
    fn test_expression_statement() {
        assert_eq!(emit(&call("Run")), "Run();\n");
    }

    #[test]
    fn test_assign() {
        let stmt = Statement::assign(Expression::field(Some(Expression::ThisReference), "x"), Expression::int(5));
        assert_eq!(emit(&stmt), "this.x = 5;\n");
    }

    #[test]
    fn test_variable_declaration() {
        let with_init = Statement::declare(t("System.String"), "s", Some(Expression::string("a")));
        assert_eq!(emit(&with_init), "string s = \"a\";\n");
        let without = Statement::declare(TypeReference::array(t("System.Int32"), 2), "grid", None);
        assert_eq!(emit(&without), "int[,] grid;\n");
    }

    #[test]
    fn test_variable_declaration_without_name() {
        let stmt = Statement::declare(t("System.Int32"), "", None);
        let err = emit_with(&GeneratorOptions::default(), 0, &stmt).unwrap_err();
        assert_eq!(
            err,
            EmitError::MissingName {
                node: "variable declaration"
            }
        );
    }

    #[test]
    fn test_return_with_and_without_value() {
        assert_eq!(emit(&Statement::ret(Some(Expression::var("x")))), "return x;\n");
        assert_eq!(emit(&Statement::ret(None)), "return;\n");
    }

    #[test]
    fn test_throw() {
        let stmt = Statement::ThrowException {
            to_throw: Some(Expression::ObjectCreate {
                create_type: t("System.InvalidOperationException"),
                arguments: vec![],
            }),
        };
        assert_eq!(emit(&stmt), "throw new System.InvalidOperationException();\n");
        assert_eq!(emit(&Statement::ThrowException { to_throw: None }), "throw;\n");
    }

    #[test]
    fn test_goto_and_label() {
        assert_eq!(emit(&Statement::Goto { label: "done".into() }), "goto done;\n");
        let labeled = Statement::Labeled {
            label: "done".into(),
            statement: Some(Box::new(Statement::ret(None))),
        };
        assert_eq!(emit(&labeled), "done:\nreturn;\n");
        let bare = Statement::Labeled {
            label: "end".into(),
            statement: None,
        };
        assert_eq!(emit(&bare), "end: ;\n");
    }

    #[test]
    fn test_empty_label_rejected() {
        let stmt = Statement::Goto { label: String::new() };
        assert!(emit_with(&GeneratorOptions::default(), 0, &stmt).is_err());
    }

    #[test]
    fn test_attach_and_remove_event() {
        let event = EventReference {
            target: Some(Box::new(Expression::var("button"))),
            event_name: "Click".into(),
        };
        let listener = Expression::var("handler");
        let attach = Statement::AttachEvent {
            event: event.clone(),
            listener: listener.clone(),
        };
        assert_eq!(emit(&attach), "button.Click += handler;\n");
        let remove = Statement::RemoveEvent { event, listener };
        assert_eq!(emit(&remove), "button.Click -= handler;\n");
    }

    #[test]
    fn test_comments() {
        assert_eq!(emit(&Statement::Comment(Comment::new("note"))), "// note\n");
        let doc = Comment {
            text: "<summary>\nAdds.\n</summary>".into(),
            doc: true,
        };
        assert_eq!(
            emit(&Statement::Comment(doc)),
            "/// <summary>\n/// Adds.\n/// </summary>\n"
        );
        assert_eq!(emit(&Statement::Comment(Comment::new(""))), "//\n");
    }

    #[test]
    fn test_snippet_statement_indents_each_line() {
        let opts = GeneratorOptions::default();
        let stmt = Statement::Snippet {
            text: "a();\nb();".into(),
        };
        assert_eq!(emit_with(&opts, 1, &stmt).unwrap(), "    a();\n    b();\n");
    }

    // ── Conditionals ───────────────────────────────────────────────────

    fn condition(with_else: bool) -> Statement {
        Statement::Condition {
            condition: Expression::var("ok"),
            true_statements: vec![call("Yes")],
            false_statements: if with_else { vec![call("No")] } else { vec![] },
        }
    }

    #[test]
    fn test_if_without_else() {
        assert_eq!(emit(&condition(false)), "if (ok) {\n    Yes();\n}\n");
    }

    #[test]
    fn test_else_on_new_line() {
        assert_eq!(
            emit(&condition(true)),
            "if (ok) {\n    Yes();\n}\nelse {\n    No();\n}\n"
        );
    }

    #[test]
    fn test_else_on_closing_line() {
        let opts = GeneratorOptions {
            else_on_closing: true,
            ..GeneratorOptions::default()
        };
        assert_eq!(
            emit_with(&opts, 0, &condition(true)).unwrap(),
            "if (ok) {\n    Yes();\n} else {\n    No();\n}\n"
        );
    }

    #[test]
    fn test_nested_condition_indentation() {
        let outer = Statement::Condition {
            condition: Expression::var("a"),
            true_statements: vec![condition(false)],
            false_statements: vec![],
        };
        assert_eq!(
            emit(&outer),
            "if (a) {\n    if (ok) {\n        Yes();\n    }\n}\n"
        );
    }

    // ── Loops ──────────────────────────────────────────────────────────

    #[test]
    fn test_for_loop() {
        let stmt = Statement::Iteration {
            init: Some(Box::new(Statement::declare(t("System.Int32"), "i", Some(Expression::int(0))))),
            test: Some(Expression::binary(
                Expression::var("i"),
                BinaryOperator::LessThan,
                Expression::int(10),
            )),
            increment: Some(Box::new(Statement::assign(
                Expression::var("i"),
                Expression::binary(Expression::var("i"), BinaryOperator::Add, Expression::int(1)),
            ))),
            statements: vec![call("Step")],
        };
        assert_eq!(
            emit(&stmt),
            "for (int i = 0; (i < 10); i = (i + 1)) {\n    Step();\n}\n"
        );
    }

    #[test]
    fn test_for_loop_empty_header() {
        let stmt = Statement::Iteration {
            init: None,
            test: None,
            increment: None,
            statements: vec![],
        };
        assert_eq!(emit(&stmt), "for (;;) {\n}\n");
    }

    #[test]
    fn test_for_loop_rejects_block_in_header() {
        let stmt = Statement::Iteration {
            init: Some(Box::new(condition(false))),
            test: None,
            increment: None,
            statements: vec![],
        };
        let err = emit_with(&GeneratorOptions::default(), 0, &stmt).unwrap_err();
        assert!(matches!(err, EmitError::Malformed { node: "for loop", .. }));
    }

    // ── Try / catch / finally ──────────────────────────────────────────

    fn try_stmt() -> Statement {
        Statement::TryCatchFinally {
            try_statements: vec![call("Open")],
            catch_clauses: vec![
                CatchClause {
                    exception_type: t("System.IO.IOException"),
                    local_name: "e".into(),
                    statements: vec![call("Log")],
                },
                CatchClause {
                    exception_type: t("System.Exception"),
                    local_name: String::new(),
                    statements: vec![],
                },
            ],
            finally_statements: vec![call("Close")],
        }
    }

    #[test]
    fn test_try_catch_finally_new_line() {
        assert_eq!(
            emit(&try_stmt()),
            "try {\n    Open();\n}\ncatch (System.IO.IOException e) {\n    Log();\n}\n\
             catch (System.Exception) {\n}\nfinally {\n    Close();\n}\n"
        );
    }

    #[test]
    fn test_try_catch_finally_same_line() {
        let opts = GeneratorOptions {
            else_on_closing: true,
            ..GeneratorOptions::default()
        };
        assert_eq!(
            emit_with(&opts, 0, &try_stmt()).unwrap(),
            "try {\n    Open();\n} catch (System.IO.IOException e) {\n    Log();\n} \
             catch (System.Exception) {\n} finally {\n    Close();\n}\n"
        );
    }

    #[test]
    fn test_try_finally_only() {
        let stmt = Statement::TryCatchFinally {
            try_statements: vec![],
            catch_clauses: vec![],
            finally_statements: vec![call("Close")],
        };
        assert_eq!(emit(&stmt), "try {\n}\nfinally {\n    Close();\n}\n");
    }

    // ── Line pragmas ───────────────────────────────────────────────────

    #[test]
    fn test_line_pragma_brackets_statements() {
        let stmt = Statement::LinePragma {
            pragma: LinePragma {
                file_name: "page.aspx".into(),
                line_number: 12,
            },
            statements: vec![call("Render")],
        };
        let code = emit_with(&GeneratorOptions::default(), 2, &stmt).unwrap();
        assert_eq!(
            code,
            "#line 12 \"page.aspx\"\n        Render();\n#line default\n"
        );
    }

    // ── Indentation invariant ──────────────────────────────────────────

    #[test]
    fn test_depth_restored_after_every_statement_kind() {
        let event = EventReference {
            target: None,
            event_name: "Changed".into(),
        };
        let statements = vec![
            call("A"),
            Statement::assign(Expression::var("x"), Expression::int(1)),
            Statement::declare(t("System.Int32"), "y", None),
            Statement::ret(None),
            condition(true),
            Statement::Iteration {
                init: None,
                test: None,
                increment: None,
                statements: vec![call("B")],
            },
            try_stmt(),
            Statement::Goto { label: "l".into() },
            Statement::Labeled {
                label: "l".into(),
                statement: Some(Box::new(call("C"))),
            },
            Statement::AttachEvent {
                event: event.clone(),
                listener: Expression::var("h"),
            },
            Statement::RemoveEvent {
                event,
                listener: Expression::var("h"),
            },
            Statement::LinePragma {
                pragma: LinePragma {
                    file_name: "f".into(),
                    line_number: 1,
                },
                statements: vec![call("D")],
            },
            Statement::Comment(Comment::new("c")),
            Statement::Snippet { text: "E();".into() },
            Statement::ThrowException { to_throw: None },
            Statement::expr(Expression::ArrayCreate {
                create_type: t("System.Int32"),
                initializers: vec![Expression::int(1)],
                size: 0,
                size_expression: None,
            }),
        ];
        let opts = GeneratorOptions::default();
        let ctx = EmitContext::root(&opts).nested().nested();
        for stmt in &statements {
            let mut w = CodeWriter::new();
            emit_statement(&mut w, &ctx, stmt).unwrap();
            assert!(w.is_at_line_start(), "{} left a line open", stmt.kind());
            w.line(&ctx, "MARK");
            let code = w.finish();
            assert!(
                code.ends_with("\n        MARK\n"),
                "{} changed the depth:\n{code}",
                stmt.kind()
            );
        }
    }

    #[test]
    fn test_literal_statement() {
        let stmt = Statement::expr(Expression::literal(Literal::Null));
        assert_eq!(emit(&stmt), "null;\n");
    }
}
