//! Deterministic JavaScript printer.
//!
//! Two-space indentation, double-quoted strings, `\n` line endings and a
//! trailing newline. Printing is total: any HIR value produces output.

use crate::hir::*;

const INDENT: &str = "  ";

/// Print a module to JavaScript source.
#[must_use]
pub fn generate(module: &JsModule) -> String {
    let mut printer = Printer::default();
    for stmt in &module.statements {
        printer.stmt(stmt);
    }
    printer.out
}

/// Escape a string for use inside a double-quoted JavaScript literal.
#[must_use]
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Characters that end a line in JavaScript source.
const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn block(&mut self, body: &[Stmt]) {
        self.out.push_str("{\n");
        self.depth += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.depth -= 1;
        self.line_start();
        self.out.push('}');
    }

    fn stmt(&mut self, stmt: &Stmt) {
        if matches!(stmt, Stmt::Blank) {
            self.out.push('\n');
            return;
        }

        self.line_start();
        match stmt {
            Stmt::Const { pattern, value } => {
                self.out.push_str("const ");
                self.pattern(pattern);
                self.out.push_str(" = ");
                self.expr(value);
                self.out.push(';');
            }
            Stmt::MemberAssign {
                object,
                member,
                value,
            } => {
                self.member_object(object);
                self.out.push('.');
                self.out.push_str(member.as_str());
                self.out.push_str(" = ");
                self.expr(value);
                self.out.push(';');
            }
            Stmt::Expr(e) => {
                self.expr(e);
                self.out.push(';');
            }
            Stmt::Return(None) => self.out.push_str("return;"),
            Stmt::Return(Some(e)) => {
                self.out.push_str("return ");
                self.expr(e);
                self.out.push(';');
            }
            Stmt::Comment(text) => {
                // every JS line terminator starts a fresh `//`
                let normalized = text.replace("\r\n", "\n");
                let mut lines = normalized.split(is_line_terminator);
                self.out.push_str("// ");
                self.out.push_str(lines.next().unwrap_or_default());
                for line in lines {
                    self.out.push('\n');
                    self.line_start();
                    self.out.push_str("// ");
                    self.out.push_str(line);
                }
            }
            Stmt::Class(class) => self.class(class),
            Stmt::Blank => {}
        }
        self.out.push('\n');
    }

    fn class(&mut self, class: &JsClass) {
        self.out.push_str("class ");
        self.out.push_str(class.name.as_str());
        if let Some(parent) = &class.extends {
            self.out.push_str(" extends ");
            self.out.push_str(parent.as_str());
        }
        self.out.push_str(" {\n");
        self.depth += 1;

        let mut first = true;
        if let Some(ctor) = &class.constructor {
            self.line_start();
            self.out.push_str("constructor");
            self.params(&ctor.params);
            self.out.push(' ');
            self.block(&ctor.body);
            self.out.push('\n');
            first = false;
        }

        for member in &class.members {
            if !first {
                self.out.push('\n');
            }
            first = false;
            self.line_start();
            if member.is_async {
                self.out.push_str("async ");
            }
            if member.kind == MethodKind::Getter {
                self.out.push_str("get ");
            }
            self.out.push_str(member.name.as_str());
            self.params(&member.params);
            self.out.push(' ');
            self.block(&member.body);
            self.out.push('\n');
        }

        self.depth -= 1;
        self.line_start();
        self.out.push('}');
    }

    fn params(&mut self, params: &[Param]) {
        self.out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.pattern(&param.pattern);
            if let Some(default) = &param.default {
                self.out.push_str(" = ");
                self.expr(default);
            }
        }
        self.out.push(')');
    }

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(name) => self.out.push_str(name.as_str()),
            Pattern::Object(names) => {
                self.out.push_str("{ ");
                let joined: Vec<&str> = names.iter().map(Identifier::as_str).collect();
                self.out.push_str(&joined.join(", "));
                self.out.push_str(" }");
            }
        }
    }

    fn args(&mut self, args: &[Expr]) {
        self.out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(arg);
        }
        self.out.push(')');
    }

    /// Objects of member access and calls need parens unless they are primary.
    fn member_object(&mut self, object: &Expr) {
        let needs_parens = matches!(
            object,
            Expr::Await(_) | Expr::New { .. } | Expr::Arrow { .. } | Expr::Object(_)
        );
        if needs_parens {
            self.out.push('(');
            self.expr(object);
            self.out.push(')');
        } else {
            self.expr(object);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Null => self.out.push_str("null"),
            Expr::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Expr::Num(n) => self.out.push_str(&format_number(*n)),
            Expr::Str(s) => {
                self.out.push('"');
                self.out.push_str(&escape_str(s));
                self.out.push('"');
            }
            Expr::Regex(body) => {
                self.out.push('/');
                // An empty body would print as a line comment
                if body.is_empty() {
                    self.out.push_str("(?:)");
                } else {
                    self.out.push_str(body);
                }
                self.out.push('/');
            }
            Expr::Ident(name) => self.out.push_str(name.as_str()),
            Expr::This => self.out.push_str("this"),
            Expr::Super => self.out.push_str("super"),
            Expr::Member { object, property } => {
                self.member_object(object);
                self.out.push('.');
                self.out.push_str(property.as_str());
            }
            Expr::Call { callee, args } => {
                self.member_object(callee);
                self.args(args);
            }
            Expr::New { constructor, args } => {
                self.out.push_str("new ");
                self.member_object(constructor);
                self.args(args);
            }
            Expr::Await(inner) => {
                self.out.push_str("await ");
                self.expr(inner);
            }
            Expr::Object(pairs) => {
                if pairs.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push_str("{ ");
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    if Identifier::new(key.as_str()).is_ok() {
                        self.out.push_str(key);
                    } else {
                        self.out.push('"');
                        self.out.push_str(&escape_str(key));
                        self.out.push('"');
                    }
                    self.out.push_str(": ");
                    self.expr(value);
                }
                self.out.push_str(" }");
            }
            Expr::Array(items) => {
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(item);
                }
                self.out.push(']');
            }
            Expr::Arrow {
                is_async,
                params,
                body,
            } => {
                if *is_async {
                    self.out.push_str("async ");
                }
                self.params(params);
                self.out.push_str(" => ");
                self.block(body);
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::builder::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_quotes_and_backslashes() {
        assert_eq!(escape_str(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_str("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_str("\u{1}"), "\\u0001");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn prints_requires_and_exports() {
        let module = JsModuleBuilder::new()
            .require("Page", "./page")
            .unwrap()
            .require_destructured(&["test", "expect"], "@playwright/test")
            .unwrap()
            .export("Page")
            .unwrap()
            .build();
        assert_eq!(
            generate(&module),
            "const Page = require(\"./page\");\n\
             const { test, expect } = require(\"@playwright/test\");\n\
             module.exports = Page;\n"
        );
    }

    #[test]
    fn prints_class_with_members() {
        let class = JsClassBuilder::new("LoginPage")
            .unwrap()
            .extends("Page")
            .unwrap()
            .constructor(
                &["page"],
                vec![Stmt::expr(
                    Expr::super_().call(vec![Expr::ident("page").unwrap()]),
                )],
            )
            .unwrap()
            .getter(
                "loginButton",
                vec![Stmt::ret_val(
                    Expr::this()
                        .method_call("getLocatorChain", vec![Expr::array(vec![Expr::str("#login")])])
                        .unwrap(),
                )],
            )
            .unwrap()
            .build()
            .unwrap();
        let js = generate(&JsModuleBuilder::new().class(class).build());
        assert_eq!(
            js,
            "class LoginPage extends Page {\n\
            \x20 constructor(page) {\n\
            \x20   super(page);\n\
            \x20 }\n\
            \n\
            \x20 get loginButton() {\n\
            \x20   return this.getLocatorChain([\"#login\"]);\n\
            \x20 }\n\
            }\n"
        );
    }

    #[test]
    fn prints_async_arrow_inside_call() {
        let body = vec![Stmt::expr(
            Expr::ident("pageObj")
                .unwrap()
                .method_call("open", vec![])
                .unwrap()
                .await_expr(),
        )];
        let call = Expr::ident("test").unwrap().call(vec![
            Expr::str("login"),
            Expr::async_arrow(vec![Param::destructure(&["page"]).unwrap()], body),
        ]);
        let js = generate(&JsModuleBuilder::new().expr(call).build());
        assert_eq!(
            js,
            "test(\"login\", async ({ page }) => {\n  await pageObj.open();\n});\n"
        );
    }

    #[test]
    fn prints_object_keys() {
        let obj = Expr::object(vec![("label", Expr::str("US")), ("data-x", Expr::num(1))]);
        let js = generate(&JsModuleBuilder::new().expr(obj).build());
        assert_eq!(js, "{ label: \"US\", \"data-x\": 1 };\n");
    }

    #[test]
    fn await_object_gets_parens() {
        let e = Expr::ident("x").unwrap().await_expr().dot("y").unwrap();
        let js = generate(&JsModuleBuilder::new().expr(e).build());
        assert_eq!(js, "(await x).y;\n");
    }

    #[test]
    fn empty_regex_stays_a_regex() {
        let js = generate(&JsModuleBuilder::new().expr(Expr::regex_literal("")).build());
        assert_eq!(js, "/(?:)/;\n");
    }

    #[test]
    fn multiline_comment_is_prefixed_per_line() {
        let js = generate(&JsModuleBuilder::new().comment("one\ntwo").build());
        assert_eq!(js, "// one\n// two\n");
    }

    #[test]
    fn comment_splits_on_every_js_line_terminator() {
        let text = "a\r\nb\rc\u{2028}process.exit(1)\u{2029}d";
        let js = generate(&JsModuleBuilder::new().comment(text).build());
        assert_eq!(js, "// a\n// b\n// c\n// process.exit(1)\n// d\n");
        assert!(!js.contains('\u{2028}'));
    }

    #[test]
    fn blank_line_has_no_indent() {
        let js = generate(&JsModuleBuilder::new().comment("a").blank().comment("b").build());
        assert_eq!(js, "// a\n\n// b\n");
    }
}
