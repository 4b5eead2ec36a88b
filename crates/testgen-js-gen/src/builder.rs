//! Fluent builder API for JavaScript generation.
//!
//! # Example
//!
//! ```rust
//! use testgen_js_gen::prelude::*;
//!
//! let js = JsModuleBuilder::new()
//!     .comment("Generated - DO NOT EDIT")
//!     .require("Page", "./page").unwrap()
//!     .build();
//! assert!(generate(&js).contains("const Page = require(\"./page\");"));
//! ```

use crate::hir::*;
use crate::{JsGenError, Result};
use std::collections::HashSet;

/// Builder for JavaScript modules.
#[derive(Debug, Default)]
pub struct JsModuleBuilder {
    statements: Vec<Stmt>,
}

impl JsModuleBuilder {
    /// Create a new empty module builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement.
    #[must_use]
    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.statements.push(stmt);
        self
    }

    /// Add a comment.
    #[must_use]
    pub fn comment(self, text: impl Into<String>) -> Self {
        self.stmt(Stmt::Comment(text.into()))
    }

    /// Add an empty separator line.
    #[must_use]
    pub fn blank(self) -> Self {
        self.stmt(Stmt::Blank)
    }

    /// Add a const declaration.
    pub fn const_decl(self, name: impl Into<String>, value: Expr) -> Result<Self> {
        Ok(self.stmt(Stmt::const_decl(name, value)?))
    }

    /// `const name = require("path");`
    pub fn require(self, name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let value = Expr::ident("require")?.call(vec![Expr::str(path)]);
        self.const_decl(name, value)
    }

    /// `const { a, b } = require("path");`
    pub fn require_destructured(self, names: &[&str], path: impl Into<String>) -> Result<Self> {
        let value = Expr::ident("require")?.call(vec![Expr::str(path)]);
        Ok(self.stmt(Stmt::Const {
            pattern: Pattern::object(names)?,
            value,
        }))
    }

    /// `module.exports = name;`
    pub fn export(self, name: impl Into<String>) -> Result<Self> {
        Ok(self.stmt(Stmt::member_assign(
            Expr::ident("module")?,
            "exports",
            Expr::ident(name)?,
        )?))
    }

    /// Add an expression statement.
    #[must_use]
    pub fn expr(self, e: Expr) -> Self {
        self.stmt(Stmt::Expr(e))
    }

    /// Add a class definition.
    #[must_use]
    pub fn class(self, class: JsClass) -> Self {
        self.stmt(Stmt::Class(class))
    }

    /// Build the module.
    #[must_use]
    pub fn build(self) -> JsModule {
        JsModule {
            statements: self.statements,
        }
    }
}

/// Builder for JavaScript classes.
#[derive(Debug)]
pub struct JsClassBuilder {
    name: Identifier,
    extends: Option<Identifier>,
    constructor: Option<JsConstructor>,
    members: Vec<JsMethod>,
}

impl JsClassBuilder {
    /// Create a new class builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: Identifier::new(name)?,
            extends: None,
            constructor: None,
            members: Vec::new(),
        })
    }

    /// Set the parent class.
    pub fn extends(mut self, parent: impl Into<String>) -> Result<Self> {
        self.extends = Some(Identifier::new(parent)?);
        Ok(self)
    }

    /// Set the constructor.
    pub fn constructor(mut self, params: &[&str], body: Vec<Stmt>) -> Result<Self> {
        let params = params
            .iter()
            .map(|p| Param::ident(*p))
            .collect::<Result<Vec<_>>>()?;
        self.constructor = Some(JsConstructor { params, body });
        Ok(self)
    }

    /// Add a getter: `get name() { body }`.
    pub fn getter(mut self, name: impl Into<String>, body: Vec<Stmt>) -> Result<Self> {
        self.members.push(JsMethod {
            name: Identifier::new(name)?,
            kind: MethodKind::Getter,
            is_async: false,
            params: Vec::new(),
            body,
        });
        Ok(self)
    }

    /// Add a method.
    pub fn method(self, name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Result<Self> {
        self.push_method(name, false, params, body)
    }

    /// Add an `async` method.
    pub fn async_method(
        self,
        name: impl Into<String>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Result<Self> {
        self.push_method(name, true, params, body)
    }

    fn push_method(
        mut self,
        name: impl Into<String>,
        is_async: bool,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Result<Self> {
        self.members.push(JsMethod {
            name: Identifier::new(name)?,
            kind: MethodKind::Method,
            is_async,
            params,
            body,
        });
        Ok(self)
    }

    /// Build the class.
    ///
    /// # Errors
    ///
    /// Returns [`JsGenError::DuplicateMember`] when two members share a name.
    pub fn build(self) -> Result<JsClass> {
        let mut seen = HashSet::new();
        for member in &self.members {
            if !seen.insert(member.name.as_str()) {
                return Err(JsGenError::DuplicateMember {
                    class: self.name.to_string(),
                    member: member.name.to_string(),
                });
            }
        }

        Ok(JsClass {
            name: self.name,
            extends: self.extends,
            constructor: self.constructor,
            members: self.members,
        })
    }
}

impl Pattern {
    /// Plain binding pattern.
    pub fn ident(name: impl Into<String>) -> Result<Self> {
        Ok(Self::Ident(Identifier::new(name)?))
    }

    /// Object destructuring pattern.
    pub fn object(names: &[&str]) -> Result<Self> {
        let names = names
            .iter()
            .map(|n| Identifier::new(*n))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::Object(names))
    }
}

impl Param {
    /// Plain parameter: `name`
    pub fn ident(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::ident(name)?,
            default: None,
        })
    }

    /// Parameter with default value: `name = value`
    pub fn with_default(name: impl Into<String>, value: Expr) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::ident(name)?,
            default: Some(value),
        })
    }

    /// Destructured parameter: `{ a, b }`
    pub fn destructure(names: &[&str]) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::object(names)?,
            default: None,
        })
    }
}

/// Expression builder helpers.
impl Expr {
    /// Create a null literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a boolean literal.
    #[must_use]
    pub const fn bool(v: bool) -> Self {
        Self::Bool(v)
    }

    /// Create a number literal.
    #[must_use]
    pub fn num(v: impl Into<f64>) -> Self {
        Self::Num(v.into())
    }

    /// Create a string literal.
    #[must_use]
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Regex literal matching `text` literally (metacharacters escaped).
    #[must_use]
    pub fn regex_literal(text: &str) -> Self {
        let mut body = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{'
                | '}' | '/' => {
                    body.push('\\');
                    body.push(c);
                }
                '\n' => body.push_str("\\n"),
                '\r' => body.push_str("\\r"),
                '\u{2028}' => body.push_str("\\u2028"),
                '\u{2029}' => body.push_str("\\u2029"),
                _ => body.push(c),
            }
        }
        Self::Regex(body)
    }

    /// Create an identifier reference.
    pub fn ident(name: impl Into<String>) -> Result<Self> {
        Ok(Self::Ident(Identifier::new(name)?))
    }

    /// Create `this` reference.
    #[must_use]
    pub const fn this() -> Self {
        Self::This
    }

    /// Create `super` reference.
    #[must_use]
    pub const fn super_() -> Self {
        Self::Super
    }

    /// Member access: `self.prop`
    pub fn dot(self, prop: impl Into<String>) -> Result<Self> {
        Ok(self.member(Identifier::new(prop)?))
    }

    /// Member access with an already-validated identifier.
    #[must_use]
    pub fn member(self, prop: Identifier) -> Self {
        Self::Member {
            object: Box::new(self),
            property: prop,
        }
    }

    /// Method call shorthand: `self.name(args)`
    pub fn method_call(self, name: impl Into<String>, args: Vec<Expr>) -> Result<Self> {
        Ok(self.dot(name)?.call(args))
    }

    /// Function call.
    #[must_use]
    pub fn call(self, args: Vec<Expr>) -> Self {
        Self::Call {
            callee: Box::new(self),
            args,
        }
    }

    /// New expression.
    #[must_use]
    pub fn new_expr(self, args: Vec<Expr>) -> Self {
        Self::New {
            constructor: Box::new(self),
            args,
        }
    }

    /// Await expression.
    #[must_use]
    pub fn await_expr(self) -> Self {
        Self::Await(Box::new(self))
    }

    /// Object literal.
    #[must_use]
    pub fn object(pairs: Vec<(&str, Expr)>) -> Self {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Array literal.
    #[must_use]
    pub fn array(items: Vec<Expr>) -> Self {
        Self::Array(items)
    }

    /// Block-bodied arrow function.
    #[must_use]
    pub fn arrow(params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self::Arrow {
            is_async: false,
            params,
            body,
        }
    }

    /// Block-bodied `async` arrow function.
    #[must_use]
    pub fn async_arrow(params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self::Arrow {
            is_async: true,
            params,
            body,
        }
    }
}

/// Statement builder helpers.
impl Stmt {
    /// Create a const declaration.
    pub fn const_decl(name: impl Into<String>, value: Expr) -> Result<Self> {
        Ok(Self::Const {
            pattern: Pattern::ident(name)?,
            value,
        })
    }

    /// Create a member assignment.
    pub fn member_assign(obj: Expr, member: impl Into<String>, value: Expr) -> Result<Self> {
        Ok(Self::MemberAssign {
            object: obj,
            member: Identifier::new(member)?,
            value,
        })
    }

    /// Create an expression statement.
    #[must_use]
    pub fn expr(e: Expr) -> Self {
        Self::Expr(e)
    }

    /// Create a return statement with no value.
    #[must_use]
    pub fn ret() -> Self {
        Self::Return(None)
    }

    /// Create a return statement with a value.
    #[must_use]
    pub fn ret_val(e: Expr) -> Self {
        Self::Return(Some(e))
    }

    /// Create a comment.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn module_builder_basic() {
        let module = JsModuleBuilder::new()
            .comment("header")
            .blank()
            .require("Page", "./page")
            .unwrap()
            .build();
        assert_eq!(module.statements.len(), 3);
        assert!(matches!(module.statements[0], Stmt::Comment(_)));
        assert!(matches!(module.statements[1], Stmt::Blank));
    }

    #[test]
    fn module_builder_require_destructured() {
        let module = JsModuleBuilder::new()
            .require_destructured(&["test", "expect"], "@playwright/test")
            .unwrap()
            .build();
        match &module.statements[0] {
            Stmt::Const {
                pattern: Pattern::Object(names),
                ..
            } => assert_eq!(names.len(), 2),
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn module_builder_export_invalid() {
        assert!(JsModuleBuilder::new().export("class").is_err());
    }

    #[test]
    fn class_builder_basic() -> Result<()> {
        let class = JsClassBuilder::new("LoginPage")?
            .extends("Page")?
            .constructor(&["page"], vec![])?
            .getter("loginButton", vec![Stmt::ret()])?
            .async_method("login", vec![], vec![])?
            .method("open", vec![Param::with_default("pathSegment", Expr::str("login"))?], vec![])?
            .build()?;

        assert_eq!(class.name.as_str(), "LoginPage");
        assert_eq!(class.extends.as_ref().unwrap().as_str(), "Page");
        assert_eq!(class.members.len(), 3);
        assert_eq!(class.members[0].kind, MethodKind::Getter);
        assert!(class.members[1].is_async);
        assert!(class.members[2].params[0].default.is_some());
        Ok(())
    }

    #[test]
    fn class_builder_rejects_duplicate_members() {
        let err = JsClassBuilder::new("LoginPage")
            .unwrap()
            .getter("loginButton", vec![])
            .unwrap()
            .getter("loginButton", vec![])
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, JsGenError::DuplicateMember { .. }));
    }

    #[test]
    fn class_builder_invalid_name() {
        assert!(JsClassBuilder::new("class").is_err());
        assert!(JsClassBuilder::new("Ok").unwrap().extends("1Bad").is_err());
    }

    #[test]
    fn class_builder_invalid_constructor_param() {
        let result = JsClassBuilder::new("Foo").unwrap().constructor(&["new"], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn regex_literal_escapes_metacharacters() {
        assert_eq!(Expr::regex_literal("dashboard"), Expr::Regex("dashboard".into()));
        assert_eq!(
            Expr::regex_literal("a.b/c?d"),
            Expr::Regex(r"a\.b\/c\?d".into())
        );
    }

    #[test]
    fn regex_literal_escapes_js_line_separators() {
        assert_eq!(
            Expr::regex_literal("a\u{2028}b\u{2029}c"),
            Expr::Regex(r"a\u2028b\u2029c".into())
        );
    }

    #[test]
    fn expr_builder_chain() -> Result<()> {
        let e = Expr::this().dot("page")?.method_call("locator", vec![Expr::str("#id")])?;
        match e {
            Expr::Call { callee, args } => {
                assert_eq!(args.len(), 1);
                assert!(matches!(*callee, Expr::Member { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn expr_dot_invalid() {
        assert!(Expr::this().dot("not valid").is_err());
    }

    #[test]
    fn param_destructure() -> Result<()> {
        let p = Param::destructure(&["page"])?;
        assert!(matches!(p.pattern, Pattern::Object(ref v) if v.len() == 1));
        assert!(Param::destructure(&["if"]).is_err());
        Ok(())
    }

    #[test]
    fn stmt_helpers() {
        assert_eq!(Stmt::ret(), Stmt::Return(None));
        assert!(matches!(Stmt::ret_val(Expr::null()), Stmt::Return(Some(Expr::Null))));
        assert!(matches!(Stmt::comment("x"), Stmt::Comment(_)));
        assert!(Stmt::const_decl("let", Expr::null()).is_err());
    }
}
