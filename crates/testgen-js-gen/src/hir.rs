//! High-level Intermediate Representation for generated JavaScript.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: every construct the generator emits has a typed Rust
//!    equivalent; identifiers are validated on construction
//! 2. **Determinism**: the same HIR always prints the same source text
//! 3. **Scope**: only what Playwright page objects and specs need (CommonJS
//!    requires, classes with getters, async arrows, `expect` chains)

use serde::{Deserialize, Serialize};

/// A complete JavaScript module (one generated file).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsModule {
    /// Module-level statements
    pub statements: Vec<Stmt>,
}

impl JsModule {
    /// Create a new empty module.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }
}

/// JavaScript statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Constant declaration: `const name = expr;` or `const { a, b } = expr;`
    Const {
        /// Binding pattern
        pattern: Pattern,
        /// Value
        value: Expr,
    },
    /// Member assignment: `obj.member = value;`
    MemberAssign {
        /// Object expression
        object: Expr,
        /// Member name
        member: Identifier,
        /// New value
        value: Expr,
    },
    /// Expression statement: `expr;`
    Expr(Expr),
    /// Return statement: `return expr;` or `return;`
    Return(Option<Expr>),
    /// Comment: `// text`
    Comment(String),
    /// Empty separator line
    Blank,
    /// Class definition
    Class(JsClass),
}

/// JavaScript expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Null literal
    Null,
    /// Boolean literal
    Bool(bool),
    /// Number literal
    Num(f64),
    /// String literal (escaped on output)
    Str(String),
    /// Regular expression literal body, already escaped: `/body/`
    Regex(String),
    /// Identifier reference
    Ident(Identifier),
    /// `this` keyword
    This,
    /// `super` keyword
    Super,
    /// Member access: `obj.prop`
    Member {
        /// Object
        object: Box<Expr>,
        /// Property name
        property: Identifier,
    },
    /// Function call: `func(args)`
    Call {
        /// Function expression
        callee: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    },
    /// `new Constructor(args)`
    New {
        /// Constructor
        constructor: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    },
    /// `await expr`
    Await(Box<Expr>),
    /// Object literal: `{ key: value, ... }`
    Object(Vec<(String, Expr)>),
    /// Array literal: `[expr, ...]`
    Array(Vec<Expr>),
    /// Arrow function with block body: `async (params) => { stmts }`
    Arrow {
        /// Whether the arrow is `async`
        is_async: bool,
        /// Parameters
        params: Vec<Param>,
        /// Body statements
        body: Vec<Stmt>,
    },
}

/// Binding pattern for declarations and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Plain binding: `name`
    Ident(Identifier),
    /// Object destructuring: `{ a, b }`
    Object(Vec<Identifier>),
}

/// Function or method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Binding pattern
    pub pattern: Pattern,
    /// Default value: `name = expr`
    pub default: Option<Expr>,
}

/// A validated JavaScript identifier.
///
/// Identifiers are validated at construction time to ensure they:
/// - Are not reserved words
/// - Contain only valid characters
/// - Don't start with a digit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// JavaScript reserved words that cannot be used as identifiers.
    pub const RESERVED_WORDS: &'static [&'static str] = &[
        "break",
        "case",
        "catch",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "finally",
        "for",
        "function",
        "if",
        "in",
        "instanceof",
        "new",
        "return",
        "switch",
        "this",
        "throw",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "class",
        "const",
        "enum",
        "export",
        "extends",
        "import",
        "super",
        "implements",
        "interface",
        "let",
        "package",
        "private",
        "protected",
        "public",
        "static",
        "yield",
        "await",
        "null",
        "true",
        "false",
    ];

    /// Fallback used by [`Identifier::legalize`] when nothing usable remains.
    pub const PLACEHOLDER: &'static str = "element";

    /// Create a new identifier, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is:
    /// - Empty
    /// - A reserved word
    /// - Contains invalid characters
    /// - Starts with a digit
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(crate::JsGenError::InvalidIdentifier {
                name,
                reason: "identifier cannot be empty".to_string(),
            });
        }

        let first = name.chars().next().unwrap_or(' ');
        if first.is_ascii_digit() {
            return Err(crate::JsGenError::InvalidIdentifier {
                name,
                reason: "identifier cannot start with a digit".to_string(),
            });
        }

        if let Some(c) = name.chars().find(|c| !Self::is_ident_char(*c)) {
            return Err(crate::JsGenError::InvalidIdentifier {
                name,
                reason: format!("invalid character '{c}'"),
            });
        }

        if Self::RESERVED_WORDS.contains(&name.as_str()) {
            return Err(crate::JsGenError::InvalidIdentifier {
                name,
                reason: "reserved word".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Turn arbitrary text into a legal identifier.
    ///
    /// Invalid characters are dropped, a leading digit gets a `_` prefix and a
    /// reserved word gets a `_` suffix. Text with no usable characters becomes
    /// [`Identifier::PLACEHOLDER`]. Already-valid names pass through unchanged.
    #[must_use]
    pub fn legalize(raw: &str) -> Self {
        let mut name: String = raw.chars().filter(|c| Self::is_ident_char(*c)).collect();
        if name.is_empty() {
            name = Self::PLACEHOLDER.to_string();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        if Self::RESERVED_WORDS.contains(&name.as_str()) {
            name.push('_');
        }
        Self(name)
    }

    /// Get the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    const fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '$'
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JavaScript class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsClass {
    /// Class name
    pub name: Identifier,
    /// Parent class (extends)
    pub extends: Option<Identifier>,
    /// Constructor, emitted first when present
    pub constructor: Option<JsConstructor>,
    /// Getters and methods in declaration order
    pub members: Vec<JsMethod>,
}

/// Class constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsConstructor {
    /// Parameters
    pub params: Vec<Param>,
    /// Body (a `super(...)` call must be written explicitly)
    pub body: Vec<Stmt>,
}

/// Kind of class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    /// Ordinary method: `name(params) { ... }`
    Method,
    /// Accessor: `get name() { ... }`
    Getter,
}

/// JavaScript class method or getter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsMethod {
    /// Method name
    pub name: Identifier,
    /// Method or getter
    pub kind: MethodKind,
    /// `async` modifier
    pub is_async: bool,
    /// Parameters (always empty for getters)
    pub params: Vec<Param>,
    /// Method body
    pub body: Vec<Stmt>,
}
