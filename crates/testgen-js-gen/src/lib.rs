//! Typed JavaScript generation for testgen.
//!
//! Page objects and test specs are assembled as a small HIR (modules,
//! classes, statements, expressions), then printed by [`generate`]. Building
//! the HIR validates every identifier, so the printer can never emit a
//! reserved word or a malformed name.
//!
//! ```rust
//! use testgen_js_gen::prelude::*;
//!
//! let class = JsClassBuilder::new("HomePage").unwrap()
//!     .extends("Page").unwrap()
//!     .build().unwrap();
//! let js = generate(&JsModuleBuilder::new().class(class).build());
//! assert!(js.starts_with("class HomePage extends Page {"));
//! ```

pub mod builder;
pub mod codegen;
pub mod error;
pub mod hir;

pub use codegen::{escape_str, generate};
pub use error::{JsGenError, Result};

/// Everything needed to build and print a module.
pub mod prelude {
    pub use crate::builder::{JsClassBuilder, JsModuleBuilder};
    pub use crate::codegen::generate;
    pub use crate::error::{JsGenError, Result};
    pub use crate::hir::{
        Expr, Identifier, JsClass, JsConstructor, JsMethod, JsModule, MethodKind, Param, Pattern,
        Stmt,
    };
}
