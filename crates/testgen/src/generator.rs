//! Page-object and test-spec synthesis from a [`StepMap`].
//!
//! Output is assembled as `testgen-js-gen` HIR and printed, so every
//! identifier is validated and every literal escaped. Generation is a pure
//! function of the base name and the map.
//!
//! Accessors follow the first occurrence order of selector names across the
//! whole map; scenario methods follow scenario order. Both units replay the
//! same statements, against `this` in the page object and against the page
//! object instance in the spec.

use crate::config::STEP_MAP_SUFFIX;
use crate::lexical::{HeuristicTagger, LexicalClassifier};
use crate::naming::{capitalize, short_name, slugify};
use crate::result::TestgenResult;
use crate::step::{ActionKind, StepDescriptor};
use crate::step_map::StepMap;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use testgen_js_gen::prelude::*;

/// Members every generated page object inherits from the base class.
pub const BASE_CLASS_MEMBERS: &[&str] = &["constructor", "page", "open", "getLocatorChain"];

/// File name of the shared base class in the page-object directory.
pub const BASE_PAGE_FILE: &str = "page.js";

/// Source of the shared base class.
pub const BASE_PAGE_SOURCE: &str = r#"// Generated by testgen
class Page {
  constructor(page) {
    this.page = page;
  }

  open(pathSegment = "") {
    const baseUrl = process.env.BASE_URL || "https://the-internet.herokuapp.com";
    return this.page.goto(`${baseUrl}/${pathSegment}`);
  }

  getLocatorChain(selectors = []) {
    if (!Array.isArray(selectors) || selectors.length === 0) {
      throw new Error("No selectors provided to getLocatorChain");
    }

    const locators = selectors.map((sel) => this.page.locator(sel));
    const chained = locators.slice(1).reduce((acc, loc) => acc.or(loc), locators[0]);

    chained
      .first()
      .waitFor({ state: "visible", timeout: 2000 })
      .catch(() => {
        console.warn(`None of the selectors resolved: ${selectors.join(" | ")}`);
      });

    return chained;
  }
}

module.exports = Page;
"#;

/// Generated source for one StepMap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifactPair {
    /// `<base>.page.js`
    pub page_object: String,
    /// `<base>.spec.js`
    pub test_spec: String,
}

/// Page-object class name for a feature base name.
#[must_use]
pub fn page_class_name(base_name: &str) -> String {
    let raw = format!("{}Page", capitalize(base_name));
    Identifier::legalize(&raw).as_str().to_string()
}

/// A getter on the page object.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Accessor {
    ident: Identifier,
    selectors: Vec<String>,
}

/// Everything both units are printed from.
#[derive(Debug)]
struct PagePlan<'a> {
    class_name: String,
    default_path: String,
    accessors: IndexMap<&'a str, Accessor>,
    methods: Vec<(Identifier, &'a [StepDescriptor])>,
}

impl PagePlan<'_> {
    fn accessor(&self, selector_name: &str) -> Identifier {
        self.accessors.get(selector_name).map_or_else(
            || Identifier::legalize(selector_name),
            |a| a.ident.clone(),
        )
    }
}

/// Turns StepMaps into Playwright page objects and specs.
#[derive(Debug)]
pub struct CodeGenerator<L: LexicalClassifier = HeuristicTagger> {
    lexical: L,
    navigation: Regex,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator<HeuristicTagger> {
    /// Generator using the bundled lexical tagger.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lexical(HeuristicTagger::new())
    }
}

impl<L: LexicalClassifier> CodeGenerator<L> {
    /// Generator with a custom noun extractor.
    #[must_use]
    pub fn with_lexical(lexical: L) -> Self {
        Self {
            lexical,
            navigation: Regex::new("(?i)navigate|go to|open").expect("static pattern"),
        }
    }

    /// Path segment the generated `open()` defaults to.
    ///
    /// The leading noun of the first navigation-like step argument, or the
    /// base name when there is none; slugified either way.
    #[must_use]
    pub fn default_path(&self, base_name: &str, map: &StepMap) -> String {
        map.steps()
            .map(StepDescriptor::argument_text)
            .filter(|arg| self.navigation.is_match(arg))
            .find_map(|arg| self.lexical.nouns(arg).into_iter().next())
            .map_or_else(|| slugify(base_name), |noun| slugify(&noun))
    }

    /// Generate both units for the StepMap of `base_name`.
    pub fn generate(&self, base_name: &str, map: &StepMap) -> TestgenResult<GeneratedArtifactPair> {
        let plan = self.plan(base_name, map);
        let provenance = format!("Generated by testgen from {base_name}{STEP_MAP_SUFFIX}");
        let page_object = generate(&page_object_module(&plan, &provenance)?);
        let test_spec = generate(&spec_module(base_name, &plan, &provenance)?);
        tracing::debug!(
            base_name,
            accessors = plan.accessors.len(),
            methods = plan.methods.len(),
            "generated page object and spec"
        );
        Ok(GeneratedArtifactPair {
            page_object,
            test_spec,
        })
    }

    fn plan<'a>(&self, base_name: &str, map: &'a StepMap) -> PagePlan<'a> {
        let mut used: HashSet<String> =
            BASE_CLASS_MEMBERS.iter().map(|m| (*m).to_string()).collect();

        let mut accessors: IndexMap<&str, Accessor> = IndexMap::new();
        for step in map.steps() {
            if accessors.contains_key(step.selector_name.as_str()) {
                continue;
            }
            let accessor = Accessor {
                ident: unique_ident(&step.selector_name, &mut used),
                selectors: step.selector_candidates(),
            };
            accessors.insert(step.selector_name.as_str(), accessor);
        }

        let methods = map
            .scenarios()
            .map(|(name, steps)| {
                let ident = unique_ident(&short_name(name, &self.lexical), &mut used);
                (ident, steps)
            })
            .collect();

        PagePlan {
            class_name: page_class_name(base_name),
            default_path: self.default_path(base_name, map),
            accessors,
            methods,
        }
    }
}

/// Legal identifier not yet in `used`, numbered from 2 on collision.
fn unique_ident(raw: &str, used: &mut HashSet<String>) -> Identifier {
    let base = Identifier::legalize(raw);
    let mut candidate = base.as_str().to_string();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    Identifier::legalize(&candidate)
}

fn page_object_module(plan: &PagePlan<'_>, provenance: &str) -> TestgenResult<JsModule> {
    let mut class = JsClassBuilder::new(plan.class_name.as_str())?
        .extends("Page")?
        .constructor(
            &["page"],
            vec![Stmt::expr(Expr::super_().call(vec![Expr::ident("page")?]))],
        )?;

    for accessor in plan.accessors.values() {
        let chain = Expr::this().method_call(
            "getLocatorChain",
            vec![Expr::array(
                accessor.selectors.iter().map(Expr::str).collect(),
            )],
        )?;
        class = class.getter(accessor.ident.as_str(), vec![Stmt::ret_val(chain)])?;
    }

    let page = Expr::this().dot("page")?;
    for (ident, steps) in &plan.methods {
        let body = steps
            .iter()
            .map(|step| statement(step, Expr::this().member(plan.accessor(&step.selector_name)), page.clone()))
            .collect::<TestgenResult<Vec<_>>>()?;
        class = class.async_method(ident.as_str(), vec![], body)?;
    }

    class = class.method(
        "open",
        vec![Param::with_default("pathSegment", Expr::str(&plan.default_path))?],
        vec![Stmt::ret_val(
            Expr::super_().method_call("open", vec![Expr::ident("pathSegment")?])?,
        )],
    )?;

    Ok(JsModuleBuilder::new()
        .comment(provenance)
        .require_destructured(&["expect"], "@playwright/test")?
        .require("Page", "./page")?
        .blank()
        .class(class.build()?)
        .blank()
        .export(plan.class_name.as_str())?
        .build())
}

fn spec_module(base_name: &str, plan: &PagePlan<'_>, provenance: &str) -> TestgenResult<JsModule> {
    let page_obj = Expr::ident("pageObj")?;
    let page = Expr::ident("page")?;

    let mut tests = Vec::new();
    for (i, (ident, steps)) in plan.methods.iter().enumerate() {
        if i > 0 {
            tests.push(Stmt::Blank);
        }
        let mut body = vec![
            Stmt::const_decl(
                "pageObj",
                Expr::ident(plan.class_name.as_str())?.new_expr(vec![page.clone()]),
            )?,
            Stmt::expr(page_obj.clone().method_call("open", vec![])?.await_expr()),
        ];
        for step in *steps {
            let locator = page_obj.clone().member(plan.accessor(&step.selector_name));
            body.push(statement(step, locator, page.clone())?);
        }
        let case = Expr::ident("test")?.call(vec![
            Expr::str(ident.as_str()),
            Expr::async_arrow(vec![Param::destructure(&["page"])?], body),
        ]);
        tests.push(Stmt::expr(case));
    }

    let describe = Expr::ident("test")?.method_call(
        "describe",
        vec![
            Expr::str(format!("{} feature tests", base_name.replace('-', " "))),
            Expr::arrow(vec![], tests),
        ],
    )?;

    Ok(JsModuleBuilder::new()
        .comment(provenance)
        .require_destructured(&["test", "expect"], "@playwright/test")?
        .require(
            plan.class_name.as_str(),
            format!("../pageobjects/{base_name}.page"),
        )?
        .blank()
        .expr(describe)
        .build())
}

/// Playwright statement for one step.
///
/// `locator` is the element accessor expression and `page` the Playwright
/// page expression in the surrounding unit.
fn statement(step: &StepDescriptor, locator: Expr, page: Expr) -> TestgenResult<Stmt> {
    let arg = || Expr::str(step.argument_text());
    let call = |target: Expr, method: &str, args: Vec<Expr>| -> TestgenResult<Stmt> {
        Ok(Stmt::expr(target.method_call(method, args)?.await_expr()))
    };
    let expect = |target: Expr| -> TestgenResult<Expr> { Ok(Expr::ident("expect")?.call(vec![target])) };

    match &step.action {
        ActionKind::Click => call(locator, "click", vec![]),
        ActionKind::SetValue => call(locator, "fill", vec![arg()]),
        ActionKind::ClearText => call(locator, "fill", vec![Expr::str("")]),
        ActionKind::SelectDropdown => call(
            locator,
            "selectOption",
            vec![Expr::object(vec![("label", arg())])],
        ),
        ActionKind::UploadFile => call(locator, "setInputFiles", vec![arg()]),
        ActionKind::Hover => call(locator, "hover", vec![]),
        ActionKind::ScrollTo => call(locator, "scrollIntoViewIfNeeded", vec![]),
        ActionKind::WaitForVisible => call(
            locator,
            "waitFor",
            vec![Expr::object(vec![("state", Expr::str("visible"))])],
        ),
        ActionKind::AssertVisible => call(expect(locator)?, "toBeVisible", vec![]),
        ActionKind::AssertText => call(expect(locator)?, "toHaveText", vec![arg()]),
        ActionKind::AssertEnabled => call(expect(locator)?, "toBeEnabled", vec![]),
        ActionKind::AssertDisabled => call(expect(locator)?, "toBeDisabled", vec![]),
        ActionKind::AssertTitle => call(expect(page)?, "toHaveTitle", vec![arg()]),
        ActionKind::AssertUrlContains => call(
            expect(page)?,
            "toHaveURL",
            vec![Expr::regex_literal(step.argument_text())],
        ),
        ActionKind::Unknown | ActionKind::Unsupported(_) => Ok(Stmt::comment(format!(
            "⚠️ Unsupported action: {}",
            testgen_js_gen::escape_str(&step.action.to_string())
        ))),
    }
}
