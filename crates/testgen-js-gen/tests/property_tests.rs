//! Property-based tests for testgen-js-gen.
//!
//! Uses proptest to verify invariants hold for arbitrary inputs.

use proptest::prelude::*;
use testgen_js_gen::prelude::*;

// === Identifier Property Tests ===

proptest! {
    /// Valid identifiers must be accepted.
    #[test]
    fn prop_valid_identifier_accepted(
        name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,20}"
    ) {
        if !Identifier::RESERVED_WORDS.contains(&name.as_str()) {
            let result = Identifier::new(&name);
            prop_assert!(result.is_ok(), "Valid identifier rejected: {}", name);
        }
    }

    /// Identifiers starting with digits must be rejected.
    #[test]
    fn prop_digit_start_rejected(
        digit in "[0-9]",
        suffix in "[a-zA-Z0-9_$]{0,10}"
    ) {
        let name = format!("{}{}", digit, suffix);
        prop_assert!(Identifier::new(&name).is_err(), "Digit-start should be rejected: {}", name);
    }

    /// Reserved words must be rejected.
    #[test]
    fn prop_reserved_word_rejected(
        idx in 0..Identifier::RESERVED_WORDS.len()
    ) {
        let word = Identifier::RESERVED_WORDS[idx];
        prop_assert!(Identifier::new(word).is_err(), "Reserved word should be rejected: {}", word);
    }

    /// Legalizing any text yields an identifier that validates.
    #[test]
    fn prop_legalize_always_valid(raw in "\\PC{0,30}") {
        let legal = Identifier::legalize(&raw);
        prop_assert!(Identifier::new(legal.as_str()).is_ok(), "{:?} -> {}", raw, legal);
    }

    /// Legalizing a valid identifier is the identity.
    #[test]
    fn prop_legalize_identity_on_valid(name in "[a-z][a-zA-Z0-9]{0,15}") {
        if !Identifier::RESERVED_WORDS.contains(&name.as_str()) {
            let legal = Identifier::legalize(&name);
            prop_assert_eq!(legal.as_str(), name.as_str());
        }
    }
}

// === Literal Property Tests ===

proptest! {
    /// Strings of safe characters are printed verbatim between quotes.
    #[test]
    fn prop_string_quoted(s in "[a-zA-Z0-9 ]{1,50}") {
        let module = JsModuleBuilder::new()
            .const_decl("s", Expr::str(&s)).unwrap()
            .build();
        let js = generate(&module);
        let quoted = format!("\"{s}\"");
        prop_assert!(js.contains(&quoted), "missing {} in {}", quoted, js);
    }

    /// A printed string literal never spans lines.
    #[test]
    fn prop_string_single_line(s in "\\PC{0,40}|[\n\r\t\"\\\\]{1,5}") {
        let module = JsModuleBuilder::new()
            .const_decl("s", Expr::str(&s)).unwrap()
            .build();
        let js = generate(&module);
        prop_assert_eq!(js.lines().count(), 1, "literal broke onto several lines: {:?}", js);
    }

    /// Special characters in strings must be escaped.
    #[test]
    fn prop_special_chars_escaped(
        prefix in "[a-zA-Z]{0,10}",
        suffix in "[a-zA-Z]{0,10}"
    ) {
        for (c, escaped) in &[
            ('"', "\\\""),
            ('\\', "\\\\"),
            ('\n', "\\n"),
            ('\r', "\\r"),
            ('\t', "\\t"),
        ] {
            let s = format!("{}{}{}", prefix, c, suffix);
            let module = JsModuleBuilder::new()
                .const_decl("s", Expr::str(&s)).unwrap()
                .build();
            let js = generate(&module);
            prop_assert!(js.contains(escaped), "{:?} should be escaped to '{}'", c, escaped);
        }
    }

    /// A regex literal built from text never terminates early.
    #[test]
    fn prop_regex_literal_has_no_bare_slash(text in "[a-z/\\.?*]{0,20}") {
        let js = generate(&JsModuleBuilder::new().expr(Expr::regex_literal(&text)).build());
        let body = js.trim_end().trim_end_matches(';');
        let inner = &body[1..body.len() - 1];
        let mut escaped = false;
        for c in inner.chars() {
            prop_assert!(escaped || c != '/', "bare slash in {}", js);
            escaped = !escaped && c == '\\';
        }
    }
}

// === Code Generation Property Tests ===

proptest! {
    /// Code generation must be deterministic.
    #[test]
    fn prop_deterministic_generation(
        class_name in "[A-Z][a-zA-Z0-9]{0,10}",
        getters in prop::collection::btree_set("[a-z][a-zA-Z]{0,8}", 0..5)
    ) {
        let build = || {
            let mut builder = JsClassBuilder::new(&class_name).unwrap();
            for g in &getters {
                if Identifier::RESERVED_WORDS.contains(&g.as_str()) {
                    continue;
                }
                builder = builder.getter(g, vec![Stmt::ret()]).unwrap();
            }
            JsModuleBuilder::new().class(builder.build().unwrap()).build()
        };
        prop_assert_eq!(generate(&build()), generate(&build()));
    }

    /// Braces in generated classes are balanced.
    #[test]
    fn prop_class_braces_balanced(
        methods in prop::collection::btree_set("[a-z][a-zA-Z]{0,8}", 0..6)
    ) {
        let mut builder = JsClassBuilder::new("GeneratedPage").unwrap().extends("Page").unwrap();
        for m in &methods {
            if Identifier::RESERVED_WORDS.contains(&m.as_str()) {
                continue;
            }
            builder = builder.async_method(m, vec![], vec![Stmt::comment("{ not a brace }")]).unwrap();
        }
        let js = generate(&JsModuleBuilder::new().class(builder.build().unwrap()).build());
        let code: String = js
            .lines()
            .filter(|l| !l.trim_start().starts_with("//"))
            .collect();
        let opens = code.matches('{').count();
        let closes = code.matches('}').count();
        prop_assert_eq!(opens, closes);
    }
}
