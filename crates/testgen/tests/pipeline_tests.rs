//! Feature file → StepMap → page object and spec, through the file system.

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use testgen::prelude::*;

const CHECKOUT: &str = r#"Feature: Checkout

  Background:
    Given the user navigates to "cart"

  Scenario: Pay by card
    When the user enters "4111 1111 1111 1111" into the card number field
    And the user selects "Visa" from the payment method dropdown
    And the user clicks checkout
    Then the URL should contain "/thank-you"

  Scenario: Empty cart
    When the user clicks the cart
    Then the checkout button should be disabled
    And the user does a barrel roll
"#;

fn project() -> (TempDir, ProjectLayout) {
    let dir = TempDir::new().unwrap();
    let layout = ProjectLayout::from_root(dir.path());
    std::fs::create_dir_all(&layout.feature_dir).unwrap();
    std::fs::write(layout.feature_dir.join("checkout.feature"), CHECKOUT).unwrap();
    (dir, layout)
}

fn classify_all(layout: &ProjectLayout, options: WriteOptions) -> Vec<FileReport> {
    let config = SelectorConfig::load(layout).unwrap();
    let classifier = StepClassifier::new(config);
    select_inputs(&layout.feature_dir, FEATURE_SUFFIX, true, &[])
        .unwrap()
        .iter()
        .map(|path| classify_file(path, layout, &classifier, options).unwrap())
        .collect()
}

#[test]
fn step_map_reflects_feature() {
    let (_dir, layout) = project();
    classify_all(&layout, WriteOptions::default());

    let map = StepMap::load(&layout.step_map_path("checkout")).unwrap();
    let names: Vec<_> = map.scenarios().map(|(name, _)| name).collect();
    assert_eq!(names, ["Pay by card", "Empty cart"]);

    let pay = map.get("Pay by card").unwrap();
    assert_eq!(pay.len(), 5, "background step is prepended");
    assert_eq!(pay[0].action, ActionKind::Unknown);
    assert_eq!(pay[1].selector_name, "cardNumberField");
    assert_eq!(pay[1].argument.as_deref(), Some("4111 1111 1111 1111"));
    assert_eq!(pay[2].action, ActionKind::SelectDropdown);
    assert_eq!(pay[2].selector_name, "paymentMethodDropdown");
    assert_eq!(pay[3].selector_name, "checkoutButton");
    assert_eq!(pay[4].action, ActionKind::AssertUrlContains);

    let empty = map.get("Empty cart").unwrap();
    assert_eq!(empty.len(), 4, "background step is prepended");
    assert_eq!(empty[0], pay[0]);
    assert_eq!(empty[1].action, ActionKind::Click);
    assert_eq!(empty[2].action, ActionKind::AssertDisabled);
    assert_eq!(empty[3].action, ActionKind::Unknown);
}

#[test]
fn aliases_file_changes_primary_selector() {
    let (_dir, layout) = project();
    std::fs::write(&layout.alias_file, r##"{"checkoutButton": "#checkout"}"##).unwrap();
    classify_all(&layout, WriteOptions::default());

    let map = StepMap::load(&layout.step_map_path("checkout")).unwrap();
    assert_eq!(map.get("Pay by card").unwrap()[3].selector, "#checkout");
}

#[test]
fn existing_step_map_is_kept_without_force() {
    let (_dir, layout) = project();
    std::fs::create_dir_all(&layout.step_map_dir).unwrap();
    std::fs::write(layout.step_map_path("checkout"), "{}").unwrap();

    let reports = classify_all(&layout, WriteOptions::default());
    assert!(matches!(reports[0].outcome, WriteOutcome::Skipped { .. }));
    assert_eq!(std::fs::read_to_string(layout.step_map_path("checkout")).unwrap(), "{}");

    let reports = classify_all(&layout, WriteOptions::force(true));
    assert!(matches!(reports[0].outcome, WriteOutcome::Written(_)));
    assert_ne!(std::fs::read_to_string(layout.step_map_path("checkout")).unwrap(), "{}");
}

#[test]
fn generated_sources() {
    let (_dir, layout) = project();
    classify_all(&layout, WriteOptions::default());
    let report = generate_file(
        &layout.step_map_path("checkout"),
        &layout,
        &CodeGenerator::new(),
        WriteOptions::default(),
    )
    .unwrap();
    assert_eq!(report.base_name, "checkout");

    let page = std::fs::read_to_string(layout.page_object_path("checkout")).unwrap();
    assert!(page.contains("class CheckoutPage extends Page {"));
    // only argument-bearing steps keep their quoted text, so the navigation
    // step leaves no path hint and the base name is used
    assert!(page.contains("open(pathSegment = \"checkout\") {"));
    assert!(page.contains("async payCard() {"));
    assert!(page.contains("async cart() {"));
    assert!(page.contains("await this.paymentMethodDropdown.selectOption({ label: \"Visa\" });"));
    assert!(page.contains("await expect(this.page).toHaveURL(/\\/thank-you/);"));
    assert!(page.contains("// ⚠️ Unsupported action: unknown"));
    assert_eq!(page.matches("get checkoutButton()").count(), 1);

    let spec = std::fs::read_to_string(layout.spec_path("checkout")).unwrap();
    assert!(spec.contains("const CheckoutPage = require(\"../pageobjects/checkout.page\");"));
    assert!(spec.contains("test.describe(\"checkout feature tests\", () => {"));
    assert!(spec.contains("await expect(pageObj.checkoutButton).toBeDisabled();"));
    assert_eq!(spec.matches("await pageObj.open();").count(), 2);
}

#[test]
fn dry_run_writes_nothing_but_reports_targets() {
    let (_dir, layout) = project();
    classify_all(&layout, WriteOptions::default());
    let report = generate_file(
        &layout.step_map_path("checkout"),
        &layout,
        &CodeGenerator::new(),
        WriteOptions::default().with_dry_run(true),
    )
    .unwrap();
    match report.outcome {
        WriteOutcome::Preview(paths) => {
            assert_eq!(paths, [layout.page_object_path("checkout"), layout.spec_path("checkout")]);
        }
        other => panic!("expected preview, got {other:?}"),
    }
    assert!(!layout.page_object_dir.exists());
    assert!(!layout.spec_dir.exists());
}

#[test]
fn malformed_step_map_fails_only_that_file() {
    let (_dir, layout) = project();
    std::fs::create_dir_all(&layout.step_map_dir).unwrap();
    std::fs::write(layout.step_map_path("broken"), "{ not json").unwrap();
    std::fs::write(layout.step_map_path("fine"), "{}").unwrap();

    let generator = CodeGenerator::new();
    let inputs = select_inputs(&layout.step_map_dir, STEP_MAP_SUFFIX, true, &[]).unwrap();
    let results: Vec<_> = inputs
        .iter()
        .map(|path| generate_file(path, &layout, &generator, WriteOptions::default()))
        .collect();

    assert!(matches!(results[0], Err(TestgenError::MalformedStepMap { .. })));
    assert!(results[1].is_ok());
    assert!(layout.spec_path("fine").exists());
}
