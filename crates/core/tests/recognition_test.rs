use kospec_core::{
    Classifier, Config, Confidence, KotlinParser, NoMatch, NodeKind, SpecScanner, SpecStyle,
    StyleRegistry, TestKind,
};

fn scanner() -> SpecScanner {
    SpecScanner::new().unwrap()
}

fn paths(scanner: &mut SpecScanner, source: &str) -> Vec<(String, TestKind)> {
    let analysis = scanner.analyze_source(source).unwrap();
    analysis
        .specs
        .iter()
        .flat_map(|spec| spec.tests.iter())
        .map(|test| (test.path.clone(), test.kind))
        .collect()
}

#[test]
fn test_flat_style_tests() {
    let source = r#"
import io.kotest.core.spec.style.StringSpec

class MathSpec : StringSpec() {
    init {
        "adds numbers" { }
        "divides numbers".config(enabled = false) { }
    }
}
"#;
    let tests = paths(&mut scanner(), source);
    assert_eq!(
        tests,
        vec![
            ("adds numbers".to_string(), TestKind::Test),
            ("divides numbers".to_string(), TestKind::Test),
        ]
    );
}

#[test]
fn test_bare_and_config_forms_are_equivalent() {
    let bare = r#"
class A : StringSpec() {
    init {
        "x" { }
    }
}
"#;
    let chained = r#"
class A : StringSpec() {
    init {
        "x".config(timeout = 5) { }
    }
}
"#;
    let mut scanner = scanner();
    assert_eq!(paths(&mut scanner, bare), paths(&mut scanner, chained));
    assert_eq!(paths(&mut scanner, bare), vec![("x".to_string(), TestKind::Test)]);
}

#[test]
fn test_nested_style_paths() {
    let source = r#"
package com.example

import io.kotest.core.spec.style.ExpectSpec

class CalculatorSpec : ExpectSpec({
    context("A") {
        context("B") {
            expect("C") { }
        }
    }
})
"#;
    let tests = paths(&mut scanner(), source);
    assert_eq!(
        tests,
        vec![
            ("A".to_string(), TestKind::Container),
            ("A -- B".to_string(), TestKind::Container),
            ("A -- B -- C".to_string(), TestKind::Test),
        ]
    );
}

#[test]
fn test_fun_spec_in_initializer() {
    let source = r#"
import io.kotest.core.spec.style.FunSpec

class ParserSpec : FunSpec() {
    init {
        context("parsing") {
            test("empty input") { }
            test("slow input").config(invocations = 3) { }
        }
    }
}
"#;
    let tests = paths(&mut scanner(), source);
    assert_eq!(
        tests,
        vec![
            ("parsing".to_string(), TestKind::Container),
            ("parsing -- empty input".to_string(), TestKind::Test),
            ("parsing -- slow input".to_string(), TestKind::Test),
        ]
    );
}

#[test]
fn test_chain_walk_resolves_through_intermediate_classes() {
    let source = r#"
package app

import io.kotest.core.spec.style.StringSpec

abstract class C1 : StringSpec()
abstract class C2 : C1()
class C3 : C2()
"#;
    let mut scanner = scanner();
    let analysis = scanner.analyze_source(source).unwrap();
    let c3 = analysis.specs.iter().find(|spec| spec.name == "C3").unwrap();
    assert_eq!(c3.fq_name, "app.C3");
    assert_eq!(c3.style, SpecStyle::StringSpec);
    assert_eq!(c3.confidence, Confidence::Resolved);
}

#[test]
fn test_textual_fallback_without_resolution() {
    let source = r#"
class Foo : StringSpec() {
    init {
        "works" { }
    }
}
"#;
    let config = Config {
        resolve_symbols: false,
        ..Default::default()
    };
    let mut scanner = SpecScanner::with_config(config).unwrap();
    let analysis = scanner.analyze_source(source).unwrap();

    assert_eq!(analysis.specs.len(), 1);
    assert_eq!(analysis.specs[0].style, SpecStyle::StringSpec);
    assert_eq!(analysis.specs[0].confidence, Confidence::Textual);
    assert_eq!(analysis.specs[0].tests.len(), 1);
}

#[test]
fn test_nested_syntax_in_flat_spec_is_not_a_test() {
    let source = r#"
import io.kotest.core.spec.style.StringSpec

class Foo : StringSpec() {
    init {
        expect("x") { }
    }
}
"#;
    let mut parser = KotlinParser::new().unwrap();
    let tree = parser.parse(source).unwrap();
    let registry = StyleRegistry::new();
    let classifier = Classifier::new(&registry);

    let call = tree
        .root()
        .descendants()
        .find(|node| node.is(NodeKind::CallExpression))
        .unwrap();
    assert_eq!(classifier.recognize(call), Err(NoMatch::Shape));

    let mut scanner = scanner();
    assert!(paths(&mut scanner, source).is_empty());
}

#[test]
fn test_callbacks_are_direct_children_only() {
    let source = r#"
import io.kotest.core.spec.style.FunSpec

class HookSpec : FunSpec() {
    init {
        beforeTest { }
        afterSpec { }
        context("group") {
            beforeTest { }
        }
    }
}
"#;
    let analysis = scanner().analyze_source(source).unwrap();
    let kinds: Vec<_> = analysis.specs[0]
        .callbacks
        .iter()
        .map(|callback| callback.kind.keyword())
        .collect();
    assert_eq!(kinds, vec!["beforeTest", "afterSpec"]);
}

#[test]
fn test_incomplete_source_yields_nothing() {
    let source = r#"
import io.kotest.core.spec.style.ExpectSpec

class Broken : ExpectSpec() {
    init {
        context(
"#;
    let mut scanner = scanner();
    let analysis = scanner.analyze_source(source).unwrap();
    assert_eq!(analysis.test_count(), 0);

    let tree = scanner.parse("context(").unwrap();
    let registry = StyleRegistry::new();
    let classifier = Classifier::new(&registry);
    for node in tree.root().descendants() {
        for style in registry.iter() {
            assert!(style.recognize(node, &classifier).is_none());
        }
        assert!(classifier.recognize_from_leaf(node).is_none());
    }
}

#[test]
fn test_recognition_is_idempotent() {
    let source = r#"
class A : ExpectSpec({
    context("outer") {
        expect("inner") { }
    }
})
"#;
    let mut scanner = scanner();
    let first = scanner.analyze_source(source).unwrap();
    let second = scanner.analyze_source(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_recognize_from_leaf_matches_full_recognition() {
    let source = r#"
class A : ExpectSpec({
    context("outer") {
        expect("inner") { }
    }
})
"#;
    let mut parser = KotlinParser::new().unwrap();
    let tree = parser.parse(source).unwrap();
    let registry = StyleRegistry::new();
    let classifier = Classifier::new(&registry);

    let from_leaves: Vec<_> = tree
        .root()
        .descendants()
        .filter_map(|leaf| classifier.recognize_from_leaf(leaf))
        .map(|test| test.path)
        .collect();
    assert_eq!(from_leaves, vec!["outer", "outer -- inner"]);
}

#[test]
fn test_generated_specs_recognize_their_own_names() {
    let names = ["say \"hi\"", "back\\slash", "costs $x", "tab\tand ${braces}"];
    let mut scanner = scanner();

    for style in SpecStyle::ALL {
        for name in names {
            let source = style.generate_spec("Generated", name);
            let analysis = scanner.analyze_source(&source).unwrap();

            assert_eq!(analysis.specs.len(), 1, "{source}");
            assert_eq!(analysis.specs[0].style, style);
            let recognized: Vec<_> = analysis.specs[0]
                .tests
                .iter()
                .map(|test| test.name.as_str())
                .collect();
            assert_eq!(recognized, vec![name], "{source}");
        }
    }
}
