//! Integration tests for selector parsing and escaping.

use pinpoint_css::selector::{
    AttributeSelector, Combinator, NthExpr, PseudoClass, SimpleSelector,
};
use pinpoint_css::{SelectorError, parse_selector, serialize_identifier, serialize_string};

fn subject(raw: &str) -> Vec<SimpleSelector> {
    let list = parse_selector(raw).expect("selector should parse");
    assert_eq!(list.0.len(), 1);
    list.0[0].complex.subject.simple_selectors.clone()
}

#[test]
fn test_parse_compound() {
    assert_eq!(
        subject("li#main.a.b"),
        vec![
            SimpleSelector::Type("li".to_string()),
            SimpleSelector::Id("main".to_string()),
            SimpleSelector::Class("a".to_string()),
            SimpleSelector::Class("b".to_string()),
        ]
    );
}

#[test]
fn test_parse_attribute_forms() {
    assert_eq!(
        subject(r#"[name="q"][lang|=en][data-x]"#),
        vec![
            SimpleSelector::Attribute(AttributeSelector::Equals(
                "name".to_string(),
                "q".to_string()
            )),
            SimpleSelector::Attribute(AttributeSelector::DashMatch(
                "lang".to_string(),
                "en".to_string()
            )),
            SimpleSelector::Attribute(AttributeSelector::Exists("data-x".to_string())),
        ]
    );
}

#[test]
fn test_parse_nth_child() {
    assert_eq!(
        subject("li:nth-child(2)"),
        vec![
            SimpleSelector::Type("li".to_string()),
            SimpleSelector::PseudoClass(PseudoClass::NthChild(NthExpr::index(2))),
        ]
    );
    assert_eq!(
        subject(":nth-child(2n + 1)"),
        vec![SimpleSelector::PseudoClass(PseudoClass::NthChild(NthExpr {
            a: 2,
            b: 1
        }))]
    );
}

#[test]
fn test_combinator_chain_is_right_to_left() {
    let list = parse_selector("div > ul li").expect("parse");
    let complex = &list.0[0].complex;
    assert_eq!(
        complex.subject.simple_selectors,
        vec![SimpleSelector::Type("li".to_string())]
    );
    let chain: Vec<Combinator> = complex.combinators.iter().map(|(c, _)| *c).collect();
    assert_eq!(chain, vec![Combinator::Descendant, Combinator::Child]);
}

#[test]
fn test_selector_list() {
    let list = parse_selector("h1, h2 ,h3").expect("parse");
    assert_eq!(list.0.len(), 3);
}

#[test]
fn test_nth_expr_extreme_offsets() {
    let below = NthExpr { a: 1, b: i32::MIN };
    assert!(below.matches(1));
    assert!(below.matches(i32::MAX));
    let above = NthExpr { a: -1, b: i32::MAX };
    assert!(above.matches(1));
    let stepped = NthExpr { a: i32::MIN, b: i32::MAX };
    assert!(!stepped.matches(1));
    assert!(!NthExpr::index(i32::MIN).matches(1));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_selector("   "), Err(SelectorError::Empty));
    assert!(matches!(
        parse_selector("ul >"),
        Err(SelectorError::DanglingCombinator { .. })
    ));
    assert!(matches!(
        parse_selector("a,"),
        Err(SelectorError::DanglingCombinator { .. })
    ));
    assert!(matches!(
        parse_selector("#"),
        Err(SelectorError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        parse_selector("#1st"),
        Err(SelectorError::UnexpectedChar { found: '1', .. })
    ));
    assert!(matches!(
        parse_selector("[name=\"open"),
        Err(SelectorError::UnexpectedEnd { .. })
    ));
    assert_eq!(
        parse_selector("a:hover"),
        Err(SelectorError::UnsupportedPseudoClass("hover".to_string()))
    );
    assert!(matches!(
        parse_selector("li:nth-child(foo)"),
        Err(SelectorError::InvalidNth(_))
    ));
}

#[test]
fn test_escaped_identifiers_read_back() {
    for raw in ["1st", "a:b", "has space", "-", "-9", "ünï", "tab\there", "x.y#z"] {
        let selector = format!("#{}", serialize_identifier(raw));
        assert_eq!(
            subject(&selector),
            vec![SimpleSelector::Id(raw.to_string())],
            "identifier {raw:?} serialized as {selector:?}"
        );
    }
}

#[test]
fn test_escaped_strings_read_back() {
    for raw in ["plain", "say \"hi\"", "back\\slash", "line\nbreak", ""] {
        let selector = format!("[title={}]", serialize_string(raw));
        assert_eq!(
            subject(&selector),
            vec![SimpleSelector::Attribute(AttributeSelector::Equals(
                "title".to_string(),
                raw.to_string()
            ))],
            "string {raw:?} serialized as {selector:?}"
        );
    }
}
