//! Comment scanning and selector queries working together on real SCSS.

use horizon_stylelint_core::comments::scan_comments;
use horizon_stylelint_core::prelude::*;
use horizon_stylelint_core::selector::{UNION_SAFE_SUCCESSORS, union_class_name_offenders};

/// Offsets of `&` nodes flagged in the nested rules of `source`.
fn flagged(source: &str, allowed: &[NodeKind]) -> Vec<usize> {
    let sheet = parse_stylesheet(source);
    let mut found = vec![];
    for (id, rule) in sheet.rules() {
        let Some(parent) = sheet.parent(id).and_then(|p| sheet.closest_selector(p)) else {
            continue;
        };
        let parent = parse_selector_list(parent).unwrap();
        let selector = parse_selector_list(&rule.selector).unwrap();
        let start = sheet.get(id).unwrap().span.start;
        found.extend(
            union_class_name_offenders(&parent, &selector, allowed)
                .map(|n| start + n.source_index()),
        );
    }
    found
}

#[test]
fn direct_class_after_parent_is_found_without_a_combinator() {
    let allowed = [NodeKind::Combinator];
    assert_eq!(flagged(".parent { &.child {} }", &allowed), [10]);
    assert!(flagged(".parent { & > .child {} }", &allowed).is_empty());
}

#[test]
fn union_suffixes_are_found_with_the_safe_successors() {
    let source = "\
.card {
  &.is-open { }
  &-header { }
  @media (min-width: 600px) {
    &__body { }
  }
}
";
    let found = flagged(source, UNION_SAFE_SUCCESSORS);
    let lines = LineIndex::new(source);
    let positions: Vec<_> = found.iter().map(|&o| lines.line_col(source, o)).collect();
    assert_eq!(positions, [(3, 3), (5, 5)]);
}

#[test]
fn scanner_properties() {
    assert!(scan_comments("a { color: red; } /* // */ b { c: 'x//y'; }").next().is_none());
    assert!(scan_comments("'http://example.com'").next().is_none());

    let trailing: Vec<_> = scan_comments("a { color: red; } // trailing").collect();
    assert_eq!(trailing.len(), 1);
    assert!(trailing[0].inline_before);

    let standalone: Vec<_> = scan_comments("// standalone\ncode();").collect();
    assert_eq!(standalone.len(), 1);
    assert!(!standalone[0].inline_before && !standalone[0].inline_after);

    let source = "// a\n$x: 1; // b\n.c { d: e; }\n// f";
    let first: Vec<_> = scan_comments(source).collect();
    let second: Vec<_> = scan_comments(source).collect();
    assert_eq!(first, second);
}

#[test]
fn next_sibling_of_last_node_is_none_for_parsed_rules() {
    let sheet = parse_stylesheet(".a { &-b, .c > d:hover { } } e::after { }");
    for (_, rule) in sheet.rules() {
        let list = parse_selector_list(&rule.selector).unwrap();
        for selector in &list.selectors {
            let last = NodeRef::new(selector, selector.nodes.len() - 1).unwrap();
            assert!(last.next_sibling().is_none(), "{}", rule.selector);
        }
    }
}

#[test]
fn markup_roots_keep_file_offsets() {
    let source = "<div></div>\n<style>\n.a { } // note\n</style>\n";
    let roots = split_roots(source, Syntax::from_path("page.html"));
    assert_eq!(roots.len(), 1);

    let root = roots[0];
    let comment = scan_comments(root.text).next().unwrap();
    let offset = root.offset + comment.span.start;
    assert_eq!(&source[offset..offset + 7], "// note");
}
