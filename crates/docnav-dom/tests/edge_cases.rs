//! Edge case tests for docnav-dom
//!
//! Tree surgery and selector queries as used by region swapping.

use docnav_dom::*;

fn region(doc: &mut Document, tag: &str, class: &str, text: &str) -> NodeId {
    let body = doc.body();
    let tree = doc.tree_mut();
    let id = tree.create_element(tag);
    tree.element_mut(id).unwrap().set_attr("class", class);
    let t = tree.create_text(text);
    tree.append_child(id, t);
    tree.append_child(body, id);
    id
}

// ============================================================================
// IMPORT TESTS
// ============================================================================

#[test]
fn test_replace_inner_keeps_container() {
    let mut live = Document::new("https://docs.example.com/index.html");
    let main = region(&mut live, "div", "main", "old");
    live.tree_mut().element_mut(main).unwrap().set_attr("data-theme", "dark");

    let mut fetched = Document::new("https://docs.example.com/guide.html");
    let new_main = region(&mut fetched, "section", "main", "new");

    let tree = live.tree_mut();
    tree.remove_children(main);
    tree.import_children(main, fetched.tree(), new_main);

    assert_eq!(live.tree().text_content(main), "new");
    let elem = live.tree().element(main).unwrap();
    assert_eq!(elem.tag_name(), "div");
    assert_eq!(elem.get_attr("data-theme"), Some("dark"));
    assert_eq!(live.query_selector(".main").unwrap(), Some(main));
}

#[test]
fn test_import_preserves_attributes_and_nesting() {
    let mut src = Document::new("about:blank");
    let body = src.body();
    let tree = src.tree_mut();
    let ul = tree.create_element("ul");
    let li = tree.create_element("li");
    let a = tree.create_element("a");
    tree.element_mut(a).unwrap().set_attr("href", "/guide/install.html");
    tree.element_mut(a).unwrap().set_attr("class", "reference internal current");
    tree.append_child(body, ul);
    tree.append_child(ul, li);
    tree.append_child(li, a);

    let mut dst = Document::new("about:blank");
    let dst_body = dst.body();
    dst.tree_mut().import_children(dst_body, src.tree(), body);

    let link = dst.query_selector("a.current[href]").unwrap().unwrap();
    assert_eq!(dst.tree().element(link).unwrap().get_attr("href"), Some("/guide/install.html"));
    let up: Vec<_> = dst.tree().ancestors(link).collect();
    assert_eq!(up.len(), 5); // li, ul, body, html, document
}

#[test]
fn test_import_empty_region() {
    let mut src = Document::new("about:blank");
    let empty = region(&mut src, "div", "toc-tree", "");
    src.tree_mut().remove_children(empty);

    let mut dst = Document::new("about:blank");
    let toc = region(&mut dst, "div", "toc-tree", "stale");
    dst.tree_mut().remove_children(toc);
    let copied = dst.tree_mut().import_children(toc, src.tree(), empty);

    assert_eq!(copied, 0);
    assert_eq!(dst.tree().children(toc).count(), 0);
}

// ============================================================================
// QUERY TESTS
// ============================================================================

#[test]
fn test_query_selector_document_order() {
    let mut doc = Document::new("about:blank");
    let first = region(&mut doc, "div", "main", "1");
    let second = region(&mut doc, "div", "main", "2");

    assert_eq!(doc.query_selector(".main").unwrap(), Some(first));
    assert_eq!(doc.query_selector_all("div.main").unwrap(), vec![first, second]);
}

#[test]
fn test_detached_nodes_not_found() {
    let mut doc = Document::new("about:blank");
    let main = region(&mut doc, "div", "main", "x");
    doc.tree_mut().detach(main);

    assert_eq!(doc.query_selector(".main").unwrap(), None);
}

#[test]
fn test_class_toggle_visible_to_selectors() {
    let mut doc = Document::new("about:blank");
    let main = region(&mut doc, "div", "main", "x");
    doc.tree_mut().element_mut(main).unwrap().add_class("page-transitioning-out");

    assert_eq!(doc.query_selector(".page-transitioning-out").unwrap(), Some(main));

    doc.tree_mut().element_mut(main).unwrap().remove_class("page-transitioning-out");
    assert_eq!(doc.query_selector(".page-transitioning-out").unwrap(), None);
}
