//! Integration tests for the style manager cascade over a core node tree.

use trellis_core::{NodeId, NodeTree};
use trellis_style::prelude::*;
use trellis_style::selector::{CLASS_WEIGHT, ID_WEIGHT};

fn compute(
    manager: &StyleManager,
    tree: &NodeTree,
    node: NodeId,
    context: StyleContext<'_>,
) -> Style {
    let node = NodeRef::new(tree, node).expect("node exists");
    manager.compute_style(&node, &context)
}

#[test]
fn parsed_selector_shape() {
    let sel: Selector = "Button.primary:hover".parse().unwrap();
    assert_eq!(sel.tag(), Some("button"));
    assert_eq!(sel.id(), None);
    assert_eq!(sel.classes().iter().collect::<Vec<_>>(), ["primary"]);
    assert_eq!(sel.pseudo(), PseudoStates::HOVER);
    assert!(sel.next().is_none());
}

#[test]
fn weight_grows_with_id_and_class() {
    let base = Selector::parse("Panel Button").unwrap().weight();
    let with_class = Selector::parse("Panel Button.primary").unwrap().weight();
    let with_id = Selector::parse("Panel Button#ok").unwrap().weight();
    assert_eq!(with_class - base, CLASS_WEIGHT);
    assert_eq!(with_id - base, ID_WEIGHT);
}

#[test]
fn precedence_order() {
    let mut manager = StyleManager::new();
    manager.style("*").set(FloatKey::Width, 1.0).set(FloatKey::Height, 1.0);
    manager.style("Box").set(FloatKey::Width, 2.0).set(FloatKey::Height, 2.0);
    manager.style("Box.big").set(FloatKey::Width, 3.0);

    let mut tree = NodeTree::new();
    let node = tree.create_node("Box");
    tree.add_class(node, "big").unwrap();

    let inline = Style::new().with(FloatKey::Height, 9.0);
    let defaults = Style::new()
        .with(FloatKey::Width, 0.0)
        .with(FloatKey::Height, 0.0)
        .with(FloatKey::MinWidth, 5.0);

    let table = InheritableValues::NONE;
    let style = compute(
        &manager,
        &tree,
        node,
        StyleContext::new(&table).with_inline(&inline).with_defaults(&defaults),
    );

    assert_eq!(style.get(FloatKey::Width), 3.0);
    assert_eq!(style.get(FloatKey::Height), 9.0);
    assert_eq!(style.get(FloatKey::MinWidth), 5.0);
}

#[test]
fn inherited_values_lose_to_declarations() {
    let mut manager = StyleManager::new();
    manager.style("Label").set(ColorKey::Color, Color::BLUE);

    let mut tree = NodeTree::new();
    let parent = tree.create_node("Panel");
    let label = tree.create_child(parent, "Label").unwrap();
    let note = tree.create_child(parent, "Note").unwrap();

    let parent_style = Style::new()
        .with(ColorKey::Color, Color::RED)
        .with(FloatKey::FontSize, 11.0);
    let table = InheritableValues::TEXT;
    let context = StyleContext::new(&table).with_parent(&parent_style);

    let label_style = compute(&manager, &tree, label, context);
    assert_eq!(label_style.get(ColorKey::Color), Color::BLUE);
    assert_eq!(label_style.get(FloatKey::FontSize), 11.0);

    let note_style = compute(&manager, &tree, note, context);
    assert_eq!(note_style.get(ColorKey::Color), Color::RED);
}

#[test]
fn fast_path_does_not_change_results() {
    let selectors = [
        "Window Panel Label",
        "Panel > Label",
        "Window > Label",
        "* * *",
        "Label:first-child",
    ];

    let mut tree = NodeTree::new();
    let window = tree.create_node("Window");
    let panel = tree.create_child(window, "Panel").unwrap();
    let direct = tree.create_child(window, "Label").unwrap();
    let nested = tree.create_child(panel, "Label").unwrap();

    let fast = SelectorMatcher::new(true);
    let slow = SelectorMatcher::new(false);
    for text in selectors {
        let sel = Selector::parse(text).unwrap();
        for id in [window, panel, direct, nested] {
            let node = NodeRef::new(&tree, id).unwrap();
            assert_eq!(fast.matches(&sel, &node), slow.matches(&sel, &node), "{text}");
        }
    }
}

#[test]
fn manager_without_fast_path() {
    let config = StyleManagerConfig::default().with_depth_fast_path(false);
    let mut manager = StyleManager::with_config(config);
    manager.style("Window Label").set(IntKey::MaxLines, 2);

    let mut tree = NodeTree::new();
    let window = tree.create_node("Window");
    let label = tree.create_child(window, "Label").unwrap();

    let table = InheritableValues::NONE;
    let style = compute(&manager, &tree, label, StyleContext::new(&table));
    assert_eq!(style.get(IntKey::MaxLines), 2);
}

#[test]
fn property_names_resolve_to_keys() {
    assert_eq!(FloatKey::parse_name("flexGrow"), Ok(FloatKey::FlexGrow));
    assert_eq!(StringKey::from_name("justify_content"), Some(StringKey::JustifyContent));
    assert!(matches!(
        ColorKey::parse_name("font-size"),
        Err(trellis_style::Error::UnknownProperty { .. })
    ));
    assert!(matches!(
        "purple".parse::<Color>(),
        Err(trellis_style::Error::InvalidColor(_))
    ));
}
