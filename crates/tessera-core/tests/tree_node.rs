use tessera_core::tree::{NodeKind, Number};
use tessera_core::TreeNode;

use indexmap::IndexMap;

#[test]
fn parse_preserves_key_order() {
    let node = TreeNode::parse(r#"{"z": 1, "a": [true, null], "m": {"k": "v"}}"#).unwrap();

    assert_eq!(node.kind(), NodeKind::Map);
    assert_eq!(node.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(node.get("z").and_then(TreeNode::as_i64), Some(1));
    assert_eq!(node.get("a").map(TreeNode::len), Some(2));
    assert!(node.get("a").and_then(|a| a.at(1)).unwrap().is_null());
    assert_eq!(node.get("m").and_then(|m| m.get("k")).and_then(TreeNode::as_str), Some("v"));
}

#[test]
fn display_is_compact_json() {
    let node: TreeNode = [
        ("name", TreeNode::from("ada")),
        ("tags", TreeNode::from_iter([TreeNode::from(1), TreeNode::from(2.5)])),
        ("none", TreeNode::Null),
    ]
    .into_iter()
    .collect();

    assert_eq!(node.to_string(), r#"{"name":"ada","tags":[1,2.5],"none":null}"#);
    assert_eq!(node.to_string().parse::<TreeNode>().unwrap(), node);
}

#[test]
fn pretty_printing() {
    let node = TreeNode::parse(r#"{"a": [1]}"#).unwrap();
    assert_eq!(node.to_json_pretty().unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
}

#[test]
fn numbers_compare_across_sources() {
    assert_eq!(TreeNode::from(5u64), TreeNode::from(5i8));
    assert_eq!(TreeNode::from(5u32), TreeNode::parse("5").unwrap());
    assert_eq!(TreeNode::from(u64::MAX).as_number(), Some(Number::U64(u64::MAX)));
    assert_ne!(TreeNode::from(5.0), TreeNode::from(5));
}

#[test]
fn integral_floats_read_as_integers() {
    assert_eq!(TreeNode::from(42.0).as_i64(), Some(42));
    assert_eq!(TreeNode::from(-1.0).as_u64(), None);
    assert_eq!(TreeNode::from(4.5).as_i64(), None);
    assert_eq!(TreeNode::from(7).as_f64(), Some(7.0));
    assert!(Number::from(3u8).is_integer());
}

#[test]
fn non_finite_floats_serialize_as_null() {
    let node = TreeNode::from_iter([TreeNode::from(f64::NAN), TreeNode::from(f64::INFINITY)]);
    assert_eq!(node.to_string(), "[null,null]");

    let json = serde_json::Value::from(node);
    assert_eq!(json, serde_json::json!([null, null]));
}

#[test]
fn serde_round_trip() {
    let node = TreeNode::parse(r#"{"id": -3, "big": 18446744073709551615, "ok": false}"#).unwrap();

    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json, serde_json::json!({"id": -3, "big": u64::MAX, "ok": false}));

    let back: TreeNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn building_nodes() {
    let mut map = TreeNode::map();
    assert!(map.is_empty());
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("a", "one"), Some(TreeNode::from(1)));
    if let Some(a) = map.get_mut("a") {
        *a = TreeNode::from(Some(true));
    }
    assert_eq!(map.get("a").and_then(TreeNode::as_bool), Some(true));

    let mut list = TreeNode::list();
    list.push(TreeNode::Null);
    list.set_at(3, "last");
    assert_eq!(list.len(), 4);
    assert_eq!(list.iter().filter(|node| node.is_null()).count(), 3);

    let entries: IndexMap<String, TreeNode> = map.as_map().unwrap().clone();
    assert_eq!(TreeNode::from(entries), map);
    assert_eq!(list.clone().take(), list);
}

#[test]
fn parse_rejects_invalid_json() {
    assert!(TreeNode::parse("{not json").is_err());
}

#[test]
#[should_panic(expected = "push on a map node")]
fn push_on_map_panics() {
    TreeNode::map().push(1);
}
