use tessera_core::embed::{deserialize, deserialize_field, serialize};
use tessera_core::schema::*;
use tessera_core::tree::NodeKind;
use tessera_core::value::Object;
use tessera_core::{TreeNode, Value};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::any::Any;
use std::sync::OnceLock;

macro_rules! describe {
    ($ty:ident => $descriptor:expr) => {
        impl Describe for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
                DESCRIPTOR.get_or_init(|| $descriptor)
            }
        }
    };
}

fn ty<T: Describe>() -> Type {
    Type::Struct(TypeRef::of::<T>())
}

fn object<T: Describe>(fields: Vec<Value>) -> Value {
    Value::Object(Object::new(TypeRef::of::<T>(), fields))
}

fn tree(json: &str) -> TreeNode {
    TreeNode::parse(json).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Point;
describe!(Point => TypeDescriptor::builder::<Point>("Point")
    .embedding(Embedding::OrdinalList)
    .field(FieldDescriptor::new("x", Type::I32).at(0))
    .field(FieldDescriptor::new("y", Type::I32).at(1))
    .build());

struct Row;
describe!(Row => TypeDescriptor::builder::<Row>("Row")
    .embedding(Embedding::OrdinalList)
    .field(FieldDescriptor::new("a", Type::String).at(2))
    .field(FieldDescriptor::new("scratch", Type::I64).retention(Retention::Transient))
    .field(FieldDescriptor::new("b", Type::Bool).at(0))
    .build());

struct Unindexed;
describe!(Unindexed => TypeDescriptor::builder::<Unindexed>("Unindexed")
    .embedding(Embedding::OrdinalList)
    .field(FieldDescriptor::new("first", Type::I32).at(0))
    .field(FieldDescriptor::new("second", Type::I32))
    .build());

struct Distant;
describe!(Distant => TypeDescriptor::builder::<Distant>("Distant")
    .embedding(Embedding::OrdinalList)
    .field(FieldDescriptor::new("near", Type::I32).at(0))
    .field(FieldDescriptor::new("far", Type::I32).at(usize::MAX))
    .build());

struct Address;
describe!(Address => TypeDescriptor::builder::<Address>("Address")
    .embedding(Embedding::KeyedMap)
    .field(FieldDescriptor::new("street", Type::String))
    .field(FieldDescriptor::new("zip", Type::option(Type::U32)))
    .build());

struct Profile;
describe!(Profile => TypeDescriptor::builder::<Profile>("Profile")
    .embedding(Embedding::KeyedMap)
    .field(FieldDescriptor::new("name", Type::String).map_key("n"))
    .field(FieldDescriptor::new("born", Type::Date).format("yyyy-MM-dd"))
    .field(FieldDescriptor::new("tags", Type::set(Type::String)))
    .field(FieldDescriptor::new("scores", Type::map(Type::I64, Type::I32)))
    .field(FieldDescriptor::new("extra", Type::Tree))
    .field(FieldDescriptor::new("address", Type::option(ty::<Address>())))
    .field(FieldDescriptor::new("at", ty::<Point>()))
    .field(FieldDescriptor::new("nick", Type::option(Type::String)))
    .field(FieldDescriptor::new("cache", Type::Opaque("Cache")))
    .build());

struct Calendar;
describe!(Calendar => TypeDescriptor::builder::<Calendar>("Calendar")
    .field(FieldDescriptor::new("days", Type::list(Type::Date)).format("dd/MM/yyyy"))
    .field(FieldDescriptor::new("count", Type::U16))
    .build());

struct Clash;
describe!(Clash => TypeDescriptor::builder::<Clash>("Clash")
    .field(FieldDescriptor::new("left", Type::I32).map_key("k"))
    .field(FieldDescriptor::new("right", Type::I32).map_key("k"))
    .build());

struct Malformed;
describe!(Malformed => TypeDescriptor::builder::<Malformed>("Malformed")
    .field(FieldDescriptor::new("when", Type::Date).format("yyyy-qq"))
    .build());

struct Base;
describe!(Base => TypeDescriptor::builder::<Base>("Base")
    .field(FieldDescriptor::new("id", Type::I64))
    .build());

fn unreachable_base(_: &mut dyn Any) -> Option<&mut dyn Any> {
    None
}

struct Derived;
describe!(Derived => TypeDescriptor::builder::<Derived>("Derived")
    .field(FieldDescriptor::new("label", Type::String))
    .parent(TypeRef::of::<Base>(), unreachable_base)
    .build());

fn profile() -> Value {
    object::<Profile>(vec![
        Value::from("ada"),
        Value::Date(date(2024, 1, 15)),
        Value::Set(vec![Value::from("x"), Value::from("y")]),
        Value::Map(vec![(Value::I64(7), Value::I32(70)), (Value::I64(-1), Value::I32(0))]),
        Value::Tree(tree(r#"{"free": [1, "two"]}"#)),
        object::<Address>(vec![Value::from("Main St"), Value::Null]),
        object::<Point>(vec![Value::I32(3), Value::I32(4)]),
        Value::Null,
        Value::Null,
    ])
}

#[test]
fn ordinal_list_layout() {
    let point = object::<Point>(vec![Value::I32(1), Value::I32(2)]);
    let node = serialize(&point, None).unwrap();
    assert_eq!(node, tree("[1, 2]"));

    assert_eq!(deserialize(&ty::<Point>(), &node).unwrap(), point);
}

#[test]
fn ordinal_list_pads_gaps_and_skips_excluded() {
    let row = object::<Row>(vec![Value::from("tail"), Value::I64(9), Value::Bool(true)]);

    let node = serialize(&row, None).unwrap();
    assert_eq!(node, tree(r#"[true, null, "tail"]"#));

    let expected = object::<Row>(vec![Value::from("tail"), Value::Null, Value::Bool(true)]);
    assert_eq!(deserialize(&ty::<Row>(), &node).unwrap(), expected);
}

#[test]
fn ordinal_list_short_list_reads_absent() {
    let value = deserialize(&ty::<Point>(), &tree("[5]")).unwrap();
    assert_eq!(value, object::<Point>(vec![Value::I32(5), Value::I32(0)]));
}

#[test]
fn oversized_ordinal_is_configuration_error() {
    let value = object::<Distant>(vec![Value::I32(1), Value::I32(2)]);

    let err = serialize(&value, None).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("`Distant.far`"));
}

#[test]
fn missing_ordinal_is_configuration_error() {
    let value = object::<Unindexed>(vec![Value::I32(1), Value::I32(2)]);

    let err = serialize(&value, None).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("`Unindexed.second`"));

    let err = deserialize(&ty::<Unindexed>(), &tree("[1, 2]")).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn keyed_map_layout() {
    let node = serialize(&profile(), None).unwrap();

    let expected = tree(
        r#"{
            "n": "ada",
            "born": "2024-01-15",
            "tags": ["x", "y"],
            "scores": {"7": 70, "-1": 0},
            "extra": {"free": [1, "two"]},
            "address": {"street": "Main St", "zip": null},
            "at": [3, 4],
            "nick": null
        }"#,
    );
    assert_eq!(node, expected);
    assert_eq!(node.keys().collect::<Vec<_>>(), expected.keys().collect::<Vec<_>>());
}

#[test]
fn keyed_map_round_trip() {
    let node = serialize(&profile(), None).unwrap();
    assert_eq!(deserialize(&ty::<Profile>(), &node).unwrap(), profile());
}

#[test]
fn absent_entries_read_as_defaults() {
    let value = deserialize(&ty::<Calendar>(), &tree("{}")).unwrap();
    assert_eq!(value, object::<Calendar>(vec![Value::Null, Value::U16(0)]));

    let value = deserialize(&ty::<Address>(), &tree(r#"{"zip": null}"#)).unwrap();
    assert_eq!(value, object::<Address>(vec![Value::Null, Value::Null]));
}

#[test]
fn date_format_applies_to_collection_elements() {
    let calendar = object::<Calendar>(vec![
        Value::List(vec![Value::Date(date(2024, 2, 29)), Value::Date(date(1999, 12, 31))]),
        Value::U16(2),
    ]);

    let node = serialize(&calendar, None).unwrap();
    assert_eq!(node, tree(r#"{"days": ["29/02/2024", "31/12/1999"], "count": 2}"#));
    assert_eq!(deserialize(&ty::<Calendar>(), &node).unwrap(), calendar);
}

#[test]
fn formatted_date_field() {
    let field = FieldDescriptor::new("born", Type::Date).format("yyyy-MM-dd");

    let node = serialize(&Value::Date(date(2024, 1, 15)), Some(&field)).unwrap();
    assert_eq!(node, TreeNode::from("2024-01-15"));

    let value = deserialize_field(&field, Some(&node)).unwrap();
    assert_eq!(value, Value::Date(date(2024, 1, 15)));

    let err = deserialize_field(&field, Some(&TreeNode::from("15.01.2024"))).unwrap_err();
    assert!(err.is_type_conversion());
}

#[test]
fn unformatted_dates_use_iso() {
    let node = serialize(&Value::Date(date(2024, 1, 15)), None).unwrap();
    assert_eq!(node, TreeNode::from("2024-01-15"));
    assert_eq!(
        deserialize(&Type::Date, &node).unwrap(),
        Value::Date(date(2024, 1, 15))
    );
}

#[test]
fn malformed_format_is_configuration_error() {
    let value = object::<Malformed>(vec![Value::Date(date(2024, 1, 15))]);
    let err = serialize(&value, None).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().starts_with("serializing field `Malformed.when`"));
}

#[test]
fn duplicate_map_key_is_configuration_error() {
    let value = object::<Clash>(vec![Value::I32(1), Value::I32(2)]);
    let err = serialize(&value, None).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn inherited_fields_follow_own_fields() {
    let value = object::<Derived>(vec![Value::from("leaf"), Value::I64(1)]);

    let node = serialize(&value, None).unwrap();
    assert_eq!(node, tree(r#"{"label": "leaf", "id": 1}"#));
    assert_eq!(deserialize(&ty::<Derived>(), &node).unwrap(), value);
}

#[test]
fn wrong_container_is_shape_mismatch() {
    let err = deserialize(&ty::<Point>(), &tree(r#"{"x": 1}"#)).unwrap_err();
    assert!(err.is_shape_mismatch());
    assert_eq!(err.shape_kinds(), Some((NodeKind::List, NodeKind::Map)));

    let err = deserialize(&ty::<Address>(), &tree("[]")).unwrap_err();
    assert_eq!(err.shape_kinds(), Some((NodeKind::Map, NodeKind::List)));

    let err = deserialize(&Type::list(Type::I32), &tree("3")).unwrap_err();
    assert!(err.is_shape_mismatch());

    let err = deserialize(&Type::map(Type::String, Type::I32), &tree("[]")).unwrap_err();
    assert!(err.is_shape_mismatch());
}

#[test]
fn nested_shape_mismatch_names_field() {
    let node = tree(r#"{"n": "ada", "at": {"x": 1}}"#);
    let err = deserialize(&ty::<Profile>(), &node).unwrap_err();

    assert!(err.is_shape_mismatch());
    assert!(err.to_string().starts_with("deserializing field `Profile.at`"));
}

#[test]
fn wrong_scalar_is_type_conversion() {
    let err = deserialize(&ty::<Profile>(), &tree(r#"{"n": 5}"#)).unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(err.conversion_kinds(), Some((NodeKind::String, NodeKind::Number)));
}

#[test]
fn sets_drop_duplicates() {
    let value = deserialize(&Type::set(Type::I32), &tree("[1, 1, 2]")).unwrap();
    assert_eq!(value, Value::Set(vec![Value::I32(1), Value::I32(2)]));

    let value = deserialize(&Type::list(Type::I32), &tree("[1, 1, 2]")).unwrap();
    assert_eq!(value, Value::List(vec![Value::I32(1), Value::I32(1), Value::I32(2)]));
}

#[test]
fn map_keys_parse_to_key_type() {
    let value = deserialize(&Type::map(Type::U8, Type::Bool), &tree(r#"{"1": true}"#)).unwrap();
    assert_eq!(value, Value::Map(vec![(Value::U8(1), Value::Bool(true))]));

    let err = deserialize(&Type::map(Type::U8, Type::Bool), &tree(r#"{"x": true}"#)).unwrap_err();
    assert!(err.is_type_conversion());
}

#[test]
fn null_serializes_to_null() {
    assert_eq!(serialize(&Value::Null, None).unwrap(), TreeNode::Null);
    assert_eq!(deserialize(&Type::option(ty::<Point>()), &TreeNode::Null).unwrap(), Value::Null);
}
