use tessera::schema::{FieldDescriptor, FieldRole, LifecyclePhase, Retention};
use tessera::{Describe, Reflect, Registry};

use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq, Reflect)]
#[table = "people"]
#[lifecycle(pre_insert, pre_update, call = touch)]
struct Person {
    #[key]
    #[auto]
    id: Option<i64>,

    name: String,

    #[column("mail_address")]
    email: Option<String>,

    #[transient]
    touched: u32,
}

impl Person {
    fn new(name: &str) -> Person {
        Person {
            id: None,
            name: name.to_string(),
            email: None,
            touched: 0,
        }
    }

    fn touch(&mut self) {
        self.touched += 1;
    }
}

#[derive(Debug, PartialEq, Reflect)]
struct Line {
    #[key]
    order_id: i64,

    #[key]
    position: u16,

    sku: String,
}

#[derive(Debug, PartialEq, Reflect)]
struct Shipment {
    #[key]
    #[auto]
    id: u64,

    #[relation]
    line: Line,

    #[relation]
    recipient: Option<Person>,
}

#[derive(Debug, Default, PartialEq, Reflect)]
#[model]
#[lifecycle(pre_save, call = stamp)]
struct Audited {
    revision: u32,
}

impl Audited {
    fn stamp(&mut self) {
        self.revision += 1;
    }
}

#[derive(Debug, PartialEq, Reflect)]
#[lifecycle(pre_save, call = validate)]
struct Invoice {
    #[key]
    number: String,

    total: f64,

    #[parent]
    audit: Audited,

    #[transient]
    validated: bool,
}

impl Invoice {
    fn validate(&mut self) {
        self.validated = true;
    }
}

#[derive(Debug, PartialEq, Reflect)]
struct Purchase {
    #[key]
    #[auto]
    id: i64,

    #[relation]
    #[column("buyer_id")]
    buyer: Person,
}

#[derive(Debug, PartialEq, Reflect)]
struct Employee {
    #[key]
    #[auto]
    id: i64,

    #[relation]
    manager: Option<Box<Employee>>,
}

#[derive(Debug, PartialEq, Reflect)]
struct Note {
    text: String,
}

#[derive(Debug, PartialEq, Reflect)]
struct Annotated {
    #[key]
    id: i64,

    #[relation]
    note: Note,
}

fn names(fields: &[&FieldDescriptor]) -> Vec<&'static str> {
    fields.iter().map(|field| field.name).collect()
}

#[test]
fn entity_metadata_from_derive() {
    let registry = Registry::new();
    let meta = registry.get::<Person>().unwrap();

    assert_eq!(meta.table_name(), "people");
    assert_eq!(names(meta.generated_key_fields()), ["id"]);
    assert_eq!(names(meta.update_fields()), ["name", "email"]);
    assert_eq!(names(meta.insert_fields()), ["name", "email"]);
    assert_eq!(names(meta.all_fields()), ["id", "name", "email"]);

    let descriptor = Person::descriptor();
    assert_eq!(descriptor.name, "Person");
    assert!(descriptor.path.ends_with("derive_entity"));

    let touched = descriptor.field("touched").unwrap();
    assert_eq!(touched.retention, Retention::Transient);
    assert_eq!(meta.role(touched), None);
    assert_eq!(meta.role(descriptor.field("id").unwrap()), Some(FieldRole::GeneratedKey));
}

#[test]
fn explicit_columns() {
    let registry = Registry::new();
    let email = Person::descriptor().field("email").unwrap();

    assert_eq!(registry.column_names(email, None).unwrap(), ["mail_address"]);
    assert_eq!(registry.column_names(email, Some("p")).unwrap(), ["p.mail_address"]);
}

#[test]
fn relation_columns() {
    let registry = Registry::new();
    let meta = registry.get::<Shipment>().unwrap();

    assert_eq!(names(meta.join_fields()), ["line", "recipient"]);
    assert_eq!(
        registry.update_column_names(&meta).unwrap(),
        ["line_order_id", "line_position", "recipient"]
    );
    assert_eq!(registry.key_column_names(&meta).unwrap(), ["id"]);
}

#[test]
fn relation_with_explicit_column() {
    let registry = Registry::new();
    let meta = registry.get::<Purchase>().unwrap();
    let buyer = Purchase::descriptor().field("buyer").unwrap();

    assert_eq!(names(meta.join_fields()), ["buyer"]);
    assert_eq!(registry.column_names(buyer, None).unwrap(), ["buyer_id"]);
    assert_eq!(registry.update_column_names(&meta).unwrap(), ["buyer_id"]);
}

#[test]
fn single_key_lookup() {
    let registry = Registry::new();

    let key = registry.single_key(Person::ty().as_struct().unwrap()).unwrap();
    assert_eq!(key.name, "id");

    let err = registry.single_key(Line::ty().as_struct().unwrap()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn relation_to_plain_struct_is_rejected() {
    let registry = Registry::new();
    let err = registry.get::<Annotated>().unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("`Annotated.note` has type `Note`"));
}

#[test]
fn lifecycle_callbacks_run_in_phase() {
    let registry = Registry::new();
    let meta = registry.get::<Person>().unwrap();

    let mut person = Person::new("ada");
    meta.invoke(LifecyclePhase::PreInsert, &mut person).unwrap();
    meta.invoke(LifecyclePhase::PreUpdate, &mut person).unwrap();
    meta.invoke(LifecyclePhase::PostFetch, &mut person).unwrap();
    assert_eq!(person.touched, 2);

    let method = meta.lifecycle_methods(LifecyclePhase::PreInsert)[0];
    assert_eq!(method.name, "touch");
    assert!(!method.is_inherited());
}

#[test]
fn inherited_fields_and_callbacks() {
    let registry = Registry::new();
    let meta = registry.get::<Invoice>().unwrap();

    assert!(meta.is_entity());
    assert!(Invoice::descriptor().model);
    assert_eq!(names(meta.all_fields()), ["number", "total", "revision"]);
    assert_eq!(meta.all_fields()[2].declared_in, "Audited");

    let mut invoice = Invoice {
        number: "A-1".to_string(),
        total: 9.5,
        audit: Audited::default(),
        validated: false,
    };
    meta.invoke(LifecyclePhase::PreSave, &mut invoice).unwrap();

    assert!(invoice.validated);
    assert_eq!(invoice.audit.revision, 1);

    let pre_save: Vec<_> = meta
        .lifecycle_methods(LifecyclePhase::PreSave)
        .iter()
        .map(|method| (method.name, method.is_inherited()))
        .collect();
    assert_eq!(pre_save, [("validate", false), ("stamp", true)]);
}

#[test]
fn inherited_fields_round_trip() {
    let invoice = Invoice {
        number: "A-1".to_string(),
        total: 9.5,
        audit: Audited { revision: 3 },
        validated: true,
    };

    let json = tessera::to_json(&invoice).unwrap();
    assert_eq!(json, r#"{"number":"A-1","total":9.5,"revision":3}"#);

    let back: Invoice = tessera::from_json(&json).unwrap();
    assert_eq!(
        back,
        Invoice {
            validated: false,
            ..invoice
        }
    );
}

#[test]
fn self_referential_entity() {
    let registry = Registry::new();
    let meta = registry.get::<Employee>().unwrap();
    assert_eq!(names(meta.join_fields()), ["manager"]);

    let employee = Employee {
        id: 2,
        manager: Some(Box::new(Employee {
            id: 1,
            manager: None,
        })),
    };

    let json = tessera::to_json(&employee).unwrap();
    assert_eq!(json, r#"{"id":2,"manager":{"id":1,"manager":null}}"#);
    assert_eq!(tessera::from_json::<Employee>(&json).unwrap(), employee);
}

#[test]
fn registry_builder() {
    let registry = Registry::builder()
        .table_name_prefix("app_")
        .register::<Person>()
        .register::<Shipment>()
        .build()
        .unwrap();

    assert_eq!(registry.get::<Person>().unwrap().table_name(), "app_people");
    assert_eq!(registry.get::<Shipment>().unwrap().table_name(), "app_Shipment");

    let err = Registry::builder()
        .register::<Annotated>()
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}
