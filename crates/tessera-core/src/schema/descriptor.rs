use super::{FieldDescriptor, MethodDescriptor, Projection};

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Implemented by every structured type that has a descriptor.
pub trait Describe: 'static {
    fn descriptor() -> &'static TypeDescriptor;
}

/// A copyable, lazily dereferenced handle to a type's descriptor.
///
/// Field types refer to structs through `TypeRef` so a type may mention
/// itself without forcing its descriptor while it is being built. Equality
/// and hashing use the `TypeId` and never touch the descriptor.
#[derive(Clone, Copy)]
pub struct TypeRef {
    descriptor: fn() -> &'static TypeDescriptor,
    type_id: fn() -> TypeId,
}

impl TypeRef {
    pub fn of<T: Describe>() -> TypeRef {
        TypeRef {
            descriptor: T::descriptor,
            type_id: TypeId::of::<T>,
        }
    }

    pub fn get(self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    pub fn type_id(self) -> TypeId {
        (self.type_id)()
    }

    pub fn name(self) -> &'static str {
        self.get().name
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &TypeRef) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name())
    }
}

/// How a structured type is laid out as a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embedding {
    /// String-keyed map, one entry per field
    KeyedMap,

    /// Positional list, each field at its ordinal index
    OrdinalList,
}

/// Registration-time description of a structured type.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Simple type name
    pub name: &'static str,

    /// Module path of the declaring module
    pub path: &'static str,

    pub type_id: TypeId,

    /// Explicit table name
    pub table: Option<&'static str>,

    pub embedding: Option<Embedding>,

    /// True if the type, or an ancestor, is a recognized entity base
    pub model: bool,

    pub parent: Option<TypeRef>,

    /// Own fields in declaration order, followed by the ancestors' fields,
    /// most-derived first. `fields[i].index == i`.
    pub fields: Vec<FieldDescriptor>,

    /// Lifecycle methods, own first
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    pub fn builder<T: ?Sized + 'static>(name: &'static str) -> DescriptorBuilder {
        DescriptorBuilder {
            descriptor: TypeDescriptor {
                name,
                path: "",
                type_id: TypeId::of::<T>(),
                table: None,
                embedding: None,
                model: false,
                parent: None,
                fields: vec![],
                methods: vec![],
            },
            parent_projection: None,
        }
    }

    /// Looks up a field by name, own fields first.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Retained identity fields in declaration order.
    pub fn key_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_retained() && field.is_key())
    }

    /// Fully qualified name, for diagnostics.
    pub fn qualified_name(&self) -> String {
        if self.path.is_empty() {
            self.name.to_string()
        } else {
            format!("{}::{}", self.path, self.name)
        }
    }
}

#[derive(Debug)]
pub struct DescriptorBuilder {
    descriptor: TypeDescriptor,
    parent_projection: Option<Projection>,
}

impl DescriptorBuilder {
    pub fn path(mut self, path: &'static str) -> Self {
        self.descriptor.path = path;
        self
    }

    pub fn table(mut self, table: &'static str) -> Self {
        self.descriptor.table = Some(table);
        self
    }

    pub fn embedding(mut self, embedding: Embedding) -> Self {
        self.descriptor.embedding = Some(embedding);
        self
    }

    pub fn model(mut self) -> Self {
        self.descriptor.model = true;
        self
    }

    /// Flattens `parent`'s fields and lifecycle methods into this type.
    /// `project` borrows the embedded parent out of an instance of this type
    /// so inherited callbacks can run against it.
    pub fn parent(mut self, parent: TypeRef, project: Projection) -> Self {
        self.descriptor.parent = Some(parent);
        self.parent_projection = Some(project);
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        let mut descriptor = self.descriptor;

        for (index, field) in descriptor.fields.iter_mut().enumerate() {
            field.index = index;
            field.declared_in = descriptor.name;
        }

        if let (Some(parent), Some(project)) = (descriptor.parent, self.parent_projection) {
            let parent = parent.get();
            let offset = descriptor.fields.len();

            descriptor.model |= parent.model;
            if descriptor.embedding.is_none() {
                descriptor.embedding = parent.embedding;
            }

            for (index, field) in parent.fields.iter().enumerate() {
                let mut field = field.clone();
                field.index = offset + index;
                descriptor.fields.push(field);
            }

            for method in &parent.methods {
                descriptor.methods.push(method.inherited(project));
            }
        }

        descriptor
    }
}
