use super::{FieldDescriptor, LifecyclePhase, MethodDescriptor, Registry, TypeDescriptor, TypeRef};
use crate::{Error, Result};

use std::any::Any;
use std::collections::HashMap;

/// The persistence shape of a type, derived once and shared.
#[derive(Debug)]
pub struct EntityMetadata {
    ty: TypeRef,

    /// Explicit table name or the type's simple name, with the registry's
    /// table name prefix applied
    table_name: String,

    /// Identity fields in declaration order
    keys: Vec<&'static FieldDescriptor>,

    /// Auto-increment keys of integral type
    generated_keys: Vec<&'static FieldDescriptor>,

    /// Fields written on create: plain fields and assigned keys
    insert_fields: Vec<&'static FieldDescriptor>,

    /// Non-key fields
    update_fields: Vec<&'static FieldDescriptor>,

    /// Every retained field, flattened declaration order
    all_fields: Vec<&'static FieldDescriptor>,

    /// Retained fields joining to another entity
    join_fields: Vec<&'static FieldDescriptor>,

    /// Retained fields stored as a serialized tree document
    embedded_fields: Vec<&'static FieldDescriptor>,

    /// Indexed by `FieldDescriptor::index`; `None` for excluded fields
    roles: Vec<Option<FieldRole>>,

    lifecycle: HashMap<LifecyclePhase, Vec<&'static MethodDescriptor>>,
}

/// How the metadata classified a retained field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    GeneratedKey,
    Key,
    Plain,
    Relation,
}

impl EntityMetadata {
    pub(super) fn build(registry: &Registry, ty: TypeRef) -> Result<EntityMetadata> {
        let descriptor: &'static TypeDescriptor = ty.get();

        let table_name = format!(
            "{}{}",
            registry.table_name_prefix().unwrap_or(""),
            descriptor.table.unwrap_or(descriptor.name)
        );

        let mut meta = EntityMetadata {
            ty,
            table_name,
            keys: vec![],
            generated_keys: vec![],
            insert_fields: vec![],
            update_fields: vec![],
            all_fields: vec![],
            join_fields: vec![],
            embedded_fields: vec![],
            roles: vec![None; descriptor.fields.len()],
            lifecycle: HashMap::new(),
        };

        for field in &descriptor.fields {
            if !field.is_retained() {
                continue;
            }

            let mut role = if field.is_key() {
                meta.keys.push(field);

                if field.is_generated_key() {
                    meta.generated_keys.push(field);
                    FieldRole::GeneratedKey
                } else {
                    meta.insert_fields.push(field);
                    FieldRole::Key
                }
            } else {
                meta.update_fields.push(field);
                meta.insert_fields.push(field);
                FieldRole::Plain
            };

            if field.is_relation() {
                if !registry.is_entity(&field.ty) {
                    return Err(Error::configuration(format!(
                        "relation fields must reference entity-typed fields: `{}` has type `{}`",
                        field.full_name(),
                        field.ty
                    )));
                }

                meta.join_fields.push(field);
                if role == FieldRole::Plain {
                    role = FieldRole::Relation;
                }
            }

            if field.is_embedded() {
                meta.embedded_fields.push(field);
            }

            meta.all_fields.push(field);
            meta.roles[field.index] = Some(role);
        }

        for phase in LifecyclePhase::ALL {
            let methods: Vec<_> = descriptor
                .methods
                .iter()
                .filter(|method| method.is_registered(phase))
                .collect();

            if !methods.is_empty() {
                meta.lifecycle.insert(phase, methods);
            }
        }

        Ok(meta)
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.ty.get()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn key_fields(&self) -> &[&'static FieldDescriptor] {
        &self.keys
    }

    pub fn generated_key_fields(&self) -> &[&'static FieldDescriptor] {
        &self.generated_keys
    }

    pub fn insert_fields(&self) -> &[&'static FieldDescriptor] {
        &self.insert_fields
    }

    pub fn update_fields(&self) -> &[&'static FieldDescriptor] {
        &self.update_fields
    }

    pub fn all_fields(&self) -> &[&'static FieldDescriptor] {
        &self.all_fields
    }

    pub fn join_fields(&self) -> &[&'static FieldDescriptor] {
        &self.join_fields
    }

    pub fn embedded_fields(&self) -> &[&'static FieldDescriptor] {
        &self.embedded_fields
    }

    /// The role of `field`, or `None` if it is excluded or belongs to
    /// another type.
    pub fn role(&self, field: &FieldDescriptor) -> Option<FieldRole> {
        let candidate = self.descriptor().fields.get(field.index)?;
        if !std::ptr::eq(candidate, field) {
            return None;
        }
        self.roles[field.index]
    }

    pub fn is_entity(&self) -> bool {
        !self.keys.is_empty() || self.descriptor().model
    }

    /// The type's sole identity field.
    pub fn single_key(&self) -> Result<&'static FieldDescriptor> {
        match self.keys[..] {
            [key] => Ok(key),
            [] => Err(Error::configuration(format!(
                "no identity field on `{}`",
                self.ty.name()
            ))),
            _ => Err(Error::configuration(format!(
                "multiple identity fields on `{}`: use the composite key path",
                self.ty.name()
            ))),
        }
    }

    /// Methods registered under `phase`, in declaration order.
    pub fn lifecycle_methods(&self, phase: LifecyclePhase) -> &[&'static MethodDescriptor] {
        self.lifecycle
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Runs every method registered under `phase` against `target`.
    pub fn invoke(&self, phase: LifecyclePhase, target: &mut dyn Any) -> Result<()> {
        if Any::type_id(&*target) != self.ty.type_id() {
            return Err(Error::configuration(format!(
                "lifecycle target is not an instance of `{}`",
                self.ty.name()
            )));
        }

        for method in self.lifecycle_methods(phase) {
            method.invoke(&mut *target)?;
        }

        Ok(())
    }
}
