use super::{Describe, EntityMetadata, FieldDescriptor, Type, TypeRef};
use crate::{err, Result};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Builds and caches one [`EntityMetadata`] per type.
///
/// Metadata is built outside the lock and published with a single insert, so
/// concurrent callers resolving the same type all observe the same `Arc`.
#[derive(Debug, Default)]
pub struct Registry {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    entries: RwLock<HashMap<TypeId, Arc<EntityMetadata>>>,
}

#[derive(Debug, Default)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Types resolved and validated eagerly on build
    types: Vec<TypeRef>,
}

impl Registry {
    /// An empty registry with no table name prefix.
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn table_name_prefix(&self) -> Option<&str> {
        self.table_name_prefix.as_deref()
    }

    pub fn get<T: Describe>(&self) -> Result<Arc<EntityMetadata>> {
        self.resolve(TypeRef::of::<T>())
    }

    /// Returns the metadata for `ty`, building it on first use.
    pub fn resolve(&self, ty: TypeRef) -> Result<Arc<EntityMetadata>> {
        let type_id = ty.type_id();

        if let Some(meta) = self.read().get(&type_id) {
            return Ok(meta.clone());
        }

        let built = Arc::new(EntityMetadata::build(self, ty)?);

        let published = self
            .write()
            .entry(type_id)
            .or_insert_with(|| built.clone())
            .clone();

        if Arc::ptr_eq(&published, &built) {
            tracing::debug!(
                ty = %published.descriptor().qualified_name(),
                table = published.table_name(),
                keys = published.key_fields().len(),
                fields = published.all_fields().len(),
                "built entity metadata"
            );
        } else {
            tracing::trace!(ty = ty.name(), "entity metadata already published");
        }

        Ok(published)
    }

    pub fn contains(&self, ty: TypeRef) -> bool {
        self.read().contains_key(&ty.type_id())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// True if values of `ty` are entities: a struct flagged as a model, or
    /// one with at least one retained identity field. `Option` defers to its
    /// inner type. Decided from the descriptor alone, so it never resolves.
    pub fn is_entity(&self, ty: &Type) -> bool {
        match ty {
            Type::Option(inner) => self.is_entity(inner),
            Type::Struct(target) => {
                let descriptor = target.get();
                descriptor.model || descriptor.key_fields().next().is_some()
            }
            _ => false,
        }
    }

    /// The entity type a field refers to, looking through `Option`.
    pub(super) fn entity_target(&self, ty: &Type) -> Option<TypeRef> {
        let ty = ty.unwrap_option();
        if self.is_entity(ty) {
            ty.as_struct()
        } else {
            None
        }
    }

    /// The sole identity field of `ty`.
    pub fn single_key(&self, ty: TypeRef) -> Result<&'static FieldDescriptor> {
        self.resolve(ty)?.single_key()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<EntityMetadata>>> {
        // Entries are immutable once published
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<EntityMetadata>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn register<T: Describe>(&mut self) -> &mut Self {
        self.register_type(TypeRef::of::<T>())
    }

    pub fn register_type(&mut self, ty: TypeRef) -> &mut Self {
        if !self.types.contains(&ty) {
            self.types.push(ty);
        }
        self
    }

    /// Resolves every registered type and derives its column names, so
    /// malformed declarations fail here rather than on first use.
    pub fn build(&self) -> Result<Registry> {
        let registry = Registry {
            table_name_prefix: self.table_name_prefix.clone(),
            entries: RwLock::default(),
        };

        for ty in &self.types {
            let meta = registry
                .resolve(*ty)
                .map_err(|e| e.context(err!("registering `{}`", ty.name())))?;

            for field in meta.all_fields() {
                registry
                    .column_names(field, None)
                    .map_err(|e| e.context(err!("registering `{}`", ty.name())))?;
            }
        }

        Ok(registry)
    }
}
