use super::{EntityMetadata, FieldDescriptor, Registry, TypeRef};
use crate::{Error, Result};

impl Registry {
    /// Derives the column names a field maps to.
    ///
    /// Explicit column names win, qualified as `table.column` when `table`
    /// is non-empty. A field referring to an entity with a single key maps to
    /// the field's own name, and one referring to a keyless entity maps to no
    /// columns. One referring to a composite-key entity expands
    /// to one column per key, prefixed `field_`, recursing through nested
    /// composite keys.
    pub fn column_names(&self, field: &FieldDescriptor, table: Option<&str>) -> Result<Vec<String>> {
        let table = table.filter(|table| !table.is_empty());
        let mut columns = vec![];

        if !field.attrs.columns.is_empty() {
            for column in &field.attrs.columns {
                columns.push(qualify(table, column));
            }
            return Ok(columns);
        }

        if let Some(target) = self.entity_target(&field.ty) {
            let meta = self.resolve(target)?;

            match meta.key_fields().len() {
                0 => {}
                1 => columns.push(field.name.to_string()),
                _ => {
                    let prefix = format!("{}_", field.name);
                    self.expand_composite(&meta, &prefix, &mut vec![], &mut columns)?;
                }
            }

            return Ok(columns);
        }

        columns.push(qualify(table, field.name));
        Ok(columns)
    }

    /// Column names of every update field, in order.
    pub fn update_column_names(&self, meta: &EntityMetadata) -> Result<Vec<String>> {
        self.flatten_columns(meta.update_fields())
    }

    /// Column names of every key field, in order.
    pub fn key_column_names(&self, meta: &EntityMetadata) -> Result<Vec<String>> {
        self.flatten_columns(meta.key_fields())
    }

    fn flatten_columns(&self, fields: &[&'static FieldDescriptor]) -> Result<Vec<String>> {
        let mut columns = vec![];
        for field in fields {
            columns.extend(self.column_names(field, None)?);
        }
        Ok(columns)
    }

    fn expand_composite(
        &self,
        meta: &EntityMetadata,
        prefix: &str,
        expanding: &mut Vec<TypeRef>,
        columns: &mut Vec<String>,
    ) -> Result<()> {
        let ty = meta.ty();

        if expanding.contains(&ty) {
            let cycle = expanding
                .iter()
                .chain(Some(&ty))
                .map(|ty| ty.name())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::configuration(format!(
                "composite keys reference each other in a cycle: {cycle}"
            )));
        }

        expanding.push(ty);

        for key in meta.key_fields() {
            if !key.attrs.columns.is_empty() {
                for column in &key.attrs.columns {
                    columns.push(format!("{prefix}{column}"));
                }
                continue;
            }

            match self.entity_target(&key.ty) {
                Some(target) => {
                    let nested = self.resolve(target)?;
                    match nested.key_fields().len() {
                        0 => {}
                        1 => columns.push(format!("{prefix}{}", key.name)),
                        _ => {
                            let prefix = format!("{prefix}{}_", key.name);
                            self.expand_composite(&nested, &prefix, expanding, columns)?;
                        }
                    }
                }
                None => columns.push(format!("{prefix}{}", key.name)),
            }
        }

        expanding.pop();
        Ok(())
    }
}

fn qualify(table: Option<&str>, column: &str) -> String {
    match table {
        Some(table) => format!("{table}.{column}"),
        None => column.to_string(),
    }
}
