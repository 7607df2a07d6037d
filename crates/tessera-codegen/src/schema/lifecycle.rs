/// `#[lifecycle(pre_insert, pre_update, call = touch)]`
#[derive(Debug)]
pub(crate) struct Lifecycle {
    /// Method called on the instance, taking `&mut self` and no arguments
    pub(crate) method: syn::Ident,

    /// Variants of `LifecyclePhase`
    pub(crate) phases: Vec<syn::Ident>,
}

const PHASES: &[(&str, &str)] = &[
    ("pre_insert", "PreInsert"),
    ("post_insert", "PostInsert"),
    ("pre_update", "PreUpdate"),
    ("post_update", "PostUpdate"),
    ("pre_delete", "PreDelete"),
    ("post_delete", "PostDelete"),
    ("pre_fetch", "PreFetch"),
    ("post_fetch", "PostFetch"),
    ("pre_save", "PreSave"),
    ("post_save", "PostSave"),
];

impl Lifecycle {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut method = None;
        let mut phases = vec![];

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("call") {
                if method.is_some() {
                    return Err(meta.error("duplicate `call`"));
                }
                method = Some(meta.value()?.parse::<syn::Ident>()?);
                return Ok(());
            }

            let Some(ident) = meta.path.get_ident() else {
                return Err(meta.error("expected a lifecycle phase"));
            };

            let name = ident.to_string();
            let Some((_, variant)) = PHASES.iter().find(|(phase, _)| *phase == name) else {
                return Err(meta.error(format!("unknown lifecycle phase `{name}`")));
            };

            let variant = syn::Ident::new(variant, ident.span());
            if phases.contains(&variant) {
                return Err(meta.error(format!("duplicate lifecycle phase `{name}`")));
            }
            phases.push(variant);
            Ok(())
        })?;

        let Some(method) = method else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `call = method` in #[lifecycle]",
            ));
        };

        if phases.is_empty() {
            return Err(syn::Error::new_spanned(
                attr,
                "#[lifecycle] needs at least one phase",
            ));
        }

        Ok(Lifecycle { method, phases })
    }
}
