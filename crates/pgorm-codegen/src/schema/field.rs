use super::{rename::serde_option, ErrorSet, RenameRule};

#[derive(Debug)]
pub(crate) struct Field {
    /// Rust field identifier
    pub(crate) ident: syn::Ident,

    /// Name of the field in the serialized document
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Set when the field is the primary key
    pub(crate) key: Option<KeyAttr>,
}

#[derive(Debug)]
pub(crate) struct KeyAttr {
    /// The `#[key]` attribute, kept for error spans
    pub(crate) attr: syn::Attribute,

    /// Key column name, `id` unless overridden
    pub(crate) column: String,
}

impl Field {
    pub(super) fn from_ast(
        field: &syn::Field,
        rename_all: Option<RenameRule>,
    ) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut name = match rename_all {
            Some(rule) => rule.apply(&unraw(ident)),
            None => unraw(ident),
        };
        let mut key = None;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                    continue;
                }

                match KeyAttr::from_ast(attr) {
                    Ok(attr) => key = Some(attr),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("serde") {
                match serde_option(attr, "rename") {
                    Ok(Some(rename)) => name = rename.value(),
                    Ok(None) => {}
                    Err(err) => errs.push(err),
                }
            }
        }

        errs.finish()?;

        Ok(Field {
            ident: ident.clone(),
            name,
            ty: field.ty.clone(),
            key,
        })
    }
}

impl KeyAttr {
    fn from_ast(attr: &syn::Attribute) -> syn::Result<KeyAttr> {
        let mut column = "id".to_string();

        if let syn::Meta::List(_) = &attr.meta {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("column") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    column = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("expected `column`"))
                }
            })?;
        }

        Ok(KeyAttr {
            attr: attr.clone(),
            column,
        })
    }
}

fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(name) => name.to_string(),
        None => name,
    }
}
