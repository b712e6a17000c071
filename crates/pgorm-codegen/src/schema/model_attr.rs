use super::{rename::serde_option, ErrorSet, RenameRule};

use syn::{punctuated::Punctuated, Token};

#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Database table name the documents are stored in
    pub(crate) table: Option<syn::LitStr>,

    /// Fields receiving a B-tree index
    pub(crate) indices: Vec<syn::LitStr>,

    /// Fields receiving a GIN index
    pub(crate) gin_indices: Vec<syn::LitStr>,

    /// Serde casing applied to every field without its own rename
    pub(crate) rename_all: Option<RenameRule>,
}

impl ModelAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if attr.path().is_ident("table") {
                if self.table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
                    continue;
                }

                match parse_table(attr) {
                    Ok(lit) => self.table = Some(lit),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("index") {
                match parse_fields(attr) {
                    Ok(fields) => self.indices.extend(fields),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("gin_index") {
                match parse_fields(attr) {
                    Ok(fields) => self.gin_indices.extend(fields),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("serde") {
                let rule = serde_option(attr, "rename_all")
                    .and_then(|lit| lit.as_ref().map(RenameRule::from_lit).transpose());

                match rule {
                    Ok(Some(rule)) => self.rename_all = Some(rule),
                    Ok(None) => {}
                    Err(err) => errs.push(err),
                }
            }
        }

        errs.finish()
    }
}

fn parse_table(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    let syn::Expr::Lit(lit) = &meta.value else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    let syn::Lit::Str(lit) = &lit.lit else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    if lit.value().trim().is_empty() {
        return Err(syn::Error::new_spanned(lit, "table name must not be empty"));
    }

    Ok(lit.clone())
}

/// `#[index("a", "b")]`
fn parse_fields(attr: &syn::Attribute) -> syn::Result<Vec<syn::LitStr>> {
    let fields = attr.parse_args_with(Punctuated::<syn::LitStr, Token![,]>::parse_terminated)?;
    Ok(fields.into_iter().collect())
}
