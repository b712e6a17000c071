use super::{ErrorSet, Field, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Table name
    pub(crate) table: syn::LitStr,

    /// Model fields
    pub(crate) fields: Vec<Field>,

    /// Fields receiving a B-tree index
    pub(crate) indices: Vec<syn::LitStr>,

    /// Fields receiving a GIN index
    pub(crate) gin_indices: Vec<syn::LitStr>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model lifetime or generic parameters are not supported",
            ));
        }

        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model must have named fields",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut model_attr = ModelAttr::default();

        if let Err(err) = model_attr.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        let mut fields = vec![];

        for field in &node.named {
            match Field::from_ast(field, model_attr.rename_all) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        let mut keys = fields.iter().filter_map(|field| field.key.as_ref());

        if keys.next().is_none() {
            errs.push(syn::Error::new_spanned(
                &ast.ident,
                "model must declare a primary key field with #[key]",
            ));
        }

        for extra in keys {
            errs.push(syn::Error::new_spanned(
                &extra.attr,
                "more than one field marked #[key]",
            ));
        }

        let table = model_attr.table.take();

        if table.is_none() {
            errs.push(missing_table(ast));
        }

        errs.finish()?;

        let table = table.ok_or_else(|| missing_table(ast))?;

        Ok(Model {
            ident: ast.ident.clone(),
            table,
            fields,
            indices: model_attr.indices,
            gin_indices: model_attr.gin_indices,
        })
    }
}

fn missing_table(ast: &syn::ItemStruct) -> syn::Error {
    syn::Error::new_spanned(
        &ast.ident,
        "model must declare its table with #[table = \"...\"]",
    )
}
