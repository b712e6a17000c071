use crate::schema::{Field, Model};

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn model(model: &Model) -> TokenStream {
    let ident = &model.ident;
    let table = &model.table;
    let fields = model.fields.iter().map(field);
    let indices = &model.indices;
    let gin_indices = &model.gin_indices;
    let key = model.fields.iter().find(|field| field.key.is_some()).map(|field| {
        let ident = &field.ident;
        quote! {
            fn key(&self) -> ::core::option::Option<_pgorm::stmt::Value> {
                ::core::option::Option::Some(_pgorm::stmt::Value::from_key(&self.#ident))
            }
        }
    });

    quote! {
        const _: () = {
            use pgorm as _pgorm;

            impl _pgorm::Document for #ident {
                fn model() -> _pgorm::schema::Model {
                    _pgorm::schema::Model::new(concat!(module_path!(), "::", stringify!(#ident)))
                        .table(#table)
                        #( .field(#fields) )*
                        #( .index(#indices) )*
                        #( .gin_index(#gin_indices) )*
                }

                #key
            }
        };
    }
}

fn field(field: &Field) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;

    let key = field.key.as_ref().map(|key| {
        let column = &key.column;
        quote!(.primary_key_column(#column))
    });

    quote! {
        _pgorm::schema::Field::new(#name, _pgorm::schema::FieldTy::of::<#ty>()) #key
    }
}
