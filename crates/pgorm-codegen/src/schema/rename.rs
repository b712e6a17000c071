/// Casing applied by a container-level `#[serde(rename_all = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    const ALL: [(&'static str, RenameRule); 8] = [
        ("lowercase", RenameRule::Lower),
        ("UPPERCASE", RenameRule::Upper),
        ("PascalCase", RenameRule::Pascal),
        ("camelCase", RenameRule::Camel),
        ("snake_case", RenameRule::Snake),
        ("SCREAMING_SNAKE_CASE", RenameRule::ScreamingSnake),
        ("kebab-case", RenameRule::Kebab),
        ("SCREAMING-KEBAB-CASE", RenameRule::ScreamingKebab),
    ];

    pub(crate) fn from_lit(lit: &syn::LitStr) -> syn::Result<RenameRule> {
        let value = lit.value();

        Self::ALL
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, rule)| *rule)
            .ok_or_else(|| {
                syn::Error::new_spanned(lit, format!("unknown rename rule `{value}`"))
            })
    }

    /// Renames a snake_case Rust field the way serde does.
    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

/// Reads the serialized form of a serde option out of a `#[serde(...)]`
/// attribute. Accepts `option = "..."` and `option(serialize = "...")`;
/// every other serde option is skipped.
pub(super) fn serde_option(
    attr: &syn::Attribute,
    option: &str,
) -> syn::Result<Option<syn::LitStr>> {
    let mut found = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident(option) && meta.input.peek(syn::token::Paren) {
            meta.parse_nested_meta(|inner| {
                let lit: syn::LitStr = inner.value()?.parse()?;
                if inner.path.is_ident("serialize") {
                    found = Some(lit);
                }
                Ok(())
            })?;
        } else if meta.input.peek(syn::Token![=]) {
            let value = meta.value()?;
            if meta.path.is_ident(option) {
                found = Some(value.parse()?);
            } else {
                value.parse::<syn::Expr>()?;
            }
        } else if meta.input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in meta.input);
            content.parse::<proc_macro2::TokenStream>()?;
        }

        Ok(())
    })?;

    Ok(found)
}
