use super::Error;

/// Error when a mapped type's metadata cannot produce a storage schema.
///
/// These are configuration errors: they are raised while deriving the schema,
/// before any table or index is created, and retrying cannot fix them.
#[derive(Debug)]
pub(super) struct InvalidModel {
    model: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    MissingTable,
    MissingPrimaryKey,
    DuplicatePrimaryKey { fields: Vec<String> },
    UnsupportedPrimaryKeyType { field: Box<str>, ty: Box<str> },
}

impl std::error::Error for InvalidModel {}

impl core::fmt::Display for InvalidModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model `{}`: ", self.model)?;

        match &self.reason {
            Reason::MissingTable => f.write_str("no table name declared"),
            Reason::MissingPrimaryKey => f.write_str("no primary key field declared"),
            Reason::DuplicatePrimaryKey { fields } => {
                write!(
                    f,
                    "more than one primary key field declared ({})",
                    fields.join(", ")
                )
            }
            Reason::UnsupportedPrimaryKeyType { field, ty } => write!(
                f,
                "primary key field `{field}` has unsupported type `{ty}` \
                 (expected String, i32 or i64)"
            ),
        }
    }
}

impl Error {
    fn invalid_model(model: &str, reason: Reason) -> Error {
        Error::from(super::ErrorKind::InvalidModel(InvalidModel {
            model: model.into(),
            reason,
        }))
    }

    /// The model declares no table name.
    pub fn missing_table_metadata(model: &str) -> Error {
        Error::invalid_model(model, Reason::MissingTable)
    }

    /// No field of the model is marked as the primary key.
    pub fn missing_primary_key(model: &str) -> Error {
        Error::invalid_model(model, Reason::MissingPrimaryKey)
    }

    /// More than one field of the model is marked as the primary key.
    pub fn duplicate_primary_key(model: &str, fields: Vec<String>) -> Error {
        Error::invalid_model(model, Reason::DuplicatePrimaryKey { fields })
    }

    /// The primary key field's type has no SQL key column mapping.
    pub fn unsupported_primary_key_type(model: &str, field: &str, ty: &str) -> Error {
        Error::invalid_model(
            model,
            Reason::UnsupportedPrimaryKeyType {
                field: field.into(),
                ty: ty.into(),
            },
        )
    }

    /// Returns `true` if this error is any model configuration error.
    pub fn is_invalid_model(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidModel(_)))
    }

    pub fn is_missing_table_metadata(&self) -> bool {
        self.has_reason(|reason| matches!(reason, Reason::MissingTable))
    }

    pub fn is_missing_primary_key(&self) -> bool {
        self.has_reason(|reason| matches!(reason, Reason::MissingPrimaryKey))
    }

    pub fn is_duplicate_primary_key(&self) -> bool {
        self.has_reason(|reason| matches!(reason, Reason::DuplicatePrimaryKey { .. }))
    }

    pub fn is_unsupported_primary_key_type(&self) -> bool {
        self.has_reason(|reason| matches!(reason, Reason::UnsupportedPrimaryKeyType { .. }))
    }

    fn has_reason(&self, f: impl Fn(&Reason) -> bool) -> bool {
        self.any(|kind| match kind {
            super::ErrorKind::InvalidModel(err) => f(&err.reason),
            _ => false,
        })
    }
}
