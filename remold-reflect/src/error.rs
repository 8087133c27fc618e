use owo_colors::OwoColorize;
use remold_core::{FieldError, ModelShape};

/// Errors that can occur when compiling accessors or building models.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum BuilderError {
    /// The model type has no reachable parameterless constructor — its
    /// derive found no `Default` impl. Raised at first accessor compilation
    /// for the type and on every retry; unrecoverable for that type.
    NoParameterlessConstructor {
        /// The shape of the affected model type.
        shape: &'static ModelShape,
    },

    /// A field selector did not resolve to a declared, eligible field of the
    /// model type. Raised at the `set` call, never deferred to `build`.
    UnknownField {
        /// The shape the selector was resolved against.
        shape: &'static ModelShape,
        /// The name that failed to resolve.
        name: String,
    },

    /// A selector named a real field but carried a value of the wrong type.
    FieldTypeMismatch {
        /// The shape containing the field.
        shape: &'static ModelShape,
        /// The field being assigned.
        field: &'static str,
        /// The specific mismatch.
        field_error: FieldError,
    },

    /// `build` was called on a strict builder before every catalog field was
    /// assigned. Carries the already-set field names for diagnostics.
    IncompleteBuild {
        /// The shape being built.
        shape: &'static ModelShape,
        /// The fields assigned so far, in assignment order.
        set_fields: Vec<&'static str>,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::NoParameterlessConstructor { shape } => {
                write!(
                    f,
                    "Parameterless constructor for type {} not found (no Default impl)",
                    shape.red()
                )
            }
            BuilderError::UnknownField { shape, name } => {
                write!(
                    f,
                    "'{}' does not resolve to a declared, eligible field of {}",
                    name.yellow(),
                    shape.blue()
                )
            }
            BuilderError::FieldTypeMismatch {
                shape,
                field,
                field_error,
            } => {
                write!(
                    f,
                    "Cannot assign '{}::{}': {}",
                    shape.blue(),
                    field.yellow(),
                    field_error
                )
            }
            BuilderError::IncompleteBuild { shape, set_fields } => {
                write!(f, "Not all fields of {} were set; set so far: ", shape.blue())?;
                if set_fields.is_empty() {
                    return write!(f, "none");
                }
                for (i, name) in set_fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", name.green())?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for BuilderError {}
