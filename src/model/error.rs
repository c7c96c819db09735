use std::fmt;

/// Location of a value inside a wire payload, e.g. `records[3].status`.
///
/// Keys are wire names, so a path points at the payload a caller has to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl FieldPath {
    /// The payload root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Child path for an object key.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_owned()));
        Self(segments)
    }

    /// Child path for a list position.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Defect in model or union definitions, detected at registration time.
///
/// These never depend on payload contents and are not recoverable by fixing input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("model {model} declares wire name `{wire_name}` more than once")]
    DuplicateWireName {
        model: &'static str,
        wire_name: &'static str,
    },

    #[error("model {model} declares local name `{local_name}` more than once")]
    DuplicateLocalName {
        model: &'static str,
        local_name: &'static str,
    },

    #[error("union {union} declares no variants")]
    EmptyUnion { union: &'static str },

    #[error("union {union} declares tag `{tag}` more than once")]
    DuplicateVariantTag {
        union: &'static str,
        tag: &'static str,
    },

    #[error("union {union} lists variant {variant} more than once")]
    DuplicateVariant {
        union: &'static str,
        variant: &'static str,
    },

    #[error("union {union} has no arm for resolved variant {variant}")]
    UnmappedVariant {
        union: &'static str,
        variant: &'static str,
    },
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("missing required field of {model}")]
    MissingRequiredField { model: &'static str },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("invalid date-time `{input}`: {reason}")]
    DateParse { input: String, reason: String },

    #[error("invalid {enum_name} value `{value}` (allowed: {})", .allowed.join(", "))]
    InvalidEnumValue {
        enum_name: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error(transparent)]
    NoMatchingVariant(Box<NoMatchingVariantError>),

    #[error("{model} has no field named `{name}`")]
    UnknownField { model: &'static str, name: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(path: FieldPath, kind: FieldErrorKind) -> Self {
        Self { path, kind }
    }
}

/// Every field failure found in one decode or encode pass over a model.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    model: &'static str,
    failures: Vec<FieldError>,
}

impl CoercionError {
    pub fn new(model: &'static str, failures: Vec<FieldError>) -> Self {
        Self { model, failures }
    }

    /// Name of the model the pass started from.
    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn failures(&self) -> &[FieldError] {
        &self.failures
    }

    /// Rendered paths of every failure, in the order they were found.
    pub fn paths(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.path.to_string()).collect()
    }

    /// First failure reported for `path` (rendered form, e.g. `tags[2]`).
    pub fn failure_at(&self, path: &str) -> Option<&FieldError> {
        self.failures.iter().find(|f| f.path.to_string() == path)
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invalid field(s) in {}",
            self.failures.len(),
            self.model
        )?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CoercionError {}

/// One candidate tried during structural union resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantAttempt {
    pub variant: &'static str,
    pub error: CoercionError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoMatchingVariantError {
    pub union: &'static str,
    pub tag: Option<String>,
    pub attempts: Vec<VariantAttempt>,
}

impl NoMatchingVariantError {
    /// Names of every candidate tried, in declared order.
    pub fn attempted(&self) -> Vec<&'static str> {
        self.attempts.iter().map(|a| a.variant).collect()
    }
}

impl fmt::Display for NoMatchingVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no variant of {} matches the payload", self.union)?;
        if let Some(tag) = &self.tag {
            write!(f, " (tag `{tag}`)")?;
        }
        for attempt in &self.attempts {
            write!(f, "; {}: {}", attempt.variant, attempt.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for NoMatchingVariantError {}

/// Error returned by the public decode/encode/resolve entry points.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Coercion(#[from] CoercionError),

    #[error("{0}")]
    NoMatchingVariant(#[from] NoMatchingVariantError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// The aggregated field failures, when this is a coercion error.
    pub fn as_coercion(&self) -> Option<&CoercionError> {
        match self {
            Self::Coercion(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_render_keys_and_indexes() {
        let path = FieldPath::root().key("records").index(3).key("status");
        assert_eq!(path.to_string(), "records[3].status");
        assert_eq!(FieldPath::root().key("tags").index(2).to_string(), "tags[2]");
        assert_eq!(FieldPath::root().to_string(), "(root)");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn coercion_error_lists_every_failure() {
        let err = CoercionError::new(
            "Brand",
            vec![
                FieldError::new(
                    FieldPath::root().key("email"),
                    FieldErrorKind::MissingRequiredField { model: "Brand" },
                ),
                FieldError::new(
                    FieldPath::root().key("entityType"),
                    FieldErrorKind::InvalidEnumValue {
                        enum_name: "EntityType",
                        value: "BOGUS".to_owned(),
                        allowed: &["PRIVATE_PROFIT", "NON_PROFIT"],
                    },
                ),
            ],
        );
        assert_eq!(err.paths(), vec!["email", "entityType"]);
        assert_eq!(
            err.to_string(),
            "2 invalid field(s) in Brand; email: missing required field of Brand; \
             entityType: invalid EntityType value `BOGUS` (allowed: PRIVATE_PROFIT, NON_PROFIT)"
        );
        assert!(err.failure_at("email").is_some());
        assert!(err.failure_at("city").is_none());
    }
}
