/// The two kinds of construction failure.
///
/// Every [`LatticeError`] belongs to exactly one kind, so callers can tell a structurally
/// wrong argument apart from a well-formed but invalid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// an argument has the wrong shape or type and cannot be coerced
    TypeMismatch,
    /// an argument is well-formed but violates a lattice invariant
    Value,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LatticeError {
    #[error("`{field}` expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("cannot infer the dimension: none of `dimension`, `lattice_spacings` or `lattice_vectors` was given")]
    MissingDimension,

    #[error("dimension `{0}` is not an integral number")]
    MalformedDimension(String),

    #[error("dimension must be 1, 2 or 3, got {0}")]
    DimensionOutOfRange(i64),

    #[error("lattice vectors must form a {dimension}x{dimension} matrix, got row lengths {row_lengths:?}")]
    VectorShape {
        dimension: usize,
        row_lengths: Vec<usize>,
    },

    #[error("lattice vector {row} has a non-finite component at index {column}")]
    NonFiniteVector { row: usize, column: usize },

    #[error("lattice vectors are degenerate or colinear (det = {det:e})")]
    DegenerateVectors { det: f64 },

    #[error("lattice vectors are left-handed (det = {det}), a right-handed set is required")]
    LeftHandedVectors { det: f64 },

    #[error("expected {expected} lattice spacing(s), got {found}")]
    SpacingCount { expected: usize, found: usize },

    #[error("lattice spacing {index} must be strictly positive, got {value}")]
    NonPositiveSpacing { index: usize, value: f64 },

    #[error("basis vectors must contain at least one named basis")]
    EmptyBasis,

    #[error("basis `{name}` point {index} has {found} coordinate(s), expected {expected}")]
    BasisShape {
        name: String,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("a {dimension}D lattice takes {expected} angle(s), got {found}")]
    AngleCount {
        dimension: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell angles {angles:?}: {reason}")]
    InvalidAngles {
        angles: Vec<f64>,
        reason: &'static str,
    },

    #[error("angles {given:?} disagree with the angles {derived:?} of the lattice vectors")]
    InconsistentAngles { given: Vec<f64>, derived: Vec<f64> },

    #[error("unknown lattice option `{0}`")]
    UnknownOption(String),
}

impl LatticeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LatticeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            _ => ErrorKind::Value,
        }
    }

    /// Shorthand for a [`LatticeError::TypeMismatch`] built from the offending JSON value.
    pub(crate) fn type_mismatch(
        field: &'static str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        LatticeError::TypeMismatch {
            field,
            expected,
            found: json_kind(found).to_string(),
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}
