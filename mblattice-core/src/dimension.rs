use serde::{Serialize, Serializer};

use crate::error::LatticeError;

/// Working dimensionality of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    One,
    Two,
    Three,
}

impl Dimension {
    #[must_use]
    pub fn get(self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<i64> for Dimension {
    type Error = LatticeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            _ => Err(LatticeError::DimensionOutOfRange(value)),
        }
    }
}

impl From<Dimension> for usize {
    fn from(value: Dimension) -> Self {
        value.get()
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get() as u64)
    }
}

/// The loosely typed `dimension` argument as a caller may hand it over.
///
/// `Other` holds anything that is not a scalar (a sequence, a mapping, a boolean, ...),
/// which is always a type mismatch once parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionArg {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl DimensionArg {
    /// Classify a JSON value. Numbers become `Integer` when they fit an `i64`.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => DimensionArg::Integer(i),
                (None, Some(x)) => DimensionArg::Float(x),
                (None, None) => DimensionArg::Other(value.clone()),
            },
            serde_json::Value::String(s) => DimensionArg::Text(s.clone()),
            other => DimensionArg::Other(other.clone()),
        }
    }
}

macro_rules! impl_dimension_arg_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DimensionArg {
                fn from(value: $t) -> Self {
                    DimensionArg::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_dimension_arg_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for DimensionArg {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(
            |_| DimensionArg::Text(value.to_string()),
            DimensionArg::Integer,
        )
    }
}

impl From<f64> for DimensionArg {
    fn from(value: f64) -> Self {
        DimensionArg::Float(value)
    }
}

impl From<&str> for DimensionArg {
    fn from(value: &str) -> Self {
        DimensionArg::Text(value.to_string())
    }
}

impl From<String> for DimensionArg {
    fn from(value: String) -> Self {
        DimensionArg::Text(value)
    }
}

impl From<Dimension> for DimensionArg {
    fn from(value: Dimension) -> Self {
        DimensionArg::Integer(value.get() as i64)
    }
}

impl<T: Into<serde_json::Value>> From<Vec<T>> for DimensionArg {
    fn from(value: Vec<T>) -> Self {
        DimensionArg::Other(serde_json::Value::from(value))
    }
}

fn integral_float(x: f64, raw: impl FnOnce() -> String) -> Result<i64, LatticeError> {
    // i64::MAX as f64 rounds up, so the upper bound is exclusive
    if x.is_finite() && x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        #[allow(clippy::cast_possible_truncation)]
        let value = x as i64;
        Ok(value)
    } else {
        Err(LatticeError::MalformedDimension(raw()))
    }
}

/// Coerce a `dimension` argument into a [`Dimension`].
///
/// Integral floats and numeral text are accepted (`3.0`, `"3"`, `"3.0"`), anything else
/// scalar but not integral is a value error, and non-scalars are a type mismatch.
///
/// # Errors
///
/// - [`LatticeError::TypeMismatch`] when the argument is not a scalar.
/// - [`LatticeError::MalformedDimension`] when it is not an integral number.
/// - [`LatticeError::DimensionOutOfRange`] when it is not 1, 2 or 3.
pub fn parse_dimension(arg: &DimensionArg) -> Result<Dimension, LatticeError> {
    let value = match arg {
        DimensionArg::Integer(i) => *i,
        DimensionArg::Float(x) => integral_float(*x, || x.to_string())?,
        DimensionArg::Text(s) => {
            let text = s.trim();
            match text.parse::<i64>() {
                Ok(i) => i,
                Err(_) => {
                    let x = text
                        .parse::<f64>()
                        .map_err(|_| LatticeError::MalformedDimension(s.clone()))?;
                    integral_float(x, || s.clone())?
                }
            }
        }
        DimensionArg::Other(v) => {
            if v.is_number() {
                return parse_dimension(&DimensionArg::from_value(v));
            }
            return Err(LatticeError::type_mismatch(
                "dimension",
                "an integer, an integral float or numeral text",
                v,
            ));
        }
    };

    Dimension::try_from(value)
}

/// Resolve the working dimension.
///
/// An explicit `dimension` wins; otherwise the count of `lattice_spacings` is used, and
/// as a last resort the row count of `lattice_vectors`.
///
/// # Errors
///
/// Errors of [`parse_dimension`], [`LatticeError::DimensionOutOfRange`] when the inferred
/// count is not 1, 2 or 3, and [`LatticeError::MissingDimension`] when nothing carries a
/// dimension.
pub fn resolve_dimension(
    dimension: Option<&DimensionArg>,
    lattice_spacings: Option<&[f64]>,
    lattice_vectors: Option<&[Vec<f64>]>,
) -> Result<Dimension, LatticeError> {
    if let Some(arg) = dimension {
        return parse_dimension(arg);
    }

    let (count, source) = match (lattice_spacings, lattice_vectors) {
        (Some(spacings), _) => (spacings.len(), "lattice_spacings"),
        (None, Some(vectors)) => (vectors.len(), "lattice_vectors"),
        (None, None) => return Err(LatticeError::MissingDimension),
    };

    let dimension = Dimension::try_from(i64::try_from(count).unwrap_or(i64::MAX))?;
    tracing::debug!(%dimension, source, "inferred lattice dimension");
    Ok(dimension)
}
