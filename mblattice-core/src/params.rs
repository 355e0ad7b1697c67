use serde_json::Value;

use crate::basis::BasisRegistry;
use crate::dimension::DimensionArg;
use crate::error::LatticeError;

/// Raw, all optional lattice input, before any resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatticeParams {
    pub dimension: Option<DimensionArg>,
    pub lattice_spacings: Option<Vec<f64>>,
    pub lattice_vectors: Option<Vec<Vec<f64>>>,
    pub basis_vectors: Option<BasisRegistry>,
    /// cell angles in degrees
    pub angles: Option<Vec<f64>>,
}

const NUMBERS: &str = "a sequence of numbers";
const MATRIX: &str = "a sequence of sequences of numbers";
const BASIS: &str = "a mapping from name to sequences of coordinates";

fn number(
    field: &'static str,
    expected: &'static str,
    value: &Value,
) -> Result<f64, LatticeError> {
    value
        .as_f64()
        .ok_or_else(|| LatticeError::type_mismatch(field, expected, value))
}

fn numbers(
    field: &'static str,
    expected: &'static str,
    value: &Value,
) -> Result<Vec<f64>, LatticeError> {
    value
        .as_array()
        .ok_or_else(|| LatticeError::type_mismatch(field, expected, value))?
        .iter()
        .map(|x| number(field, expected, x))
        .collect()
}

fn matrix(
    field: &'static str,
    expected: &'static str,
    value: &Value,
) -> Result<Vec<Vec<f64>>, LatticeError> {
    value
        .as_array()
        .ok_or_else(|| LatticeError::type_mismatch(field, expected, value))?
        .iter()
        .map(|row| numbers(field, expected, row))
        .collect()
}

fn basis(value: &Value) -> Result<BasisRegistry, LatticeError> {
    const FIELD: &str = "basis_vectors";

    let object = value
        .as_object()
        .ok_or_else(|| LatticeError::type_mismatch(FIELD, BASIS, value))?;

    let mut registry = BasisRegistry::new();
    for (name, points) in object {
        registry.insert(name.as_str(), matrix(FIELD, BASIS, points)?);
    }
    Ok(registry)
}

impl LatticeParams {
    /// Parse lattice options from a JSON object.
    ///
    /// Recognized keys are `dimension`, `lattice_spacings`, `lattice_vectors`,
    /// `basis_vectors` and `angles`; `null` counts as absent. Basis names keep the order of
    /// the object as it was parsed.
    ///
    /// # Errors
    ///
    /// [`LatticeError::TypeMismatch`] when the input or a field has the wrong JSON kind, and
    /// [`LatticeError::UnknownOption`] for unrecognized keys. The `dimension` value itself is
    /// only checked later, at resolution.
    pub fn from_value(value: &Value) -> Result<Self, LatticeError> {
        let object = value.as_object().ok_or_else(|| {
            LatticeError::type_mismatch("params", "a mapping of lattice options", value)
        })?;

        let mut params = LatticeParams::default();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "dimension" => params.dimension = Some(DimensionArg::from_value(value)),
                "lattice_spacings" => {
                    params.lattice_spacings = Some(numbers("lattice_spacings", NUMBERS, value)?);
                }
                "lattice_vectors" => {
                    params.lattice_vectors = Some(matrix("lattice_vectors", MATRIX, value)?);
                }
                "basis_vectors" => params.basis_vectors = Some(basis(value)?),
                "angles" => params.angles = Some(numbers("angles", NUMBERS, value)?),
                other => return Err(LatticeError::UnknownOption(other.to_string())),
            }
        }

        Ok(params)
    }
}

impl TryFrom<&Value> for LatticeParams {
    type Error = LatticeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        LatticeParams::from_value(value)
    }
}
