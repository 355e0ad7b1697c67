/*
 * lattice.rs holds the resolved lattice value object.
 * notes:
 * All fields are resolved once, in order: dimension first, then vectors, spacings and basis,
 * each depending only on the dimension. Either every stage succeeds or no Lattice exists.
 *
 * Fields are private, a Lattice is never mutated after construction. Deserialization goes
 * through the same resolution, so a deserialized Lattice is as valid as a built one.
 */

use serde::{Deserialize, Serialize};

use crate::angles::lattice_angles;
use crate::basis::{resolve_basis_vectors, BasisRegistry};
use crate::config::ResolveConfig;
use crate::dimension::{resolve_dimension, Dimension, DimensionArg};
use crate::error::LatticeError;
use crate::math::det;
use crate::params::LatticeParams;
use crate::spacings::resolve_lattice_spacings;
use crate::vectors::resolve_lattice_vectors;

/// A validated periodic unit cell.
///
/// # Example
///
/// ```
/// use mblattice_core::{basis, Lattice};
///
/// let lattice = Lattice::builder()
///     .with_lattice_spacings(vec![0.5, 0.5, 0.5])
///     .with_basis_vectors(basis![
///         "Na" => [(0.0, 0.0, 0.0)];
///         "Cl" => [(0.5, 0.5, 0.5)];
///     ])
///     .build()
///     .unwrap();
///
/// assert_eq!(lattice.dimension(), 3);
/// assert_eq!(lattice.lattice_vectors()[2], vec![0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Lattice {
    dimension: Dimension,
    lattice_vectors: Vec<Vec<f64>>,
    lattice_spacings: Vec<f64>,
    basis_vectors: BasisRegistry,
}

impl Lattice {
    /// Resolve a lattice with the default [`ResolveConfig`].
    ///
    /// # Errors
    ///
    /// The first [`LatticeError`] raised by any resolution stage.
    pub fn new(params: LatticeParams) -> Result<Self, LatticeError> {
        Self::with_config(params, &ResolveConfig::default())
    }

    /// # Errors
    ///
    /// The first [`LatticeError`] raised by any resolution stage.
    pub fn with_config(
        params: LatticeParams,
        config: &ResolveConfig,
    ) -> Result<Self, LatticeError> {
        let LatticeParams {
            dimension,
            lattice_spacings,
            lattice_vectors,
            basis_vectors,
            angles,
        } = params;

        let dimension = resolve_dimension(
            dimension.as_ref(),
            lattice_spacings.as_deref(),
            lattice_vectors.as_deref(),
        )?;
        let lattice_vectors =
            resolve_lattice_vectors(dimension, lattice_vectors, angles.as_deref(), config)?;
        let lattice_spacings = resolve_lattice_spacings(dimension, lattice_spacings)?;
        let basis_vectors = resolve_basis_vectors(dimension, basis_vectors)?;

        Ok(Self {
            dimension,
            lattice_vectors,
            lattice_spacings,
            basis_vectors,
        })
    }

    #[must_use]
    pub fn builder() -> LatticeBuilder {
        LatticeBuilder::new()
    }

    /// Parse and resolve a lattice from a JSON object of options.
    ///
    /// # Errors
    ///
    /// Errors of [`LatticeParams::from_value`] and of [`Lattice::new`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self, LatticeError> {
        Self::new(LatticeParams::from_value(value)?)
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension.get()
    }

    /// lattice vectors, one row per vector
    #[must_use]
    pub fn lattice_vectors(&self) -> &[Vec<f64>] {
        &self.lattice_vectors
    }

    #[must_use]
    pub fn lattice_spacings(&self) -> &[f64] {
        &self.lattice_spacings
    }

    #[must_use]
    pub fn basis_vectors(&self) -> &BasisRegistry {
        &self.basis_vectors
    }

    /// Cell angles in degrees: `[]` in 1D, `[gamma]` in 2D, `[alpha, beta, gamma]` in 3D.
    #[must_use]
    pub fn angles(&self) -> Vec<f64> {
        lattice_angles(&self.lattice_vectors)
    }

    /// Lattice vectors scaled by their spacing.
    #[must_use]
    pub fn cell_vectors(&self) -> Vec<Vec<f64>> {
        self.lattice_vectors
            .iter()
            .zip(&self.lattice_spacings)
            .map(|(v, s)| v.iter().map(|x| x * s).collect())
            .collect()
    }

    /// Length, area or volume of the cell depending on the dimension.
    #[must_use]
    pub fn volume(&self) -> f64 {
        // vectors are square and right-handed by construction
        det(&self.cell_vectors()).unwrap_or(f64::NAN)
    }
}

impl TryFrom<LatticeParams> for Lattice {
    type Error = LatticeError;

    fn try_from(params: LatticeParams) -> Result<Self, Self::Error> {
        Lattice::new(params)
    }
}

impl TryFrom<serde_json::Value> for Lattice {
    type Error = LatticeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Lattice::from_value(&value)
    }
}

impl std::fmt::Display for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lattice ({}D)", self.dimension)?;
        writeln!(f, "vectors:")?;
        for v in &self.lattice_vectors {
            for x in v {
                write!(f, "{x:15.9}")?;
            }
            writeln!(f)?;
        }
        write!(f, "spacings:")?;
        for s in &self.lattice_spacings {
            write!(f, "{s:15.9}")?;
        }
        writeln!(f)?;
        writeln!(f, "basis:")?;
        for (name, points) in self.basis_vectors.iter() {
            writeln!(f, "  {name}:")?;
            for p in points {
                write!(f, "  ")?;
                for x in p {
                    write!(f, "{x:15.9}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Collects optional lattice input; every stage runs in [`LatticeBuilder::build`].
///
/// # Example
/// ```
/// use mblattice_core::{lattice_vectors, Lattice};
///
/// let lattice = Lattice::builder()
///     .with_dimension("2")
///     .with_lattice_vectors(lattice_vectors![
///         1.0,   0.0;
///         0.5,   sqrt(3.)/2.;
///     ])
///     .build()
///     .unwrap();
/// assert!((lattice.angles()[0] - 60.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LatticeBuilder {
    params: LatticeParams,
    config: ResolveConfig,
}

impl LatticeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already collected parameters.
    #[must_use]
    pub fn from_params(params: LatticeParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dimension(mut self, dimension: impl Into<DimensionArg>) -> Self {
        self.params.dimension = Some(dimension.into());
        self
    }

    #[must_use]
    pub fn with_lattice_spacings(mut self, spacings: Vec<f64>) -> Self {
        self.params.lattice_spacings = Some(spacings);
        self
    }

    #[must_use]
    pub fn with_lattice_vectors(mut self, vectors: Vec<Vec<f64>>) -> Self {
        self.params.lattice_vectors = Some(vectors);
        self
    }

    #[must_use]
    pub fn with_basis_vectors(mut self, basis: BasisRegistry) -> Self {
        self.params.basis_vectors = Some(basis);
        self
    }

    /// Cell angles in degrees, see [`crate::angles`].
    #[must_use]
    pub fn with_angles(mut self, angles: Vec<f64>) -> Self {
        self.params.angles = Some(angles);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// The first [`LatticeError`] raised by any resolution stage.
    pub fn build(self) -> Result<Lattice, LatticeError> {
        Lattice::with_config(self.params, &self.config)
    }
}
