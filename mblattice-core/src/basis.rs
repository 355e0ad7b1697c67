/*
 * Basis registry: named sets of fractional coordinates inside the unit cell.
 *
 * Names and the points under each name keep insertion order. Points may repeat and are
 * not required to lie in [0, 1), only their length is checked against the dimension.
 */

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::dimension::Dimension;
use crate::error::LatticeError;

/// Name of the basis used when none is given.
pub const DEFAULT_BASIS_NAME: &str = "default";

/// Insertion ordered mapping from basis name to fractional points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasisRegistry {
    entries: Vec<(String, Vec<Vec<f64>>)>,
}

impl BasisRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `{"default": [origin]}` for the given dimension.
    #[must_use]
    pub fn origin(dimension: Dimension) -> Self {
        Self {
            entries: vec![(
                DEFAULT_BASIS_NAME.to_string(),
                vec![vec![0.0; dimension.get()]],
            )],
        }
    }

    /// Set the points of `name`, keeping its position when the name already exists.
    ///
    /// Returns the points previously stored under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        points: Vec<Vec<f64>>,
    ) -> Option<Vec<Vec<f64>>> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, points)),
            None => {
                self.entries.push((name, points));
                None
            }
        }
    }

    /// Append one point to `name`, creating the name at the end when missing.
    pub fn push(&mut self, name: impl Into<String>, point: Vec<f64>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, points)) => points.push(point),
            None => self.entries.push((name, vec![point])),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Vec<f64>]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, points)| points.as_slice())
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// number of named bases
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<f64>])> {
        self.entries
            .iter()
            .map(|(n, points)| (n.as_str(), points.as_slice()))
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Vec<f64>>)> for BasisRegistry {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Vec<f64>>)>>(iter: I) -> Self {
        let mut registry = BasisRegistry::new();
        for (name, points) in iter {
            registry.insert(name, points);
        }
        registry
    }
}

impl IntoIterator for BasisRegistry {
    type Item = (String, Vec<Vec<f64>>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Vec<f64>>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for BasisRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, points) in &self.entries {
            map.serialize_entry(name, points)?;
        }
        map.end()
    }
}

/// macro to build a [`BasisRegistry`] from named groups of fractional points
///
/// # Examples
///
/// ```
/// use mblattice_core::basis;
///
/// let registry = basis![
///     "A" => [(0.0, 0.0, 0.0), (0.5, 0.5, 0.5)];
///     "B" => [(0.25, 0.25, 0.25)];
/// ];
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["A", "B"]);
/// ```
#[macro_export]
macro_rules! basis {
    () => {
        $crate::BasisRegistry::new()
    };
    ( $(
        $name:expr => [ $( ( $($x:expr),+ $(,)? ) ),* $(,)? ]
      );+ $(;)?
    ) => {{
        let mut registry = $crate::BasisRegistry::new();
        $(
            registry.insert(
                $name,
                ::std::vec![ $( ::std::vec![ $( f64::from($x) ),+ ] ),* ],
            );
        )+
        registry
    }};
}

/// # Errors
///
/// [`LatticeError::EmptyBasis`] for a registry without names, and
/// [`LatticeError::BasisShape`] for the first point whose length is not the dimension.
pub fn validate_basis_vectors(
    dimension: Dimension,
    registry: &BasisRegistry,
) -> Result<(), LatticeError> {
    if registry.is_empty() {
        return Err(LatticeError::EmptyBasis);
    }

    let expected = dimension.get();
    for (name, points) in registry.iter() {
        if let Some(index) = points.iter().position(|p| p.len() != expected) {
            return Err(LatticeError::BasisShape {
                name: name.to_string(),
                index,
                expected,
                found: points[index].len(),
            });
        }
    }

    Ok(())
}

/// Validated basis registry, or the origin basis when none is given.
///
/// # Errors
///
/// Errors of [`validate_basis_vectors`].
pub fn resolve_basis_vectors(
    dimension: Dimension,
    basis_vectors: Option<BasisRegistry>,
) -> Result<BasisRegistry, LatticeError> {
    match basis_vectors {
        Some(registry) => {
            validate_basis_vectors(dimension, &registry)?;
            Ok(registry)
        }
        None => {
            tracing::debug!(%dimension, "using origin basis");
            Ok(BasisRegistry::origin(dimension))
        }
    }
}
