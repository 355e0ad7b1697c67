// Tolerances

/// Relative tolerance on the determinant, scaled by the product of the row norms.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;
/// Normalized determinants below `NEAR_DEGENERATE_FACTOR * tolerance` are accepted with a warning.
pub const NEAR_DEGENERATE_FACTOR: f64 = 1e3;
/// Tolerance in degrees when comparing given angles with the angles of the lattice vectors.
pub const ANGLE_TOLERANCE: f64 = 1e-3;

/// Numeric policy used while resolving a lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveConfig {
    degeneracy_tolerance: f64,
    angle_tolerance: f64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            degeneracy_tolerance: DEGENERACY_TOLERANCE,
            angle_tolerance: ANGLE_TOLERANCE,
        }
    }
}

impl ResolveConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set of vectors is degenerate when `|det| <= tol * prod(|row|)`.
    ///
    /// Negative or non-finite values fall back to [`DEGENERACY_TOLERANCE`].
    #[must_use]
    pub fn with_degeneracy_tolerance(self, tol: f64) -> Self {
        let degeneracy_tolerance = if tol.is_finite() && tol >= 0.0 {
            tol
        } else {
            DEGENERACY_TOLERANCE
        };
        Self {
            degeneracy_tolerance,
            ..self
        }
    }

    /// Negative or non-finite values fall back to [`ANGLE_TOLERANCE`].
    #[must_use]
    pub fn with_angle_tolerance(self, tol: f64) -> Self {
        let angle_tolerance = if tol.is_finite() && tol >= 0.0 {
            tol
        } else {
            ANGLE_TOLERANCE
        };
        Self {
            angle_tolerance,
            ..self
        }
    }

    #[must_use]
    pub fn degeneracy_tolerance(&self) -> f64 {
        self.degeneracy_tolerance
    }

    #[must_use]
    pub fn angle_tolerance(&self) -> f64 {
        self.angle_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_constants() {
        let config = ResolveConfig::default();
        assert_eq!(config.degeneracy_tolerance(), DEGENERACY_TOLERANCE);
        assert_eq!(config.angle_tolerance(), ANGLE_TOLERANCE);
    }

    #[test]
    fn invalid_tolerance_falls_back() {
        let config = ResolveConfig::new()
            .with_degeneracy_tolerance(-1.0)
            .with_angle_tolerance(f64::NAN);
        assert_eq!(config, ResolveConfig::default());

        let config = ResolveConfig::new().with_degeneracy_tolerance(0.0);
        assert_eq!(config.degeneracy_tolerance(), 0.0);
    }
}
