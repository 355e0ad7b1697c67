use crate::dimension::Dimension;
use crate::error::LatticeError;

/// # Errors
///
/// [`LatticeError::SpacingCount`] when the count differs from the dimension, and
/// [`LatticeError::NonPositiveSpacing`] for the first spacing that is not a strictly
/// positive finite number.
pub fn validate_lattice_spacings(
    dimension: Dimension,
    spacings: &[f64],
) -> Result<(), LatticeError> {
    if spacings.len() != dimension.get() {
        return Err(LatticeError::SpacingCount {
            expected: dimension.get(),
            found: spacings.len(),
        });
    }

    match spacings
        .iter()
        .position(|&s| !(s.is_finite() && s > 0.0))
    {
        Some(index) => Err(LatticeError::NonPositiveSpacing {
            index,
            value: spacings[index],
        }),
        None => Ok(()),
    }
}

/// Validated spacings, or one unit spacing per axis when none are given.
///
/// # Errors
///
/// Errors of [`validate_lattice_spacings`].
pub fn resolve_lattice_spacings(
    dimension: Dimension,
    lattice_spacings: Option<Vec<f64>>,
) -> Result<Vec<f64>, LatticeError> {
    match lattice_spacings {
        Some(spacings) => {
            validate_lattice_spacings(dimension, &spacings)?;
            Ok(spacings)
        }
        None => {
            tracing::debug!(%dimension, "using unit lattice spacings");
            Ok(vec![1.0; dimension.get()])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spacings() {
        assert_eq!(resolve_lattice_spacings(Dimension::One, None), Ok(vec![1.0]));
        assert_eq!(
            resolve_lattice_spacings(Dimension::Two, None),
            Ok(vec![1.0, 1.0])
        );
        assert_eq!(
            resolve_lattice_spacings(Dimension::Three, None),
            Ok(vec![1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn spacing_count_mismatch() {
        assert_eq!(
            resolve_lattice_spacings(Dimension::Three, Some(vec![0.12, 0.13, 0.14, 0.15])),
            Err(LatticeError::SpacingCount {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            resolve_lattice_spacings(Dimension::Two, Some(vec![0.5])),
            Err(LatticeError::SpacingCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn zero_or_negative_spacing() {
        assert_eq!(
            resolve_lattice_spacings(Dimension::Three, Some(vec![0.12, 0.0, 0.13])),
            Err(LatticeError::NonPositiveSpacing {
                index: 1,
                value: 0.0
            })
        );
        assert_eq!(
            resolve_lattice_spacings(Dimension::Three, Some(vec![0.12, 0.13, -0.14])),
            Err(LatticeError::NonPositiveSpacing {
                index: 2,
                value: -0.14
            })
        );
        // first offender is reported
        assert!(matches!(
            resolve_lattice_spacings(Dimension::Two, Some(vec![-1.0, 0.0])),
            Err(LatticeError::NonPositiveSpacing { index: 0, .. })
        ));
        assert!(matches!(
            resolve_lattice_spacings(Dimension::One, Some(vec![f64::INFINITY])),
            Err(LatticeError::NonPositiveSpacing { index: 0, .. })
        ));
    }

    #[test]
    fn valid_spacings_are_kept() {
        assert_eq!(
            resolve_lattice_spacings(Dimension::Three, Some(vec![0.3, 0.4, 5.0])),
            Ok(vec![0.3, 0.4, 5.0])
        );
    }
}
