use crate::angles::{check_consistent_angles, validate_angles, vectors_from_angles};
use crate::config::{ResolveConfig, NEAR_DEGENERATE_FACTOR};
use crate::dimension::Dimension;
use crate::error::LatticeError;
use crate::math::{det, identity, norm};

/// Split a row into its unit direction and its length without overflowing.
///
/// A zero row is returned as is with length 0.
fn unit_row(v: &[f64]) -> (Vec<f64>, f64) {
    let largest = v.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if largest == 0.0 {
        return (v.to_vec(), 0.0);
    }
    let scaled: Vec<f64> = v.iter().map(|x| x / largest).collect();
    let length = norm(&scaled);
    (scaled.iter().map(|x| x / length).collect(), largest * length)
}

/// Validate a lattice vector matrix and return its determinant.
///
/// Checks run in order: shape (`dimension x dimension`), finite entries, degeneracy and
/// orientation. Both degeneracy and orientation are decided on the determinant of the
/// rows scaled to unit length, a set is degenerate when that determinant is within `tol`
/// of zero. The check therefore does not depend on the magnitude of the vectors, even
/// when their plain determinant overflows. Only right-handed sets pass.
///
/// The returned determinant is the one of the given vectors, `inf` when it overflows.
///
/// # Errors
///
/// [`LatticeError::VectorShape`], [`LatticeError::NonFiniteVector`],
/// [`LatticeError::DegenerateVectors`] or [`LatticeError::LeftHandedVectors`].
pub fn validate_lattice_vectors(
    dimension: Dimension,
    vectors: &[Vec<f64>],
    config: &ResolveConfig,
) -> Result<f64, LatticeError> {
    let n = dimension.get();
    let shape_error = || LatticeError::VectorShape {
        dimension: n,
        row_lengths: vectors.iter().map(Vec::len).collect(),
    };

    if vectors.len() != n || vectors.iter().any(|row| row.len() != n) {
        return Err(shape_error());
    }

    for (row, v) in vectors.iter().enumerate() {
        if let Some(column) = v.iter().position(|x| !x.is_finite()) {
            return Err(LatticeError::NonFiniteVector { row, column });
        }
    }

    let (units, lengths): (Vec<Vec<f64>>, Vec<f64>) =
        vectors.iter().map(|v| unit_row(v)).unzip();
    // |normalized| <= 1 by the Hadamard bound, 1 only for mutually orthogonal rows
    let normalized = det(&units).ok_or_else(shape_error)?;
    let raw = det(vectors).ok_or_else(shape_error)?;
    let det = if raw.is_finite() {
        raw
    } else {
        normalized * lengths.iter().product::<f64>()
    };
    let tol = config.degeneracy_tolerance();
    tracing::trace!(det, normalized, "lattice vector determinant");

    if normalized.abs() <= tol {
        return Err(LatticeError::DegenerateVectors { det });
    }
    if normalized < 0.0 {
        return Err(LatticeError::LeftHandedVectors { det });
    }
    if normalized < NEAR_DEGENERATE_FACTOR * tol {
        tracing::warn!(det, normalized, "lattice vectors are nearly degenerate");
    }

    Ok(det)
}

/// Resolve the lattice vectors of a lattice.
///
/// - vectors given: validated, and checked against `angles` when those are given too.
/// - only angles given: unit vectors generated from the angles, then validated.
/// - nothing given: the identity matrix.
///
/// # Errors
///
/// Errors of [`validate_lattice_vectors`] and of the angle checks in [`crate::angles`].
pub fn resolve_lattice_vectors(
    dimension: Dimension,
    lattice_vectors: Option<Vec<Vec<f64>>>,
    angles: Option<&[f64]>,
    config: &ResolveConfig,
) -> Result<Vec<Vec<f64>>, LatticeError> {
    if let Some(angles) = angles {
        validate_angles(dimension, angles)?;
    }

    match (lattice_vectors, angles) {
        (Some(vectors), angles) => {
            validate_lattice_vectors(dimension, &vectors, config)?;
            if let Some(angles) = angles {
                check_consistent_angles(&vectors, angles, config.angle_tolerance())?;
            }
            Ok(vectors)
        }
        (None, Some(angles)) => {
            let vectors = vectors_from_angles(dimension, angles)?;
            tracing::debug!(?angles, "generated lattice vectors from cell angles");
            validate_lattice_vectors(dimension, &vectors, config)?;
            Ok(vectors)
        }
        (None, None) => {
            tracing::debug!(%dimension, "using identity lattice vectors");
            Ok(identity(dimension.get()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lattice_vectors;

    fn validate(dimension: Dimension, vectors: &[Vec<f64>]) -> Result<f64, LatticeError> {
        validate_lattice_vectors(dimension, vectors, &ResolveConfig::default())
    }

    #[test]
    fn default_is_identity() {
        let config = ResolveConfig::default();
        assert_eq!(
            resolve_lattice_vectors(Dimension::One, None, None, &config),
            Ok(vec![vec![1.0]])
        );
        assert_eq!(
            resolve_lattice_vectors(Dimension::Two, None, None, &config),
            Ok(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        );
        assert_eq!(
            resolve_lattice_vectors(Dimension::Three, None, None, &config),
            Ok(identity(3))
        );
    }

    #[test]
    fn invalid_shape() {
        let err = validate(Dimension::Two, &identity(3)).unwrap_err();
        assert_eq!(
            err,
            LatticeError::VectorShape {
                dimension: 2,
                row_lengths: vec![3, 3, 3]
            }
        );

        let err = validate(Dimension::Three, &identity(2)).unwrap_err();
        assert!(matches!(err, LatticeError::VectorShape { dimension: 3, .. }));

        // three rows of length two
        let err = validate(Dimension::Two, &lattice_vectors![1 0; 0 1; 1 1]).unwrap_err();
        assert!(matches!(err, LatticeError::VectorShape { .. }));
        assert_eq!(err.kind(), ErrorKind::Value);

        // ragged
        let err = validate(Dimension::Two, &[vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::VectorShape {
                dimension: 2,
                row_lengths: vec![2, 1]
            }
        );
    }

    #[test]
    fn colinear_vectors() {
        let err = validate(Dimension::Two, &lattice_vectors![1 0; 3 0]).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateVectors { .. }));

        let err = validate(
            Dimension::Three,
            &lattice_vectors![
                1 0 0;
                0 1 0;
                2 0 0;
            ],
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateVectors { .. }));

        let err = validate(Dimension::One, &[vec![0.0]]).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateVectors { .. }));
    }

    #[test]
    fn nearly_colinear_is_degenerate() {
        let vectors = vec![vec![1.0, 0.0], vec![1.0, 1e-12]];
        let err = validate(Dimension::Two, &vectors).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateVectors { .. }));

        // tight tolerance lets it through
        let config = ResolveConfig::new().with_degeneracy_tolerance(1e-14);
        assert!(validate_lattice_vectors(Dimension::Two, &vectors, &config).is_ok());
    }

    #[test]
    fn degeneracy_is_scale_invariant() {
        let tiny = lattice_vectors![1e-8 0; 0 1e-8];
        assert!(validate(Dimension::Two, &tiny).is_ok());

        let huge = lattice_vectors![1e8 0; 1e8 1e-4];
        assert!(matches!(
            validate(Dimension::Two, &huge),
            Err(LatticeError::DegenerateVectors { .. })
        ));
    }

    #[test]
    fn huge_entries_do_not_overflow_the_checks() {
        // plain determinant is inf - inf
        let colinear = vec![vec![1e200, 1e200], vec![1e200, 1e200]];
        assert!(matches!(
            validate(Dimension::Two, &colinear),
            Err(LatticeError::DegenerateVectors { .. })
        ));

        // plain determinant is inf, orthogonal rows
        let square = vec![vec![1e200, 0.0], vec![0.0, 1e200]];
        assert_eq!(validate(Dimension::Two, &square), Ok(f64::INFINITY));

        let swapped = vec![vec![0.0, 1e200], vec![1e200, 0.0]];
        assert_eq!(
            validate(Dimension::Two, &swapped),
            Err(LatticeError::LeftHandedVectors {
                det: f64::NEG_INFINITY
            })
        );

        let cube = vec![
            vec![1e150, 0.0, 0.0],
            vec![1e150, 1e150, 0.0],
            vec![0.0, 0.0, 1e150],
        ];
        assert!(validate(Dimension::Three, &cube).is_ok());
    }

    #[test]
    fn zero_row_is_degenerate() {
        let err = validate(Dimension::Two, &[vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap_err();
        assert_eq!(err, LatticeError::DegenerateVectors { det: 0.0 });
    }

    #[test]
    fn left_handed_vectors() {
        let err = validate(Dimension::Two, &lattice_vectors![1 2; 2 1]).unwrap_err();
        assert_eq!(err, LatticeError::LeftHandedVectors { det: -3.0 });

        let err = validate(
            Dimension::Three,
            &lattice_vectors![
                1 2 3;
                3 2 1;
                2 1 3;
            ],
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::LeftHandedVectors { .. }));

        let err = validate(Dimension::One, &[vec![-1.5]]).unwrap_err();
        assert_eq!(err, LatticeError::LeftHandedVectors { det: -1.5 });
    }

    #[test]
    fn right_handed_vectors() {
        assert_eq!(validate(Dimension::One, &[vec![2.0]]), Ok(2.0));
        assert_eq!(validate(Dimension::Two, &lattice_vectors![2 1; 1 2]), Ok(3.0));
        let det = validate(
            Dimension::Three,
            &lattice_vectors![
                0.0 0.5 0.5;
                0.5 0.0 0.5;
                0.5 0.5 0.0;
            ],
        );
        assert_eq!(det, Ok(0.25));
    }

    #[test]
    fn non_finite_entries() {
        let err = validate(Dimension::Two, &[vec![1.0, 0.0], vec![0.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, LatticeError::NonFiniteVector { row: 1, column: 1 });
    }

    #[test]
    fn angles_with_and_without_vectors() {
        let config = ResolveConfig::default();

        let vectors =
            resolve_lattice_vectors(Dimension::Two, None, Some(&[60.0]), &config).unwrap();
        assert!((vectors[1][0] - 0.5).abs() < 1e-12);

        let err = resolve_lattice_vectors(
            Dimension::Three,
            Some(identity(3)),
            Some(&[90.0, 90.0, 120.0]),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::InconsistentAngles { .. }));

        let ok = resolve_lattice_vectors(
            Dimension::Three,
            Some(identity(3)),
            Some(&[90.0, 90.0, 90.0]),
            &config,
        );
        assert_eq!(ok, Ok(identity(3)));

        let err =
            resolve_lattice_vectors(Dimension::One, None, Some(&[90.0]), &config).unwrap_err();
        assert!(matches!(err, LatticeError::AngleCount { .. }));
    }
}
