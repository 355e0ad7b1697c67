/*
 * Cell angles, in degrees.
 *
 * Ordering follows the usual crystallographic convention:
 * - 2D: [gamma]               gamma = angle(a, b)
 * - 3D: [alpha, beta, gamma]  alpha = angle(b, c), beta = angle(a, c), gamma = angle(a, b)
 *
 * Angles alone fix only the directions of the lattice vectors, the vectors generated from
 * them have unit length and the lattice spacings carry the scale.
 */

use crate::dimension::Dimension;
use crate::error::LatticeError;
use crate::math::angle_deg;

/// Number of independent cell angles for a dimension.
#[must_use]
pub fn angle_count(dimension: Dimension) -> usize {
    match dimension {
        Dimension::One => 0,
        Dimension::Two => 1,
        Dimension::Three => 3,
    }
}

fn invalid(angles: &[f64], reason: &'static str) -> LatticeError {
    LatticeError::InvalidAngles {
        angles: angles.to_vec(),
        reason,
    }
}

/// Check that `angles` can describe a cell of the given dimension.
///
/// # Errors
///
/// - [`LatticeError::AngleCount`] for a wrong number of angles (a 1D lattice takes none).
/// - [`LatticeError::InvalidAngles`] when an angle is outside (0, 180), or in 3D when the
///   angles sum to 360 or more, or one angle is not smaller than the sum of the other two.
pub fn validate_angles(dimension: Dimension, angles: &[f64]) -> Result<(), LatticeError> {
    let expected = angle_count(dimension);
    if angles.len() != expected {
        return Err(LatticeError::AngleCount {
            dimension: dimension.get(),
            expected,
            found: angles.len(),
        });
    }

    if angles
        .iter()
        .any(|&angle| !(angle.is_finite() && angle > 0.0 && angle < 180.0))
    {
        return Err(invalid(
            angles,
            "every angle must lie strictly between 0 and 180 degrees",
        ));
    }

    if let [alpha, beta, gamma] = *angles {
        if alpha + beta + gamma >= 360.0 {
            return Err(invalid(angles, "the angles must sum to less than 360 degrees"));
        }
        if alpha >= beta + gamma || beta >= alpha + gamma || gamma >= alpha + beta {
            return Err(invalid(
                angles,
                "each angle must be smaller than the sum of the other two",
            ));
        }
    }

    Ok(())
}

// cos(90°) is 6e-17 in floating point, keep right angles exact
fn snap(x: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        0.0
    } else {
        x
    }
}

fn cos_deg(angle: f64) -> f64 {
    snap(angle.to_radians().cos())
}

fn sin_deg(angle: f64) -> f64 {
    snap(angle.to_radians().sin())
}

/// Unit lattice vectors in the standard setting for the given angles.
///
/// `a` lies along x, `b` in the xy plane and `c` completes a right-handed set.
///
/// # Errors
///
/// Errors of [`validate_angles`], or [`LatticeError::InvalidAngles`] when the angles pass
/// the bounds but still do not span a positive volume.
pub fn vectors_from_angles(
    dimension: Dimension,
    angles: &[f64],
) -> Result<Vec<Vec<f64>>, LatticeError> {
    validate_angles(dimension, angles)?;

    match *angles {
        [] => Ok(vec![vec![1.0]]),
        [gamma] => Ok(vec![
            vec![1.0, 0.0],
            vec![cos_deg(gamma), sin_deg(gamma)],
        ]),
        [alpha, beta, gamma] => {
            let (cos_a, cos_b, cos_g) = (cos_deg(alpha), cos_deg(beta), cos_deg(gamma));
            let sin_g = sin_deg(gamma);

            let cx = cos_b;
            let cy = snap((cos_a - cos_b * cos_g) / sin_g);
            let cz2 = 1.0 - cx * cx - cy * cy;
            if cz2 <= 0.0 {
                return Err(invalid(
                    angles,
                    "the angles do not span a cell with positive volume",
                ));
            }

            Ok(vec![
                vec![1.0, 0.0, 0.0],
                vec![cos_g, sin_g, 0.0],
                vec![cx, cy, cz2.sqrt()],
            ])
        }
        // the count was checked above
        _ => Err(LatticeError::AngleCount {
            dimension: dimension.get(),
            expected: angle_count(dimension),
            found: angles.len(),
        }),
    }
}

/// Cell angles of a set of lattice vectors, empty for a single vector.
#[must_use]
pub fn lattice_angles(vectors: &[Vec<f64>]) -> Vec<f64> {
    match vectors {
        [a, b] => vec![angle_deg(a, b)],
        [a, b, c] => vec![angle_deg(b, c), angle_deg(a, c), angle_deg(a, b)],
        _ => vec![],
    }
}

/// # Errors
///
/// [`LatticeError::InconsistentAngles`] when any angle of `vectors` differs from the
/// given one by `tol` degrees or more.
pub fn check_consistent_angles(
    vectors: &[Vec<f64>],
    angles: &[f64],
    tol: f64,
) -> Result<(), LatticeError> {
    let derived = lattice_angles(vectors);
    let consistent = derived.len() == angles.len()
        && derived
            .iter()
            .zip(angles)
            .all(|(d, g)| crate::math::approx_f64(*d, *g, tol));

    if consistent {
        Ok(())
    } else {
        Err(LatticeError::InconsistentAngles {
            given: angles.to_vec(),
            derived,
        })
    }
}
