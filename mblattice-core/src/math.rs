pub use mblattice_macros::matrix;

#[must_use]
pub fn approx_f64(a: f64, b: f64, tol: f64) -> bool {
    f64::abs(a - b) < tol
}

/// `n x n` identity, vector `i` has a 1 in position `i` and 0 elsewhere.
#[must_use]
pub fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Determinant of a square matrix of side 1, 2 or 3, rows as vectors.
///
/// Returns `None` when the matrix is not square or larger than 3x3.
#[must_use]
pub fn det(m: &[Vec<f64>]) -> Option<f64> {
    if m.iter().any(|row| row.len() != m.len()) {
        return None;
    }

    match m.len() {
        1 => Some(m[0][0]),
        2 => Some(m[0][0] * m[1][1] - m[0][1] * m[1][0]),
        // det=a(ei−fh)−b(di−fg)+c(dh−eg)
        3 => Some(
            m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]),
        ),
        _ => None,
    }
}

/// dot product
#[must_use]
pub fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v).map(|(a, b)| a * b).sum()
}

#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Angle between two vectors in degrees.
#[must_use]
pub fn angle_deg(u: &[f64], v: &[f64]) -> f64 {
    // scale by the largest entry first so huge vectors do not overflow
    let rescale = |w: &[f64]| -> Vec<f64> {
        let largest = w.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
        w.iter().map(|x| x / largest).collect()
    };
    let (u, v) = (rescale(u), rescale(v));
    let cos = dot(&u, &v) / (norm(&u) * norm(&v));
    // rounding can push |cos| slightly above 1
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Build a lattice vector matrix inline.
///
/// Rows are separated by `;`, items by whitespace or `,`. Expands to `Vec<Vec<f64>>`.
///
/// # Examples
///
/// ```
/// use mblattice_core::lattice_vectors;
///
/// let hex = lattice_vectors![
///     1.0,         0.0;
///     cos(PI/3.),  sin(PI/3.);
/// ];
/// assert_eq!(hex.len(), 2);
/// assert_eq!(hex[0], vec![1.0, 0.0]);
/// ```
#[macro_export]
macro_rules! lattice_vectors {
    ( $($tokens:tt)* ) => {{
        let inner: ::std::vec::Vec<::std::vec::Vec<f64>> = $crate::math::matrix!($($tokens)*);
        inner
    }};
}
