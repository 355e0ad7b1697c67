use mblattice_macros::matrix;

macro_rules! assert_eq_approx {
    ($a:expr, $b:expr) => {{
        assert_eq_approx!($a, $b, 1e-12)
    }};
    ($a:expr, $b:expr, $tol:expr) => {{
        let (left, right) = ($a, $b);
        if (left - right).abs() > $tol {
            panic!(
                "assertion failed: `{} ≈ {}`, diff:  `{}`, tol: `{}`",
                left,
                right,
                (left - right).abs(),
                $tol
            );
        }
    }};
}

#[test]
fn matrix_square() {
    let mat = matrix![
        1 0 0;
        0 1 0;
        0 0 1;
    ];

    assert_eq!(mat.len(), 3);
    assert!(mat.iter().all(|row| row.len() == 3));
    assert_eq_approx!(mat[0][0], 1.0);
    assert_eq_approx!(mat[2][1], 0.0);

    let mat = matrix![
        1, 0;
        0.5, 2;
    ];
    assert_eq!(mat, vec![vec![1.0, 0.0], vec![0.5, 2.0]]);
}

#[test]
fn matrix_single_row() {
    let mat = matrix![2.5];
    assert_eq!(mat, vec![vec![2.5]]);

    // trailing `;` is optional
    let mat = matrix![1, 2, 3;];
    assert_eq!(mat, vec![vec![1.0, 2.0, 3.0]]);
}

#[test]
fn matrix_rectangular_is_allowed() {
    // shape against the lattice dimension is checked at runtime
    let mat = matrix![
        1, 0;
        0, 1;
        1, 1;
    ];
    assert_eq!(mat.len(), 3);
    assert_eq!(mat[2], vec![1.0, 1.0]);
}

#[test]
fn matrix_math_functions() {
    let mat = matrix![
        cos(PI/3.), sin(PI/3.);
        0, sqrt(4.0);
    ];

    assert_eq_approx!(mat[0][0], 0.5);
    assert_eq_approx!(mat[0][1], f64::sqrt(3.0) / 2.0);
    assert_eq_approx!(mat[1][1], 2.0);

    let mat = matrix![
        1 + 2 + 1, 2, 3;
        4, 5, 6.1;
        7, 8, f64::cos(0.0);
    ];
    assert_eq_approx!(mat[0][0], 4.0);
    assert_eq_approx!(mat[1][2], 6.1);
    assert_eq_approx!(mat[2][2], 1.0);
}

#[test]
fn matrix_nested_items_are_rewritten() {
    let mat = matrix![
        (1.0 / 2.0), -sqrt(abs(-4.0));
        2.0 * (pi / 4.0), cos(to_radians(60.0));
    ];

    assert_eq_approx!(mat[0][0], 0.5);
    assert_eq_approx!(mat[0][1], -2.0);
    assert_eq_approx!(mat[1][0], std::f64::consts::FRAC_PI_2);
    assert_eq_approx!(mat[1][1], 0.5);
}
