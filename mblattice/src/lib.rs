//! Validated lattice descriptors for periodic systems.
//!
//! A [`Lattice`] is resolved from partial input: a dimension, lattice vectors, lattice
//! spacings, cell angles and named bases of fractional coordinates may each be omitted and
//! are then inferred or defaulted. Whatever is given is validated, and construction either
//! yields a consistent lattice or a [`LatticeError`].
//!
//! ```
//! use mblattice::{basis, lattice_vectors, ErrorKind, Lattice};
//!
//! let lattice = Lattice::builder()
//!     .with_dimension(3.0)
//!     .with_lattice_spacings(vec![0.3615, 0.3615, 0.3615])
//!     .with_basis_vectors(basis![
//!         "Cu" => [(0.0, 0.0, 0.0), (0.5, 0.5, 0.0), (0.5, 0.0, 0.5), (0.0, 0.5, 0.5)];
//!     ])
//!     .build()
//!     .unwrap();
//! assert_eq!(lattice.dimension(), 3);
//!
//! let err = Lattice::builder()
//!     .with_lattice_vectors(lattice_vectors![
//!         1 0 0;
//!         0 1 0;
//!         2 0 0;
//!     ])
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Value);
//! ```

pub use mblattice_core::*;
