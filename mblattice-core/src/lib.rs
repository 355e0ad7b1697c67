mod error;
pub use error::{ErrorKind, LatticeError};

pub mod config;
pub use config::ResolveConfig;

mod dimension;
pub use dimension::{parse_dimension, resolve_dimension, Dimension, DimensionArg};

pub mod angles;

mod vectors;
pub use vectors::{resolve_lattice_vectors, validate_lattice_vectors};

mod spacings;
pub use spacings::{resolve_lattice_spacings, validate_lattice_spacings};

mod basis;
pub use basis::{
    resolve_basis_vectors, validate_basis_vectors, BasisRegistry, DEFAULT_BASIS_NAME,
};

mod params;
pub use params::LatticeParams;

mod lattice;
pub use lattice::{Lattice, LatticeBuilder};

pub mod math;
