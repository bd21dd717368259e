//! Generic heap-allocated numeric containers: a dynamic vector and a
//! square matrix built on top of it.

pub mod error;

pub mod linalg {
    pub mod element;
    pub mod matrix;
    pub mod vector;
}

pub use error::{Error, Result};
pub use linalg::element::Element;
pub use linalg::matrix::{Matrix, MAX_MATRIX_SIZE};
pub use linalg::vector::{Vector, MAX_VECTOR_SIZE};
