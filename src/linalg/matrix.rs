use crate::error::{Error, Result};
use crate::linalg::element::Element;
use crate::linalg::vector::Vector;
use std::fmt;
use std::io::BufRead;
use std::ops;
use std::str::FromStr;

/// Upper bound on the dimension of a [`Matrix`].
pub const MAX_MATRIX_SIZE: usize = 10_000;

/// A square matrix stored as a vector of row-vectors.
///
/// Every row has the same length as the matrix's size; the rows are owned
/// by the matrix and the elements by their row, transitively.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: Vector<Vector<T>>,
}

fn check_dimension(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::ZeroSize);
    }
    if size > MAX_MATRIX_SIZE {
        return Err(Error::SizeTooLarge {
            size,
            max: MAX_MATRIX_SIZE,
        });
    }
    Ok(())
}

fn check_same_shape<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<()> {
    if lhs.size() != rhs.size() {
        return Err(Error::DimensionMismatch {
            left: lhs.size(),
            right: rhs.size(),
        });
    }
    // Also guards against a corrupted jagged state.
    for (a, b) in lhs.rows().iter().zip(rhs.rows()) {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
    }
    Ok(())
}

impl<T: Element> Matrix<T> {
    /// Creates a `size` x `size` matrix filled with `T::zero()`.
    pub fn new(size: usize) -> Result<Self> {
        check_dimension(size)?;
        let mut rows = Vec::new();
        rows.try_reserve_exact(size)
            .map_err(|_| Error::Allocation { requested: size })?;
        for _ in 0..size {
            rows.push(Vector::new(size)?);
        }
        Ok(Self {
            rows: Vector::from_vec(rows)?,
        })
    }
}

impl<T> Matrix<T> {
    /// Builds a matrix from owned rows, rejecting non-square input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        check_dimension(rows.len())?;
        let size = rows.len();
        let mut out = Vec::new();
        out.try_reserve_exact(size)
            .map_err(|_| Error::Allocation { requested: size })?;
        for row in rows {
            if row.len() != size {
                return Err(Error::DimensionMismatch {
                    left: size,
                    right: row.len(),
                });
            }
            out.push(Vector::from_vec(row)?);
        }
        Ok(Self {
            rows: Vector::from_vec(out)?,
        })
    }

    /// Row/column count.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vector<T>] {
        self.rows.as_slice()
    }

    /// Checked row access.
    pub fn at(&self, index: usize) -> Result<&Vector<T>> {
        self.rows.at(index)
    }

    /// Checked mutable row access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Vector<T>> {
        self.rows.at_mut(index)
    }

    /// Moves the rows out in constant time, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self {
            rows: self.rows.take(),
        }
    }

    /// Exchanges row-buffer ownership with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.rows.swap(&mut other.rows);
    }

    /// Reads the matrix row by row from `reader`.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<()>
    where
        T: FromStr,
    {
        for row in self.rows.as_mut_slice() {
            row.read_from(reader)?;
        }
        Ok(())
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            rows: Vector::default(),
        }
    }
}

impl<T> ops::Index<usize> for Matrix<T> {
    type Output = Vector<T>;

    /// Unchecked contract: `m[i][j]` composes two unchecked accesses.
    fn index(&self, index: usize) -> &Vector<T> {
        &self.rows[index]
    }
}

impl<T> ops::IndexMut<usize> for Matrix<T> {
    fn index_mut(&mut self, index: usize) -> &mut Vector<T> {
        &mut self.rows[index]
    }
}

impl<T: Element> ops::Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        Matrix {
            rows: Vector::from_parts(self.rows().iter().map(|row| row * rhs.clone()).collect()),
        }
    }
}

impl<T: Element> ops::Mul<&Vector<T>> for &Matrix<T> {
    type Output = Result<Vector<T>>;

    fn mul(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        if rhs.len() != self.size() {
            return Err(Error::DimensionMismatch {
                left: self.size(),
                right: rhs.len(),
            });
        }
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(self.size())
            .map_err(|_| Error::Allocation {
                requested: self.size(),
            })?;
        for row in self.rows() {
            entries.push(row.dot(rhs)?);
        }
        Ok(Vector::from_parts(entries.into_boxed_slice()))
    }
}

impl<T: Element> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        check_same_shape(self, rhs)?;
        let mut rows = Vec::new();
        rows.try_reserve_exact(self.size())
            .map_err(|_| Error::Allocation {
                requested: self.size(),
            })?;
        for (a, b) in self.rows().iter().zip(rhs.rows()) {
            rows.push((a + b)?);
        }
        Ok(Matrix {
            rows: Vector::from_parts(rows.into_boxed_slice()),
        })
    }
}

impl<T: Element> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        check_same_shape(self, rhs)?;
        let mut rows = Vec::new();
        rows.try_reserve_exact(self.size())
            .map_err(|_| Error::Allocation {
                requested: self.size(),
            })?;
        for (a, b) in self.rows().iter().zip(rhs.rows()) {
            rows.push((a - b)?);
        }
        Ok(Matrix {
            rows: Vector::from_parts(rows.into_boxed_slice()),
        })
    }
}

impl<T: Element> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    /// Requires both operands to have the same square size, not merely
    /// compatible inner dimensions.
    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        check_same_shape(self, rhs)?;
        let n = self.size();
        let mut out = Matrix::new(n)?;
        for i in 0..n {
            for j in 0..n {
                // `k` ascending from 0; the order matters for
                // non-commutative and floating-point elements.
                let mut acc = T::zero();
                for k in 0..n {
                    acc = acc + self[i][k].clone() * rhs[k][j].clone();
                }
                out[i][j] = acc;
            }
        }
        Ok(out)
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// One row per line, in the vector format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::io::Cursor;

    fn counting(size: usize) -> Matrix<i64> {
        let mut m = Matrix::new(size).unwrap();
        for i in 0..size {
            for j in 0..size {
                m[i][j] = (i * size + j) as i64;
            }
        }
        m
    }

    #[test]
    fn can_create_matrix_with_positive_length() {
        let m = Matrix::<i64>::new(5).unwrap();
        assert_eq!(m.size(), 5);
        for row in m.rows() {
            assert_eq!(row.len(), 5);
            assert!(row.as_slice().iter().all(|x| *x == 0));
        }
    }

    #[test]
    fn cant_create_zero_size_matrix() {
        assert!(matches!(Matrix::<i64>::new(0), Err(Error::ZeroSize)));
    }

    #[test]
    fn cant_create_too_large_matrix() {
        assert!(matches!(
            Matrix::<i64>::new(MAX_MATRIX_SIZE + 1),
            Err(Error::SizeTooLarge { .. })
        ));
    }

    #[test]
    fn from_rows_rejects_jagged_input() {
        assert!(matches!(
            Matrix::from_rows(vec![vec![1i64, 2], vec![3]]),
            Err(Error::DimensionMismatch { left: 2, right: 1 })
        ));
        assert!(matches!(
            Matrix::from_rows(vec![vec![1i64, 2, 3], vec![4, 5, 6]]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn copied_matrix_is_equal_to_source_one() {
        let m = counting(3);
        assert_eq!(m, m.clone());
    }

    #[test]
    fn copied_matrix_has_its_own_memory() {
        let m = counting(3);
        let mut copy = m.clone();
        copy[0][0] = 100;
        assert_ne!(m[0][0], copy[0][0]);
        assert_eq!(m[0][0], 0);
    }

    #[test]
    fn clone_from_changes_matrix_size() {
        let m = counting(4);
        let mut target = counting(2);
        target.clone_from(&m);
        assert_eq!(target.size(), 4);
        assert_eq!(target, m);
    }

    #[test]
    fn compare_equal_matrices_return_true() {
        assert_eq!(counting(3), counting(3));
    }

    #[test]
    fn compare_matrix_with_itself_return_true() {
        let m = counting(3);
        assert_eq!(m, m);
    }

    #[test]
    fn compare_not_equal_matrices_return_false() {
        let m = counting(3);
        let mut other = counting(3);
        other[2][2] = -1;
        assert_ne!(m, other);
    }

    #[test]
    fn compare_matrices_with_different_size_return_false() {
        assert_ne!(counting(3), counting(5));
    }

    #[test]
    fn checked_row_access() {
        let m = counting(3);
        assert_eq!(*m.at(2).unwrap(), m[2].clone());
        assert!(matches!(
            m.at(3),
            Err(Error::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn can_multiply_matrix_by_scalar() {
        let m = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![5i64, 10], vec![15, 20]]).unwrap();
        assert_eq!(expected, &m * 5);
    }

    #[test]
    fn can_multiply_matrix_by_vector() {
        let m = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let v = Vector::from_slice(&[10i64, 20]).unwrap();
        let expected = Vector::from_slice(&[50i64, 110]).unwrap();
        assert_eq!(expected, (&m * &v).unwrap());
    }

    #[test]
    fn cant_multiply_matrix_by_vector_with_not_equal_size() {
        let m = Matrix::<i64>::new(2).unwrap();
        let v = Vector::<i64>::new(3).unwrap();
        assert!(matches!(
            &m * &v,
            Err(Error::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn can_add_matrices_with_equal_size() {
        let a = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![10i64, 20], vec![30, 40]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![11i64, 22], vec![33, 44]]).unwrap();
        assert_eq!(expected, (&a + &b).unwrap());
    }

    #[test]
    fn cant_add_matrices_with_not_equal_size() {
        let a = Matrix::<i64>::new(2).unwrap();
        let b = Matrix::<i64>::new(3).unwrap();
        assert!(matches!(&a + &b, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn can_subtract_matrices_with_equal_size() {
        let a = Matrix::from_rows(vec![vec![11i64, 22], vec![33, 44]]).unwrap();
        let b = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![10i64, 20], vec![30, 40]]).unwrap();
        assert_eq!(expected, (&a - &b).unwrap());
    }

    #[test]
    fn cant_subtract_matrices_with_not_equal_size() {
        let a = Matrix::<i64>::new(2).unwrap();
        let b = Matrix::<i64>::new(3).unwrap();
        assert!(matches!(&a - &b, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn can_multiply_matrices_with_equal_size() {
        let a = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5i64, 6], vec![7, 8]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![19i64, 22], vec![43, 50]]).unwrap();
        assert_eq!(expected, (&a * &b).unwrap());
    }

    #[test]
    fn cant_multiply_matrices_with_not_equal_size() {
        let a = Matrix::<i64>::new(2).unwrap();
        let b = Matrix::<i64>::new(3).unwrap();
        assert!(matches!(&a * &b, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn can_swap_matrices() {
        let mut a = counting(2);
        let mut b = counting(3);
        let a_copy = a.clone();
        let b_copy = b.clone();
        a.swap(&mut b);
        assert_eq!(a, b_copy);
        assert_eq!(b, a_copy);
        a.swap(&mut b);
        assert_eq!(a, a_copy);
        assert_eq!(b, b_copy);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut m = counting(3);
        let moved = m.take();
        assert_eq!(m.size(), 0);
        assert!(m.is_empty());
        assert_eq!(moved, counting(3));
    }

    #[test]
    fn display_writes_one_row_per_line() {
        let m = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "(1, 2)\n(3, 4)\n");
    }

    #[test]
    fn read_from_fills_row_by_row() {
        let mut m = Matrix::<i64>::new(2).unwrap();
        let mut input = Cursor::new("1 2\n3 4\n");
        m.read_from(&mut input).unwrap();
        let expected = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        assert_eq!(m, expected);
    }

    #[test]
    fn works_with_heap_owned_elements() {
        let bi = |x: i64| BigInt::from(x);
        let a = Matrix::from_rows(vec![vec![bi(1), bi(2)], vec![bi(3), bi(4)]]).unwrap();
        let b = Matrix::from_rows(vec![vec![bi(5), bi(6)], vec![bi(7), bi(8)]]).unwrap();
        let expected =
            Matrix::from_rows(vec![vec![bi(19), bi(22)], vec![bi(43), bi(50)]]).unwrap();
        assert_eq!(expected, (&a * &b).unwrap());
    }
}
