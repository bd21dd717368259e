use crate::error::{Error, Result};
use crate::linalg::element::Element;
use std::fmt;
use std::io::BufRead;
use std::mem;
use std::ops;
use std::str::FromStr;

/// Upper bound on the length of a [`Vector`].
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// A heap-allocated vector of a fixed length.
///
/// The buffer is exclusively owned; distinct vectors never alias. A vector
/// that has been emptied by [`Vector::take`] has length zero and no buffer,
/// and is only good for being reassigned or dropped.
#[derive(Debug, PartialEq)]
pub struct Vector<T> {
    elems: Box<[T]>,
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::ZeroSize);
    }
    if size > MAX_VECTOR_SIZE {
        return Err(Error::SizeTooLarge {
            size,
            max: MAX_VECTOR_SIZE,
        });
    }
    Ok(())
}

fn check_same_size<T>(lhs: &Vector<T>, rhs: &Vector<T>) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(Error::SizeMismatch {
            left: lhs.len(),
            right: rhs.len(),
        });
    }
    Ok(())
}

impl<T: Element> Vector<T> {
    /// Creates a vector of `size` elements, all set to `T::zero()`.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        let mut elems = Vec::new();
        elems
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { requested: size })?;
        elems.resize_with(size, T::zero);
        Ok(Self {
            elems: elems.into_boxed_slice(),
        })
    }

    /// Dot product, accumulated in ascending index order starting from
    /// `T::zero()`. The order matters for non-commutative and
    /// floating-point elements.
    pub fn dot(&self, rhs: &Vector<T>) -> Result<T> {
        check_same_size(self, rhs)?;
        Ok(self
            .elems
            .iter()
            .zip(rhs.elems.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }
}

impl<T: Clone> Vector<T> {
    /// Deep-copies `source` into a new vector.
    pub fn from_slice(source: &[T]) -> Result<Self> {
        check_size(source.len())?;
        let mut elems = Vec::new();
        elems
            .try_reserve_exact(source.len())
            .map_err(|_| Error::Allocation {
                requested: source.len(),
            })?;
        elems.extend_from_slice(source);
        Ok(Self {
            elems: elems.into_boxed_slice(),
        })
    }
}

impl<T> Vector<T> {
    /// Takes ownership of `elems` without copying.
    pub fn from_vec(elems: Vec<T>) -> Result<Self> {
        check_size(elems.len())?;
        Ok(Self {
            elems: elems.into_boxed_slice(),
        })
    }

    // Internal constructor for results whose size mirrors an
    // already-validated operand.
    pub(crate) fn from_parts(elems: Box<[T]>) -> Self {
        Self { elems }
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elems
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.elems.len() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.elems.len(),
            });
        }
        Ok(&self.elems[index])
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.elems.len() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.elems.len(),
            });
        }
        Ok(&mut self.elems[index])
    }

    /// Moves the buffer out in constant time, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self {
            elems: mem::take(&mut self.elems),
        }
    }

    /// Exchanges size and buffer ownership with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.elems, &mut other.elems);
    }

    /// Reads `len()` whitespace-separated elements from `reader` in index
    /// order, consuming no more of the stream than needed.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<()>
    where
        T: FromStr,
    {
        for slot in self.elems.iter_mut() {
            let token = next_token(reader)?;
            *slot = token.parse().map_err(|_| Error::Parse { token })?;
        }
        Ok(())
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self {
            elems: Vec::new().into_boxed_slice(),
        }
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self {
            elems: self.elems.clone(),
        }
    }

    // Same-length assignment copies in place; otherwise the replacement
    // buffer is fully built before the old one is dropped, so a failure
    // while cloning leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        if self.elems.len() == source.elems.len() {
            self.elems.clone_from_slice(&source.elems);
        } else {
            self.elems = source.elems.clone();
        }
    }
}

impl<T> ops::Index<usize> for Vector<T> {
    type Output = T;

    /// Unchecked contract: the caller has already validated `index`.
    /// Panics on an out-of-range index instead of returning an error.
    fn index(&self, index: usize) -> &T {
        &self.elems[index]
    }
}

impl<T> ops::IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elems[index]
    }
}

impl<T: Element> ops::Add<T> for &Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: T) -> Vector<T> {
        Vector {
            elems: self.elems.iter().map(|a| a.clone() + rhs.clone()).collect(),
        }
    }
}

impl<T: Element> ops::Sub<T> for &Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: T) -> Vector<T> {
        Vector {
            elems: self.elems.iter().map(|a| a.clone() - rhs.clone()).collect(),
        }
    }
}

impl<T: Element> ops::Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        Vector {
            elems: self.elems.iter().map(|a| a.clone() * rhs.clone()).collect(),
        }
    }
}

impl<T: Element> ops::Add<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn add(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        check_same_size(self, rhs)?;
        Ok(Vector {
            elems: self
                .elems
                .iter()
                .zip(rhs.elems.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
        })
    }
}

impl<T: Element> ops::Sub<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn sub(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        check_same_size(self, rhs)?;
        Ok(Vector {
            elems: self
                .elems
                .iter()
                .zip(rhs.elems.iter())
                .map(|(a, b)| a.clone() - b.clone())
                .collect(),
        })
    }
}

impl<T: Element> ops::Mul<&Vector<T>> for &Vector<T> {
    type Output = Result<T>;

    fn mul(self, rhs: &Vector<T>) -> Result<T> {
        self.dot(rhs)
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    /// `(e0, e1, ..., e_{n-1})`; an empty vector prints `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.elems.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{elem}")?;
        }
        write!(f, ")")
    }
}

// Consumes leading whitespace, then one token and the single delimiter
// byte after it (if any), and nothing further.
pub(crate) fn next_token<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut token = Vec::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let mut used = 0;
        let mut done = false;
        for &byte in buf {
            if byte.is_ascii_whitespace() {
                used += 1;
                if !token.is_empty() {
                    done = true;
                    break;
                }
            } else {
                token.push(byte);
                used += 1;
            }
        }
        reader.consume(used);
        if done {
            break;
        }
    }
    if token.is_empty() {
        return Err(Error::UnexpectedEof);
    }
    String::from_utf8(token).map_err(|err| Error::Parse {
        token: String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
