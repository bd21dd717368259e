use num_traits::Zero;
use std::ops::{Add, Mul, Sub};

pub trait Element:  // Avoid repeating all the traits
    Clone
    + Zero
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + std::fmt::Display
    + std::fmt::Debug
{
}

impl<T> Element for T where
    T: Clone
        + Zero
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + std::fmt::Display
        + std::fmt::Debug
{
}
