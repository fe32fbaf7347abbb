//! Nested-bracket rendering of arrays.
//!
//! The walk follows the physical buffer: each axis advances by its stride and
//! steps back by its backstride once the axis is exhausted, so any layout
//! prints in logical order.

use std::fmt;

use crate::array::Array;

impl fmt::Display for Array {
    /// Formats elements with three decimals, numpy style:
    ///
    /// ```text
    /// [[1.000 2.000]
    ///  [3.000 4.000]]
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_axis(f, 0, 0)?;
        Ok(())
    }
}

impl Array {
    /// Write axis `depth` starting at element `offset`; returns the offset
    /// after stepping back to the start of the axis.
    fn write_axis(
        &self,
        f: &mut fmt::Formatter<'_>,
        depth: usize,
        mut offset: isize,
    ) -> Result<isize, fmt::Error> {
        let item = self.itemsize() as isize;
        let len = self.shape()[depth];
        let step = self.strides()[depth] / item;
        let last = depth + 1 == self.ndim();

        f.write_str("[")?;
        for i in 0..len {
            if i > 0 {
                if last {
                    f.write_str(" ")?;
                } else {
                    // One newline per remaining axis, then align under the bracket
                    for _ in 0..self.ndim() - depth - 1 {
                        f.write_str("\n")?;
                    }
                    for _ in 0..=depth {
                        f.write_str(" ")?;
                    }
                }
            }
            if last {
                write!(f, "{:.3}", self.data()[offset as usize])?;
            } else {
                offset = self.write_axis(f, depth + 1, offset)?;
            }
            if i + 1 < len {
                offset += step;
            }
        }
        f.write_str("]")?;

        Ok(offset + self.backstrides()[depth] / item)
    }
}
