//! Coordinate enumeration and linearization.
//!
//! The pairing of a row-major enumeration of coordinates with the buffer
//! offset of each coordinate is what gives "element `i`" a layout-independent
//! meaning: position `i` of the enumeration is the `i`-th element in canonical
//! order, and its linear index says where that element lives in the buffer.

/// Odometer over the coordinates of a shape.
///
/// Iterates in row-major order (last index varies fastest). An empty shape
/// yields a single empty coordinate.
pub struct MultiIndex {
    dims: Vec<usize>,
    current: Vec<usize>,
    total: usize,
    count: usize,
}

impl MultiIndex {
    pub fn new(dims: &[usize]) -> Self {
        let total: usize = dims.iter().product();
        Self {
            dims: dims.to_vec(),
            current: vec![0; dims.len()],
            total,
            count: 0,
        }
    }

    /// The coordinate produced by the last call to `next`.
    #[inline]
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    /// Compute the byte offset of the current coordinate for the given strides.
    pub fn offset(&self, strides: &[isize]) -> isize {
        self.current
            .iter()
            .zip(strides.iter())
            .map(|(&i, &s)| i as isize * s)
            .sum()
    }
}

impl Iterator for MultiIndex {
    type Item = ();

    fn next(&mut self) -> Option<()> {
        if self.count >= self.total {
            return None;
        }
        if self.count > 0 {
            // Increment with carry into the next outer axis
            for i in (0..self.dims.len()).rev() {
                self.current[i] += 1;
                if self.current[i] < self.dims[i] {
                    break;
                }
                self.current[i] = 0;
            }
        }
        self.count += 1;
        Some(())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.count;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MultiIndex {}

/// All n-dimensional coordinates of a shape, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayIndices {
    pub indices: Vec<Vec<usize>>,
    pub count: usize,
}

/// Buffer offset (in elements) of each coordinate of an [`ArrayIndices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearIndices {
    pub indices: Vec<usize>,
    pub count: usize,
}

/// Enumerate every coordinate of `shape` in row-major order.
pub fn enumerate(shape: &[usize]) -> ArrayIndices {
    let mut iter = MultiIndex::new(shape);
    let mut indices = Vec::with_capacity(iter.len());
    while iter.next().is_some() {
        indices.push(iter.current().to_vec());
    }
    ArrayIndices {
        count: indices.len(),
        indices,
    }
}

/// Element offset of `coords`: the dot product with the byte strides,
/// divided by the element size.
#[inline]
pub fn linearize(coords: &[usize], strides: &[isize], itemsize: usize) -> usize {
    debug_assert_eq!(coords.len(), strides.len());
    let bytes: isize = coords
        .iter()
        .zip(strides.iter())
        .map(|(&i, &s)| i as isize * s)
        .sum();
    debug_assert!(bytes >= 0, "negative offset {bytes}");
    bytes as usize / itemsize
}

/// Linearize every coordinate of an enumeration.
pub fn linear_indices(idxs: &ArrayIndices, strides: &[isize], itemsize: usize) -> LinearIndices {
    let indices: Vec<usize> = idxs
        .indices
        .iter()
        .map(|coords| linearize(coords, strides, itemsize))
        .collect();
    LinearIndices {
        count: indices.len(),
        indices,
    }
}

/// Check that `axes` holds each of `0..n` exactly once.
pub fn is_permutation(axes: &[usize], n: usize) -> bool {
    if axes.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &p in axes {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Invert a permutation: if perm[i] = j, then result[j] = i.
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0usize; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_index_walks_row_major_buffer() {
        // (2, 4, 2) f32 array: byte strides [32, 8, 4]
        let mut iter = MultiIndex::new(&[2, 4, 2]);
        let mut offsets = vec![];
        while iter.next().is_some() {
            offsets.push(iter.offset(&[32, 8, 4]));
        }
        let expected: Vec<isize> = (0..16).map(|i| i * 4).collect();
        assert_eq!(offsets, expected);
        assert_eq!(iter.current(), &[1, 3, 1]);
    }

    #[test]
    fn test_multi_index_transposed_strides() {
        // Reversed axes of a (2, 3) buffer: shape (3, 2), strides [4, 12]
        let mut iter = MultiIndex::new(&[3, 2]);
        let mut offsets = vec![];
        while iter.next().is_some() {
            offsets.push(iter.offset(&[4, 12]) / 4);
        }
        assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_multi_index_no_batch_axes() {
        // Plain matrices have no batch axes: one pass at offset 0
        let mut iter = MultiIndex::new(&[]);
        assert_eq!(iter.len(), 1);
        assert!(iter.next().is_some());
        assert_eq!(iter.offset(&[]), 0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_multi_index_len() {
        let mut iter = MultiIndex::new(&[2, 2]);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_enumerate_counts() {
        let idxs = enumerate(&[2, 4, 2]);
        assert_eq!(idxs.count, 16);
        assert_eq!(idxs.indices[0], vec![0, 0, 0]);
        assert_eq!(idxs.indices[1], vec![0, 0, 1]);
        assert_eq!(idxs.indices[2], vec![0, 1, 0]);
        assert_eq!(idxs.indices[15], vec![1, 3, 1]);
    }

    #[test]
    fn test_linearize() {
        // Row-major 2x3 in bytes
        assert_eq!(linearize(&[1, 2], &[12, 4], 4), 5);
        // Same coordinate through transposed strides
        assert_eq!(linearize(&[1, 2], &[4, 8], 4), 5);
        assert_eq!(linearize(&[2, 1], &[4, 12], 4), 5);
    }

    #[test]
    fn test_linear_indices_transposed() {
        // 3x2 logical view over a row-major 2x3 buffer
        let idxs = enumerate(&[3, 2]);
        let lidxs = linear_indices(&idxs, &[4, 12], 4);
        assert_eq!(lidxs.indices, vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(lidxs.count, 6);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }

    #[test]
    fn test_invert_permutation_restores_strides() {
        // Strides of a (2, 3, 4) f32 array, permuted by [1, 2, 0]
        let strides = [48isize, 16, 4];
        let axes = [1, 2, 0];
        let permuted: Vec<isize> = axes.iter().map(|&p| strides[p]).collect();
        assert_eq!(permuted, vec![16, 4, 48]);

        let inv = invert_permutation(&axes);
        assert_eq!(inv, vec![2, 0, 1]);
        assert!(is_permutation(&inv, 3));
        let restored: Vec<isize> = inv.iter().map(|&p| permuted[p]).collect();
        assert_eq!(restored, strides.to_vec());
    }
}
