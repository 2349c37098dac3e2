use serde::{Deserialize, Serialize};

/// N-dimensional grid storage with flat backing array and stride-based indexing.
///
/// Stores values in row-major order where the last dimension varies fastest,
/// which is the order `grid_sweep` produces its rows in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> SweepGrid<T> {
    /// Create a grid from existing data. Data must be in row-major order.
    pub fn from_data(shape: Vec<usize>, data: Vec<T>) -> Option<Self> {
        let total_size: usize = shape.iter().product();
        if data.len() != total_size {
            return None;
        }
        let strides = compute_strides(&shape);
        Some(Self {
            data,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Convert multi-dimensional indices to flat index
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (i, (&idx, &size)) in indices.iter().zip(&self.shape).enumerate() {
            if idx >= size {
                return None;
            }
            flat += idx * self.strides[i];
        }
        Some(flat)
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.flat_index(indices).map(|i| &self.data[i])
    }

    /// Contiguous slice of the last dimension at a fixed outer index.
    /// Only meaningful for 2D grids.
    pub fn row(&self, index: usize) -> Option<&[T]> {
        if self.ndim() != 2 || index >= self.shape[0] {
            return None;
        }
        let width = self.shape[1];
        let start = index * width;
        Some(&self.data[start..start + width])
    }
}

/// Compute strides for row-major order
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return Vec::new();
    }
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_rejects_wrong_size() {
        assert!(SweepGrid::from_data(vec![2, 3], vec![0; 5]).is_none());
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = SweepGrid::from_data(vec![2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.get(&[0, 2]), Some(&3));
        assert_eq!(grid.get(&[1, 0]), Some(&4));
        assert_eq!(grid.get(&[2, 0]), None);
        assert_eq!(grid.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn test_strides() {
        assert_eq!(compute_strides(&[4, 5, 3]), vec![15, 3, 1]);
        assert!(compute_strides(&[]).is_empty());
    }
}
