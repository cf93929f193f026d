use nalgebra::{Matrix3, Vector3};

use crate::error::{Result, ViewError};

/// Largest tensor rank carried per site.
pub const MAX_RANK: usize = 3;

/// A batch of small tensors, one per lattice site.
///
/// Each site stores `3^rank` components in row-major order, i.e. the
/// component `T[i][j][k]` lives at offset `9*i + 3*j + k` within the site.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorField {
    rank: usize,
    data: Vec<f64>,
}

/// Number of components per site for a tensor of the given rank.
pub fn components_for_rank(rank: usize) -> usize {
    3usize.pow(rank as u32)
}

impl TensorField {
    pub fn from_raw(rank: usize, data: Vec<f64>) -> Result<Self> {
        if rank > MAX_RANK {
            return Err(ViewError::ShapeMismatch(format!(
                "tensor rank {} exceeds the supported maximum of {}",
                rank, MAX_RANK
            )));
        }
        let width = components_for_rank(rank);
        if data.len() % width != 0 {
            return Err(ViewError::ShapeMismatch(format!(
                "{} values do not split into rank-{} tensors of {} components",
                data.len(),
                rank,
                width
            )));
        }
        Ok(Self { rank, data })
    }

    pub fn zeros(rank: usize, sites: usize) -> Self {
        Self {
            rank,
            data: vec![0.0; sites * components_for_rank(rank)],
        }
    }

    pub fn from_scalars(values: Vec<f64>) -> Self {
        Self { rank: 0, data: values }
    }

    pub fn from_vectors(vectors: &[Vector3<f64>]) -> Self {
        let data = vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect();
        Self { rank: 1, data }
    }

    pub fn from_matrices(matrices: &[Matrix3<f64>]) -> Self {
        let mut data = Vec::with_capacity(matrices.len() * 9);
        for m in matrices {
            for i in 0..3 {
                for j in 0..3 {
                    data.push(m[(i, j)]);
                }
            }
        }
        Self { rank: 2, data }
    }

    /// A single rank-3 tensor, typically used as a constant contraction operand.
    pub fn from_rank3(tensor: [[[f64; 3]; 3]; 3]) -> Self {
        let data = tensor
            .iter()
            .flat_map(|plane| plane.iter().flat_map(|row| row.iter().copied()))
            .collect();
        Self { rank: 3, data }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Components per site.
    pub fn width(&self) -> usize {
        components_for_rank(self.rank)
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.data.len() / self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn site(&self, site: usize) -> &[f64] {
        let w = self.width();
        &self.data[site * w..(site + 1) * w]
    }

    pub fn site_mut(&mut self, site: usize) -> &mut [f64] {
        let w = self.width();
        &mut self.data[site * w..(site + 1) * w]
    }

    pub fn scalar(&self, site: usize) -> f64 {
        debug_assert_eq!(self.rank, 0);
        self.data[site]
    }

    pub fn vector(&self, site: usize) -> Vector3<f64> {
        debug_assert_eq!(self.rank, 1);
        Vector3::from_column_slice(self.site(site))
    }

    pub fn matrix(&self, site: usize) -> Matrix3<f64> {
        debug_assert_eq!(self.rank, 2);
        Matrix3::from_row_slice(self.site(site))
    }

    /// Copy out the tensors of the listed sites, in the listed order.
    pub fn gather(&self, sites: &[usize]) -> TensorField {
        let mut data = Vec::with_capacity(sites.len() * self.width());
        for &s in sites {
            data.extend_from_slice(self.site(s));
        }
        TensorField {
            rank: self.rank,
            data,
        }
    }

    /// Zero every component at sites where `keep` is false.
    pub fn zero_where(&mut self, keep: impl Fn(usize) -> bool) {
        for site in 0..self.len() {
            if !keep(site) {
                self.site_mut(site).fill(0.0);
            }
        }
    }

    /// Component-wise `self - other`.
    pub fn sub(&self, other: &TensorField) -> Result<TensorField> {
        if self.rank != other.rank || self.data.len() != other.data.len() {
            return Err(ViewError::ShapeMismatch(format!(
                "cannot subtract rank-{} field of {} sites from rank-{} field of {} sites",
                other.rank,
                other.len(),
                self.rank,
                self.len()
            )));
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect();
        Ok(TensorField {
            rank: self.rank,
            data,
        })
    }

    /// Apply `f` to every component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> TensorField {
        TensorField {
            rank: self.rank,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Minimum and maximum over all components, `None` for an empty field.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
