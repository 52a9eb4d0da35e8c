//! Orthonormal DCT-II.

use std::f64::consts::PI;

/// Precomputed orthonormal DCT-II basis truncated to the first `num_out` rows.
#[derive(Debug, Clone)]
pub struct Dct {
    basis: Vec<Vec<f64>>,
}

impl Dct {
    /// Builds the `[num_out][num_in]` basis.
    ///
    /// `y[k] = s(k) * sum_n x[n] * cos(pi * k * (2n + 1) / (2N))`
    /// with `s(0) = sqrt(1/N)` and `s(k) = sqrt(2/N)` otherwise.
    pub fn new(num_in: usize, num_out: usize) -> Self {
        let n = num_in as f64;
        let basis = (0..num_out)
            .map(|k| {
                let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
                (0..num_in)
                    .map(|i| scale * (PI * k as f64 * (2 * i + 1) as f64 / (2.0 * n)).cos())
                    .collect()
            })
            .collect();
        Self { basis }
    }

    /// Projects `input` onto the basis, writing `num_out` coefficients to `out`.
    pub fn apply(&self, input: &[f64], out: &mut [f64]) {
        for (row, y) in self.basis.iter().zip(out.iter_mut()) {
            *y = row.iter().zip(input).map(|(b, x)| b * x).sum();
        }
    }
}
