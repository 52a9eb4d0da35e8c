//! Radix-2 Cooley-Tukey FFT with a precomputed plan.

use std::f64::consts::PI;

/// FFT plan for a fixed power-of-2 size.
///
/// The plan only holds read-only tables, so one instance can be shared
/// across threads. Callers own their working buffers.
#[derive(Debug, Clone)]
pub struct Fft {
    size: usize,
    bitrev: Vec<usize>,
    twiddles: Vec<(f64, f64)>,
}

impl Fft {
    /// Builds a plan for `size` points. `size` must be a power of 2.
    pub fn new(size: usize) -> Self {
        debug_assert!(size.is_power_of_two(), "fft size must be a power of 2");

        let bitrev = if size <= 1 {
            vec![0; size]
        } else {
            let shift = usize::BITS - size.trailing_zeros();
            (0..size).map(|i| i.reverse_bits() >> shift).collect()
        };

        let twiddles = (0..size / 2)
            .map(|k| {
                let angle = -2.0 * PI * k as f64 / size as f64;
                (angle.cos(), angle.sin())
            })
            .collect();

        Self {
            size,
            bitrev,
            twiddles,
        }
    }

    /// Transforms `real` + `imag` in place. Both slices must have the plan's length.
    pub fn process(&self, real: &mut [f64], imag: &mut [f64]) {
        let n = self.size;
        debug_assert_eq!(real.len(), n);
        debug_assert_eq!(imag.len(), n);
        if n <= 1 {
            return;
        }

        for i in 0..n {
            let j = self.bitrev[i];
            if i < j {
                real.swap(i, j);
                imag.swap(i, j);
            }
        }

        let mut len = 2;
        while len <= n {
            let half = len >> 1;
            let stride = n / len;
            for start in (0..n).step_by(len) {
                for k in 0..half {
                    let (w_r, w_i) = self.twiddles[k * stride];
                    let u = start + k;
                    let v = u + half;

                    let t_r = w_r * real[v] - w_i * imag[v];
                    let t_i = w_r * imag[v] + w_i * real[v];

                    real[v] = real[u] - t_r;
                    imag[v] = imag[u] - t_i;
                    real[u] += t_r;
                    imag[u] += t_i;
                }
            }
            len <<= 1;
        }
    }
}
