use crate::depth_pipeline::common::error::{CaptureError, Result};

/// Borrowed view over a dense row-major grid of 32-bit float depth values.
///
/// Rows may be padded: `row_stride` is the distance in bytes between the
/// starts of consecutive rows and can exceed `width * 4`. Samples are kept in
/// the producer's native byte order.
#[derive(Debug, Clone, Copy)]
pub struct DepthGrid<'a> {
    width: usize,
    height: usize,
    row_stride: usize,
    data: &'a [u8],
}

impl<'a> DepthGrid<'a> {
    pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

    pub fn new(width: usize, height: usize, row_stride: usize, data: &'a [u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidLayout(format!(
                "depth grid must not be empty ({}x{})",
                width, height
            )));
        }

        let row_bytes = width
            .checked_mul(Self::BYTES_PER_SAMPLE)
            .ok_or_else(|| CaptureError::InvalidLayout(format!("row of {} samples overflows", width)))?;

        if row_stride < row_bytes {
            return Err(CaptureError::InvalidLayout(format!(
                "row stride {} is shorter than a row of {} bytes",
                row_stride, row_bytes
            )));
        }

        // The last row does not need its trailing padding.
        let required = row_stride
            .checked_mul(height - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(|| CaptureError::InvalidLayout("depth buffer size overflows".to_string()))?;

        if data.len() < required {
            return Err(CaptureError::InvalidLayout(format!(
                "depth buffer holds {} bytes, {}x{} with stride {} needs {}",
                data.len(),
                width,
                height,
                row_stride,
                required
            )));
        }

        Ok(Self {
            width,
            height,
            row_stride,
            data,
        })
    }

    /// Wraps a tightly packed slice of samples.
    pub fn from_samples(width: usize, height: usize, samples: &'a [f32]) -> Result<Self> {
        let row_stride = width.saturating_mul(Self::BYTES_PER_SAMPLE);
        Self::new(width, height, row_stride, bytemuck::cast_slice(samples))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Number of meaningful bytes in a row, padding excluded.
    pub fn row_bytes(&self) -> usize {
        self.width * Self::BYTES_PER_SAMPLE
    }

    /// Size of the grid once padding is stripped.
    pub fn packed_len(&self) -> usize {
        self.row_bytes() * self.height
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.row_stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn rows(self) -> impl Iterator<Item = &'a [u8]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Copies the grid into a tightly packed byte buffer, dropping row padding.
    pub fn packed_bytes(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.packed_len());
        for row in self.rows() {
            packed.extend_from_slice(row);
        }
        packed
    }

    /// Row-major samples with their bit patterns untouched.
    pub fn samples(&self) -> Vec<f32> {
        let mut samples = Vec::with_capacity(self.width * self.height);
        for row in self.rows() {
            samples.extend(
                row.chunks_exact(Self::BYTES_PER_SAMPLE)
                    .map(bytemuck::pod_read_unaligned::<f32>),
            );
        }
        samples
    }
}
