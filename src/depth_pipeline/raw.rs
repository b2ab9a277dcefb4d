//! Raw depth dump
//!
//! Writes the depth grid as a flat run of native-endian `f32` values in
//! row-major order. Row padding from the source buffer never reaches the
//! output, so the dump is always exactly `width * height * 4` bytes.

use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth::DepthGrid;

pub struct RawDepthWriter;

impl RawDepthWriter {
    pub fn encode(grid: &DepthGrid<'_>) -> Vec<u8> {
        debug!(
            "Packing raw depth {}x{} (stride {})",
            grid.width(),
            grid.height(),
            grid.row_stride()
        );
        grid.packed_bytes()
    }

    /// Reads a dump produced by [`RawDepthWriter::encode`] back into samples.
    pub fn decode(bytes: &[u8], width: usize, height: usize) -> Result<Vec<f32>> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(DepthGrid::BYTES_PER_SAMPLE))
            .ok_or_else(|| CaptureError::InvalidLayout(format!("{}x{} overflows", width, height)))?;

        if bytes.len() != expected {
            return Err(CaptureError::InvalidLayout(format!(
                "raw depth for {}x{} must be {} bytes, got {}",
                width,
                height,
                expected,
                bytes.len()
            )));
        }

        Ok(bytes
            .chunks_exact(DepthGrid::BYTES_PER_SAMPLE)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_stripped() {
        let width = 3;
        let height = 4;
        let stride = 20;
        let mut buffer = vec![0xEEu8; stride * height];
        let mut expected = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = (y * 10 + x) as f32 + 0.5;
                buffer[y * stride + x * 4..y * stride + x * 4 + 4].copy_from_slice(&v.to_ne_bytes());
                expected.push(v);
            }
        }

        let grid = DepthGrid::new(width, height, stride, &buffer).unwrap();
        let bytes = RawDepthWriter::encode(&grid);

        assert_eq!(bytes.len(), width * height * 4);
        assert!(!bytes.contains(&0xEE));
        assert_eq!(RawDepthWriter::decode(&bytes, width, height).unwrap(), expected);
    }

    #[test]
    fn test_non_finite_values_keep_their_bits() {
        let payload_nan = f32::from_bits(0x7FC0_1234);
        let samples = [payload_nan, f32::INFINITY, f32::NEG_INFINITY, -0.0];
        let grid = DepthGrid::from_samples(2, 2, &samples).unwrap();

        let bytes = RawDepthWriter::encode(&grid);
        let decoded = RawDepthWriter::decode(&bytes, 2, 2).unwrap();

        let decoded_bits: Vec<u32> = decoded.iter().map(|v| v.to_bits()).collect();
        let source_bits: Vec<u32> = samples.iter().map(|v| v.to_bits()).collect();
        assert_eq!(decoded_bits, source_bits);
    }

    #[test]
    fn test_decode_rejects_truncated_dump() {
        let result = RawDepthWriter::decode(&[0u8; 15], 2, 2);
        assert!(matches!(result, Err(CaptureError::InvalidLayout(_))));
    }
}
