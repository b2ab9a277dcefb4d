//! Camera intrinsics record
//!
//! The record is the 3x3 matrix flattened row-major into nine native-endian
//! `f32` values, 36 bytes with no header. Readers must know the byte order of
//! the producing machine.

use crate::depth_pipeline::common::error::{CaptureError, Result};

/// Pinhole camera intrinsics `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics(pub [[f32; 3]; 3]);

impl Intrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self([[fx, 0.0, cx], [0.0, fy, cy], [0.0, 0.0, 1.0]])
    }

    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }

    pub fn fx(&self) -> f32 {
        self.0[0][0]
    }

    pub fn fy(&self) -> f32 {
        self.0[1][1]
    }

    pub fn cx(&self) -> f32 {
        self.0[0][2]
    }

    pub fn cy(&self) -> f32 {
        self.0[1][2]
    }
}

/// Size of an encoded intrinsics record.
pub const INTRINSICS_RECORD_LEN: usize = 9 * std::mem::size_of::<f32>();

pub struct IntrinsicsCodec;

impl IntrinsicsCodec {
    pub const RECORD_LEN: usize = INTRINSICS_RECORD_LEN;

    pub fn encode(intrinsics: &Intrinsics) -> [u8; INTRINSICS_RECORD_LEN] {
        let mut record = [0u8; INTRINSICS_RECORD_LEN];
        record.copy_from_slice(bytemuck::cast_slice(&intrinsics.0));
        record
    }

    pub fn decode(bytes: &[u8]) -> Result<Intrinsics> {
        if bytes.len() != Self::RECORD_LEN {
            return Err(CaptureError::InvalidLayout(format!(
                "intrinsics record must be {} bytes, got {}",
                Self::RECORD_LEN,
                bytes.len()
            )));
        }

        bytemuck::try_pod_read_unaligned::<[[f32; 3]; 3]>(bytes)
            .map(Intrinsics)
            .map_err(|e| CaptureError::InvalidLayout(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(m: &Intrinsics) -> Vec<u32> {
        m.0.iter().flatten().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn test_record_is_36_bytes_row_major() {
        let m = Intrinsics::new(1450.5, 1451.25, 960.0, 720.0);
        let bytes = IntrinsicsCodec::encode(&m);

        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[0..4], &1450.5f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &960.0f32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &1451.25f32.to_ne_bytes());
        assert_eq!(&bytes[32..36], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_round_trip_preserves_bits() {
        let subnormal = f32::from_bits(1);
        let matrices = [
            Intrinsics::new(1450.5, 1451.25, 960.0, 720.0),
            Intrinsics([[0.0, -0.0, -3.5], [subnormal, -subnormal, f32::MIN_POSITIVE / 2.0], [f32::MAX, f32::MIN, 1.0]]),
            Intrinsics([[f32::INFINITY, f32::NEG_INFINITY, 0.1], [1e-30, -1e30, 2.0], [0.0, 0.0, 0.0]]),
        ];

        for m in &matrices {
            let decoded = IntrinsicsCodec::decode(&IntrinsicsCodec::encode(m)).unwrap();
            assert_eq!(bits(&decoded), bits(m));
        }
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let result = IntrinsicsCodec::decode(&[0u8; 35]);
        assert!(matches!(result, Err(CaptureError::InvalidLayout(_))));
    }

    #[test]
    fn test_accessors() {
        let m = Intrinsics::new(500.0, 510.0, 320.0, 240.0);
        assert_eq!((m.fx(), m.fy(), m.cx(), m.cy()), (500.0, 510.0, 320.0, 240.0));
    }
}
