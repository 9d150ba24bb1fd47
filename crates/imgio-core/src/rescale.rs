//! Linear intensity rescaling for 8-bit output.
//!
//! A buffer is mapped onto `[0, target]` from its own min/max. When the
//! buffer is constant the mapping falls back to the identity, so samples are
//! only floored and saturated.

/// Target span for single-image 8-bit output.
pub const FULL_8BIT: f32 = 255.0;

/// Target span for each channel of the overlay image.
pub const HALF_8BIT: f32 = 0.5 * 255.0;

/// Minimum and maximum of a set of intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange {
    pub min: f32,
    pub max: f32,
}

impl IntensityRange {
    /// Scan `samples` for min and max. NaN samples are ignored; an empty
    /// (or all-NaN) slice yields `0..0`.
    pub fn of(samples: &[f32]) -> Self {
        let (min, max) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return Self { min: 0.0, max: 0.0 };
        }
        Self { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// `v -> (v - offset) * factor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    offset: f32,
    factor: f32,
}

impl LinearScale {
    /// Leaves samples untouched.
    pub fn identity() -> Self {
        Self {
            offset: 0.0,
            factor: 1.0,
        }
    }

    /// Map `range` onto `[0, target]`. A zero-width range keeps the
    /// identity so nothing is divided by zero.
    pub fn to_target(range: IntensityRange, target: f32) -> Self {
        let span = range.span();
        if span != 0.0 {
            Self {
                offset: range.min,
                factor: target / span,
            }
        } else {
            Self::identity()
        }
    }

    /// Scale that `write` applies: full 8-bit range when `scale_to_8_bit`
    /// is set, plain truncation otherwise.
    pub fn for_write(samples: &[f32], scale_to_8_bit: bool) -> Self {
        if scale_to_8_bit {
            Self::to_target(IntensityRange::of(samples), FULL_8BIT)
        } else {
            Self::identity()
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        (v - self.offset) * self.factor
    }

    /// Scale, floor and saturate into a `u8`.
    #[inline]
    pub fn quantize(&self, v: f32) -> u8 {
        saturate_u8(self.apply(v).floor())
    }
}

/// Saturating float to `u8` conversion; NaN becomes 0.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    v as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_of() {
        let r = IntensityRange::of(&[3.0, -2.5, 7.25, 0.0]);
        assert_eq!(r.min, -2.5);
        assert_eq!(r.max, 7.25);
        assert_eq!(IntensityRange::of(&[]), IntensityRange { min: 0.0, max: 0.0 });
        let r = IntensityRange::of(&[f32::NAN, 1.0, 2.0]);
        assert_eq!((r.min, r.max), (1.0, 2.0));
    }

    #[test]
    fn test_full_range_is_identity_at_endpoints() {
        let samples = [0.0, 17.0, 128.0, 255.0];
        let scale = LinearScale::for_write(&samples, true);
        let q: Vec<u8> = samples.iter().map(|&v| scale.quantize(v)).collect();
        assert_eq!(q, vec![0, 17, 128, 255]);
    }

    #[test]
    fn test_stretch_to_full_range() {
        let samples = [-1.0, 0.0, 1.0];
        let scale = LinearScale::for_write(&samples, true);
        assert_eq!(scale.quantize(-1.0), 0);
        assert_eq!(scale.quantize(0.0), 127); // floor(127.5)
        assert_eq!(scale.quantize(1.0), 255);
    }

    #[test]
    fn test_constant_buffer_uses_unity_factor() {
        let samples = [42.7f32; 5];
        let scale = LinearScale::for_write(&samples, true);
        assert_eq!(scale.factor(), 1.0);
        assert!(samples.iter().all(|&v| scale.quantize(v) == 42));

        let over = LinearScale::for_write(&[300.0; 3], true);
        assert_eq!(over.quantize(300.0), 255);
        let under = LinearScale::for_write(&[-4.0; 3], true);
        assert_eq!(under.quantize(-4.0), 0);
    }

    #[test]
    fn test_no_scaling_truncates() {
        let scale = LinearScale::for_write(&[0.0, 1000.0], false);
        assert_eq!(scale.quantize(12.9), 12);
        assert_eq!(scale.quantize(-0.5), 0);
        assert_eq!(scale.quantize(1000.0), 255);
    }

    #[test]
    fn test_half_range_target() {
        let scale = LinearScale::to_target(IntensityRange { min: 10.0, max: 20.0 }, HALF_8BIT);
        assert_eq!(scale.quantize(10.0), 0);
        assert_eq!(scale.quantize(20.0), 127);
        assert_eq!(scale.quantize(15.0), 63);
    }

    #[test]
    fn test_saturate_nan() {
        assert_eq!(saturate_u8(f32::NAN), 0);
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(1e9), 255);
    }
}
