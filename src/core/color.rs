use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Opaque RGB color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> ChartResult<Self> {
        if hex > 0x00ff_ffff {
            return Err(ChartError::invalid_configuration(format!(
                "color hex {hex:#x} exceeds 0xffffff"
            )));
        }
        let [_, red, green, blue] = hex.to_be_bytes();
        Ok(Self::from_rgb8(red, green, blue))
    }

    #[must_use]
    pub fn to_hex(self) -> u32 {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (quantize(self.red) << 16) | (quantize(self.green) << 8) | quantize(self.blue)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::invalid_configuration(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_round_trips_through_normalized_channels() {
        let color = Color::from_hex(0x1a915d).expect("valid hex");
        assert_eq!(color.to_hex(), 0x1a915d);
        assert!((color.red - 26.0 / 255.0).abs() <= 1e-12);
    }

    #[test]
    fn hex_above_24_bits_is_rejected() {
        assert!(Color::from_hex(0x0100_0000).is_err());
    }

    #[test]
    fn out_of_range_channel_fails_validation() {
        assert!(Color::rgb(0.2, 1.5, 0.0).validate().is_err());
        assert!(Color::rgb(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(Color::WHITE.validate().is_ok());
    }
}
