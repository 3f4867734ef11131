/// Unit a brush size is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Raw device pixels
    Px,
    /// Device-independent pixels (1dp = 1px at 160 dpi)
    Dip,
    /// Scale-independent pixels, follows the user's font scale
    Sp,
    /// Points, 1/72 inch
    Pt,
    /// Inches
    In,
    /// Millimeters
    Mm,
}

/// Density information of the display the surface is shown on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Logical density: pixels per device-independent pixel
    pub density: f32,
    /// Density used for scale-independent pixels
    pub scaled_density: f32,
    /// Physical pixels per inch along the x axis
    pub xdpi: f32,
}

/// Baseline dpi at which one device-independent pixel equals one pixel
pub const BASELINE_DPI: f32 = 160.0;

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::from_density(1.0)
    }
}

impl DisplayMetrics {
    pub fn from_density(density: f32) -> Self {
        Self {
            density,
            scaled_density: density,
            xdpi: density * BASELINE_DPI,
        }
    }

    /// Derive metrics from egui's `pixels_per_point`, which plays the role of density
    pub fn from_pixels_per_point(pixels_per_point: f32) -> Self {
        Self::from_density(pixels_per_point)
    }

    /// Convert `value` expressed in `unit` into pixels
    pub fn apply_dimension(&self, value: f32, unit: Unit) -> f32 {
        match unit {
            Unit::Px => value,
            Unit::Dip => value * self.density,
            Unit::Sp => value * self.scaled_density,
            Unit::Pt => value * self.xdpi / 72.0,
            Unit::In => value * self.xdpi,
            Unit::Mm => value * self.xdpi / 25.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dip_scales_with_density() {
        let metrics = DisplayMetrics::from_density(2.75);
        assert_eq!(metrics.apply_dimension(20.0, Unit::Dip), 55.0);
        assert_eq!(metrics.apply_dimension(20.0, Unit::Px), 20.0);
    }

    #[test]
    fn test_physical_units_use_xdpi() {
        let metrics = DisplayMetrics {
            density: 2.0,
            scaled_density: 2.5,
            xdpi: 320.0,
        };
        assert_eq!(metrics.apply_dimension(1.0, Unit::In), 320.0);
        assert_eq!(metrics.apply_dimension(72.0, Unit::Pt), 320.0);
        assert!((metrics.apply_dimension(25.4, Unit::Mm) - 320.0).abs() < 1e-3);
        assert_eq!(metrics.apply_dimension(4.0, Unit::Sp), 10.0);
    }

    #[test]
    fn test_negative_sizes_pass_through() {
        let metrics = DisplayMetrics::from_density(3.0);
        assert_eq!(metrics.apply_dimension(-2.0, Unit::Dip), -6.0);
        assert_eq!(metrics.apply_dimension(0.0, Unit::Dip), 0.0);
    }
}
