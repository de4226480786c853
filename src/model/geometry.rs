//! Page geometry.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Points per millimeter (72 points per inch, 25.4 mm per inch).
const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Unit in which page dimensions and positions are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Millimeters
    #[default]
    Millimeter,
    /// PDF points (1/72 inch)
    Point,
}

impl Unit {
    /// Number of PDF points in one unit.
    pub fn points(self) -> f32 {
        match self {
            Unit::Millimeter => POINTS_PER_MM,
            Unit::Point => 1.0,
        }
    }
}

/// Fixed page size with a uniform margin on all sides.
///
/// Positions are measured from the top-left corner of the page, with `y`
/// growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin on every side
    pub margin: f32,
    /// Unit of the above
    pub unit: Unit,
}

impl Geometry {
    /// Create a validated geometry.
    pub fn new(width: f32, height: f32, margin: f32, unit: Unit) -> Result<Self> {
        let geometry = Self {
            width,
            height,
            margin,
            unit,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// A4 portrait (210 x 297 mm) with a 20 mm margin.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
            unit: Unit::Millimeter,
        }
    }

    /// US Letter portrait (8.5 x 11 inches) with a 20 mm margin.
    pub fn letter() -> Self {
        Self {
            width: 215.9,
            height: 279.4,
            margin: 20.0,
            unit: Unit::Millimeter,
        }
    }

    /// Check that the content band is non-empty.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.width, self.height, self.margin]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 || self.margin < 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "dimensions must be positive (width {}, height {}, margin {})",
                self.width, self.height, self.margin
            )));
        }
        if self.content_width() <= 0.0 || self.content_bottom() <= self.margin {
            return Err(Error::InvalidGeometry(format!(
                "margin {} leaves no content area on a {} x {} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest `y` at which content may start a line.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Right edge of the content band.
    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    /// Convert a size in points into page units.
    pub fn points_to_units(&self, points: f32) -> f32 {
        points / self.unit.points()
    }

    /// Convert a length in page units into points.
    pub fn to_points(&self, value: f32) -> f32 {
        value * self.unit.points()
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_content_band() {
        let g = Geometry::a4();
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.content_bottom(), 277.0);
        assert_eq!(g.content_right(), 190.0);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(Geometry::new(100.0, 100.0, 50.0, Unit::Point).is_err());
        assert!(Geometry::new(-1.0, 100.0, 5.0, Unit::Point).is_err());
        assert!(Geometry::new(f32::NAN, 100.0, 5.0, Unit::Point).is_err());
        assert!(Geometry::new(612.0, 792.0, 72.0, Unit::Point).is_ok());
    }

    #[test]
    fn test_unit_conversion() {
        let g = Geometry::a4();
        assert!((g.to_points(25.4) - 72.0).abs() < 1e-3);
        assert!((g.points_to_units(72.0) - 25.4).abs() < 1e-3);
    }
}
