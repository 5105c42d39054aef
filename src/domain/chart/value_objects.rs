use crate::domain::summary::Cdr;
use crate::format_utils::format_comma;
use serde::Serialize;

/// Margins around the plot area, identical across chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub const MARGIN: Margins = Margins { top: 10, right: 10, bottom: 20, left: 60 };

/// Pixel geometry of the plot area (margins already subtracted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Plot area derived from the hosting element's outer size, with the
    /// height capped to the page layout's maximum.
    pub fn from_outer(outer_width: f64, max_height: f64) -> Self {
        let height = outer_width.min(max_height) - f64::from(MARGIN.top) - f64::from(MARGIN.bottom);
        let width = outer_width - f64::from(MARGIN.left) - f64::from(MARGIN.right);
        Self { width, height }
    }

    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: width - f64::from(MARGIN.left) - f64::from(MARGIN.right),
            height: height - f64::from(MARGIN.top) - f64::from(MARGIN.bottom),
        }
    }
}

/// Latest cumulative counts, comma-formatted for the header readouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub confirmed: String,
    pub deaths: String,
    pub recovered: String,
}

impl Totals {
    pub fn from_cdr(cdr: Cdr) -> Self {
        Self {
            confirmed: format_comma(cdr.0[0]),
            deaths: format_comma(cdr.0[1]),
            recovered: format_comma(cdr.0[2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_subtracts_margins() {
        let vp = Viewport::from_outer(1600.0, 720.0);
        assert_eq!(vp.width, 1600.0 - 60.0 - 10.0);
        assert_eq!(vp.height, 720.0 - 10.0 - 20.0);
    }

    #[test]
    fn totals_are_comma_formatted() {
        let t = Totals::from_cdr(Cdr([1234567, 890, 12]));
        assert_eq!(t.confirmed, "1,234,567");
        assert_eq!(t.deaths, "890");
        assert_eq!(t.recovered, "12");
    }
}
