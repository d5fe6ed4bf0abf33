//! Conversions between the point-based design values and `genpdf` millimetres.

use genpdf::Mm;

/// Millimetres per typographic point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Wraps a raw millimetre value.
pub fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a length in points into millimetres.
pub fn pt(value: f64) -> Mm {
    mm(value * MM_PER_PT)
}

/// Unwraps a `genpdf` length into raw millimetres.
pub fn to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_to_millimetres() {
        assert!((to_f64(pt(72.0)) - 25.4).abs() < 1e-9);
        assert!((to_f64(mm(12.5)) - 12.5).abs() < 1e-9);
    }
}
