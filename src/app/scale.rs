use eframe::egui::Color32;

/// Fixed ten-color palette assigned to the top-ranked countries in order.
pub(super) const COUNTRY_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0xe4, 0x1a, 0x1c),
    Color32::from_rgb(0x37, 0x7e, 0xb8),
    Color32::from_rgb(0x4d, 0xaf, 0x4a),
    Color32::from_rgb(0x98, 0x4e, 0xa3),
    Color32::from_rgb(0xff, 0x7f, 0x00),
    Color32::from_rgb(0xff, 0xbf, 0x00),
    Color32::from_rgb(0xa6, 0x56, 0x28),
    Color32::from_rgb(0xf7, 0x81, 0xbf),
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0x66, 0xc2, 0xa5),
];

/// Shared color for countries outside the top ten and for missing countries.
pub(super) const COUNTRY_FALLBACK: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

pub(super) fn country_color(top_countries: &[String], country: Option<&str>) -> Color32 {
    country
        .and_then(|country| top_countries.iter().position(|ranked| ranked == country))
        .and_then(|rank| COUNTRY_PALETTE.get(rank).copied())
        .unwrap_or(COUNTRY_FALLBACK)
}

const RADIUS_MIN: f32 = 3.0;
const RADIUS_MAX: f32 = 12.0;

/// Square-root scale from the observed degree range to [3, 12] pixel units.
/// The domain covers only authors that appear in at least one link; degree
/// zero extrapolates below the range, as the original scale did. A degenerate
/// domain maps everything to the range midpoint.
pub(super) struct RadiusScale {
    sqrt_min: f32,
    sqrt_max: f32,
}

impl RadiusScale {
    pub fn from_degrees(degrees: &[usize]) -> Self {
        let mut min = usize::MAX;
        let mut max = 0usize;
        for &degree in degrees {
            if degree == 0 {
                continue;
            }
            min = min.min(degree);
            max = max.max(degree);
        }

        if min > max {
            // No linked authors at all.
            min = 0;
            max = 0;
        }

        Self {
            sqrt_min: (min as f32).sqrt(),
            sqrt_max: (max as f32).sqrt(),
        }
    }

    pub fn radius(&self, degree: usize) -> f32 {
        let span = self.sqrt_max - self.sqrt_min;
        if span.abs() < f32::EPSILON {
            return (RADIUS_MIN + RADIUS_MAX) * 0.5;
        }

        let t = ((degree as f32).sqrt() - self.sqrt_min) / span;
        RADIUS_MIN + t * (RADIUS_MAX - RADIUS_MIN)
    }
}
