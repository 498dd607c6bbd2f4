use crate::services::LatLng;

/// Picks the polyline point at `fraction` of its length.
///
/// The index is `floor(fraction * len)`, clamped to the last point. Returns
/// `None` only for an empty polyline.
pub fn point_at_fraction(polyline: &[LatLng], fraction: f64) -> Option<LatLng> {
    let last = polyline.len().checked_sub(1)?;
    // `as` saturates: negative and NaN map to 0.
    let index = (fraction * polyline.len() as f64).floor() as usize;
    polyline.get(index.min(last)).copied()
}
