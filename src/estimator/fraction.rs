use chrono::NaiveDateTime;

/// Share of the `last` → `next` span that has elapsed at `now`.
///
/// Zero-length spans yield `0.0`. The result is not bounded: `now` before
/// `last` gives a negative value and `now` after `next` gives more than one.
pub fn elapsed_fraction(last: NaiveDateTime, next: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let span = (next - last).num_seconds();
    if span == 0 {
        return 0.0;
    }
    (now - last).num_seconds() as f64 / span as f64
}
