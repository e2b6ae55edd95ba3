/// Computes the arithmetic mean of the present values, skipping nulls.
/// Returns `None` when no value is present (SQL-style average).
pub fn mean_of(values: impl IntoIterator<Item = Option<i64>>) -> Option<f64> {
    let mut sum = 0i64;
    let mut count = 0usize;
    for value in values.into_iter().flatten() {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(sum as f64 / count as f64)
}
