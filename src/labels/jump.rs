/// Resolve the numeral of a computed jump `GO TO n OF L1, ..., Lk`.
///
/// Returns `n` when `1 <= n <= count`. A numeral too large for `u64` can
/// never be in range. Only the count of listed labels matters here; whether
/// those labels are defined anywhere is not checked.
#[must_use]
pub fn resolve_computed_index(numeral: &str, count: usize) -> Option<u64> {
    let index: u64 = numeral.parse().ok()?;
    let count = u64::try_from(count).ok()?;
    (1..=count).contains(&index).then_some(index)
}
