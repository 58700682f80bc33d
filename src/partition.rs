use crate::error::{BenchError, Result};

/// Splits `items` into contiguous groups of at most `ceil(len / n)` elements.
///
/// Order is preserved and no group is empty, so fewer than `n` groups come
/// back when there are fewer items than workers. An empty input yields no
/// groups.
///
/// # Errors
/// Returns `BenchError::InvalidArgument` when `n` is zero.
pub fn partition<T>(items: &[T], n: usize) -> Result<Vec<&[T]>> {
    if n == 0 {
        return Err(BenchError::InvalidArgument(
            "partition count must be positive".to_string(),
        ));
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = items.len().div_ceil(n);
    Ok(items.chunks(chunk_size).collect())
}
