//! Fixed-size batching for marketplace uploads

use std::future::Future;

use log::debug;

use crate::error::Result;

/// Splits `items` into consecutive slices of `size` items; the last one may be shorter.
///
/// A `size` of zero is treated as one.
pub fn batches<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// Uploads `items` one batch at a time, awaiting each call before the next.
///
/// Stops at the first failed call and returns its error. On success returns
/// the number of calls made.
pub async fn upload_in_batches<'a, T, F, Fut>(
    items: &'a [T],
    size: usize,
    mut upload: F,
) -> Result<usize>
where
    F: FnMut(&'a [T]) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let total = items.len().div_ceil(size.max(1));
    let mut calls = 0;
    for batch in batches(items, size) {
        calls += 1;
        debug!("Uploading batch {calls}/{total} ({} items)", batch.len());
        upload(batch).await?;
    }
    Ok(calls)
}
