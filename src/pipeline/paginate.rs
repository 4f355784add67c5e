use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{Res, pipeline::Pacing};

/// Walks an offset/limit listing until a short page or a failed fetch.
///
/// `fetch` is called with `(offset, limit)`, starting at offset 0 and
/// advancing by `limit`. A page holding fewer than `limit` items is the last
/// one. A failed fetch ends the walk without error; whatever was gathered up
/// to that point is returned. There is no retry. Consecutive fetches are
/// separated by `pacing.page_delay`.
pub async fn walk_pages<T, F, Fut>(pacing: &Pacing, what: &str, mut fetch: F) -> Vec<T>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Res<Vec<T>>>,
{
    let limit = pacing.page_size.max(1);
    let mut offset = 0;
    let mut items = Vec::new();

    loop {
        match fetch(offset, limit).await {
            Ok(page) => {
                let fetched = page.len();
                items.extend(page);
                debug!(what, offset, fetched, "fetched page");

                if fetched < limit {
                    break;
                }
            }
            Err(e) => {
                warn!(what, offset, error = %e, "page fetch failed, keeping {} items", items.len());
                break;
            }
        }

        offset += limit;
        sleep(pacing.page_delay).await;
    }

    items
}
