//! Paginated listing as a stream of pages.

use async_stream::try_stream;
use futures::Stream;
use sa_error::StoreResult;

use crate::store::{ListingPage, ObjectStore};

/// List every page under `prefix`, in listing order.
///
/// The stream is lazy: the next page is only requested once the caller polls
/// for it, so a consumer that finishes with one page before asking for the
/// next never has two pages in flight. The first error ends the stream.
///
/// # Example
///
/// ```ignore
/// use futures::{StreamExt, pin_mut};
///
/// let pages = list_pages(&store, "my-bucket", "keys/alice");
/// pin_mut!(pages);
///
/// while let Some(page) = pages.next().await {
///     for obj in page?.objects {
///         println!("{}", obj.key);
///     }
/// }
/// ```
pub fn list_pages<'a, S>(
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = StoreResult<ListingPage>> + Send + 'a
where
    S: ObjectStore + ?Sized,
{
    try_stream! {
        let mut continuation: Option<String> = None;

        loop {
            let page = store
                .list_page(bucket, prefix, continuation.as_deref())
                .await?;

            let last = page.is_last();
            continuation = page.next_token.clone();
            yield page;

            if last {
                break;
            }
        }
    }
}
