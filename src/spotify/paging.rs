use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::{
    errors::{Result, SyncError},
    spotify::Transport,
    types::Page,
};

/// Walks a cursor-paginated Spotify listing one page at a time.
///
/// Each call to [`PagedFetcher::next_page`] issues one authenticated GET,
/// decodes the `{ items, next }` envelope and remembers `next` for the
/// following call. The traversal ends when `next` is absent or empty.
///
/// # Failure
///
/// - A non-success status yields `SyncError::RemoteRead { status, body }`
/// - A body that is not a page envelope yields `SyncError::Decode`
///
/// There is no retry. After a failure the fetcher is exhausted: further
/// calls return `Ok(None)` and it cannot be restarted.
///
/// # Example
///
/// ```
/// let url = client.url(&format!("/albums/{}/tracks?limit=50", album_id));
/// let mut pages = PagedFetcher::<Track>::new(client.transport(), url, token);
/// while let Some(tracks) = pages.next_page().await? {
///     println!("{} tracks on this page", tracks.len());
/// }
/// ```
pub struct PagedFetcher<'a, T> {
    transport: &'a dyn Transport,
    token: &'a str,
    next: Option<String>,
    pages_fetched: usize,
    _item: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> PagedFetcher<'a, T> {
    pub fn new(transport: &'a dyn Transport, start_url: impl Into<String>, token: &'a str) -> Self {
        Self {
            transport,
            token,
            next: Some(start_url.into()),
            pages_fetched: 0,
            _item: PhantomData,
        }
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let response = self.transport.get(&url, self.token).await?;
        if !response.is_success() {
            return Err(SyncError::RemoteRead {
                status: response.status,
                body: response.body,
            });
        }

        let page: Page<T> = response.decode(&url)?;
        self.next = page.next.filter(|next| !next.is_empty());
        self.pages_fetched += 1;

        Ok(Some(page.items))
    }

    /// Drains the remaining pages into one flat list.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}
