//! Cursor pagination over the list endpoints.
//!
//! List responses are reverse chronological. Each page carries a
//! `links.next` URL whose `older_than` parameter is the cursor for the
//! following page. [`Paginator`] pulls one page at a time and only when the
//! caller asks for an item past the end of the current page.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use url::Url;

use crate::errors::ClientResult;

/// One list response reduced to its items and the cursor for the next page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// A list response that can be turned into a [`Page`].
pub trait Paged {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

/// Pull the `older_than` value out of a next-page link.
///
/// Relative links are resolved against a placeholder origin; only the query
/// matters.
pub fn older_than_from_link(link: &str) -> Option<String> {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(link).ok()?
        }
        Err(_) => return None,
    };
    url.query_pairs()
        .find(|(name, _)| name == "older_than")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Lazily walks every page of a list endpoint.
///
/// `fetch` is called with the cursor for the page to load (`None` for the
/// first page). Iteration ends after an empty page, after a page with no
/// usable next link, or after the first error, which is yielded once.
pub struct Paginator<T, F>
where
    F: FnMut(Option<String>) -> ClientResult<Page<T>>,
{
    fetch: F,
    cursor: Option<String>,
    exhausted: bool,
    buffer: VecDeque<T>,
}

impl<T, F> Paginator<T, F>
where
    F: FnMut(Option<String>) -> ClientResult<Page<T>>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            cursor: None,
            exhausted: false,
            buffer: VecDeque::new(),
        }
    }

    /// Begin at `cursor` instead of the newest page.
    pub fn starting_from(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }
}

impl<T, F> Iterator for Paginator<T, F>
where
    F: FnMut(Option<String>) -> ClientResult<Page<T>>,
{
    type Item = ClientResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }

            let page = match (self.fetch)(self.cursor.take()) {
                Ok(page) => page,
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            };

            if page.items.is_empty() {
                self.exhausted = true;
                return None;
            }
            match page.next_cursor {
                Some(cursor) => self.cursor = Some(cursor),
                // Without a cursor the next call would repeat the first page.
                None => self.exhausted = true,
            }
            self.buffer.extend(page.items);
        }
    }
}

impl<T, F> FusedIterator for Paginator<T, F> where
    F: FnMut(Option<String>) -> ClientResult<Page<T>>
{
}
