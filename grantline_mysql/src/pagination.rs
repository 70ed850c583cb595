//! Offset/limit windowing for listing queries.
//!
//! Tokens are the decimal offset of the next page. Each query asks for one
//! row more than the page size; if that extra row comes back there is
//! another page.

use grantline_core::connectors::nodes::PageToken;

use crate::error::{Error, Result};

pub const MIN_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// A parsed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    /// Parse a page token, clamping the size into `[10, 100]`.
    pub fn parse(page: &PageToken) -> Result<Self> {
        let limit = page.size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = if page.token.is_empty() {
            0
        } else {
            page.token
                .parse()
                .map_err(|_| Error::InvalidPageToken(page.token.to_owned()))?
        };
        Ok(Self { offset, limit })
    }

    /// How many rows to ask the store for.
    pub fn fetch_limit(&self) -> usize {
        self.limit + 1
    }

    /// Trim the fetched rows to the page and compute the next token (empty
    /// when this is the last page).
    pub fn finish<T>(&self, mut rows: Vec<T>) -> (Vec<T>, String) {
        if rows.len() > self.limit {
            rows.truncate(self.limit);
            (rows, (self.offset + self.limit).to_string())
        } else {
            (rows, String::new())
        }
    }
}
