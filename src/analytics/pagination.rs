//! Stateless pagination with continuation instructions for a calling agent.
//!
//! Nothing is persisted server-side between pages; each request is
//! independently filterable and consistent only if the underlying dataset is
//! not mutated between calls.

use crate::models::PageInfo;

/// Page math over a sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub page_size: usize,
    pub skip: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_more_results: bool,
}

impl Paging {
    /// Compute the window for 1-based `page` over `total_count` records.
    ///
    /// Non-positive pages are treated as page 1. A page beyond the last
    /// yields a valid window whose skip is past the end (an empty page),
    /// not an error.
    pub fn new(total_count: usize, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);
        Self {
            page,
            page_size,
            skip: (page - 1) * page_size,
            total_count,
            total_pages,
            has_more_results: page < total_pages,
        }
    }

    /// Build the response metadata for a page that yielded `count` records.
    ///
    /// Continuation instructions follow the agent protocol: while more pages
    /// remain the caller is told to fetch the next page; on the final page of
    /// a multi-page result the caller is told to merge everything fetched so
    /// far; a single-page result carries no continuation metadata. Pages past
    /// the end are not the final page and carry neither instruction.
    pub fn info(&self, count: usize) -> PageInfo {
        let next_page_instructions = if self.has_more_results {
            Some(format!(
                "More results are available. Re-invoke this tool with page = {} \
                 and the same filters to retrieve the next page.",
                self.page + 1
            ))
        } else {
            None
        };

        let merge_instructions = if self.page == self.total_pages && self.total_pages > 1 {
            Some(
                "This is the final page. Merge the time series from all retrieved pages \
                 into a single dataset; do not drop or aggregate records unless the user \
                 explicitly asked for that."
                    .to_string(),
            )
        } else {
            None
        };

        PageInfo {
            count,
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.page,
            has_more_results: self.has_more_results,
            next_page_instructions,
            merge_instructions,
        }
    }
}
