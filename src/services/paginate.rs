//! Cursor pagination as an explicit state machine.
//!
//! A [`Paginator`] hands out [`PageRequest`]s until it reaches one of its
//! terminal states. It owns the accumulator, so a failed page can discard
//! everything gathered so far before the error leaves the loop.

use crate::data::{PageInfo, MAX_PAGE_SIZE};

/// How many nodes the caller wants in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    /// Stop after this many nodes. Zero means zero.
    AtMost(usize),
    /// Follow cursors until the server runs out.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Another page is due, starting after the cursor (or at the start).
    Continue(Option<String>),
    DoneLimit,
    DoneExhausted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: usize,
    pub after: Option<String>,
}

#[derive(Debug)]
pub struct Paginator<T> {
    limit: PageLimit,
    items: Vec<T>,
    state: PageState,
}

impl<T> Paginator<T> {
    pub fn new(limit: PageLimit) -> Self {
        Paginator {
            limit,
            items: Vec::new(),
            state: PageState::Continue(None),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The next page to ask for, or `None` once a terminal state is reached.
    pub fn next_request(&self) -> Option<PageRequest> {
        match &self.state {
            PageState::Continue(after) => Some(PageRequest {
                first: self.page_size(),
                after: after.clone(),
            }),
            _ => None,
        }
    }

    fn page_size(&self) -> usize {
        match self.limit {
            PageLimit::AtMost(limit) => MAX_PAGE_SIZE.min(limit.saturating_sub(self.items.len())),
            PageLimit::All => MAX_PAGE_SIZE,
        }
    }

    /// Feed the outcome of the last request.
    ///
    /// Nodes are appended in the order given. A failure clears the
    /// accumulator, moves to [`PageState::Failed`] and hands the error back.
    pub fn advance<E>(&mut self, page: Result<(Vec<T>, PageInfo), E>) -> Result<(), E> {
        let (nodes, page_info) = match page {
            Ok(page) => page,
            Err(err) => {
                self.items.clear();
                self.state = PageState::Failed;
                return Err(err);
            }
        };

        self.items.extend(nodes);

        let limit_reached = match self.limit {
            PageLimit::AtMost(limit) if self.items.len() >= limit => {
                self.items.truncate(limit);
                true
            }
            _ => false,
        };

        self.state = if limit_reached {
            PageState::DoneLimit
        } else {
            match page_info.end_cursor {
                Some(cursor) if page_info.has_next_page => PageState::Continue(Some(cursor)),
                _ => PageState::DoneExhausted,
            }
        };

        Ok(())
    }

    pub fn finish(self) -> Vec<T> {
        self.items
    }
}
