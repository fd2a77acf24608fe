use std::fmt;
use std::ops::Deref;

/// One page of a result sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<T> Deref for Page<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.items
    }
}

/// Items are written back to back, without separators.
impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for item in self.items {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Lazily splits a slice into pages of `page_size` items; the last page may
/// be shorter. A zero page size yields no pages.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    remaining: &'a [T],
    page_size: usize,
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> {
    Paginator {
        remaining: items,
        page_size,
    }
}

impl<'a, T> Iterator for Paginator<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.page_size == 0 || self.remaining.is_empty() {
            return None;
        }
        let (items, rest) = self.remaining.split_at(self.page_size.min(self.remaining.len()));
        self.remaining = rest;
        Some(Page { items })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pages = if self.page_size == 0 {
            0
        } else {
            self.remaining.len().div_ceil(self.page_size)
        };
        (pages, Some(pages))
    }
}

impl<T> ExactSizeIterator for Paginator<'_, T> {}
