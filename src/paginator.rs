use impl_helper::ImplHelper;
use serde::Serialize;
use std::{fmt, ops::RangeInclusive, sync::Arc};

use crate::{
    config::PaginatorConfig,
    deprecation::{DeprecationSink, LogSink},
    error::{PaginationError, Result},
    legacy::Legacy,
    utils::SliceFromOffset,
};

/// Rows to skip and rows to take for one page of a limit/offset query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ImplHelper)]
pub struct Offset {
    #[helper(copy)]
    skip: usize,

    #[helper(copy)]
    take: usize,
}

impl Offset {
    pub fn new(skip: usize, take: usize) -> Self {
        Self { skip, take }
    }
}

impl From<Offset> for (usize, usize) {
    fn from(offset: Offset) -> Self {
        (offset.skip, offset.take)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {} LIMIT {}", self.skip, self.take)
    }
}

/// First row (1-based) of `page` when every page holds `per_page` rows.
///
/// Page 0 is outside the 1-based domain and yields 0. Rows past `usize::MAX`
/// saturate.
pub fn page_first_row(page: usize, per_page: usize) -> usize {
    match page {
        0 => 0,
        page => (page - 1).saturating_mul(per_page).saturating_add(1),
    }
}

/// Page, block and row boundaries of a collection of `count` rows.
///
/// The requested page is clamped into `1..=pages` on construction; an empty
/// collection has no pages and keeps page 1.
#[derive(Debug, Clone, ImplHelper)]
pub struct Paginator {
    #[helper(copy)]
    count: usize,

    #[helper(copy)]
    per_page: usize,

    #[helper(copy)]
    per_block: usize,

    #[helper(copy)]
    page: usize,

    sink: Arc<dyn DeprecationSink>,
}

impl Paginator {
    pub fn new(count: usize, config: PaginatorConfig) -> Result<Self> {
        Self::with_sink(count, config, Arc::new(LogSink))
    }

    pub fn with_sink(
        count: usize,
        config: PaginatorConfig,
        sink: Arc<dyn DeprecationSink>,
    ) -> Result<Self> {
        if config.per_page() == 0 {
            return Err(PaginationError::InvalidConfig {
                name: "per_page",
                value: 0,
            });
        }

        if config.per_block() == 0 {
            return Err(PaginationError::InvalidConfig {
                name: "per_block",
                value: 0,
            });
        }

        let mut paginator = Self {
            count,
            per_page: config.per_page(),
            per_block: config.per_block(),
            page: config.page().max(1),
            sink,
        };

        let pages = paginator.pages();
        if pages > 0 && paginator.page > pages {
            log::debug!(
                "Requested page {} clamped to the last page {}",
                paginator.page,
                pages
            );
            paginator.page = pages;
        }

        Ok(paginator)
    }

    pub(crate) fn sink(&self) -> &dyn DeprecationSink {
        self.sink.as_ref()
    }

    /// View of the paginator under its legacy accessor names.
    pub fn legacy(&self) -> Legacy<'_> {
        Legacy::new(self)
    }

    pub fn pages(&self) -> usize {
        self.count.div_ceil(self.per_page)
    }

    /// Block (1-based) holding the current page.
    pub fn block(&self) -> usize {
        if self.page <= self.per_block {
            1
        } else {
            self.page.div_ceil(self.per_block)
        }
    }

    /// Total block count.
    ///
    /// NOTE: this is computed from `per_page`, not `per_block`, so it always
    /// equals [`Paginator::pages`]. Existing callers depend on the value, so it
    /// is kept as is; it also drives [`Paginator::is_last_block`].
    pub fn blocks(&self) -> usize {
        self.pages()
    }

    pub fn first_page_in_block(&self) -> usize {
        (self.block() - 1) * self.per_block + 1
    }

    /// Size of the final, possibly partial, block.
    pub fn pages_last_block(&self) -> usize {
        let pages = self.pages();

        if pages < self.per_block {
            pages
        } else if pages % self.per_block == 0 {
            self.per_block
        } else {
            pages % self.per_block
        }
    }

    pub fn last_page_in_block(&self) -> usize {
        if self.is_last_block() {
            self.first_page_in_block() + self.pages_last_block().saturating_sub(1)
        } else {
            self.block().saturating_mul(self.per_block)
        }
    }

    pub fn pages_in_block(&self) -> RangeInclusive<usize> {
        self.first_page_in_block()..=self.last_page_in_block()
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page == self.pages()
    }

    pub fn is_last_block(&self) -> bool {
        self.block() == self.blocks()
    }

    /// Size of the final, possibly partial, page.
    pub fn rows_in_last_page(&self) -> usize {
        match self.count % self.per_page {
            0 => self.per_page,
            rest => rest,
        }
    }

    /// First row (1-based) of any page, not only the current one.
    pub fn first_row_in_page(&self, page: usize) -> usize {
        page_first_row(page, self.per_page)
    }

    pub fn first_row(&self) -> usize {
        self.first_row_in_page(self.page)
    }

    pub fn last_row(&self) -> usize {
        if self.is_last_page() {
            self.first_row() + (self.rows_in_last_page() - 1)
        } else {
            self.page.saturating_mul(self.per_page)
        }
    }

    /// Rows to skip and take for `page`. Page 0 is read as page 1, so it
    /// fails like page 1 on an empty collection.
    pub fn offset(&self, page: usize) -> Result<Offset> {
        let page = page.max(1);
        let pages = self.pages();

        if page > pages {
            return Err(PaginationError::OutOfRange { page, pages });
        }

        Ok(Offset::new(
            self.first_row_in_page(page).saturating_sub(1),
            self.per_page,
        ))
    }

    pub fn current_offset(&self) -> Result<Offset> {
        self.offset(self.page)
    }

    /// Offsets of every page from `page` through the last one.
    ///
    /// The starting page is checked the same way as in [`Paginator::offset`],
    /// so the returned iterator never fails halfway.
    pub fn offsets(&self, page: usize) -> Result<Offsets> {
        let page = page.max(1);
        let pages = self.pages();

        if page > pages {
            return Err(PaginationError::OutOfRange { page, pages });
        }

        Ok(Offsets {
            pages: page..=pages,
            per_page: self.per_page,
        })
    }

    /// Offsets of every page, empty for an empty collection.
    pub fn all_offsets(&self) -> Offsets {
        Offsets {
            pages: 1..=self.pages(),
            per_page: self.per_page,
        }
    }

    /// Rows of the current page within an in-memory collection.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.current_offset() {
            Ok(offset) => items.slice(&offset),
            Err(_) => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Offsets {
    pages: RangeInclusive<usize>,
    per_page: usize,
}

impl Iterator for Offsets {
    type Item = Offset;

    fn next(&mut self) -> Option<Offset> {
        self.pages
            .next()
            .map(|page| Offset::new(page_first_row(page, self.per_page) - 1, self.per_page))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

impl DoubleEndedIterator for Offsets {
    fn next_back(&mut self) -> Option<Offset> {
        self.pages
            .next_back()
            .map(|page| Offset::new(page_first_row(page, self.per_page) - 1, self.per_page))
    }
}

impl ExactSizeIterator for Offsets {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paginator(count: usize, page: usize, per_page: usize, per_block: usize) -> Paginator {
        Paginator::new(count, PaginatorConfig::new(page, per_page, per_block)).unwrap()
    }

    #[test]
    fn one_page() {
        let paginator = paginator(7, 2, 10, 10);

        assert_eq!(paginator.pages(), 1);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.count(), 7);
        assert_eq!(paginator.first_row(), 1);
        assert_eq!(paginator.last_row(), 7);
        assert!(paginator.is_first_page());
        assert!(paginator.is_last_page());
    }

    #[test]
    fn in_the_middle() {
        let paginator = paginator(64, 5, 6, 10);

        assert_eq!(paginator.page(), 5);
        assert_eq!(paginator.pages(), 11);
        assert_eq!(paginator.rows_in_last_page(), 4);
        assert_eq!(paginator.first_row(), 25);
        assert_eq!(paginator.last_row(), 30);
        assert!(!paginator.is_first_page());
        assert!(!paginator.is_last_page());
    }

    #[test]
    fn rows_in_last_page_less_than_per_page() {
        let paginator = paginator(93, 15, 7, 10);

        assert_eq!(paginator.page(), 14);
        assert_eq!(paginator.pages(), 14);
        assert_eq!(paginator.rows_in_last_page(), 2);
        assert_eq!(paginator.first_row(), 92);
        assert_eq!(paginator.last_row(), 93);
    }

    #[test]
    fn rows_in_last_page_equal_per_page() {
        let paginator = paginator(30, 3, 10, 10);

        assert_eq!(paginator.pages(), 3);
        assert_eq!(paginator.page(), 3);
        assert_eq!(paginator.rows_in_last_page(), 10);
        assert_eq!(paginator.first_row(), 21);
        assert_eq!(paginator.last_row(), 30);
    }

    #[test]
    fn empty_collection() {
        let paginator = paginator(0, 4, 10, 10);

        assert_eq!(paginator.pages(), 0);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.all_offsets().len(), 0);
        assert_eq!(
            paginator.current_offset(),
            Err(PaginationError::OutOfRange { page: 1, pages: 0 })
        );
        assert!(paginator.slice(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn page_zero_reads_as_first_page() {
        assert_eq!(paginator(50, 0, 10, 10).page(), 1);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert_eq!(
            Paginator::new(10, PaginatorConfig::default().per_page_set(0)).err(),
            Some(PaginationError::InvalidConfig {
                name: "per_page",
                value: 0
            })
        );
        assert_eq!(
            Paginator::new(10, PaginatorConfig::default().per_block_set(0)).err(),
            Some(PaginationError::InvalidConfig {
                name: "per_block",
                value: 0
            })
        );
    }

    #[test]
    fn blocks() {
        // 95 pages, page 23 sits in the third block of ten
        let paginator = paginator(950, 23, 10, 10);

        assert_eq!(paginator.block(), 3);
        assert_eq!(paginator.first_page_in_block(), 21);
        assert_eq!(paginator.last_page_in_block(), 30);
        assert_eq!(paginator.pages_in_block(), 21..=30);
        assert_eq!(paginator.pages_last_block(), 5);
        assert!(!paginator.is_last_block());
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(paginator(1000, 10, 10, 10).block(), 1);
        assert_eq!(paginator(1000, 11, 10, 10).block(), 2);
        assert_eq!(paginator(1000, 20, 10, 10).block(), 2);
        assert_eq!(paginator(1000, 21, 10, 10).block(), 3);
    }

    #[test]
    fn pages_last_block() {
        assert_eq!(paginator(30, 1, 10, 10).pages_last_block(), 3);
        assert_eq!(paginator(200, 1, 10, 10).pages_last_block(), 10);
        assert_eq!(paginator(230, 1, 10, 10).pages_last_block(), 3);
    }

    #[test]
    fn blocks_follow_page_count() {
        let paginator = paginator(1000, 1, 10, 10);

        assert_eq!(paginator.blocks(), paginator.pages());
        assert_eq!(paginator.blocks(), 100);
    }

    #[test]
    fn last_block_when_blocks_equal_pages() {
        // one page, one block: the last block branch is taken
        let paginator = paginator(7, 1, 10, 10);

        assert!(paginator.is_last_block());
        assert_eq!(paginator.pages_in_block(), 1..=1);
    }

    #[test]
    fn first_row_in_any_page() {
        let paginator = paginator(64, 1, 6, 10);

        assert_eq!(paginator.first_row_in_page(1), 1);
        assert_eq!(paginator.first_row_in_page(5), 25);
        assert_eq!(paginator.first_row_in_page(20), 115);
        assert_eq!(page_first_row(3, 7), 15);
    }

    #[test]
    fn offset() {
        let paginator = paginator(1000, 1, 10, 10);

        assert_eq!(paginator.current_offset(), Ok(Offset::new(0, 10)));
        assert_eq!(paginator.offset(5).map(<(usize, usize)>::from), Ok((40, 10)));
        assert_eq!(paginator.offset(100), Ok(Offset::new(990, 10)));

        let err = paginator.offset(101).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Page 101 is bigger than the number of pages 100."
        );
    }

    #[test]
    fn offsets() {
        let paginator = paginator(1000, 1, 10, 10);

        assert_eq!(paginator.all_offsets().len(), 100);
        assert_eq!(paginator.offsets(1).unwrap().len(), 100);
        assert_eq!(paginator.offsets(15).unwrap().len(), 86);

        let from_60 = paginator.offsets(60).unwrap().collect::<Vec<_>>();
        assert_eq!(from_60.len(), 41);
        assert_eq!(from_60[0], Offset::new(590, 10));
        assert_eq!(from_60[40], Offset::new(990, 10));

        assert_eq!(
            paginator.offsets(101).err(),
            Some(PaginationError::OutOfRange {
                page: 101,
                pages: 100
            })
        );
    }

    #[test]
    fn page_zero_offset_reads_as_first_page() {
        assert_eq!(paginator(1000, 1, 10, 10).offset(0), Ok(Offset::new(0, 10)));
        assert_eq!(
            paginator(0, 1, 10, 10).offset(0),
            Err(PaginationError::OutOfRange { page: 1, pages: 0 })
        );
        assert_eq!(
            paginator(0, 1, 10, 10).offsets(0).err(),
            Some(PaginationError::OutOfRange { page: 1, pages: 0 })
        );
        assert_eq!(paginator(30, 1, 10, 10).offsets(0).unwrap().len(), 3);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let paginator = paginator(usize::MAX, usize::MAX, 1, 10);

        assert_eq!(paginator.pages(), usize::MAX);
        assert_eq!(paginator.page(), usize::MAX);
        assert_eq!(paginator.first_row(), usize::MAX);
        assert_eq!(paginator.last_row(), usize::MAX);
        assert_eq!(paginator.rows_in_last_page(), 1);
        assert_eq!(paginator.block(), usize::MAX / 10 + 1);
        assert_eq!(paginator.first_page_in_block(), usize::MAX / 10 * 10 + 1);
        assert_eq!(paginator.last_page_in_block(), usize::MAX);
        assert_eq!(paginator.current_offset(), Ok(Offset::new(usize::MAX - 1, 1)));
        assert_eq!(
            paginator.offsets(usize::MAX).unwrap().collect::<Vec<_>>(),
            vec![Offset::new(usize::MAX - 1, 1)]
        );
    }

    #[test]
    fn first_row_in_far_pages_saturates() {
        let paginator = paginator(1000, 1, 10, 10);

        assert_eq!(paginator.first_row_in_page(usize::MAX / 2), usize::MAX);
        assert_eq!(paginator.first_row_in_page(usize::MAX), usize::MAX);
        assert_eq!(paginator.first_row_in_page(0), 0);
        assert_eq!(page_first_row(usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn middle_pages_of_huge_counts() {
        // page * per_page stays below count on every page but the last
        let paginator = paginator(usize::MAX, usize::MAX / 4, 2, 10);

        assert_eq!(paginator.first_row(), (usize::MAX / 4 - 1) * 2 + 1);
        assert_eq!(paginator.last_row(), usize::MAX / 4 * 2);
    }

    #[test]
    fn offset_display() {
        assert_eq!(Offset::new(40, 10).to_string(), "OFFSET 40 LIMIT 10");
    }

    #[test]
    fn slice_current_page() {
        let items = (1..=23).collect::<Vec<_>>();

        assert_eq!(paginator(23, 2, 10, 10).slice(&items), &items[10..20]);
        assert_eq!(paginator(23, 3, 10, 10).slice(&items), &[21, 22, 23]);
    }

    #[test]
    fn page_count_bounds_count() {
        for per_page in 1..=12 {
            for count in 0..=200 {
                let paginator = paginator(count, 1, per_page, 10);
                let pages = paginator.pages();

                assert_eq!(pages == 0, count == 0);
                if count > 0 {
                    assert!((pages - 1) * per_page < count);
                    assert!(count <= pages * per_page);
                    assert!(paginator.rows_in_last_page() >= 1);
                    assert!(paginator.rows_in_last_page() <= per_page);
                }
            }
        }
    }

    #[test]
    fn offset_fails_only_past_last_page() {
        for per_page in 1..=9 {
            for count in 1..=120 {
                let paginator = paginator(count, 1, per_page, 10);
                let pages = paginator.pages();

                for page in 1..=pages + 3 {
                    assert_eq!(paginator.offset(page).is_err(), page > pages);
                    if page <= pages {
                        assert_eq!(paginator.first_row_in_page(page), (page - 1) * per_page + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn construction_clamps_and_never_fails() {
        for count in 1..=150 {
            for page in 1..=40 {
                let paginator = paginator(count, page, 7, 3);

                assert!(paginator.page() >= 1);
                assert!(paginator.page() <= paginator.pages());
                assert_eq!(paginator.page(), page.min(paginator.pages()));
                assert!(paginator.first_row() <= paginator.last_row());
                assert!(paginator.last_row() <= count);
            }
        }
    }

    #[test]
    fn shared_between_threads() {
        let paginator = Arc::new(paginator(64, 5, 6, 10));

        let handles = (0..4)
            .map(|_| {
                let paginator = Arc::clone(&paginator);
                std::thread::spawn(move || paginator.first_row())
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 25);
        }
    }
}
