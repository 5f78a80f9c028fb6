use std::ops::RangeInclusive;

use crate::{deprecation::Deprecation, paginator::Paginator};

/// Legacy accessor names of [`Paginator`].
///
/// Every accessor returns exactly what its current counterpart returns and
/// reports the rename to the paginator's deprecation sink.
#[derive(Debug, Clone, Copy)]
pub struct Legacy<'a> {
    paginator: &'a Paginator,
}

macro_rules! legacy_accessors {
    ($($legacy:ident => $current:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Deprecated, use [`Paginator::", stringify!($current), "`].")]
            pub fn $legacy(&self) -> $ty {
                self.report(stringify!($legacy), stringify!($current));
                self.paginator.$current()
            }
        )*
    };
}

impl<'a> Legacy<'a> {
    pub(crate) fn new(paginator: &'a Paginator) -> Self {
        Self { paginator }
    }

    fn report(&self, legacy: &'static str, current: &'static str) {
        self.paginator
            .sink()
            .deprecated(&Deprecation::property(legacy, current));
    }

    legacy_accessors! {
        row_count => count: usize,
        current_page => page: usize,
        rows_per_page => per_page: usize,
        pages_per_block => per_block: usize,
        page_count => pages: usize,
        block_count => blocks: usize,
        current_block => block: usize,
        block_first_page => first_page_in_block: usize,
        block_last_page => last_page_in_block: usize,
        block_pages => pages_in_block: RangeInclusive<usize>,
        current_first_row => first_row: usize,
        current_last_row => last_row: usize,
        rows_last_page => rows_in_last_page: usize,
    }

    /// Deprecated, use [`Paginator::first_row_in_page`].
    pub fn page_first_row(&self, page: usize) -> usize {
        self.report("page_first_row", "first_row_in_page");
        self.paginator.first_row_in_page(page)
    }
}
