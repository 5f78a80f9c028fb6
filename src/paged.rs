use impl_helper::ImplHelper;
use serde::Serialize;

use crate::{config::PaginatorConfig, error::Result, paginator::Paginator};

/// One fetched page of rows and the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ImplHelper)]
pub struct PagedData<T> {
    #[helper(get)]
    data: Vec<T>,

    #[helper(copy)]
    count: usize,
}

impl<T> PagedData<T> {
    pub fn new(data: Vec<T>, count: usize) -> Self {
        Self { data, count }
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn paginator(&self, config: PaginatorConfig) -> Result<Paginator> {
        Paginator::new(self.count, config)
    }

    /// Fetches the current page with `fetch(skip, take)` and wraps it with the total count.
    pub fn fetch<F>(paginator: &Paginator, fetch: F) -> Result<Self>
    where
        F: FnOnce(usize, usize) -> Vec<T>,
    {
        let offset = paginator.current_offset()?;
        let data = fetch(offset.skip(), offset.take());

        Ok(Self::new(data, paginator.count()))
    }
}
