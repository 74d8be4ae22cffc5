/// A zero-based page of a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index, starting at zero.
    pub page: u32,

    /// Maximum number of records on the page.
    pub size: u32,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Paging mode for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pageable {
    /// Return a single page.
    Paged(PageRequest),

    /// Return every matching record.
    Unpaged,
}

impl Pageable {
    /// Creates a paged request.
    pub fn of(page: u32, size: u32) -> Self {
        Pageable::Paged(PageRequest::new(page, size))
    }

    /// Applies this paging to an already ordered iterator.
    pub fn apply<T>(&self, records: impl Iterator<Item = T>) -> Vec<T> {
        match self {
            Pageable::Paged(request) => records
                .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                .take(request.size as usize)
                .collect(),
            Pageable::Unpaged => records.collect(),
        }
    }
}

impl From<PageRequest> for Pageable {
    fn from(request: PageRequest) -> Self {
        Pageable::Paged(request)
    }
}
