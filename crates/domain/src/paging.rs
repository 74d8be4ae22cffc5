//! Page parameter validation for list operations.

use store::PageRequest;

use crate::error::DomainError;
use crate::validation::FieldViolations;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Name of the page index parameter.
pub const PAGE_PARAM: &str = "page";

/// Name of the page size parameter.
pub const SIZE_PARAM: &str = "size";

/// Raw page parameters as received from a client.
///
/// Both values are mandatory; they are optional here so that absence can be
/// reported by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    /// Creates page parameters.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self { page, size }
    }

    /// Creates page parameters with both values present.
    pub fn of(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Validates the parameters into a zero-based page request.
    ///
    /// The size is checked before the page, so an oversized page fails with
    /// `SizeExceeded` whatever the page index is.
    pub fn validate(&self) -> Result<PageRequest, DomainError> {
        let Some(size) = self.size else {
            tracing::warn!(param = SIZE_PARAM, "missing query parameter");
            return Err(DomainError::MissingParam(SIZE_PARAM));
        };
        if size > MAX_PAGE_SIZE {
            tracing::warn!(size, max = MAX_PAGE_SIZE, "page size above maximum");
            return Err(DomainError::SizeExceeded {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        let Some(page) = self.page else {
            tracing::warn!(param = PAGE_PARAM, "missing query parameter");
            return Err(DomainError::MissingParam(PAGE_PARAM));
        };

        let mut violations = FieldViolations::new();
        violations.check(page >= 0, "Param 'page' must not be negative");
        violations.check(size >= 1, "Param 'size' must be greater than 0");
        violations.into_result()?;

        // size is within 1..=MAX_PAGE_SIZE here
        let page = u32::try_from(page).map_err(|_| {
            DomainError::FieldValidation(vec!["Param 'page' is too large".to_string()])
        })?;
        Ok(PageRequest::new(page, size as u32))
    }
}
