//! Page arithmetic for the keyword table.

/// Pagination derived from the server's total row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self { page, limit, total }
    }

    /// `ceil(total / limit)`; zero when there are no rows.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Current page clamped into `[1, total_pages]` (1 when there are no pages).
    pub fn clamped_page(&self) -> u32 {
        clamp_page(self.page, self.total_pages())
    }

    /// 1-based index range of the rows on this page: `(first, last)`.
    pub fn showing(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let limit = u64::from(self.limit.max(1));
        let first = u64::from(self.page.saturating_sub(1)) * limit + 1;
        let last = (u64::from(self.page) * limit).min(self.total);
        (first.min(self.total), last)
    }
}

pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}
