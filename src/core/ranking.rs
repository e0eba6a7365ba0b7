use crate::core::types::RankingKind;

/// How a ranking page should reach the rendering surface.
///
/// `Replace` rebuilds the whole list (header + body); `Append` adds rows to
/// the existing body. Switching kind always forces `Replace` because the two
/// kinds are mutually exclusive owners of the single ranking surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Replace,
    Append,
}

/// Pagination/accumulation state for one ranked collection.
///
/// Invariant: `accumulated_count <= total_count` once the first page has
/// been absorbed; "load more" is offerable iff some items remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingContext {
    pub kind: RankingKind,
    /// Next page to request, 1-based
    pub page_cursor: u32,
    pub page_size: u32,
    /// Server-reported authoritative total; overwritten on every response
    pub total_count: usize,
    /// Items absorbed so far across all pages
    pub accumulated_count: usize,
}

impl RankingContext {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn new(kind: RankingKind) -> Self {
        Self {
            kind,
            page_cursor: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            total_count: 0,
            accumulated_count: 0,
        }
    }

    /// Absorb one response page.
    ///
    /// The server total always wins, even when it changed between calls.
    /// Returns the accumulated count before this batch, which is the base
    /// for global row positions of the new rows.
    pub fn absorb_page(&mut self, returned_items: usize, server_total: usize) -> usize {
        let before = self.accumulated_count;
        self.total_count = server_total;
        self.accumulated_count = before + returned_items;
        self.page_cursor += 1;
        before
    }

    /// Whether the "load more" affordance should be offered
    pub fn can_load_more(&self) -> bool {
        self.accumulated_count < self.total_count
    }

    /// Fully loaded and non-empty, i.e. a completion notice is due
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.accumulated_count >= self.total_count
    }

    /// Global position of a row within the accumulated list
    pub fn global_row_index(accumulated_before_batch: usize, local_index: usize) -> usize {
        accumulated_before_batch + local_index
    }

    /// Alternating-row styling is computed from the global position, so that
    /// appended rows continue the pre-existing stripe pattern seamlessly.
    pub fn is_striped_row(global_index: usize) -> bool {
        global_index % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_context_requests_page_one() {
        let ctx = RankingContext::new(RankingKind::Artists);
        assert_eq!(ctx.page_cursor, 1);
        assert_eq!(ctx.total_count, 0);
        assert_eq!(ctx.accumulated_count, 0);
        assert!(!ctx.can_load_more());
    }

    #[test]
    fn test_accumulation_is_monotone_and_bounded() {
        let mut ctx = RankingContext::new(RankingKind::Artists);

        let base = ctx.absorb_page(10, 25);
        assert_eq!(base, 0);
        assert_eq!(ctx.accumulated_count, 10);
        assert_eq!(ctx.page_cursor, 2);
        assert!(ctx.can_load_more());

        let base = ctx.absorb_page(10, 25);
        assert_eq!(base, 10);
        assert_eq!(ctx.accumulated_count, 20);
        assert!(ctx.can_load_more());

        let base = ctx.absorb_page(5, 25);
        assert_eq!(base, 20);
        assert_eq!(ctx.accumulated_count, 25);
        assert!(!ctx.can_load_more());
        assert!(ctx.is_complete());
    }

    #[test]
    fn test_server_total_is_authoritative() {
        let mut ctx = RankingContext::new(RankingKind::Songs);
        ctx.absorb_page(10, 40);
        // Total shrank between calls; trust the latest value.
        ctx.absorb_page(10, 20);
        assert_eq!(ctx.total_count, 20);
        assert_eq!(ctx.accumulated_count, 20);
        assert!(!ctx.can_load_more());
    }

    #[test]
    fn test_stripe_parity_matches_full_replace() {
        // Parity after appends must equal what a single replace-render of
        // the full accumulated list would produce.
        let mut appended = Vec::new();
        let mut ctx = RankingContext::new(RankingKind::Artists);
        for page_len in [10usize, 10, 5] {
            let base = ctx.absorb_page(page_len, 25);
            for local in 0..page_len {
                let global = RankingContext::global_row_index(base, local);
                appended.push(RankingContext::is_striped_row(global));
            }
        }

        let replaced: Vec<bool> = (0..25).map(RankingContext::is_striped_row).collect();
        assert_eq!(appended, replaced);
    }

    #[test]
    fn test_empty_result_never_completes() {
        let mut ctx = RankingContext::new(RankingKind::Songs);
        ctx.absorb_page(0, 0);
        assert!(!ctx.can_load_more());
        assert!(!ctx.is_complete());
    }
}
