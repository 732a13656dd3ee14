use std::ops::Range;

/// Page and in-page cursor over a list whose length is supplied per call.
///
/// The paginator never stores the item count, so a list can be replaced under it
/// without the paginator going stale in a way that panics: [`Paginator::visible_range`]
/// returns an empty range when the current page no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    cursor: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    #[cfg(test)]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the last page, or `None` for an empty list.
    pub fn last_page_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| (len - 1) / self.page_size)
    }

    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.page * self.page_size;
        if start >= len {
            return 0..0;
        }
        start..(start + self.page_size).min(len)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self, visible: usize) {
        if self.cursor + 1 < visible {
            self.cursor += 1;
        }
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        match self.last_page_index(len) {
            Some(last) if self.page < last => {
                self.page += 1;
                self.cursor = 0;
                true
            }
            _ => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        self.cursor = 0;
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last_page(&mut self, len: usize) -> bool {
        self.jump_to(self.last_page_index(len).unwrap_or(0))
    }

    fn jump_to(&mut self, page: usize) -> bool {
        if self.page == page {
            return false;
        }
        self.page = page;
        self.cursor = 0;
        true
    }

    pub fn reset(&mut self) {
        self.page = 0;
        self.cursor = 0;
    }

    /// Pull page and cursor back inside a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        let last = self.last_page_index(len).unwrap_or(0);
        if self.page > last {
            self.page = last;
            self.cursor = 0;
        }
        let visible = self.visible_range(len).len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }

    pub fn page_info(&self, len: usize, label: &str) -> String {
        let Some(last) = self.last_page_index(len) else {
            return format!("No {} found", label);
        };
        if last == 0 {
            return format!("Showing {} {}", len, label);
        }
        let range = self.visible_range(len);
        format!(
            "Page {}/{} ({} {}-{} of {})",
            self.page + 1,
            last + 1,
            label,
            range.start + 1,
            range.end,
            len
        )
    }
}
