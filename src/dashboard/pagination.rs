//! Page math over the filtered view.

/// Current page and page size. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
  current_page: usize,
  page_size: usize,
}

impl Pagination {
  pub fn new(page_size: usize) -> Self {
    Self {
      current_page: 1,
      page_size: page_size.max(1),
    }
  }

  pub fn current_page(&self) -> usize {
    self.current_page
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn reset(&mut self) {
    self.current_page = 1;
  }

  /// Change the page size and go back to the first page
  pub fn set_page_size(&mut self, page_size: usize) {
    self.page_size = page_size.max(1);
    self.reset();
  }

  /// Go back one page. No-op on the first page.
  pub fn previous(&mut self) -> bool {
    if self.current_page > 1 {
      self.current_page -= 1;
      true
    } else {
      false
    }
  }

  /// Advance one page. No-op on the last page, or when there are no pages.
  pub fn next(&mut self, total_pages: usize) -> bool {
    if self.current_page < total_pages {
      self.current_page += 1;
      true
    } else {
      false
    }
  }

  /// Pull the current page back into `[1, max(total_pages, 1)]`
  pub fn clamp(&mut self, total_pages: usize) {
    self.current_page = self.current_page.clamp(1, total_pages.max(1));
  }
}

/// Number of pages needed for `count` items; zero when there are no items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
  if page_size == 0 {
    return 0;
  }
  count.div_ceil(page_size)
}

/// The slice of the filtered view that is currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<'a, T> {
  pub items: &'a [T],
  pub current_page: usize,
  pub page_size: usize,
  pub total_pages: usize,
  pub total_items: usize,
  /// 1-based inclusive bounds of `items` within the full view
  pub range: Option<(usize, usize)>,
}

/// Cut page `current_page` out of `items`.
///
/// Out-of-range pages yield an empty window rather than an error.
pub fn visible_page<T>(items: &[T], current_page: usize, page_size: usize) -> PageWindow<'_, T> {
  let page_size = page_size.max(1);
  let current_page = current_page.max(1);
  let total_items = items.len();

  let start = ((current_page - 1) * page_size).min(total_items);
  let end = (current_page * page_size).min(total_items);
  let page_items = &items[start..end];

  let range = if page_items.is_empty() {
    None
  } else {
    Some((start + 1, end))
  };

  PageWindow {
    items: page_items,
    current_page,
    page_size,
    total_pages: total_pages(total_items, page_size),
    total_items,
    range,
  }
}
