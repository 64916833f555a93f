//! Pure mapping from a page of products to a presentation model.
//!
//! Nothing here knows about the terminal; the UI layer draws whatever
//! `TableModel` says.

use super::pagination::PageWindow;
use super::view_state::{Column, SortOrder, SortSpec};
use crate::catalog::Product;

pub const NO_IMAGE: &str = "No image";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_CATEGORY: &str = "N/A";

/// Sort affordance shown on a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
  /// Not sortable
  None,
  /// Sortable but not the active column
  Inactive,
  Ascending,
  Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
  pub column: Column,
  pub label: &'static str,
  pub indicator: SortIndicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
  pub id: String,
  pub title: String,
  pub images: Vec<String>,
  /// Short text for the images cell, or the placeholder
  pub images_label: String,
  pub price: String,
  pub description: String,
  pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModel {
  pub summary: String,
  pub previous_enabled: bool,
  pub next_enabled: bool,
  pub page_size: usize,
}

/// Shown instead of rows when the page is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
  pub title: &'static str,
  pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
  pub headers: Vec<HeaderCell>,
  pub rows: Vec<RowModel>,
  pub empty: Option<EmptyState>,
  pub pagination: PaginationModel,
}

/// Build the table model for one page.
pub fn render(window: &PageWindow<'_, Product>, sort: &SortSpec) -> TableModel {
  let rows: Vec<RowModel> = window.items.iter().map(render_row).collect();
  let empty = rows.is_empty().then_some(EmptyState {
    title: "No products found",
    hint: "Try a different search term",
  });

  TableModel {
    headers: render_headers(sort),
    rows,
    empty,
    pagination: render_pagination(window),
  }
}

fn render_headers(sort: &SortSpec) -> Vec<HeaderCell> {
  Column::ALL
    .into_iter()
    .map(|column| {
      let indicator = match column.sort_field() {
        None => SortIndicator::None,
        Some(field) if field == sort.field => match sort.order {
          SortOrder::Asc => SortIndicator::Ascending,
          SortOrder::Desc => SortIndicator::Descending,
        },
        Some(_) => SortIndicator::Inactive,
      };
      HeaderCell {
        column,
        label: column.label(),
        indicator,
      }
    })
    .collect()
}

fn render_row(product: &Product) -> RowModel {
  let images_label = match product.images.as_slice() {
    [] => NO_IMAGE.to_string(),
    [only] => only.clone(),
    [first, rest @ ..] => format!("{} (+{} more)", first, rest.len()),
  };

  RowModel {
    id: product.id.to_string(),
    title: product.title.clone(),
    images: product.images.clone(),
    images_label,
    price: format_price(product.price),
    description: product
      .description
      .as_deref()
      .filter(|d| !d.trim().is_empty())
      .unwrap_or(NO_DESCRIPTION)
      .to_string(),
    category: product
      .category
      .as_ref()
      .map(|c| c.name.as_str())
      .filter(|name| !name.is_empty())
      .unwrap_or(NO_CATEGORY)
      .to_string(),
  }
}

fn render_pagination(window: &PageWindow<'_, Product>) -> PaginationModel {
  let summary = match window.range {
    _ if window.total_items == 0 => "No data".to_string(),
    Some((start, end)) => format!(
      "Showing {}-{} of {} products (page {}/{})",
      start, end, window.total_items, window.current_page, window.total_pages
    ),
    None => format!(
      "Page {}/{} is empty ({} products)",
      window.current_page, window.total_pages, window.total_items
    ),
  };

  PaginationModel {
    summary,
    previous_enabled: window.current_page > 1,
    next_enabled: window.current_page < window.total_pages,
    page_size: window.page_size,
  }
}

/// Format a price as US dollars with thousands separators, e.g. `$1,234.50`.
pub fn format_price(price: f64) -> String {
  let cents = (price.abs() * 100.0).round() as u64;
  let digits = (cents / 100).to_string();

  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
  format!("{}${}.{:02}", sign, grouped, cents % 100)
}
