//! Search filter and column sort over the product collection.

use std::cmp::Ordering;

use super::view_state::{Column, SortOrder, ViewState};
use crate::catalog::Product;

/// Products whose title contains `term`, case-insensitively.
///
/// A blank term keeps every product. The result is always a fresh vector,
/// so sorting it never reorders the source collection.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
  let needle = term.trim().to_lowercase();
  if needle.is_empty() {
    return products.to_vec();
  }

  products
    .iter()
    .filter(|p| p.title.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}

/// Three-way comparison on one column. Columns without a sort key
/// compare every pair as equal.
pub fn compare(a: &Product, b: &Product, column: Column) -> Ordering {
  match column {
    Column::Id => a.id.cmp(&b.id),
    Column::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    Column::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
    Column::Images | Column::Description | Column::Category => Ordering::Equal,
  }
}

/// Sort in place. Descending flips each comparison, so ties keep the same
/// relative order under both directions.
pub fn sort_products(products: &mut [Product], column: Column, order: SortOrder) {
  products.sort_by(|a, b| {
    let ordering = compare(a, b, column);
    match order {
      SortOrder::Asc => ordering,
      SortOrder::Desc => ordering.reverse(),
    }
  });
}

/// Derive the filtered view: search, then sort.
pub fn derive_view(products: &[Product], view: &ViewState) -> Vec<Product> {
  let mut filtered = filter_products(products, &view.search_term);
  sort_products(&mut filtered, view.sort.field.into(), view.sort.order);
  filtered
}
