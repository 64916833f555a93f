//! Dashboard state machine: owns the product collection and view state,
//! applies user actions and load results, and derives the table model.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::engine::derive_view;
use super::pagination::{total_pages, visible_page};
use super::render::{render, TableModel};
use super::view_state::{SortField, ViewState};
use crate::cache::ProductCache;
use crate::catalog::Product;
use crate::error::FetchError;

pub const CACHE_UNAVAILABLE: &str =
  "No cached data available. Check your network connection and try again.";

/// Where the displayed collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
  Network,
  Cache,
}

/// Load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
  Idle,
  Loading,
  Ready(DataSource),
  Error,
}

pub struct Controller {
  cache: ProductCache,
  /// Full collection as last fetched or loaded from cache
  products: Vec<Product>,
  /// Search-matched, sorted view of `products`
  filtered: Vec<Product>,
  view: ViewState,
  status: LoadStatus,
  /// User-visible error banner
  banner: Option<String>,
  page_size_choices: Vec<usize>,
}

impl Controller {
  pub fn new(cache: ProductCache, page_size: usize, page_size_choices: Vec<usize>) -> Self {
    Self {
      cache,
      products: Vec::new(),
      filtered: Vec::new(),
      view: ViewState::new(page_size),
      status: LoadStatus::Idle,
      banner: None,
      page_size_choices,
    }
  }

  /// Enter `Loading` and clear any previous error banner.
  ///
  /// Called for the initial load, manual reloads and reconnects alike.
  /// An in-flight load is not cancelled; whichever completion arrives last
  /// decides the collection.
  pub fn begin_load(&mut self) {
    self.status = LoadStatus::Loading;
    self.banner = None;
  }

  /// Apply the outcome of a fetch. Failures fall back to the cache.
  pub fn finish_load(&mut self, result: Result<Vec<Product>, FetchError>, now: DateTime<Utc>) {
    match result {
      Ok(products) => {
        info!(count = products.len(), "loaded products from network");
        if let Err(e) = self.cache.save(&products, now) {
          warn!("Failed to cache products: {}", e);
        }
        self.adopt(products);
        self.status = LoadStatus::Ready(DataSource::Network);
      }
      Err(e) => {
        warn!("Product fetch failed: {}", e);
        self.status = LoadStatus::Error;
        self.banner = Some(format!(
          "Could not load products: {}. Trying cached data...",
          e
        ));
        self.fall_back_to_cache(now);
      }
    }
  }

  fn fall_back_to_cache(&mut self, now: DateTime<Utc>) {
    match self.cache.load_fresh(now) {
      Ok(entry) => {
        info!(
          count = entry.products.len(),
          fetched_at = %entry.fetched_at,
          "serving products from cache"
        );
        // The fetch error stays on screen as a stale-data notice
        self.adopt(entry.products);
        self.status = LoadStatus::Ready(DataSource::Cache);
      }
      Err(miss) => {
        info!("cache fallback unavailable: {}", miss);
        self.banner = Some(CACHE_UNAVAILABLE.to_string());
      }
    }
  }

  /// Replace the collection wholesale and re-derive the view.
  fn adopt(&mut self, products: Vec<Product>) {
    self.products = products;
    self.rederive();
  }

  fn rederive(&mut self) {
    self.filtered = derive_view(&self.products, &self.view);
    self.clamp_page();
  }

  fn clamp_page(&mut self) {
    let pages = self.total_pages();
    self.view.pagination.clamp(pages);
  }

  /// Apply a settled search term and return to the first page.
  pub fn apply_search(&mut self, term: &str) {
    self.view.search_term = term.to_string();
    self.view.pagination.reset();
    self.rederive();
  }

  /// Handle a click on a sortable column header.
  pub fn click_sort(&mut self, field: SortField) {
    self.view.sort.click(field);
    self.view.pagination.reset();
    self.rederive();
  }

  /// Change the page size and return to the first page.
  pub fn set_page_size(&mut self, page_size: usize) {
    self.view.pagination.set_page_size(page_size);
    self.clamp_page();
  }

  /// Step to the next (or previous) configured page size, wrapping around.
  pub fn cycle_page_size(&mut self, forward: bool) {
    let choices = &self.page_size_choices;
    if choices.is_empty() {
      return;
    }

    let current = self.view.pagination.page_size();
    let next = match choices.iter().position(|&c| c == current) {
      Some(i) if forward => choices[(i + 1) % choices.len()],
      Some(i) => choices[(i + choices.len() - 1) % choices.len()],
      None => choices[0],
    };
    self.set_page_size(next);
  }

  pub fn previous_page(&mut self) -> bool {
    self.view.pagination.previous()
  }

  pub fn next_page(&mut self) -> bool {
    let pages = self.total_pages();
    self.view.pagination.next(pages)
  }

  pub fn total_pages(&self) -> usize {
    total_pages(self.filtered.len(), self.view.pagination.page_size())
  }

  /// Presentation model for the current page.
  pub fn table_model(&self) -> TableModel {
    let pagination = &self.view.pagination;
    let window = visible_page(
      &self.filtered,
      pagination.current_page(),
      pagination.page_size(),
    );
    render(&window, &self.view.sort)
  }

  pub fn status(&self) -> LoadStatus {
    self.status
  }

  pub fn banner(&self) -> Option<&str> {
    self.banner.as_deref()
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }
}
