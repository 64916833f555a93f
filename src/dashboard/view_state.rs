//! User-controlled view parameters: search term, sort spec, pagination.

use super::pagination::Pagination;

/// Columns shown in the product table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  Id,
  Title,
  Images,
  Price,
  Description,
  Category,
}

impl Column {
  pub const ALL: [Column; 6] = [
    Column::Id,
    Column::Title,
    Column::Images,
    Column::Price,
    Column::Description,
    Column::Category,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Column::Id => "ID",
      Column::Title => "Title",
      Column::Images => "Images",
      Column::Price => "Price",
      Column::Description => "Description",
      Column::Category => "Category",
    }
  }

  /// The sort field behind this column's header, if it is sortable
  pub fn sort_field(self) -> Option<SortField> {
    match self {
      Column::Id => Some(SortField::Id),
      Column::Title => Some(SortField::Title),
      Column::Price => Some(SortField::Price),
      Column::Images | Column::Description | Column::Category => None,
    }
  }
}

/// Fields the table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  Id,
  Title,
  Price,
}

impl From<SortField> for Column {
  fn from(field: SortField) -> Self {
    match field {
      SortField::Id => Column::Id,
      SortField::Title => Column::Title,
      SortField::Price => Column::Price,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  pub fn toggled(self) -> Self {
    match self {
      SortOrder::Asc => SortOrder::Desc,
      SortOrder::Desc => SortOrder::Asc,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
  pub field: SortField,
  pub order: SortOrder,
}

impl Default for SortSpec {
  fn default() -> Self {
    Self {
      field: SortField::Title,
      order: SortOrder::Asc,
    }
  }
}

impl SortSpec {
  /// Apply a header click: the active field flips its order, any other
  /// field becomes active in ascending order.
  pub fn click(&mut self, field: SortField) {
    if self.field == field {
      self.order = self.order.toggled();
    } else {
      self.field = field;
      self.order = SortOrder::Asc;
    }
  }
}

/// The three independent view parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
  pub search_term: String,
  pub sort: SortSpec,
  pub pagination: Pagination,
}

impl ViewState {
  pub fn new(page_size: usize) -> Self {
    Self {
      search_term: String::new(),
      sort: SortSpec::default(),
      pagination: Pagination::new(page_size),
    }
  }
}
