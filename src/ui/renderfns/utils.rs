use crate::dashboard::{DataSource, LoadStatus, SortIndicator};
use ratatui::prelude::Color;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Badge text and color for the load status
pub fn status_badge(status: LoadStatus) -> (&'static str, Color) {
  match status {
    LoadStatus::Idle => ("idle", Color::DarkGray),
    LoadStatus::Loading => ("loading...", Color::Yellow),
    LoadStatus::Ready(DataSource::Network) => ("live", Color::Green),
    LoadStatus::Ready(DataSource::Cache) => ("cached", Color::Magenta),
    LoadStatus::Error => ("error", Color::Red),
  }
}

/// Arrow shown after a column label
pub fn sort_arrow(indicator: SortIndicator) -> &'static str {
  match indicator {
    SortIndicator::None => "",
    SortIndicator::Inactive => " ↕",
    SortIndicator::Ascending => " ▲",
    SortIndicator::Descending => " ▼",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Áo sơ mi trắng", 8), "Áo sơ...");
  }

  #[test]
  fn test_status_badge() {
    assert_eq!(status_badge(LoadStatus::Ready(DataSource::Network)).0, "live");
    assert_eq!(status_badge(LoadStatus::Ready(DataSource::Cache)).0, "cached");
    assert_eq!(status_badge(LoadStatus::Error).1, Color::Red);
  }

  #[test]
  fn test_sort_arrow() {
    assert_eq!(sort_arrow(SortIndicator::Ascending), " ▲");
    assert_eq!(sort_arrow(SortIndicator::Descending), " ▼");
    assert_eq!(sort_arrow(SortIndicator::None), "");
  }
}
