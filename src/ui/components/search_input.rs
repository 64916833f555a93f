use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const SEARCH_LABEL: &str = " Search: ";

/// Events emitted by search input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Search text changed (emitted on each edit, empty string on cancel)
  Changed(String),
}

/// Search field. `/` focuses it; Enter leaves focus and keeps the text,
/// Esc clears it.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if the field has keyboard focus
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Get the current search text
  pub fn query(&self) -> &str {
    self.input.value()
  }

  /// Handle a key event
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.active = true;
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted => {
        self.active = false;
        KeyResult::Handled
      }
      InputResult::Cancelled => {
        self.active = false;
        if self.input.is_empty() {
          return KeyResult::Handled;
        }
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::Edited => KeyResult::Event(SearchEvent::Changed(self.input.value().to_string())),
      InputResult::Moved => KeyResult::Handled,
      InputResult::NotHandled => KeyResult::NotHandled,
    }
  }

  /// Terminal column of the cursor, in display cells from the left edge
  fn cursor_column(&self) -> u16 {
    let width = Span::raw(SEARCH_LABEL).width() + Span::raw(self.input.before_cursor()).width();
    u16::try_from(width).unwrap_or(u16::MAX)
  }

  /// Render the search line. `pending` marks a search not yet applied.
  pub fn render(&self, frame: &mut Frame, area: Rect, pending: bool) {
    let label_style = if self.active {
      Style::default().fg(Color::Yellow).bold()
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(SEARCH_LABEL, label_style)];

    if self.query().is_empty() && !self.active {
      spans.push(Span::styled(
        "press / to filter by title",
        Style::default().fg(Color::DarkGray),
      ));
    } else {
      spans.push(Span::raw(self.query()));
    }
    if pending {
      spans.push(Span::styled("  …", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if self.active {
      let offset = self.cursor_column();
      frame.set_cursor_position((area.x + offset.min(area.width.saturating_sub(1)), area.y));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_inactive_ignores_typing() {
    let mut search = SearchInput::new();
    assert_eq!(search.handle_key(key(KeyCode::Char('a'))), KeyResult::NotHandled);
    assert_eq!(search.query(), "");
  }

  #[test]
  fn test_slash_activates() {
    let mut search = SearchInput::new();
    assert_eq!(search.handle_key(key(KeyCode::Char('/'))), KeyResult::Handled);
    assert!(search.is_active());
  }

  #[test]
  fn test_each_edit_emits_change() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));

    assert_eq!(
      search.handle_key(key(KeyCode::Char('a'))),
      KeyResult::Event(SearchEvent::Changed("a".to_string()))
    );
    assert_eq!(
      search.handle_key(key(KeyCode::Char('p'))),
      KeyResult::Event(SearchEvent::Changed("ap".to_string()))
    );
    assert_eq!(search.handle_key(key(KeyCode::Left)), KeyResult::Handled);
  }

  #[test]
  fn test_enter_keeps_text() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('x')));

    assert_eq!(search.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
    assert!(!search.is_active());
    assert_eq!(search.query(), "x");
  }

  #[test]
  fn test_escape_clears_text() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('x')));

    assert_eq!(
      search.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(SearchEvent::Changed(String::new()))
    );
    assert!(!search.is_active());
    assert_eq!(search.query(), "");
  }

  #[test]
  fn test_cursor_column_counts_display_width() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    assert_eq!(search.cursor_column(), 9);

    for c in "靴下".chars() {
      search.handle_key(key(KeyCode::Char(c)));
    }
    assert_eq!(search.cursor_column(), 13);

    search.handle_key(key(KeyCode::Left));
    assert_eq!(search.cursor_column(), 11);
  }

  #[test]
  fn test_escape_on_empty_field_emits_nothing() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    assert_eq!(search.handle_key(key(KeyCode::Esc)), KeyResult::Handled);
  }
}
