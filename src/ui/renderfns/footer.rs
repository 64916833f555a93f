use crate::dashboard::render::PaginationModel;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the pagination bar: prev/next controls, summary and page size
pub fn draw_footer(frame: &mut Frame, area: Rect, pagination: &PaginationModel) {
  let control = |enabled: bool| {
    if enabled {
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::DarkGray)
    }
  };

  let line = Line::from(vec![
    Span::raw(" "),
    Span::styled("◀ prev", control(pagination.previous_enabled)),
    Span::raw("  "),
    Span::styled(pagination.summary.clone(), Style::default().fg(Color::White)),
    Span::raw("  "),
    Span::styled("next ▶", control(pagination.next_enabled)),
    Span::styled(
      format!("   {} per page", pagination.page_size),
      Style::default().fg(Color::DarkGray),
    ),
  ]);

  let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}
