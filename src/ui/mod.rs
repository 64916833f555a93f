mod components;
mod renderfns;
mod table;

pub use components::{KeyResult, SearchEvent, SearchInput};

use crate::app::App;
use crate::dashboard::LoadStatus;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let controller = app.controller();
  let banner = controller.banner();

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),                       // Header
      Constraint::Length(banner.map_or(0, |_| 1)), // Error banner
      Constraint::Length(1),                       // Search
      Constraint::Min(3),                          // Table
      Constraint::Length(1),                       // Pagination
    ])
    .split(frame.area());

  renderfns::draw_header(
    frame,
    chunks[0],
    app.title(),
    app.endpoint(),
    controller.status(),
  );

  if let Some(message) = banner {
    let paragraph = Paragraph::new(format!(" ⚠ {}", message))
      .style(Style::default().fg(Color::White).bg(Color::Red));
    frame.render_widget(paragraph, chunks[1]);
  }

  app.search().render(frame, chunks[2], app.search_pending());

  let model = controller.table_model();
  table::draw_product_table(
    frame,
    chunks[3],
    &model,
    controller.products().len(),
    controller.status() == LoadStatus::Loading,
  );
  renderfns::draw_footer(frame, chunks[4], &model.pagination);
}
