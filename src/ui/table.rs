use crate::dashboard::{Column, SortIndicator, TableModel};
use crate::ui::renderfns::{sort_arrow, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

fn column_width(column: Column) -> Constraint {
  match column {
    Column::Id => Constraint::Length(6),
    Column::Title => Constraint::Percentage(25),
    Column::Images => Constraint::Percentage(20),
    Column::Price => Constraint::Length(12),
    Column::Description => Constraint::Percentage(35),
    Column::Category => Constraint::Length(14),
  }
}

/// Draw the product table for the current page
pub fn draw_product_table(
  frame: &mut Frame,
  area: Rect,
  model: &TableModel,
  total: usize,
  loading: bool,
) {
  let title = if loading {
    " Products (loading...) ".to_string()
  } else {
    format!(" Products ({}) ", total)
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if let Some(empty) = &model.empty {
    let content = if loading {
      vec![Line::from("Loading products...")]
    } else {
      vec![
        Line::from(""),
        Line::from(Span::styled(empty.title, Style::default().bold())),
        Line::from(empty.hint),
      ]
    };
    let paragraph = Paragraph::new(content)
      .alignment(Alignment::Center)
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let header = Row::new(model.headers.iter().map(|h| {
    let style = if matches!(
      h.indicator,
      SortIndicator::Ascending | SortIndicator::Descending
    ) {
      Style::default().fg(Color::Yellow).bold()
    } else {
      Style::default().fg(Color::Cyan)
    };
    Cell::from(format!("{}{}", h.label, sort_arrow(h.indicator))).style(style)
  }));

  let rows = model.rows.iter().map(|row| {
    Row::new(vec![
      Cell::from(row.id.clone()).style(Style::default().fg(Color::Cyan)),
      Cell::from(truncate(&row.title, 40)),
      Cell::from(truncate(&row.images_label, 40)).style(if row.images.is_empty() {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default().fg(Color::Blue)
      }),
      Cell::from(Line::from(row.price.clone()).alignment(Alignment::Right))
        .style(Style::default().fg(Color::Green)),
      Cell::from(truncate(&row.description, 80)),
      Cell::from(truncate(&row.category, 14)).style(Style::default().fg(Color::Magenta)),
    ])
  });

  let widths: Vec<Constraint> = model.headers.iter().map(|h| column_width(h.column)).collect();

  let table = Table::new(rows, widths)
    .header(header.bottom_margin(1))
    .block(block)
    .column_spacing(1);

  frame.render_widget(table, area);
}
