use super::utils::status_badge;
use crate::dashboard::LoadStatus;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use url::Url;

/// Draw the header bar with title, endpoint host, load status and shortcuts
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: Option<&str>,
  endpoint: &Url,
  status: LoadStatus,
) {
  let host = endpoint_host(endpoint);
  let (badge, badge_color) = status_badge(status);

  let mut spans = vec![
    Span::styled(" shopdash ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
  ];
  if let Some(title) = title {
    spans.push(Span::styled(
      format!(" {} ", title),
      Style::default().fg(Color::Yellow).bold(),
    ));
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
  }
  spans.extend([
    Span::styled(format!(" {} ", host), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", badge), Style::default().fg(badge_color).bold()),
    Span::raw("  "),
  ]);

  // Shortcuts - keys highlighted, descriptions dimmed
  for (key, label) in [
    ("</>", "search"),
    ("<1-3>", "sort"),
    ("<←→>", "page"),
    ("<+->", "size"),
    ("<r>", "reload"),
    ("<q>", "quit"),
  ] {
    spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(
      format!(" {}   ", label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Host (and non-default port) of the endpoint
fn endpoint_host(url: &Url) -> String {
  match (url.host_str(), url.port()) {
    (Some(host), Some(port)) => format!("{}:{}", host, port),
    (Some(host), None) => host.to_string(),
    (None, _) => url.as_str().to_string(),
  }
}
