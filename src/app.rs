use crate::cache::{NoopStorage, ProductCache, SqliteStorage};
use crate::catalog::ProductClient;
use crate::config::Config;
use crate::connectivity::{self, ProbeTarget};
use crate::dashboard::{Controller, SortField};
use crate::debounce::Debouncer;
use crate::event::{Event, EventHandler};
use crate::ui::{self, KeyResult, SearchEvent, SearchInput};
use chrono::Utc;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

/// Main application state
pub struct App {
  /// Application configuration
  config: Config,

  /// Product data source
  client: ProductClient,

  /// Dashboard state machine
  controller: Controller,

  /// Search field
  search: SearchInput,

  /// Pending debounced search
  debouncer: Debouncer<Event>,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let endpoint = config.endpoint()?;
    let client = ProductClient::new(endpoint.clone())?;
    let cache = Self::open_cache(&config, &endpoint);
    let controller = Controller::new(
      cache,
      config.page_size,
      config.page_size_choices.clone(),
    );

    // Replaced with the real event channel in run()
    let (tx, _rx) = mpsc::unbounded_channel();

    Ok(Self {
      debouncer: Debouncer::new(config.search_debounce(), tx.clone()),
      config,
      client,
      controller,
      search: SearchInput::new(),
      event_tx: tx,
      should_quit: false,
    })
  }

  /// The cache is best-effort: if the database cannot be opened the app
  /// runs without one.
  fn open_cache(config: &Config, endpoint: &Url) -> ProductCache {
    let cache = if !config.cache.enabled {
      info!("product cache disabled");
      ProductCache::new(NoopStorage, endpoint.as_str())
    } else {
      match SqliteStorage::open(config.cache.path.as_deref()) {
        Ok(storage) => ProductCache::new(storage, endpoint.as_str()),
        Err(e) => {
          warn!("Running without product cache: {}", e);
          ProductCache::new(NoopStorage, endpoint.as_str())
        }
      }
    };
    cache.with_max_age(config.cache_max_age())
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();
    self.debouncer = Debouncer::new(self.config.search_debounce(), events.sender());

    let monitor = self.start_connectivity_monitor();

    // Initial data load
    self.start_load();

    let result = self.main_loop(&mut terminal, &mut events).await;

    if let Some(handle) = monitor {
      handle.abort();
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn main_loop<B: Backend>(
    &mut self,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn start_connectivity_monitor(&self) -> Option<tokio::task::JoinHandle<()>> {
    let interval = self.config.probe_interval()?;
    let target = ProbeTarget::from_url(self.client.endpoint())?;
    Some(connectivity::spawn_monitor(
      target,
      interval,
      self.event_tx.clone(),
    ))
  }

  /// Start a full load. Does not cancel a load already in flight.
  fn start_load(&mut self) {
    self.controller.begin_load();
    info!(endpoint = %self.client.endpoint(), "loading products");

    let client = self.client.clone();
    let tx = self.event_tx.clone();
    tokio::spawn(async move {
      let result = client.fetch_all().await;
      let _ = tx.send(Event::ProductsLoaded(result));
    });
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // UI refresh happens automatically
      Event::ProductsLoaded(result) => self.controller.finish_load(result, Utc::now()),
      Event::SearchSettled(term) => self.controller.apply_search(&term),
      Event::NetworkRestored => {
        info!("network restored, reloading products");
        self.start_load();
      }
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Let search component try to handle first
    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(term)) => {
        self.debouncer.schedule(Event::SearchSettled(term));
        return;
      }
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    // While typing, unhandled keys must not trigger shortcuts
    if self.search.is_active() {
      return;
    }

    match key.code {
      KeyCode::Char('q') => self.should_quit = true,

      // Sortable headers
      KeyCode::Char('1') | KeyCode::Char('i') => self.controller.click_sort(SortField::Id),
      KeyCode::Char('2') | KeyCode::Char('t') => self.controller.click_sort(SortField::Title),
      KeyCode::Char('3') | KeyCode::Char('p') => self.controller.click_sort(SortField::Price),

      // Pagination
      KeyCode::Left | KeyCode::Char('h') => {
        self.controller.previous_page();
      }
      KeyCode::Right | KeyCode::Char('l') => {
        self.controller.next_page();
      }
      KeyCode::Char('+') | KeyCode::Char('=') => self.controller.cycle_page_size(true),
      KeyCode::Char('-') => self.controller.cycle_page_size(false),

      KeyCode::Char('r') => self.start_load(),

      _ => {}
    }
  }

  // Accessors for UI rendering
  pub fn controller(&self) -> &Controller {
    &self.controller
  }

  pub fn search(&self) -> &SearchInput {
    &self.search
  }

  pub fn search_pending(&self) -> bool {
    self.debouncer.is_pending()
  }

  pub fn endpoint(&self) -> &Url {
    self.client.endpoint()
  }

  pub fn title(&self) -> Option<&str> {
    self.config.title.as_deref()
  }
}
