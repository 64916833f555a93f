use crate::catalog::Product;
use crate::error::FetchError;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Application events. Everything that mutates dashboard state arrives here
/// and is handled one at a time on the main loop.
#[derive(Debug)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Terminal resized or periodic tick; both just trigger a redraw
  Tick,
  /// A product fetch finished
  ProductsLoaded(Result<Vec<Product>, FetchError>),
  /// The search input has been idle for the debounce delay
  SearchSettled(String),
  /// The endpoint became reachable again after being unreachable
  NetworkRestored,
}

/// What the input task does with one item from the terminal stream
#[derive(Debug)]
enum Input {
  Forward(Event),
  Skip,
  Closed,
}

/// Map a terminal stream item to an input action. Read errors are logged
/// and skipped; only the end of the stream stops the reader.
fn translate(item: Option<io::Result<CrosstermEvent>>) -> Input {
  match item {
    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
      Input::Forward(Event::Key(key))
    }
    Some(Ok(CrosstermEvent::Resize(_, _))) => Input::Forward(Event::Tick),
    Some(Ok(_)) => Input::Skip,
    Some(Err(e)) => {
      warn!("Terminal input error: {}", e);
      Input::Skip
    }
    None => Input::Closed,
  }
}

/// Event handler that merges terminal input, a tick timer and events sent
/// by background tasks into one channel
pub struct EventHandler {
  tx: mpsc::UnboundedSender<Event>,
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  /// Create a new event handler with the given tick rate
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    let input_tx = tx.clone();
    tokio::spawn(async move {
      let mut reader = EventStream::new();
      let mut ticker = tokio::time::interval(tick_rate);

      loop {
        let event = tokio::select! {
          maybe = reader.next() => match translate(maybe) {
            Input::Forward(event) => event,
            Input::Skip => continue,
            Input::Closed => break,
          },
          _ = ticker.tick() => Event::Tick,
        };

        if input_tx.send(event).is_err() {
          break;
        }
      }
    });

    Self { tx, rx }
  }

  /// Sender for background tasks to post events
  pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
    self.tx.clone()
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}
