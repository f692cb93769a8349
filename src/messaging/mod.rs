/// Messaging module for game notifications
///
/// A match game publishes what happened; renderers subscribe and redraw.
///
/// ## Architecture
///
/// ```text
/// ┌───────────┐   GameEvent    ┌─────────────┐
/// │ MatchGame │ ─────────────> │  Event Bus  │
/// └───────────┘                └─────────────┘
///                                     │
///                                     │ Publishes
///                                     ▼
///                               ┌──────────┐
///                               │ Renderer │
///                               └──────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// let (rx, _id) = bus.subscribe();
///
/// let mut game = MatchGame::new(pairs)?.with_events(bus.clone());
/// game.select_word(1);
///
/// while let Ok(event) = rx.try_recv() {
///     println!("{}", event.description());
/// }
/// ```

pub mod bus;
pub mod events;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use events::GameEvent;
