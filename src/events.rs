//! Domain events and the queue that carries them
//!
//! Input and resize notifications arrive from host threads through an
//! `EventSender`; phases and the play field publish their own events into a
//! per-stage outbox that the game forwards into the same queue. The loop
//! drains everything once per frame, in arrival order.

use crossbeam_channel::{Receiver, Sender, TrySendError, unbounded};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything that can happen in the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The drawable area was established or changed
    ScreenResized { width: u32, height: u32 },
    /// Pointer dragged to a position (surface coordinates)
    PointerMoved(Vec2),
    /// Pointer lifted at a position
    PointerReleased(Vec2),
    /// A countdown announcement fired; the ball goes back above the paddle
    GetReady,
    /// The countdown reached "GO!"
    Go,
    /// The ball broke a block
    BallBrokeBlock {
        /// Index of the block in the play field grid
        block: usize,
        /// Block center (where the burst spawns)
        center: Vec2,
        point: Vec2,
        normal: Vec2,
        reflect: Vec2,
    },
    /// The ball bounced off the paddle
    BallBouncedPaddle {
        point: Vec2,
        normal: Vec2,
        reflect: Vec2,
    },
    BallBouncedWall,
    /// The ball dropped below the bottom of the screen
    BallFellOut,
}

impl GameEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::ScreenResized { .. } => "screen-resized",
            GameEvent::PointerMoved(_) => "pointer-moved",
            GameEvent::PointerReleased(_) => "pointer-released",
            GameEvent::GetReady => "get-ready",
            GameEvent::Go => "go",
            GameEvent::BallBrokeBlock { .. } => "ball-broke-block",
            GameEvent::BallBouncedPaddle { .. } => "ball-bounced-paddle",
            GameEvent::BallBouncedWall => "ball-bounced-wall",
            GameEvent::BallFellOut => "ball-fell-out",
        }
    }
}

/// Cloneable producer handle, safe to move to input threads
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<GameEvent>,
}

impl EventSender {
    /// Queue an event. Returns false if the game has been dropped.
    pub fn send(&self, event: GameEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(event)) => {
                log::debug!("dropping {} event: game is gone", event.name());
                false
            }
            // Unbounded channels never report full
            Err(TrySendError::Full(_)) => false,
        }
    }
}

/// Multi-producer, single-consumer FIFO queue of events
#[derive(Debug)]
pub struct EventChannel {
    tx: Sender<GameEvent>,
    rx: Receiver<GameEvent>,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// A new producer handle
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Append events produced on the loop thread, keeping their order
    pub fn publish<I>(&self, events: I)
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            // The channel holds its own receiver, so it cannot be disconnected
            let _ = self.tx.send(event);
        }
    }

    /// Take every event queued so far
    pub fn drain(&self) -> Vec<GameEvent> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }
}
