//! Host-side test doubles for pins, delays and the console
//!
//! Each double comes with a handle that stays with the test: a stimulus to
//! drive an input, a monitor to observe an output. Console writes and delays
//! are recorded on one shared [`Timeline`] so tests can check ordering
//! between channels.

use core::convert::Infallible;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

// ===================================================================
// Pins
// ===================================================================

pub struct MockInput {
    level: Rc<Cell<bool>>,
}

#[derive(Clone)]
pub struct InputStimulus {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(initial: bool) -> (Self, InputStimulus) {
        let level = Rc::new(Cell::new(initial));
        (
            Self {
                level: Rc::clone(&level),
            },
            InputStimulus { level },
        )
    }
}

impl InputStimulus {
    pub fn set(&self, level: bool) {
        self.level.set(level);
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

pub struct MockOutput {
    history: Rc<RefCell<Vec<bool>>>,
}

#[derive(Clone)]
pub struct OutputMonitor {
    history: Rc<RefCell<Vec<bool>>>,
}

impl MockOutput {
    pub fn new() -> (Self, OutputMonitor) {
        let history = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                history: Rc::clone(&history),
            },
            OutputMonitor { history },
        )
    }
}

impl OutputMonitor {
    /// Last level written, low if never written
    pub fn level(&self) -> bool {
        self.history.borrow().last().copied().unwrap_or(false)
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(true);
        Ok(())
    }
}

// ===================================================================
// Timeline
// ===================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// One `write_str` call on the console
    Console(String),
    /// A delay of `us` microseconds requested by the named delay
    Delay { label: &'static str, us: u32 },
}

#[derive(Clone, Default)]
pub struct Timeline {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Timeline {
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn console_lines(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Console(s) => Some(s.clone()),
                Event::Delay { .. } => None,
            })
            .collect()
    }

    /// Delays of one label, in whole milliseconds
    pub fn delays(&self, label: &'static str) -> Vec<u32> {
        self.delays_us(label).into_iter().map(|us| us / 1_000).collect()
    }

    pub fn delays_us(&self, label: &'static str) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Delay { label: l, us } if *l == label => Some(*us),
                _ => None,
            })
            .collect()
    }
}

// ===================================================================
// Console
// ===================================================================

pub struct MockConsole {
    timeline: Timeline,
}

impl MockConsole {
    pub fn new() -> (Self, Timeline) {
        let timeline = Timeline::default();
        (Self::on(&timeline), timeline)
    }

    /// Console recording onto an existing timeline
    pub fn on(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }
}

impl fmt::Write for MockConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.timeline.push(Event::Console(s.to_string()));
        Ok(())
    }
}

/// Console whose every write fails
pub struct BrokenConsole;

impl fmt::Write for BrokenConsole {
    fn write_str(&mut self, _s: &str) -> fmt::Result {
        Err(fmt::Error)
    }
}

// ===================================================================
// Delay
// ===================================================================

/// Records each requested delay and yields once instead of sleeping.
///
/// An optional hook runs at the start of every delay with its length in
/// milliseconds, which lets a test change inputs "while" a controller is
/// suspended.
pub struct MockDelay {
    label: &'static str,
    timeline: Timeline,
    hook: Option<Box<dyn FnMut(u32)>>,
}

impl MockDelay {
    pub fn new(label: &'static str, timeline: &Timeline) -> Self {
        Self {
            label,
            timeline: timeline.clone(),
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: impl FnMut(u32) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    async fn record(&mut self, us: u32) {
        self.timeline.push(Event::Delay {
            label: self.label,
            us,
        });
        if let Some(hook) = self.hook.as_mut() {
            hook(us / 1_000);
        }
        embassy_futures::yield_now().await;
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(ns / 1_000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(us).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(ms.saturating_mul(1_000)).await;
    }
}

// ===================================================================
// Futures
// ===================================================================

/// Completes after being polled `remaining` times, waking itself in between
pub struct PollBudget {
    remaining: usize,
}

impl PollBudget {
    pub fn new(polls: usize) -> Self {
        Self { remaining: polls }
    }
}

impl Future for PollBudget {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.remaining == 0 {
            return Poll::Ready(());
        }
        self.remaining -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
