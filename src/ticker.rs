//! Defines [`Ticker`], the state behind the hero banner's cycling text. A
//! ticker walks a fixed sequence of [`Frame`]s, showing each for its
//! configured duration and wrapping around forever. It only advances while
//! started; [`Ticker::stop`] freezes it until the next [`Ticker::start`].

use serde::Deserialize;
use std::time::Duration;

/// One entry in the cycling sequence.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Frame {
    /// The text shown while the frame is current.
    pub text: String,

    /// How long the frame is shown, in milliseconds.
    pub duration_ms: u64,
}

impl Frame {
    pub fn new(text: &str, duration_ms: u64) -> Frame {
        Frame {
            text: text.to_owned(),
            duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Stopped,
    Running { index: usize, elapsed: Duration },
}

/// Cycles through a sequence of [`Frame`]s with an explicit start/stop
/// lifecycle.
#[derive(Clone, Debug)]
pub struct Ticker {
    frames: Vec<Frame>,
    state: State,
}

impl Ticker {
    /// Creates a stopped ticker over `frames`.
    pub fn new(frames: Vec<Frame>) -> Ticker {
        Ticker {
            frames,
            state: State::Stopped,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Starts the ticker from the first frame. Starting a running ticker
    /// leaves it where it is.
    pub fn start(&mut self) {
        if let State::Stopped = self.state {
            self.state = State::Running {
                index: 0,
                elapsed: Duration::default(),
            };
        }
    }

    /// Stops the ticker. A stopped ticker has no current frame and ignores
    /// [`Ticker::advance`].
    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// The text of the current frame, or `None` if the ticker is stopped or
    /// has no frames.
    pub fn current(&self) -> Option<&str> {
        match self.state {
            State::Running { index, .. } => self.frames.get(index).map(|f| f.text.as_str()),
            State::Stopped => None,
        }
    }

    /// Moves the ticker forward by `dt` and returns the text of the frame
    /// that is current afterwards.
    pub fn advance(&mut self, dt: Duration) -> Option<&str> {
        let cycle = self
            .frames
            .iter()
            .fold(Duration::default(), |acc, f| acc.saturating_add(f.duration()));
        if let State::Running { index, elapsed } = &mut self.state {
            // A cycle of zero length never moves off the current frame.
            if cycle > Duration::default() {
                *elapsed = rem(elapsed.saturating_add(rem(dt, cycle)), cycle);
                while *elapsed >= self.frames[*index].duration() {
                    *elapsed -= self.frames[*index].duration();
                    *index = (*index + 1) % self.frames.len();
                }
            }
        }
        self.current()
    }
}

// `a % b` for a non-zero `b`.
fn rem(a: Duration, b: Duration) -> Duration {
    let nanos = a.as_nanos() % b.as_nanos();
    Duration::new(
        (nanos / 1_000_000_000) as u64,
        (nanos % 1_000_000_000) as u32,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn ticker() -> Ticker {
        Ticker::new(vec![Frame::new("Chris", 1000), Frame::new("an Engineer", 1000)])
    }

    #[test]
    fn test_stopped_ticker_has_no_frame() {
        let mut t = ticker();
        assert_eq!(None, t.current());
        assert_eq!(None, t.advance(Duration::from_millis(1500)));
        assert!(!t.is_running());
    }

    #[test]
    fn test_cycles_and_repeats() {
        let mut t = ticker();
        t.start();
        assert_eq!(Some("Chris"), t.current());
        assert_eq!(Some("Chris"), t.advance(Duration::from_millis(999)));
        assert_eq!(Some("an Engineer"), t.advance(Duration::from_millis(1)));
        assert_eq!(Some("Chris"), t.advance(Duration::from_millis(1000)));
        // several whole cycles plus half a frame
        assert_eq!(Some("Chris"), t.advance(Duration::from_millis(6500)));
        assert_eq!(Some("an Engineer"), t.advance(Duration::from_millis(500)));
    }

    #[test]
    fn test_stop_then_start_restarts_from_first_frame() {
        let mut t = ticker();
        t.start();
        t.advance(Duration::from_millis(1200));
        assert_eq!(Some("an Engineer"), t.current());

        t.stop();
        assert_eq!(None, t.advance(Duration::from_millis(1000)));

        t.start();
        assert_eq!(Some("Chris"), t.current());
    }

    #[test]
    fn test_start_while_running_keeps_position() {
        let mut t = ticker();
        t.start();
        t.advance(Duration::from_millis(1500));
        t.start();
        assert_eq!(Some("an Engineer"), t.current());
    }

    #[test]
    fn test_huge_steps_do_not_overflow() {
        let mut t = ticker();
        t.start();
        assert_eq!(Some("an Engineer"), t.advance(Duration::MAX));
        assert_eq!(Some("an Engineer"), t.advance(Duration::MAX));

        let mut long = Ticker::new(vec![Frame::new("a", u64::MAX), Frame::new("b", u64::MAX)]);
        long.start();
        assert_eq!(Some("a"), long.advance(Duration::MAX));
        assert_eq!(Some("a"), long.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_empty_and_zero_length_sequences() {
        let mut empty = Ticker::new(Vec::new());
        empty.start();
        assert_eq!(None, empty.advance(Duration::from_millis(10)));

        let mut zero = Ticker::new(vec![Frame::new("a", 0), Frame::new("b", 0)]);
        zero.start();
        assert_eq!(Some("a"), zero.advance(Duration::from_millis(10)));
    }
}
