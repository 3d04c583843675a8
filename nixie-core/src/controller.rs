//! Controller tying the serial protocol to the tube chain
//!
//! The controller owns every piece of application state:
//! - Tube store and the transport driver that shows it
//! - Attract/active mode and the attract tick timer
//! - Line framer for the host link
//! - Random digit source for the attract animation
//!
//! It is driven entirely by the caller: bytes and timestamps go in, renders
//! and reply lines come out. Nothing in here blocks or allocates.

use nixie_protocol::{Command, LineError, LineFramer, ParseError, Reply, TubeUpdate};

use crate::attract::fill_attract_frame;
use crate::config::NixieConfig;
use crate::render::render_all;
use crate::state::{Mode, ModeEvent};
use crate::traits::{DigitSource, ReplySink, TubeDriver};
use crate::tube::{TubeState, TubeStore};

/// Outcome of one framed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Tube updated and chain re-rendered
    Updated(TubeUpdate),
    /// Attract mode re-enabled
    AttractResumed,
    /// Diagnostic probe answered
    Probed,
    /// Malformed `N` line, nothing changed
    Rejected(ParseError),
    /// Unrecognized line, dropped
    Ignored,
    /// Input line exceeded the buffer and was discarded
    Overflow,
}

/// Nixie chain controller
pub struct Controller<D, R> {
    config: NixieConfig,
    store: TubeStore,
    mode: Mode,
    framer: LineFramer,
    driver: D,
    rng: R,
    /// Time of the last attract frame (ms)
    last_attract_ms: u32,
}

impl<D: TubeDriver, R: DigitSource> Controller<D, R> {
    /// Create a controller; call [`Controller::boot`] before polling
    pub fn new(config: NixieConfig, driver: D, rng: R) -> Self {
        Self {
            config,
            store: TubeStore::new(),
            mode: Mode::default(),
            framer: LineFramer::with_idle_flush(config.framing.idle_flush_ms),
            driver,
            rng,
            last_attract_ms: 0,
        }
    }

    /// Show the first attract frame
    ///
    /// The chain is rendered twice so that modules which powered up with
    /// garbage in their latches settle on a known frame.
    pub fn boot(&mut self, now_ms: u32) {
        self.attract_frame(now_ms);
        render_all(&self.store, &mut self.driver);
    }

    /// Feed one received byte
    ///
    /// Returns the outcome when the byte completed a line.
    pub fn feed_byte<S: ReplySink>(
        &mut self,
        byte: u8,
        now_ms: u32,
        replies: &mut S,
    ) -> Option<Dispatch> {
        match self.framer.feed(byte, now_ms) {
            Ok(Some(line)) => Some(self.dispatch_line(line.as_bytes(), replies)),
            Ok(None) => None,
            Err(LineError::Overflow) => {
                replies.send_line(Reply::Overflow.text());
                Some(Dispatch::Overflow)
            }
        }
    }

    /// Parse a partial line once the host has gone quiet
    pub fn poll_idle<S: ReplySink>(&mut self, now_ms: u32, replies: &mut S) -> Option<Dispatch> {
        let line = self.framer.poll_idle(now_ms)?;
        Some(self.dispatch_line(line.as_bytes(), replies))
    }

    /// Advance the attract animation
    ///
    /// Returns true when a new frame was rendered.
    pub fn poll_attract(&mut self, now_ms: u32) -> bool {
        if !self.mode.attract_enabled() {
            return false;
        }
        if now_ms.wrapping_sub(self.last_attract_ms) < self.config.attract.interval_ms {
            return false;
        }
        self.attract_frame(now_ms);
        true
    }

    /// Parse and execute one complete line
    pub fn dispatch_line<S: ReplySink>(&mut self, line: &[u8], replies: &mut S) -> Dispatch {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, replies),
            Ok(None) => Dispatch::Ignored,
            Err(e) => {
                replies.send_line(Reply::ParseError.text());
                Dispatch::Rejected(e)
            }
        }
    }

    /// Execute an already-validated command
    pub fn execute<S: ReplySink>(&mut self, command: Command, replies: &mut S) -> Dispatch {
        match command {
            Command::Update(update) => {
                self.apply_update(&update);
                Dispatch::Updated(update)
            }
            Command::ResumeAttract => {
                self.mode = self.mode.transition(ModeEvent::ResumeRequested);
                replies.send_line(Reply::AttractResumed.text());
                Dispatch::AttractResumed
            }
            Command::Probe => {
                replies.send_line(Reply::Probe.text());
                Dispatch::Probed
            }
        }
    }

    fn apply_update(&mut self, update: &TubeUpdate) {
        self.mode = self.mode.transition(ModeEvent::CommandAccepted);
        self.driver.set_brightness(update.dim);
        self.store
            .set(update.index as usize, TubeState::from(update));
        render_all(&self.store, &mut self.driver);
    }

    fn attract_frame(&mut self, now_ms: u32) {
        self.last_attract_ms = now_ms;
        fill_attract_frame(&mut self.store, &mut self.rng, &self.config.attract);
        self.driver.set_brightness(self.config.attract.brightness);
        render_all(&self.store, &mut self.driver);
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current tube states
    pub fn store(&self) -> &TubeStore {
        &self.store
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::traits::TubeOutput;
    use crate::tube::{Digit, TUBE_COUNT};
    use std::string::String;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockDriver {
        frame: [Option<TubeOutput>; TUBE_COUNT],
        brightness: Option<u8>,
        commits: u32,
    }

    impl TubeDriver for MockDriver {
        fn set_tube(&mut self, index: u8, output: TubeOutput) {
            self.frame[index as usize] = Some(output);
        }

        fn set_brightness(&mut self, dim: u8) {
            self.brightness = Some(dim);
        }

        fn commit(&mut self) {
            self.commits += 1;
        }
    }

    #[derive(Default)]
    struct MockReplies {
        lines: Vec<String>,
    }

    impl ReplySink for MockReplies {
        fn send_line(&mut self, text: &str) {
            self.lines.push(String::from(text));
        }
    }

    /// Cycles 0..=9 so attract frames are predictable
    struct Counter(u8);

    impl DigitSource for Counter {
        fn next_digit(&mut self) -> u8 {
            let d = self.0;
            self.0 = (self.0 + 1) % 10;
            d
        }
    }

    fn booted() -> Controller<MockDriver, Counter> {
        let mut c = Controller::new(NixieConfig::default(), MockDriver::default(), Counter(0));
        c.boot(0);
        c
    }

    fn send(c: &mut Controller<MockDriver, Counter>, text: &[u8], now_ms: u32) -> (Vec<Dispatch>, MockReplies) {
        let mut replies = MockReplies::default();
        let mut out = Vec::new();
        for &b in text {
            if let Some(d) = c.feed_byte(b, now_ms, &mut replies) {
                out.push(d);
            }
        }
        (out, replies)
    }

    #[test]
    fn test_boot_renders_attract_twice() {
        let c = booted();
        assert_eq!(c.mode(), Mode::Attract);
        assert_eq!(c.driver().commits, 2);
        assert_eq!(c.driver().brightness, Some(0));
        for tube in c.store().iter() {
            assert!(tube.lit);
            assert_eq!(tube.color, Rgb::new(255, 0, 0));
        }
        assert!(c.driver().frame.iter().all(|o| o.is_some()));
    }

    #[test]
    fn test_update_sets_tube_and_activates() {
        let mut c = booted();
        let commits = c.driver().commits;
        let (out, replies) = send(&mut c, b"N,2,5,255,0,0,0\n", 1000);

        assert!(matches!(out.as_slice(), [Dispatch::Updated(_)]));
        assert!(replies.lines.is_empty());
        assert_eq!(c.mode(), Mode::Active);

        let tube = c.store().get(2).copied().unwrap();
        assert_eq!(tube.digit, Digit::Value(5));
        assert!(tube.lit);
        assert_eq!(tube.color, Rgb::new(255, 0, 0));
        assert_eq!(tube.brightness, 0);
        assert_eq!(c.driver().commits, commits + 1);
    }

    #[test]
    fn test_dim_overrides_global_brightness() {
        let mut c = booted();
        send(&mut c, b"N,0,1,0,0,255,40\n", 1000);
        assert_eq!(c.driver().brightness, Some(40));
        assert_eq!(c.store().get(0).unwrap().brightness, 40);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mut c = booted();
        let before = *c.store();
        let commits = c.driver().commits;
        let (out, replies) = send(&mut c, b"N,9,5,255,0,0,0\n", 1000);

        assert_eq!(out, [Dispatch::Rejected(ParseError::IndexOutOfRange)]);
        assert_eq!(replies.lines, ["ERR parse N line"]);
        assert_eq!(*c.store(), before);
        assert_eq!(c.mode(), Mode::Attract);
        assert_eq!(c.driver().commits, commits);
    }

    /// `lit` is derived from the digit being 0-9, so a blank update clears
    /// the anode too. Either way no cathode is selected and the tube shows
    /// nothing.
    #[test]
    fn test_out_of_range_digit_blanks_tube() {
        let mut c = booted();
        let (out, replies) = send(&mut c, b"N,0,15,10,10,10,0\r\n", 1000);

        assert!(matches!(out.as_slice(), [Dispatch::Updated(_)]));
        assert!(replies.lines.is_empty());
        let tube = c.store().get(0).copied().unwrap();
        assert_eq!(tube.digit, Digit::Blank);
        assert!(!tube.lit);
        assert_eq!(c.driver().frame[0].unwrap().digit, None);
    }

    #[test]
    fn test_oversized_numbers_update_instead_of_rejecting() {
        let mut c = booted();
        let (out, replies) = send(&mut c, b"N,3,99999999999,99999999999,0,0,99999999999\n", 1000);

        assert!(matches!(out.as_slice(), [Dispatch::Updated(_)]));
        assert!(replies.lines.is_empty());
        let tube = c.store().get(3).copied().unwrap();
        assert_eq!(tube.digit, Digit::Blank);
        assert_eq!(tube.color, Rgb::new(255, 0, 0));
        assert_eq!(c.mode(), Mode::Active);
    }

    #[test]
    fn test_resume_then_next_tick_rewrites_all_tubes() {
        let mut c = booted();
        send(&mut c, b"N,0,3,0,255,0,0\n", 1000);
        assert!(!c.poll_attract(1100));

        let (out, replies) = send(&mut c, b"A\n", 1200);
        assert_eq!(out, [Dispatch::AttractResumed]);
        assert_eq!(replies.lines, ["OK attract"]);
        assert_eq!(c.mode(), Mode::Attract);

        assert!(c.poll_attract(1200));
        for tube in c.store().iter() {
            assert!(tube.lit);
            assert_eq!(tube.color, Rgb::new(255, 0, 0));
        }
    }

    #[test]
    fn test_attract_tick_interval() {
        let mut c = booted();
        assert!(!c.poll_attract(49));
        assert!(c.poll_attract(50));
        assert!(!c.poll_attract(60));
        assert!(c.poll_attract(100));
    }

    #[test]
    fn test_attract_tick_survives_timer_wrap() {
        let mut c = Controller::new(NixieConfig::default(), MockDriver::default(), Counter(0));
        c.boot(u32::MAX - 10);
        assert!(!c.poll_attract(u32::MAX));
        assert!(c.poll_attract(39));
    }

    #[test]
    fn test_diagnostic_query_replies_without_mutation() {
        let mut c = booted();
        let before = *c.store();
        let commits = c.driver().commits;
        let (out, replies) = send(&mut c, b"42\n", 1000);

        assert_eq!(out, [Dispatch::Probed]);
        assert_eq!(
            replies.lines,
            ["The answer to life, the universe and everything."]
        );
        assert_eq!(*c.store(), before);
        assert_eq!(c.mode(), Mode::Attract);
        assert_eq!(c.driver().commits, commits);
    }

    #[test]
    fn test_overflow_reported_then_parsing_resumes() {
        let mut c = booted();
        let long = [b'x'; 200];
        let (out, replies) = send(&mut c, &long, 1000);
        assert_eq!(out.first(), Some(&Dispatch::Overflow));
        assert_eq!(replies.lines.first().map(String::as_str), Some("ERR line overflow"));

        // Flush the tail of the oversized line before the real command
        send(&mut c, b"\n", 1000);
        let (out, _) = send(&mut c, b"N,1,7,0,0,255,0\n", 1000);
        assert!(matches!(out.as_slice(), [Dispatch::Updated(_)]));
        assert_eq!(c.store().get(1).unwrap().digit, Digit::Value(7));
    }

    #[test]
    fn test_idle_flush_parses_partial_line() {
        let mut c = booted();
        let mut replies = MockReplies::default();
        let (out, _) = send(&mut c, b"N,4,2,0,0,255,0", 1000);
        assert!(out.is_empty());

        assert_eq!(c.poll_idle(1029, &mut replies), None);
        assert!(matches!(
            c.poll_idle(1030, &mut replies),
            Some(Dispatch::Updated(_))
        ));
        assert_eq!(c.store().get(4).unwrap().digit, Digit::Value(2));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut c = booted();
        send(&mut c, b"N,3,8,0,255,255,12\n", 1000);
        let once = *c.store();
        send(&mut c, b"N,3,8,0,255,255,12\n", 1001);
        assert_eq!(*c.store(), once);
    }

    #[test]
    fn test_unrecognized_lines_are_silent() {
        let mut c = booted();
        let before = *c.store();
        let (out, replies) = send(&mut c, b"hello\nX,1,2\n\xff\xfe\n", 1000);

        assert_eq!(out, [Dispatch::Ignored, Dispatch::Ignored, Dispatch::Ignored]);
        assert!(replies.lines.is_empty());
        assert_eq!(*c.store(), before);
    }

    #[test]
    fn test_malformed_update_rejected() {
        let mut c = booted();
        let (out, replies) = send(&mut c, b"N,1,2,3\nN;1,2,3,4,5,6\n", 1000);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|d| matches!(d, Dispatch::Rejected(_))));
        assert_eq!(replies.lines.len(), 2);
        assert_eq!(c.mode(), Mode::Attract);
    }
}
