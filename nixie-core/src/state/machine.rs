//! Mode definition
//!
//! The firmware boots into [`Mode::Attract`] and stays there until a host
//! proves it is present by sending a valid update. From then on the host
//! owns the tubes until it explicitly hands them back.

use super::events::ModeEvent;

/// Display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// No host command received yet (or host resumed attract)
    #[default]
    Attract,
    /// Host is driving the tubes
    Active,
}

impl Mode {
    /// Check if the attract tick may touch the tubes
    pub fn attract_enabled(&self) -> bool {
        matches!(self, Mode::Attract)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: ModeEvent) -> Self {
        use Mode::*;
        use ModeEvent::*;

        match (self, event) {
            (Attract, CommandAccepted) => Active,
            (Active, ResumeRequested) => Attract,

            // Default: stay in current mode
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boots_in_attract() {
        assert_eq!(Mode::default(), Mode::Attract);
        assert!(Mode::default().attract_enabled());
    }

    #[test]
    fn test_command_activates() {
        let mode = Mode::Attract.transition(ModeEvent::CommandAccepted);
        assert_eq!(mode, Mode::Active);
        assert!(!mode.attract_enabled());
    }

    #[test]
    fn test_active_is_sticky() {
        let mode = Mode::Active.transition(ModeEvent::CommandAccepted);
        assert_eq!(mode, Mode::Active);
    }

    #[test]
    fn test_resume_returns_to_attract() {
        assert_eq!(
            Mode::Active.transition(ModeEvent::ResumeRequested),
            Mode::Attract
        );
        assert_eq!(
            Mode::Attract.transition(ModeEvent::ResumeRequested),
            Mode::Attract
        );
    }
}
