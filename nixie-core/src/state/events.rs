//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// A display update command was accepted
    CommandAccepted,
    /// Host asked for the attract animation back
    ResumeRequested,
}
