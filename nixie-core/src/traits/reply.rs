//! Reply channel back to the host

/// Line-oriented reply output
///
/// The sink adds the line terminator. Delivery is best effort: a host that
/// is not listening simply misses the reply.
pub trait ReplySink {
    /// Send one reply line (without terminator)
    fn send_line(&mut self, text: &str);
}
