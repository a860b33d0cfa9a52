//! Trait seam between the driving core and whatever carries its messages.
//!
//! The core never performs transport I/O itself; it is driven through `Link`,
//! one inbound sensor frame and one outbound command per cycle.

pub trait Link {
    /// Receive the next inbound message, waiting at most `timeout`.
    fn recv(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Send one outbound message.
    fn send(&mut self, msg: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
