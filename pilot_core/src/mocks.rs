//! Test and helper mocks for pilot_core

/// A link that always errors on recv; useful when exercising the decision
/// path directly through `Driver::drive`, or the runner's error mapping.
pub struct NoopLink;

impl pilot_traits::Link for NoopLink {
    fn recv(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop link")))
    }

    fn send(&mut self, _msg: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
