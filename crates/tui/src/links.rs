use tracing::{debug, warn};

pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Hands URLs to the operating system's registered handler without waiting
/// for it. Failures are logged and otherwise ignored.
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) {
        match open::that_detached(url) {
            Ok(()) => debug!(url, "opened link"),
            Err(error) => warn!(url, %error, "failed to open link"),
        }
    }
}
