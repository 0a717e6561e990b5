use crate::item::Content;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Listener '{listener}' failed: {reason}")]
    Listener { listener: String, reason: String },
}

pub type ContentResult<T> = Result<T, ContentError>;

/// Callback fired once per item after the build has initialised it.
pub trait ContentListener {
    fn name(&self) -> &str;

    fn on_content_initialized(&self, content: &mut dyn Content) -> ContentResult<()>;
}

/// Ordered set of listeners for the content-initialised event
pub struct Signals {
    listeners: Vec<Box<dyn ContentListener>>,
}

impl Signals {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn connect(&mut self, listener: Box<dyn ContentListener>) {
        debug!("Connecting content listener '{}'", listener.name());
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_names(&self) -> Vec<&str> {
        self.listeners.iter().map(|l| l.name()).collect()
    }

    /// Runs every listener in registration order, stopping at the first error.
    pub fn content_initialized(&self, content: &mut dyn Content) -> ContentResult<()> {
        for listener in &self.listeners {
            listener.on_content_initialized(content)?;
        }
        Ok(())
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}
