use tracing::Dispatch;

/// Where the engine and the actions it builds send their diagnostics.
///
/// Each engine carries its own sink. The default discards everything; it is a
/// fresh value per instance, not a process-wide logger.
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    dispatch: Dispatch,
}

impl DiagnosticSink {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    pub fn discard() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Captures whichever dispatcher is active on the calling thread.
    pub fn current() -> Self {
        tracing::dispatcher::get_default(|dispatch| Self::new(dispatch.clone()))
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Runs `f` with this sink as the active dispatcher.
    pub fn emit<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::discard()
    }
}
