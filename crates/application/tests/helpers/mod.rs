mod event_capture;
mod mock_ports;

#[allow(unused_imports)]
pub use event_capture::*;
pub use mock_ports::*;
