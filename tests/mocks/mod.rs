mod mock_transport;

pub use mock_transport::{MockTransport, RecordedRequest};
