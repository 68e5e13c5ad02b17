//! gRPC (tonic) request adapter.

use tonic::metadata::KeyAndValueRef;
use tonic::Request;

use crate::context::{CallContext, ConnectionDescriptor};
use crate::metadata::MetadataMap;

impl<T> CallContext for Request<T> {
    /// ASCII metadata entries only; `-bin` entries are skipped.
    fn incoming_metadata(&self) -> Option<MetadataMap> {
        let mut metadata = MetadataMap::new();
        for entry in self.metadata().iter() {
            if let KeyAndValueRef::Ascii(key, value) = entry {
                if let Ok(value) = value.to_str() {
                    metadata.append(key.as_str(), value);
                }
            }
        }
        Some(metadata)
    }

    fn peer(&self) -> Option<ConnectionDescriptor> {
        self.extensions()
            .get::<ConnectionDescriptor>()
            .cloned()
            .or_else(|| self.remote_addr().map(ConnectionDescriptor::from))
    }
}
