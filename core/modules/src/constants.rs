//! Default values shared between modules

/// Name under which the gateway connects to the message bus
pub const CONNECTION_NAME_GATEWAY: &str = "bookshelf-gateway";

/// Name under which the backend connects to the message bus
pub const CONNECTION_NAME_BACKEND: &str = "bookshelf-backend";
