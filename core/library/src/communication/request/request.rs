use super::super::Subject;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Query or command which is answered by exactly one reply
///
/// Requests may have side effects (e.g. creating an entity). Since neither the request nor
/// the reply is acknowledged, a lost reply is indistinguishable from a lost request for the caller.
/// The requesting side never repeats a request on its own for this reason.
pub trait Request: Serialize + DeserializeOwned + PartialEq + Debug {
    /// Expected response type
    type Response: Serialize + DeserializeOwned + Debug + PartialEq;

    /// Subject on which this request is sent and served
    fn subject() -> Subject;
}
