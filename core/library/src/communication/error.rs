use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Flattened, serializable view of an error and its chain of causes
///
/// When an error leaves the process (e.g. as the body of an HTTP error response) the
/// consumer can't know the concrete types involved. This structure walks the
/// [`source`](Error::source) chain once and retains the message of every link, outermost first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorTrace {
    causes: Vec<String>,
}

impl ErrorTrace {
    /// Captures the chain of any error type
    pub fn new<E: Error + 'static>(e: &E) -> Self {
        (e as &(dyn Error + 'static)).into()
    }

    /// Outermost message or a placeholder if the chain is empty
    pub fn message(&self) -> &str {
        self.causes
            .first()
            .map(String::as_str)
            .unwrap_or("unknown error")
    }

    /// Messages of all errors in the chain, outermost first
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Consumes the trace, returning the individual messages
    pub fn into_causes(self) -> Vec<String> {
        self.causes
    }
}

impl Error for ErrorTrace {}

impl Display for ErrorTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())?;

        for cause in self.causes.iter().skip(1) {
            write!(f, ": {}", cause)?;
        }

        Ok(())
    }
}

impl From<&(dyn Error + 'static)> for ErrorTrace {
    fn from(e: &(dyn Error + 'static)) -> Self {
        let mut source: Option<&(dyn Error + 'static)> = Some(e);
        let mut causes: Vec<String> = Vec::new();

        while let Some(error) = source {
            // Nested traces are spliced in instead of being printed as one blob
            match error.downcast_ref::<ErrorTrace>() {
                Some(trace) => causes.extend(trace.causes.iter().cloned()),
                None => causes.push(error.to_string()),
            }

            source = error.source();
        }

        Self { causes }
    }
}
