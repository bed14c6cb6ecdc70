use serde::{Deserialize, Serialize};

/// Text produced by one completion call, after stop-marker and budget policy.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawCompletion {
    pub text: String,
    pub truncated: bool,
}
