use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content hash of one serialized working-set state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVersion(String);

impl StateVersion {
    pub fn from_serialized(data: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        StateVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
