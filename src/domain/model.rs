use serde::{Deserialize, Serialize};

/// A single vote notification as reported by a voting site.
///
/// Every field is non-empty by construction: `codec::parse` refuses to build a
/// `Vote` otherwise. `address` is the voter's IP as claimed in the payload, not
/// the TCP peer. `timestamp` is sender-supplied and never reparsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub service_name: String,
    pub username: String,
    pub address: String,
    pub timestamp: String,
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vote (from:{} username:{} address:{} timestamp:{})",
            self.service_name, self.username, self.address, self.timestamp
        )
    }
}
