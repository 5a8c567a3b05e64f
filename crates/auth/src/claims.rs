//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by a Teamline access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
