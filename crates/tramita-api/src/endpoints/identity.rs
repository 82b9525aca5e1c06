// Identity endpoint

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Identity;

impl ApiClient {
    /// Resolve the identity and role behind the current bearer token.
    ///
    /// This is the authorization decision for the whole session: the
    /// session layer treats any failure here -- 401/403 or transport --
    /// as an authentication failure, never as a data failure.
    pub async fn me(&self) -> Result<Identity, Error> {
        self.get_json("/me", &[]).await
    }
}
