use rand::RngCore;

use booking_app::AppState;

#[derive(Clone)]
pub struct HttpState {
    pub state: AppState,
    pub feed_token: String,
}

impl HttpState {
    pub fn new(state: AppState, feed_token: String) -> Self {
        Self { state, feed_token }
    }
}

/// Token the pricing provider and sync triggers must present in the
/// `x-feed-token` header.
pub fn generate_feed_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
