use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, state::AppState};

pub const WALLET_ADDRESS_HEADER: &str = "X-Wallet-Address";

/// The caller's wallet address, asserted via the `X-Wallet-Address` header
/// set by the wallet-connection front-end. Possession of the address is
/// taken on faith; no signed challenge is verified.
#[derive(Debug, Clone)]
pub struct WalletAddress {
    pub address: String,
}

impl FromRequestParts<AppState> for WalletAddress {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(WALLET_ADDRESS_HEADER)
            .ok_or(ApiError::MissingWalletAddress)?
            .to_str()
            .map_err(|_| ApiError::MissingWalletAddress)?;

        let address = header.trim();
        if address.is_empty() {
            return Err(ApiError::MissingWalletAddress);
        }

        Ok(WalletAddress {
            address: address.to_lowercase(),
        })
    }
}
