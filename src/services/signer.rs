//! HMAC-SHA256 signing of session ids carried in cookies.

use crate::error::{AppError, AppResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Signs ids as `id.hex(HMAC(secret, id))` and checks them back.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Arc<[u8]>,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret.as_bytes()),
        }
    }

    fn mac(&self, id: &str) -> AppResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init: {}", e)))?;
        mac.update(id.as_bytes());
        Ok(mac)
    }

    pub fn sign(&self, id: &str) -> AppResult<String> {
        let tag = self.mac(id)?.finalize().into_bytes();
        Ok(format!("{}.{}", id, hex::encode(tag)))
    }

    /// Returns the id when the signature holds. Comparison is constant-time.
    pub fn verify<'a>(&self, token: &'a str) -> AppResult<Option<&'a str>> {
        let Some((id, tag_hex)) = token.split_once('.') else {
            return Ok(None);
        };
        let Ok(tag) = hex::decode(tag_hex) else {
            return Ok(None);
        };
        if id.is_empty() || self.mac(id)?.verify_slice(&tag).is_err() {
            return Ok(None);
        }
        Ok(Some(id))
    }
}
