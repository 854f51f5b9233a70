//! Client for the remote credential-issuing API.
//!
//! The vault engine treats this as a black box: `create_key` mints a
//! new API key under the provisioning secret, `revoke_key` kills one by
//! its opaque id.  Whatever value and id the service returns are stored
//! verbatim in the vault.
//!
//! Set `APIVAULT_DEBUG=1` to trace requests and responses on stderr.

use serde::Deserialize;
use serde_json::json;
use ureq::Agent;

use crate::errors::{ApiVaultError, Result};

/// A freshly minted API key as returned by the provisioning service.
pub struct ProvisionedKey {
    /// The secret key value.
    pub key: String,
    /// Opaque identifier used later to revoke the key.
    pub hash: String,
}

#[derive(Deserialize)]
struct CreateKeyResponse {
    #[serde(default)]
    key: Option<String>,
    data: CreateKeyData,
}

#[derive(Deserialize)]
struct CreateKeyData {
    hash: String,
    // Some deployments return the key inside `data` instead of top-level.
    #[serde(default)]
    key: Option<String>,
}

/// Blocking HTTP client for the provisioning endpoint.
pub struct ProvisioningClient {
    agent: Agent,
    base_url: String,
    provisioning_key: String,
    debug: bool,
}

impl ProvisioningClient {
    /// Create a client for `base_url`, authenticating with the
    /// provisioning secret as a bearer token.
    pub fn new(base_url: &str, provisioning_key: &str) -> Self {
        // Non-2xx responses are handled manually so the error message
        // can include the response body.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        let debug = std::env::var("APIVAULT_DEBUG")
            .map(|v| {
                let v = v.to_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(false);

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            provisioning_key: provisioning_key.to_string(),
            debug,
        }
    }

    /// Mint a new API key named `name`.
    pub fn create_key(&self, name: &str) -> Result<ProvisionedKey> {
        let url = format!("{}/keys", self.base_url);
        let payload = json!({ "name": name });

        if self.debug {
            eprintln!("DEBUG: POST {url}");
            eprintln!("DEBUG: request body: {payload}");
        }

        let mut resp = self
            .agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.provisioning_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| ApiVaultError::Api(format!("create key request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiVaultError::Api(format!("failed to read response: {e}")))?;

        if self.debug {
            eprintln!("DEBUG: response status: {status}");
            eprintln!("DEBUG: response body: {body}");
        }

        if status != 200 && status != 201 {
            return Err(ApiVaultError::Api(format!("create key ({status}): {body}")));
        }

        let parsed: CreateKeyResponse = serde_json::from_str(&body)
            .map_err(|e| ApiVaultError::Api(format!("failed to parse response: {e}")))?;

        let key = parsed
            .key
            .or(parsed.data.key)
            .ok_or_else(|| ApiVaultError::Api("response contained no key".into()))?;

        Ok(ProvisionedKey {
            key,
            hash: parsed.data.hash,
        })
    }

    /// Revoke the API key identified by `key_id`.
    pub fn revoke_key(&self, key_id: &str) -> Result<()> {
        let url = format!("{}/keys/{key_id}", self.base_url);

        if self.debug {
            eprintln!("DEBUG: DELETE {url}");
        }

        let mut resp = self
            .agent
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.provisioning_key))
            .call()
            .map_err(|e| ApiVaultError::Api(format!("revoke key request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiVaultError::Api(format!("failed to read response: {e}")))?;

        if self.debug {
            eprintln!("DEBUG: response status: {status}");
            eprintln!("DEBUG: response body: {body}");
        }

        if status != 200 && status != 204 {
            return Err(ApiVaultError::Api(format!("revoke key ({status}): {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ProvisioningClient::new("https://example.test/api/v1/", "pk");
        assert_eq!(client.base_url, "https://example.test/api/v1");
    }

    #[test]
    fn create_key_response_key_can_live_at_top_level_or_in_data() {
        let top: CreateKeyResponse =
            serde_json::from_str(r#"{"key":"sk-abc","data":{"hash":"h1"}}"#).unwrap();
        assert_eq!(top.key.as_deref(), Some("sk-abc"));
        assert_eq!(top.data.hash, "h1");

        let nested: CreateKeyResponse =
            serde_json::from_str(r#"{"data":{"hash":"h2","key":"sk-def"}}"#).unwrap();
        assert!(nested.key.is_none());
        assert_eq!(nested.data.key.as_deref(), Some("sk-def"));
    }
}
