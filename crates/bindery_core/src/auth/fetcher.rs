use crate::auth::VerificationKey;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::time::Duration;

pub type KeyFetchResult = Result<VerificationKey, KeyFetchError>;

#[derive(Debug)]
pub enum KeyFetchError {
    /// The account service could not be reached or answered non-2xx.
    Transport(String),
    /// The response arrived but did not contain a decodable key.
    MalformedResponse(String),
}

impl fmt::Display for KeyFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFetchError::Transport(detail) => {
                write!(f, "key endpoint unreachable: {detail}")
            }
            KeyFetchError::MalformedResponse(detail) => {
                write!(f, "key endpoint response malformed: {detail}")
            }
        }
    }
}

impl Error for KeyFetchError {}

/// Source of the token-verification key. The production implementation
/// talks HTTP; tests substitute in-memory fetchers.
pub trait KeyFetcher: Send + Sync {
    fn fetch(&self) -> KeyFetchResult;
}

#[derive(Deserialize)]
struct KeyResponse {
    #[serde(rename = "publicKey")]
    public_key: String,
}

/// Fetches the key from `<base_url>/publicKey` over HTTP.
pub struct HttpKeyFetcher {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpKeyFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let endpoint = format!("{}/publicKey", base_url.trim_end_matches('/'));
        Self { agent, endpoint }
    }
}

impl KeyFetcher for HttpKeyFetcher {
    fn fetch(&self) -> KeyFetchResult {
        let response = self
            .agent
            .get(&self.endpoint)
            .call()
            .map_err(|err| KeyFetchError::Transport(err.to_string()))?;
        let body = response
            .into_string()
            .map_err(|err| KeyFetchError::Transport(err.to_string()))?;
        parse_key_response(&body)
    }
}

/// Decodes the JSON envelope and the base64 key inside it.
pub(crate) fn parse_key_response(body: &str) -> KeyFetchResult {
    let envelope: KeyResponse = serde_json::from_str(body)
        .map_err(|err| KeyFetchError::MalformedResponse(err.to_string()))?;
    let compact: String = envelope
        .public_key
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| KeyFetchError::MalformedResponse(err.to_string()))?;
    if bytes.is_empty() {
        return Err(KeyFetchError::MalformedResponse(
            "decoded key is empty".to_string(),
        ));
    }
    Ok(VerificationKey(bytes))
}
