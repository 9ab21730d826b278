//! QR payload encoding and parsing.
//!
//! Printed cards carry a QR code whose URL points a scanner back at the
//! owning session. The payload travels as a percent-encoded JSON object in
//! the `data` query parameter. Real QR detection lives outside the core; an
//! external detector hands these strings in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::clock::Clock;

/// A decoded QR payload.
///
/// Strings that are not workshop-card URLs decode as [`QrPayload::External`]
/// carrying the raw text; parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QrPayload {
    /// A card printed by this application
    #[serde(rename_all = "camelCase")]
    WorkshopCard {
        /// Owning session
        session_id: String,
        /// Scanned card
        card_id: String,
        /// Specific element, when the code targets one
        #[serde(skip_serializing_if = "Option::is_none")]
        element_id: Option<String>,
        /// Encoding time in milliseconds since the Unix epoch
        timestamp: i64,
    },
    /// Any other QR content, passed through verbatim
    External {
        /// Raw scanned string
        data: String,
    },
}

/// Builds the URL to encode into a card's QR code.
///
/// The payload lands in the `data` query parameter as percent-encoded JSON:
/// `{base}/scan?data=%7B...%7D`.
///
/// # Errors
///
/// Fails when `base_url` is not a valid absolute URL.
pub fn encode_payload(
    base_url: &str,
    session_id: &str,
    card_id: &str,
    element_id: Option<&str>,
    clock: &dyn Clock,
) -> Result<String> {
    let payload = QrPayload::WorkshopCard {
        session_id: session_id.to_string(),
        card_id: card_id.to_string(),
        element_id: element_id.map(ToString::to_string),
        timestamp: clock.now().timestamp_millis(),
    };
    let json = serde_json::to_string(&payload)?;

    let mut url = Url::parse(&format!("{}/scan", base_url.trim_end_matches('/')))
        .with_context(|| format!("Invalid base URL '{base_url}'"))?;
    url.query_pairs_mut().append_pair("data", &json);
    Ok(url.to_string())
}

/// Decodes a scanned string into a [`QrPayload`].
///
/// Anything that is not a URL carrying valid workshop-card JSON in its
/// `data` parameter comes back as [`QrPayload::External`] with the raw
/// string, never as an error.
#[must_use]
pub fn parse_payload(scanned: &str) -> QrPayload {
    let external = || QrPayload::External {
        data: scanned.to_string(),
    };

    let Ok(url) = Url::parse(scanned) else {
        return external();
    };
    let Some((_, data)) = url.query_pairs().find(|(key, _)| key == "data") else {
        return external();
    };
    serde_json::from_str(&data).unwrap_or_else(|_| external())
}
