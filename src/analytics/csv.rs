//! CSV export for scanned responses.

use crate::models::ParticipantResponse;

/// Column header row for the response export.
const HEADER: &str = "\"Participant ID\",\"Session ID\",\"Card ID\",\"Element Type\",\
\"Scanned Value\",\"Confidence\",\"Processed At\"";

/// Renders responses as CSV, one row per element response.
///
/// All fields are double-quoted; embedded quotes are doubled. A response
/// with N element responses yields N rows; missing scanned values and
/// confidences become empty fields.
#[must_use]
pub fn responses_to_csv(responses: &[ParticipantResponse]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for response in responses {
        let processed_at = response
            .processed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        for element_response in &response.element_responses {
            let confidence = element_response
                .confidence
                .map(|c| c.to_string())
                .unwrap_or_default();
            let row = [
                response.participant_id.as_str(),
                response.session_id.as_str(),
                response.card_id.as_str(),
                element_response.element_type.as_str(),
                element_response.scanned_value.as_deref().unwrap_or(""),
                confidence.as_str(),
                processed_at.as_str(),
            ]
            .map(quote)
            .join(",");
            out.push_str(&row);
            out.push('\n');
        }
    }
    out
}

/// Quotes one CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
