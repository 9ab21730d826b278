//! Summary statistics over a session's scanned responses.
//!
//! The aggregator is a pure reduction: it owns no state, recomputes every
//! field on each call, and never fails. An empty input yields the
//! zero-valued summary.

pub mod csv;

pub use csv::responses_to_csv;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::ParticipantResponse;

/// How many of the most frequent words the summary reports.
const COMMON_WORD_LIMIT: usize = 10;

/// Words this short carry no signal and are dropped from the tally.
const MIN_WORD_LEN: usize = 4;

/// Count of element responses for one element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// Element type as reported by the detector
    pub element_type: String,
    /// Number of element responses of that type
    pub count: usize,
}

/// One word and how often it appeared across the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Lowercased word
    pub word: String,
    /// Occurrences across all scanned values
    pub count: usize,
}

/// Responses processed on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineBucket {
    /// Calendar date of `processed_at`
    pub date: NaiveDate,
    /// Responses processed that day
    pub count: usize,
}

/// Summary statistics for a session's responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Number of responses
    pub total_responses: usize,
    /// Number of distinct participant ids
    pub unique_participants: usize,
    /// Mean of all present confidence values, 0 when none are present
    pub average_confidence: f64,
    /// Element-response counts per type, in first-seen order
    pub responses_by_element_type: Vec<TypeCount>,
    /// Top words by frequency, ties in first-seen order
    pub common_words: Vec<WordCount>,
    /// Responses bucketed by processing date, ascending
    pub response_timeline: Vec<TimelineBucket>,
}

/// Reduces a session's responses into an [`AnalyticsSummary`].
#[must_use]
pub fn summarize(responses: &[ParticipantResponse]) -> AnalyticsSummary {
    let mut participants: Vec<&str> = Vec::new();
    let mut type_counts: Vec<TypeCount> = Vec::new();
    let mut confidence_sum = 0.0;
    let mut confidence_count = 0usize;
    let mut word_counts: Vec<WordCount> = Vec::new();
    let mut word_index: HashMap<String, usize> = HashMap::new();
    let mut timeline: HashMap<NaiveDate, usize> = HashMap::new();

    // precompiled scrub for punctuation; \w covers alphanumerics plus '_'
    let scrub = Regex::new(r"[^\w\s]").expect("static regex");

    for response in responses {
        if !participants.contains(&response.participant_id.as_str()) {
            participants.push(&response.participant_id);
        }

        if let Some(processed_at) = response.processed_at {
            *timeline.entry(processed_at.date_naive()).or_insert(0) += 1;
        }

        for element_response in &response.element_responses {
            match type_counts
                .iter_mut()
                .find(|tc| tc.element_type == element_response.element_type)
            {
                Some(entry) => entry.count += 1,
                None => type_counts.push(TypeCount {
                    element_type: element_response.element_type.clone(),
                    count: 1,
                }),
            }

            if let Some(confidence) = element_response.confidence {
                confidence_sum += confidence;
                confidence_count += 1;
            }

            if let Some(scanned) = &element_response.scanned_value {
                let lowered = scanned.to_lowercase();
                let cleaned = scrub.replace_all(&lowered, "");
                for word in cleaned.split_whitespace() {
                    if word.len() < MIN_WORD_LEN {
                        continue;
                    }
                    match word_index.get(word) {
                        Some(&i) => word_counts[i].count += 1,
                        None => {
                            word_index.insert(word.to_string(), word_counts.len());
                            word_counts.push(WordCount {
                                word: word.to_string(),
                                count: 1,
                            });
                        }
                    }
                }
            }
        }
    }

    // Stable sort keeps first-seen order across equal counts.
    word_counts.sort_by(|a, b| b.count.cmp(&a.count));
    word_counts.truncate(COMMON_WORD_LIMIT);

    let mut response_timeline: Vec<TimelineBucket> = timeline
        .into_iter()
        .map(|(date, count)| TimelineBucket { date, count })
        .collect();
    response_timeline.sort_by_key(|bucket| bucket.date);

    let average_confidence = if confidence_count > 0 {
        confidence_sum / confidence_count as f64
    } else {
        0.0
    };

    AnalyticsSummary {
        total_responses: responses.len(),
        unique_participants: participants.len(),
        average_confidence,
        responses_by_element_type: type_counts,
        common_words: word_counts,
        response_timeline,
    }
}
