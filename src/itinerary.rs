//! AI itinerary-generation proxy
//!
//! Forwards a structured travel-preferences payload to the chat-completion
//! API under a fixed system prompt and hands the plan back. The only
//! branching here is parse-or-passthrough: a reply that will not parse as
//! JSON is returned raw, tagged as a parse error, rather than failing the
//! request.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::ai::{AiClient, strip_code_fences};

const SYSTEM_PROMPT: &str = "You are a travel planning assistant for trips in India. \
    Given the user's travel preferences as JSON, respond with a complete travel plan \
    as a single JSON object with the shape {\"destination\": string, \"days\": \
    [{\"day\": number, \"title\": string, \"activities\": [{\"time\": string, \
    \"description\": string, \"estimatedCost\": number}]}], \"totalBudget\": number, \
    \"travelTips\": [string]}. Respond with JSON only, no surrounding prose.";

/// Result of one itinerary request
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryOutcome {
    /// The model reply parsed as a travel plan
    Plan(Value),
    /// The reply did not parse; the caller gets the raw text back
    Unparsed { raw: String },
}

/// Generate a travel plan for the given preferences payload.
///
/// Upstream failures (network, non-2xx, empty reply) propagate as errors;
/// an unparseable reply does not.
#[instrument(skip(ai, preferences))]
pub async fn plan(ai: &AiClient, preferences: &Value) -> Result<ItineraryOutcome> {
    let user = serde_json::to_string(preferences)?;
    let reply = ai.complete(SYSTEM_PROMPT, &user).await?;

    let body = strip_code_fences(&reply);
    match serde_json::from_str::<Value>(body) {
        Ok(plan) => {
            debug!("Itinerary reply parsed");
            Ok(ItineraryOutcome::Plan(plan))
        }
        Err(err) => {
            warn!(error = %err, "Itinerary reply did not parse, returning raw text");
            Ok(ItineraryOutcome::Unparsed {
                raw: reply.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The upstream call is exercised in the API layer; here we pin the
    // parse-or-passthrough decision on the reply text itself.

    fn outcome_for(reply: &str) -> ItineraryOutcome {
        let body = strip_code_fences(reply);
        match serde_json::from_str::<Value>(body) {
            Ok(plan) => ItineraryOutcome::Plan(plan),
            Err(_) => ItineraryOutcome::Unparsed {
                raw: reply.to_string(),
            },
        }
    }

    #[test]
    fn test_plain_json_reply_parses() {
        let outcome = outcome_for("{\"destination\": \"Goa\", \"days\": []}");
        assert!(matches!(outcome, ItineraryOutcome::Plan(_)));
    }

    #[test]
    fn test_fenced_json_reply_parses() {
        let outcome = outcome_for("```json\n{\"destination\": \"Goa\"}\n```");
        let ItineraryOutcome::Plan(plan) = outcome else {
            panic!("expected a parsed plan");
        };
        assert_eq!(plan["destination"], "Goa");
    }

    #[test]
    fn test_prose_reply_passes_through_raw() {
        let reply = "I'd suggest spending three days in Goa...";
        let outcome = outcome_for(reply);
        assert_eq!(
            outcome,
            ItineraryOutcome::Unparsed {
                raw: reply.to_string()
            }
        );
    }
}
