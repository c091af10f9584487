// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Destination suggestions and holiday plans generated by the LLM.
//!
//! The model is asked for a JSON object of a fixed shape. Its reply is not
//! checked against that shape: fenced code blocks are unwrapped, and the
//! text is returned as JSON when it parses or as a plain string when not.

use crate::error::AppError;
use crate::models::{PlanRequest, SuggestionRequest};
use crate::services::InferenceClient;
use crate::time_utils::format_ymd;
use chrono::Utc;
use serde_json::Value;
use validator::Validate;

/// Prompt asking for destinations reachable from `request.location`.
pub fn render_suggestion_prompt(request: &SuggestionRequest, date: &str) -> String {
    let SuggestionRequest {
        location,
        budget,
        people,
        days,
        group_type,
    } = request;

    format!(
        r#"
You are a travel assistant specializing in budget-conscious travel recommendations. Based on the user's location ({location}), STRICT budget (${budget}), number of people ({people}), group type ({group_type}), number of days ({days}), and starting date ({date}), suggest destinations that are specifically tailored to these parameters.

BUDGET CONSTRAINTS ARE CRITICAL:
- Only suggest destinations that are realistic to visit with ${budget} for {people} people for {days} days
- Consider flight/transportation costs from {location} to each suggested destination
- Factor in typical accommodation costs for {people} people
- Account for food, local transportation, and activity costs

TAILOR THE SUGGESTIONS TO:
- Group type: {group_type} (suggest destinations with appropriate activities)
- Travel period: {days} days (recommend destinations with enough attractions to fill this timeframe)
- Starting point: {location} (consider travel time and costs from this location)
- Number of travelers: {people} (suggest accommodations and activities suitable for this group size)

Return ONLY a valid JSON object with this exact structure and field names:

{{
  "suggested_destinations": [
    {{
      "destination": "",
      "reason": "",
      "estimated_total_cost": 0,
      "cost_breakdown": {{
        "flights_or_transportation": 0,
        "accommodation": 0,
        "food": 0,
        "activities": 0,
        "other": 0
      }}
    }}
  ],
  "itinerary_for_top_choice": [
    {{"day": 1, "activities": [""], "notes": ""}}
  ],
  "local_customs": [""],
  "packing_tips": [""],
  "budget_considerations": [""]
}}

IMPORTANT: Only include destinations where the total estimated cost is at or below the user's budget of ${budget}. Be realistic about costs based on current prices.
Do not include any explanation, markdown formatting, or code blocks. Return only the valid JSON object.
"#
    )
}

/// Prompt asking for a day-by-day plan in `request.destination`.
pub fn render_plan_prompt(request: &PlanRequest, date: &str) -> String {
    let PlanRequest {
        destination,
        budget,
        people,
        days,
        group_type,
    } = request;

    format!(
        r#"
You are a travel assistant that specializes in creating realistic and budget-conscious travel plans. Generate a detailed {days}-day travel plan for {people} people ({group_type}) visiting {destination} with a STRICT total budget of {budget} dollars, starting on {date}.

IMPORTANT BUDGET CONSTRAINTS:
- The total cost MUST NOT exceed {budget} dollars for all {people} people
- Allocate budget appropriately across accommodations, food, activities, and transportation
- Choose accommodations, activities, and dining options that are realistic for the {budget} dollar budget
- Consider local cost of living in {destination} when making recommendations

TAILOR THE PLAN TO THE USER'S SPECIFIC NEEDS:
- Group type: {group_type} (adjust activities to be appropriate for this group type)
- Number of people: {people} (consider group discounts or family packages if applicable)
- Length of stay: {days} days (pace the itinerary appropriately)
- Budget: ${budget} (very important - all suggestions must be affordable within this budget)

Return ONLY a valid JSON object with this exact structure and field names. Do NOT include any example values, explanations, or extra text.

{{
  "itinerary": [
    {{"day": 1, "activities": [""], "notes": "", "approximate_cost": 0}},
    {{"day": 2, "activities": [""], "notes": "", "approximate_cost": 0}}
  ],
  "accommodation_suggestions": [
    {{"name": "", "price_per_night": 0, "total_cost": 0}}
  ],
  "local_customs": [""],
  "packing_tips": [""],
  "budget_breakdown": {{
    "accommodation": 0,
    "food": 0,
    "activities": 0,
    "transportation": 0,
    "other": 0,
    "total": 0
  }}
}}

IMPORTANT: The sum of all costs in the budget_breakdown MUST equal or be less than {budget}. Each suggested activity, hotel, and restaurant must be realistically priced for {destination}.
Do not include any explanation, markdown formatting, or code blocks. Return only the valid JSON object.
"#
    )
}

/// Unwrap the first fenced block, preferring one tagged `json`.
///
/// Text without fences is returned unchanged. An unterminated fence keeps
/// everything after the opening marker.
pub fn strip_code_fences(reply: &str) -> &str {
    if let Some((_, rest)) = reply.split_once("```json") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    if let Some((_, rest)) = reply.split_once("```") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    reply
}

/// Turn a raw model reply into the response payload.
pub fn into_payload(reply: &str) -> Value {
    let text = strip_code_fences(reply);
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(length = text.len(), "Model reply is not JSON, returning as text");
            Value::String(text.to_string())
        }
    }
}

/// Gateway between planning requests and the inference endpoint.
#[derive(Clone)]
pub struct PlannerService {
    llm: InferenceClient,
}

impl PlannerService {
    pub fn new(llm: InferenceClient) -> Self {
        Self { llm }
    }

    pub async fn suggest(&self, request: &SuggestionRequest) -> Result<Value, AppError> {
        request.validate()?;
        let prompt = render_suggestion_prompt(request, &format_ymd(Utc::now()));

        tracing::info!(
            location = %request.location,
            days = request.days,
            group_type = %request.group_type,
            "Requesting destination suggestions"
        );
        let reply = self.llm.complete(&prompt).await?;
        Ok(into_payload(&reply))
    }

    pub async fn plan(&self, request: &PlanRequest) -> Result<Value, AppError> {
        request.validate()?;
        let prompt = render_plan_prompt(request, &format_ymd(Utc::now()));

        tracing::info!(
            destination = %request.destination,
            days = request.days,
            group_type = %request.group_type,
            "Requesting holiday plan"
        );
        let reply = self.llm.complete(&prompt).await?;
        Ok(into_payload(&reply))
    }
}
