//! Wire types for the coach backend.
//!
//! The backend's response envelopes are not considered stable. Everything
//! here is normalized at the boundary, and parsers fail closed on any shape
//! the contract does not allow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::profile::UserProfile;

/// POST /ask request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<&'a UserProfile>,
}

/// Success payload of POST /ask — either a bare string or an envelope with a
/// `response` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AskPayload {
    Text(String),
    Envelope { response: String },
}

/// Normalize an /ask success body to its reply text.
///
/// Both accepted shapes collapse to the same output; any third shape (number,
/// array, envelope without a string `response`) is a malformed response.
pub fn ask_reply_text(body: serde_json::Value) -> Result<String, ApiError> {
    match serde_json::from_value::<AskPayload>(body) {
        Ok(AskPayload::Text(text)) | Ok(AskPayload::Envelope { response: text }) => Ok(text),
        Err(e) => Err(ApiError::MalformedResponse {
            endpoint: "/ask",
            detail: e.to_string(),
        }),
    }
}

// ── Extension endpoints ─────────────────────────────────────────────
// Backend routes with no session transition yet. Typed here so callers get
// the same normalization discipline as the core operations.

/// POST /meal-plan request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<&'a [String]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    #[serde(default)]
    pub meal_plan: Option<String>,
}

/// POST /workout request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest<'a> {
    pub user_info: &'a UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutResponse {
    #[serde(default)]
    pub workout: Option<String>,
}

/// POST /progress request body — one measurement check-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// POST /goal request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub goal_type: String,
    pub target: String,
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserProfile>,
}

/// POST /log-workout request body. This route takes snake_case keys, unlike
/// the rest of the API.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLog {
    pub date: NaiveDate,
    pub workout_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Acknowledgement body shared by /progress and /goal.
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /log-workout success body; `message` is required here.
#[derive(Debug, Deserialize)]
pub struct LogWorkoutResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ask_reply_from_bare_string() {
        let text = ask_reply_text(json!("Try a 20-minute walk today.")).unwrap();
        assert_eq!(text, "Try a 20-minute walk today.");
    }

    #[test]
    fn ask_reply_from_envelope() {
        let text = ask_reply_text(json!({"response": "Drink more water."})).unwrap();
        assert_eq!(text, "Drink more water.");
    }

    #[test]
    fn ask_reply_envelope_ignores_extra_fields() {
        let text =
            ask_reply_text(json!({"response": "ok", "success": true, "error": null})).unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn ask_reply_fails_closed_on_third_shapes() {
        for body in [
            json!(42),
            json!(["a", "b"]),
            json!({"reply": "wrong key"}),
            json!({"response": 42}),
            json!(null),
        ] {
            let err = ask_reply_text(body).unwrap_err();
            assert!(matches!(
                err,
                ApiError::MalformedResponse { endpoint: "/ask", .. }
            ));
        }
    }

    #[test]
    fn ask_request_omits_empty_user_info() {
        let request = AskRequest {
            prompt: "hello",
            user_info: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"prompt": "hello"})
        );
    }

    #[test]
    fn ask_request_wire_shape() {
        let profile = UserProfile {
            age: Some(29),
            fitness_level: Some(crate::profile::FitnessLevel::Beginner),
            ..Default::default()
        };
        let request = AskRequest {
            prompt: "What should I do today?",
            user_info: Some(&profile),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "prompt": "What should I do today?",
                "userInfo": {"age": 29, "fitnessLevel": "beginner"},
            })
        );
    }

    #[test]
    fn meal_plan_request_wire_shape() {
        let restrictions = vec!["vegetarian".to_string()];
        let request = MealPlanRequest {
            dietary_restrictions: Some(&restrictions),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"dietaryRestrictions": ["vegetarian"]})
        );

        let empty = MealPlanRequest {
            dietary_restrictions: None,
        };
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn progress_entry_wire_shape() {
        let entry = ProgressEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            weight: Some(72.5),
            body_fat: Some(18.2),
            chest: None,
            waist: None,
            notes: Some("steady week".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "date": "2025-03-14",
                "weight": 72.5,
                "bodyFat": 18.2,
                "notes": "steady week",
            })
        );
    }

    #[test]
    fn workout_log_keeps_snake_case() {
        let log = WorkoutLog {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            workout_type: "strength".to_string(),
            notes: None,
        };
        assert_eq!(
            serde_json::to_value(&log).unwrap(),
            json!({"date": "2025-03-14", "workout_type": "strength"})
        );
    }

    #[test]
    fn goal_request_wire_shape() {
        let goal = GoalRequest {
            goal_type: "weight_loss".to_string(),
            target: "5kg".to_string(),
            timeframe: "3 months".to_string(),
            user_info: None,
        };
        assert_eq!(
            serde_json::to_value(&goal).unwrap(),
            json!({
                "goalType": "weight_loss",
                "target": "5kg",
                "timeframe": "3 months",
            })
        );
    }

    #[test]
    fn ack_response_tolerates_missing_message() {
        let ack: AckResponse = serde_json::from_value(json!({})).unwrap();
        assert!(ack.message.is_none());

        let ack: AckResponse =
            serde_json::from_value(json!({"message": "logged"})).unwrap();
        assert_eq!(ack.message, Some("logged".to_string()));
    }

    #[test]
    fn log_workout_response_requires_message() {
        assert!(serde_json::from_value::<LogWorkoutResponse>(json!({})).is_err());
    }

    #[test]
    fn meal_plan_response_optional_field() {
        let r: MealPlanResponse = serde_json::from_value(json!({"mealPlan": "oats"})).unwrap();
        assert_eq!(r.meal_plan, Some("oats".to_string()));
        let r: MealPlanResponse = serde_json::from_value(json!({})).unwrap();
        assert!(r.meal_plan.is_none());
    }
}
