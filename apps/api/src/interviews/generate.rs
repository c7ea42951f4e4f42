//! Interview generation — turns a job description payload into a stored question set.
//!
//! Flow: unwrap envelope → validate → model call → parse questions → persist.
//! Every phase is a possible exit; nothing is retried and nothing is rolled back.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::errors::StoreError;
use crate::interviews::prompts::build_questions_prompt;
use crate::interviews::store::InterviewStore;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::models::interview::{iso_timestamp, Interview, NewInterview, ANONYMOUS_USER};
use crate::presentation::covers::random_interview_cover;

/// Step marker reported when the model call fails.
pub const STEP_GENERATE_TEXT: &str = "generateText";
/// Step marker reported when the store write fails.
pub const STEP_STORE_ADD: &str = "firestoreAdd";

/// Question count requested when the payload does not name one.
const DEFAULT_QUESTION_AMOUNT: &str = "5";

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Which required fields were absent. Serialized as `missingParams`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissingParams {
    #[serde(rename = "type")]
    pub interview_type: bool,
    pub role: bool,
    pub level: bool,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Missing required parameters: {0:?}")]
    MissingParams(MissingParams),

    #[error("Text generation failed: {0}")]
    Generation(#[source] LlmError),

    #[error("Interview persistence failed: {0}")]
    Persistence(#[source] StoreError),

    #[error("{name}: {message}")]
    Unhandled {
        name: &'static str,
        message: String,
        request_data: Option<Value>,
    },
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GenerateError::MissingParams(missing) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": "Missing required parameters",
                    "missingParams": missing,
                }),
            ),
            GenerateError::Generation(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "AI generation failed",
                    "errorDetail": e.to_string(),
                    "step": STEP_GENERATE_TEXT,
                }),
            ),
            GenerateError::Persistence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "Failed to store interview",
                    "errorDetail": e.to_string(),
                    "step": STEP_STORE_ADD,
                }),
            ),
            GenerateError::Unhandled {
                name,
                message,
                request_data,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "Request processing failed",
                    "errorDetail": message,
                    "errorObject": {
                        "name": name,
                        "message": message,
                        "stack": Value::Null,
                    },
                    "requestData": request_data,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request extraction
// ────────────────────────────────────────────────────────────────────────────

/// Fields pulled out of either envelope shape. Absent and falsy values are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub interview_type: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
    /// Only a JSON string counts; anything else yields an empty tech stack.
    pub techstack: Option<String>,
    pub amount: Option<String>,
    pub user_id: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub interview_type: String,
    pub role: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub amount: String,
    pub user_id: String,
}

impl GenerationRequest {
    pub fn from_value(data: &Value) -> Self {
        Self {
            interview_type: truthy_text(data.get("type")),
            role: truthy_text(data.get("role")),
            level: truthy_text(data.get("level")),
            techstack: data
                .get("techstack")
                .and_then(Value::as_str)
                .map(str::to_string),
            amount: truthy_text(data.get("amount")),
            user_id: truthy_text(data.get("userid")),
        }
    }

    pub fn validate(self) -> Result<ValidatedRequest, MissingParams> {
        match (self.interview_type, self.role, self.level) {
            (Some(interview_type), Some(role), Some(level)) => Ok(ValidatedRequest {
                interview_type,
                role,
                level,
                techstack: normalize_techstack(self.techstack.as_deref()),
                amount: self
                    .amount
                    .unwrap_or_else(|| DEFAULT_QUESTION_AMOUNT.to_string()),
                user_id: self.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            }),
            (interview_type, role, level) => Err(MissingParams {
                interview_type: interview_type.is_none(),
                role: role.is_none(),
                level: level.is_none(),
            }),
        }
    }
}

impl ValidatedRequest {
    pub fn prompt(&self) -> String {
        let techstack = if self.techstack.is_empty() {
            "not specified".to_string()
        } else {
            self.techstack.join(", ")
        };
        build_questions_prompt(
            &self.role,
            &self.level,
            &techstack,
            &self.interview_type,
            &self.amount,
        )
    }

    pub fn into_interview(
        self,
        questions: Vec<String>,
        cover_image: String,
        created_at: DateTime<Utc>,
    ) -> NewInterview {
        NewInterview {
            role: self.role,
            interview_type: self.interview_type,
            level: self.level,
            techstack: self.techstack,
            questions,
            user_id: self.user_id,
            finalized: true,
            cover_image,
            created_at: iso_timestamp(created_at),
        }
    }
}

/// Returns the payload to read fields from. A voice-agent tool call carries the
/// fields as a JSON string under `message.toolCalls[0].function.arguments`; if
/// that string does not parse, the raw body is used as-is.
pub fn unwrap_envelope(raw: Value) -> Value {
    let arguments = raw
        .pointer("/message/toolCalls/0/function/arguments")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let Some(arguments) = arguments else {
        return raw;
    };

    match serde_json::from_str::<Value>(arguments) {
        Ok(args) => {
            info!("Parsed generation arguments from tool call");
            args
        }
        Err(e) => {
            warn!("Failed to parse tool call arguments, using raw body: {e}");
            raw
        }
    }
}

/// Splits a comma-separated stack into trimmed, non-empty names.
pub fn normalize_techstack(techstack: Option<&str>) -> Vec<String> {
    techstack
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Reads the model output as a JSON array of strings. Anything else becomes an
/// empty list and the request still succeeds.
// NOTE: this leniency hides bad model output from callers; a zero-question
// interview is stored and reported as success.
pub fn parse_questions(text: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(strip_json_fences(text)) {
        Ok(questions) => questions,
        Err(e) => {
            warn!("Model output is not a JSON array of strings ({e}); storing no questions");
            Vec::new()
        }
    }
}

/// Present, non-null, non-empty, non-zero, non-false.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the generation pipeline against a raw request body.
pub async fn generate_interview(
    llm: &dyn TextGenerator,
    store: &dyn InterviewStore,
    body: &[u8],
) -> Result<Interview, GenerateError> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| GenerateError::Unhandled {
        name: "SyntaxError",
        message: e.to_string(),
        request_data: None,
    })?;

    // Objects and arrays can be searched for an envelope; an array simply has
    // none of the required fields. Null and scalars cannot.
    if !(raw.is_object() || raw.is_array()) {
        return Err(GenerateError::Unhandled {
            name: "TypeError",
            message: "Request body must be a JSON object or array".to_string(),
            request_data: Some(raw),
        });
    }

    // Parsed tool call arguments may be any JSON value. Only null has no fields
    // to read; other scalars fall through to validation with every field missing.
    let request_data = unwrap_envelope(raw);
    if request_data.is_null() {
        return Err(GenerateError::Unhandled {
            name: "TypeError",
            message: "Tool call arguments must not be null".to_string(),
            request_data: Some(request_data),
        });
    }

    let request = GenerationRequest::from_value(&request_data)
        .validate()
        .map_err(|missing| {
            error!("Missing required parameters: {missing:?}");
            GenerateError::MissingParams(missing)
        })?;

    info!(
        "Generating {} {} questions for {} {} (user {})",
        request.amount, request.interview_type, request.level, request.role, request.user_id
    );

    let text = llm.generate_text(&request.prompt()).await.map_err(|e| {
        error!("Question generation failed: {e}");
        GenerateError::Generation(e)
    })?;

    let questions = parse_questions(&text);
    info!("Model returned {} questions", questions.len());

    let interview = request.into_interview(questions, random_interview_cover(), Utc::now());

    let stored = store.insert(interview).await.map_err(|e| {
        error!("Failed to store interview: {e}");
        GenerateError::Persistence(e)
    })?;

    info!("Stored interview {} for user {}", stored.id, stored.user_id);
    Ok(stored)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
