//! Request validation for both optimization entry points.
//!
//! Bodies arrive as raw JSON. A type mismatch (a number inside the goals
//! array, a missing source field) maps to the entry point's own message.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Goal list applied when the caller omits `optimizationGoals`.
pub const DEFAULT_GOAL: &str = "gas";

/// Analysis level applied when the caller omits `analysisLevel`.
pub const DEFAULT_ANALYSIS_LEVEL: &str = "advanced";

/// Minimum source length accepted by the legacy entry point.
pub const LEGACY_MIN_CODE_LENGTH: usize = 50;

pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_INVALID_MODULE: &str = "Invalid Move module structure";
pub const MSG_INVALID_GOALS: &str = "Invalid optimization goals format";
pub const MSG_INVALID_LEVEL: &str = "Invalid analysis level";
pub const MSG_CODE_REQUIRED: &str = "Move code is required";

/// `module <ident> {` somewhere in the source.
static MODULE_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"module\s+\w+\s*\{").expect("valid regex"));

// ---------------------------------------------------------------------------
// Analysis level
// ---------------------------------------------------------------------------

/// Depth of analysis requested by the caller. Only forwarded into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLevel {
    Basic,
    #[default]
    Advanced,
    Full,
}

impl AnalysisLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            "full" => Ok(Self::Full),
            _ => Err(CoreError::Validation(MSG_INVALID_LEVEL.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated requests
// ---------------------------------------------------------------------------

/// A request accepted by `POST /api/v1/optimize`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest {
    pub move_code: String,
    pub goals: Vec<String>,
    pub level: AnalysisLevel,
}

/// A request accepted by the legacy optimize route.
///
/// The analysis level is free text here and is echoed back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyOptimizeRequest {
    pub move_code: String,
    pub goals: Vec<String>,
    pub analysis_level: String,
}

/// Validate a raw body for the current entry point.
///
/// Checks run in order: module structure, goals, analysis level.
pub fn parse_optimize_request(body: &Value) -> Result<OptimizeRequest, CoreError> {
    let fields = as_object(body)?;

    let move_code = match fields.get("moveCode") {
        Some(Value::String(code)) if has_module_declaration(code) => code.clone(),
        _ => return Err(CoreError::Validation(MSG_INVALID_MODULE.to_string())),
    };

    let goals = parse_goals(fields.get("optimizationGoals"))?;

    let level = match fields.get("analysisLevel") {
        None | Some(Value::Null) => AnalysisLevel::default(),
        Some(Value::String(s)) => s.parse()?,
        Some(_) => return Err(CoreError::Validation(MSG_INVALID_LEVEL.to_string())),
    };

    Ok(OptimizeRequest {
        move_code,
        goals,
        level,
    })
}

/// Validate a raw body for the legacy entry point.
pub fn parse_legacy_request(body: &Value) -> Result<LegacyOptimizeRequest, CoreError> {
    let fields = as_object(body)?;

    let move_code = match fields.get("moveCode") {
        Some(Value::String(code)) => code.clone(),
        _ => return Err(CoreError::Validation(MSG_CODE_REQUIRED.to_string())),
    };
    if move_code.chars().count() < LEGACY_MIN_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Move code must be at least {LEGACY_MIN_CODE_LENGTH} characters"
        )));
    }

    let goals = parse_goals(fields.get("optimizationGoals"))?;

    let analysis_level = match fields.get("analysisLevel") {
        None | Some(Value::Null) => DEFAULT_ANALYSIS_LEVEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(CoreError::Validation(MSG_INVALID_LEVEL.to_string())),
    };

    Ok(LegacyOptimizeRequest {
        move_code,
        goals,
        analysis_level,
    })
}

/// Whether the source contains a `module <ident> {` declaration.
pub fn has_module_declaration(code: &str) -> bool {
    MODULE_DECL_RE.is_match(code)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_object(body: &Value) -> Result<&Map<String, Value>, CoreError> {
    body.as_object()
        .ok_or_else(|| CoreError::Validation(MSG_INVALID_BODY.to_string()))
}

/// Absent or `null` goals fall back to the default single-element list.
/// Anything other than an array of strings is rejected.
fn parse_goals(raw: Option<&Value>) -> Result<Vec<String>, CoreError> {
    match raw {
        None | Some(Value::Null) => Ok(vec![DEFAULT_GOAL.to_string()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CoreError::Validation(MSG_INVALID_GOALS.to_string()))
            })
            .collect(),
        Some(_) => Err(CoreError::Validation(MSG_INVALID_GOALS.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
