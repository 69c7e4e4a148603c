//! Response shapes for both entry points and the logic that assembles them
//! from raw completion text.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::metrics::{
    looks_like_move_module, scan_warnings, LEGACY_TAGS, LEGACY_WARNING_RULES, OPTIMIZE_TAGS,
    OPTIMIZE_WARNING_RULES,
};
use crate::request::{AnalysisLevel, LegacyOptimizeRequest, OptimizeRequest};

pub const GAS_PLACEHOLDER: &str = "0%";
pub const PERFORMANCE_PLACEHOLDER: &str = "No improvement";
pub const LEGACY_PERFORMANCE_PLACEHOLDER: &str = "Not quantified";

pub const MSG_INVALID_RESPONSE: &str = "Invalid optimization response";
pub const MSG_INVALID_RESPONSE_FORMAT: &str = "Invalid optimization response format";

// ---------------------------------------------------------------------------
// POST /api/v1/optimize
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// `"X% savings - reason"` as written by the model.
    pub gas: String,
    pub security: Vec<String>,
    pub performance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEcho {
    pub level: AnalysisLevel,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResponse {
    pub optimized_code: String,
    pub metrics: OptimizationMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    pub analysis: AnalysisEcho,
}

impl OptimizationResponse {
    /// Accept and shape completion text for the current entry point.
    ///
    /// The trimmed text must be non-empty and carry a `// GAS:` tag.
    pub fn from_completion(req: &OptimizeRequest, raw: &str) -> Result<Self, CoreError> {
        let code = raw.trim();
        if code.is_empty() || !OPTIMIZE_TAGS.has_gas(code) {
            return Err(CoreError::InvalidResponse(MSG_INVALID_RESPONSE.to_string()));
        }

        let metrics = OptimizationMetrics {
            gas: OPTIMIZE_TAGS
                .gas(code)
                .unwrap_or(GAS_PLACEHOLDER)
                .to_string(),
            security: OPTIMIZE_TAGS.security(code),
            performance: OPTIMIZE_TAGS
                .performance(code)
                .unwrap_or(PERFORMANCE_PLACEHOLDER)
                .to_string(),
        };

        Ok(Self {
            optimized_code: code.to_string(),
            metrics,
            warnings: scan_warnings(code, OPTIMIZE_WARNING_RULES),
            analysis: AnalysisEcho {
                level: req.level,
                goals: req.goals.clone(),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy route
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMetrics {
    pub gas_savings: String,
    pub security_findings: Vec<String>,
    pub performance_improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOptimizationResponse {
    pub optimized_code: String,
    pub metrics: LegacyMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    pub analysis_level: String,
}

impl LegacyOptimizationResponse {
    /// Accept and shape completion text for the legacy entry point.
    ///
    /// The trimmed text must be non-empty and contain both a `module` and a
    /// `fun` token.
    pub fn from_completion(req: &LegacyOptimizeRequest, raw: &str) -> Result<Self, CoreError> {
        let code = raw.trim();
        if code.is_empty() || !looks_like_move_module(code) {
            return Err(CoreError::InvalidResponse(
                MSG_INVALID_RESPONSE_FORMAT.to_string(),
            ));
        }

        let metrics = LegacyMetrics {
            gas_savings: LEGACY_TAGS
                .gas(code)
                .unwrap_or(GAS_PLACEHOLDER)
                .to_string(),
            security_findings: LEGACY_TAGS.security(code),
            performance_improvement: LEGACY_TAGS
                .performance(code)
                .unwrap_or(LEGACY_PERFORMANCE_PLACEHOLDER)
                .to_string(),
        };

        Ok(Self {
            optimized_code: code.to_string(),
            metrics,
            warnings: scan_warnings(code, LEGACY_WARNING_RULES),
            analysis_level: req.analysis_level.clone(),
        })
    }
}
