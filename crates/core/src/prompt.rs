//! Prompt templates sent to the completion service.
//!
//! Each entry point owns a fixed system block that spells out the comment
//! tags its extractor looks for. The user block embeds the analysis level,
//! the comma-joined goals and the verbatim source.

use serde::{Deserialize, Serialize};

use crate::request::{LegacyOptimizeRequest, OptimizeRequest};

/// Sampling temperature for every optimization call.
pub const OPTIMIZE_TEMPERATURE: f32 = 0.1;

/// Upper bound on generated tokens for every optimization call.
pub const OPTIMIZE_MAX_TOKENS: u32 = 2500;

const OPTIMIZE_SYSTEM_PROMPT: &str = "You are a Move language optimizer. RESPONSE MUST CONTAIN:
1. Optimized code with EXACTLY these inline comments:
   - // GAS: [X]% savings - [reason]
   - // SECURITY: [finding]
   - // PERFORMANCE: [improvement]
2. Version header: // OPTIMIZED AT: [timestamp]
3. No explanations outside code comments
4. Preserve original functionality
5. Follow Supra blockchain conventions";

const OPTIMIZE_VERSIONING_PROMPT: &str =
    "Ensure all responses follow strict semantic versioning and include detailed gas estimations.";

const LEGACY_SYSTEM_PROMPT: &str = "You are an expert Move smart contract optimizer. Return ONLY the optimized Move module.
Annotate your changes with these inline comments:
   - // Gas savings: [estimate and reason]
   - // Security: [finding] (one comment per finding)
   - // Performance: [improvement]
Start the module with a version header: // OPTIMIZED AT: [timestamp]
Do not write any prose outside code comments.
Preserve the original functional behavior.
Follow Supra blockchain conventions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Messages for `POST /api/v1/optimize`.
pub fn optimize_messages(req: &OptimizeRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(OPTIMIZE_SYSTEM_PROMPT),
        ChatMessage::system(OPTIMIZE_VERSIONING_PROMPT),
        ChatMessage::user(format!(
            "OPTIMIZE THIS MOVE CODE ({} analysis):\nFOCUS ON: {}\n\nCODE:\n{}",
            req.level,
            req.goals.join(", "),
            req.move_code
        )),
    ]
}

/// Messages for the legacy optimize route.
pub fn legacy_messages(req: &LegacyOptimizeRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(LEGACY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Analysis level: {}\nOptimization goals: {}\n\nMove code:\n{}",
            req.analysis_level,
            req.goals.join(", "),
            req.move_code
        )),
    ]
}
