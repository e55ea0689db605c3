//! Built-in tool registrations

use super::ToolRegistration;
use rulesync_meta::Feature::{Commands as C, Ignore as I, Mcp as M, Rules as R};
use rulesync_meta::ToolTarget;

/// Number of built-in tools.
pub const BUILTIN_COUNT: usize = 16;

const BUILTINS: [ToolRegistration; BUILTIN_COUNT] = [
    ToolRegistration::new(ToolTarget::AgentsMd, "AGENTS.md", &[R]),
    ToolRegistration::new(ToolTarget::AmazonQCli, "Amazon Q Developer CLI", &[R, M]),
    ToolRegistration::new(ToolTarget::AugmentCode, "Augment Code", &[R, I]),
    ToolRegistration::new(ToolTarget::AugmentCodeLegacy, "Augment Code (legacy)", &[R]),
    ToolRegistration::new(ToolTarget::ClaudeCode, "Claude Code", &[R, I, C, M]),
    ToolRegistration::new(ToolTarget::Cline, "Cline", &[R, I, M]),
    ToolRegistration::new(ToolTarget::CodexCli, "Codex CLI", &[R, I, C, M]),
    ToolRegistration::new(ToolTarget::Copilot, "GitHub Copilot", &[R, C, M]),
    ToolRegistration::new(ToolTarget::Cursor, "Cursor", &[R, I, C, M]),
    ToolRegistration::new(ToolTarget::GeminiCli, "Gemini CLI", &[R, I, C, M]),
    ToolRegistration::new(ToolTarget::Junie, "JetBrains Junie", &[R, I, M]),
    ToolRegistration::new(ToolTarget::Kiro, "Kiro", &[R, I, M]),
    ToolRegistration::new(ToolTarget::OpenCode, "OpenCode", &[R, M]),
    ToolRegistration::new(ToolTarget::QwenCode, "Qwen Code", &[R, I, M]),
    ToolRegistration::new(ToolTarget::Roo, "Roo Code", &[R, I, C, M]),
    ToolRegistration::new(ToolTarget::Windsurf, "Windsurf", &[R, I, M]),
];

/// All built-in registrations, in identifier order.
pub fn builtin_registrations() -> Vec<ToolRegistration> {
    BUILTINS.to_vec()
}
