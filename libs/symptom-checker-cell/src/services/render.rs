use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    ChatMessage, ChatRole, DialogueMode, MessageContent, SessionState, SymptomAnalysis,
    UrgencyLevel,
};
use crate::services::prompt::SEEK_HELP_WARNING;
use crate::services::session::DialogueSession;

/// A block of free-text reply after the minimal markdown pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    List { items: Vec<String> },
}

/// Splits a reply into paragraphs and bullet lists.
///
/// Lines starting with `* ` or `- ` become list items and consecutive items
/// share one list. Blank lines end the current paragraph. Nothing else is
/// interpreted, so `**bold**` stays literal text.
pub fn render_markdown(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_list(&mut blocks, &mut items);
        } else if let Some(item) = list_item(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            items.push(item.to_string());
        } else {
            flush_list(&mut blocks, &mut items);
            paragraph.push(line);
        }
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    flush_list(&mut blocks, &mut items);
    blocks
}

fn list_item(line: &str) -> Option<&str> {
    ["* ", "- "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

fn flush_paragraph(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph { text: lines.join("\n") });
        lines.clear();
    }
}

fn flush_list(blocks: &mut Vec<Block>, items: &mut Vec<String>) {
    if !items.is_empty() {
        blocks.push(Block::List { items: std::mem::take(items) });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl From<UrgencyLevel> for UrgencyBadge {
    fn from(level: UrgencyLevel) -> Self {
        let variant = if level >= UrgencyLevel::High {
            BadgeVariant::Destructive
        } else {
            BadgeVariant::Secondary
        };
        Self { label: level.as_str().to_uppercase(), variant }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCard {
    pub urgency: UrgencyBadge,
    /// Present only when the analysis advises seeking medical help.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seek_help_warning: Option<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

impl From<&SymptomAnalysis> for AnalysisCard {
    fn from(analysis: &SymptomAnalysis) -> Self {
        Self {
            urgency: analysis.urgency_level.into(),
            seek_help_warning: analysis
                .seek_medical_help
                .then(|| SEEK_HELP_WARNING.to_string()),
            recommendations: analysis.recommendations.clone(),
            disclaimer: analysis.disclaimer.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    /// User messages are shown verbatim as a single paragraph.
    Text { blocks: Vec<Block> },
    Analysis { card: AnalysisCard },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub id: u64,
    pub role: ChatRole,
    pub body: MessageBody,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        let body = match (&message.content, message.role) {
            (MessageContent::Text(text), ChatRole::Assistant) => {
                MessageBody::Text { blocks: render_markdown(text) }
            }
            (MessageContent::Text(text), ChatRole::User) => MessageBody::Text {
                blocks: vec![Block::Paragraph { text: text.clone() }],
            },
            (MessageContent::Analysis(analysis), _) => MessageBody::Analysis { card: analysis.into() },
            (MessageContent::Error(text), _) => MessageBody::Error { message: text.clone() },
        };

        Self { id: message.id, role: message.role, body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub mode: DialogueMode,
    pub state: SessionState,
    /// Indeterminate progress indicator while a reply is pending.
    pub thinking: bool,
    pub messages: Vec<MessageView>,
    pub created_at: DateTime<Utc>,
}

impl From<&DialogueSession> for SessionView {
    fn from(session: &DialogueSession) -> Self {
        let summary = session.summary();
        Self {
            id: summary.id,
            mode: summary.mode,
            state: summary.state,
            thinking: session.is_awaiting_reply(),
            messages: session.messages().iter().map(MessageView::from).collect(),
            created_at: summary.created_at,
        }
    }
}

/// Result of the stateless analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResponse {
    pub symptoms: String,
    pub analysis: AnalysisCard,
}
