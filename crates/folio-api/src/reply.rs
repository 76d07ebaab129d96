//! # Reply Drafting
//!
//! Drafts a reply to a contact submission so the site owner has a starting
//! point. The service only holds a `dyn ReplyDrafter`; the built-in
//! [`TemplateDrafter`] classifies the message by keyword and fills a
//! template. A model-backed drafter plugs in behind the same trait.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Version tag reported with every suggestion.
pub const PROMPT_VERSION: &str = "v1.0";

const JOB_KEYWORDS: &[&str] = &[
    "job",
    "position",
    "internship",
    "hire",
    "opportunity",
    "role",
    "career",
    "interview",
    "application",
];

const COLLABORATION_KEYWORDS: &[&str] = &[
    "collaboration",
    "project",
    "partner",
    "work together",
    "team up",
    "collaborate",
];

/// What a contact message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    JobInquiry,
    Collaboration,
    General,
}

impl MessageKind {
    /// Keyword classification. Job keywords win over collaboration keywords.
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if JOB_KEYWORDS.iter().any(|k| message.contains(k)) {
            Self::JobInquiry
        } else if COLLABORATION_KEYWORDS.iter().any(|k| message.contains(k)) {
            Self::Collaboration
        } else {
            Self::General
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JobInquiry => write!(f, "job_inquiry"),
            Self::Collaboration => write!(f, "collaboration"),
            Self::General => write!(f, "general"),
        }
    }
}

/// The parts of a submission a drafter may look at.
#[derive(Debug, Clone, Copy)]
pub struct Inquiry<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

#[derive(Error, Debug)]
pub enum DraftError {
    /// The drafting backend could not produce a reply.
    #[error("drafting backend failed: {0}")]
    Backend(String),
}

/// Produces a suggested reply for an inquiry.
pub trait ReplyDrafter: Send + Sync + fmt::Debug {
    /// Identifier reported as `metadata.model`.
    fn model(&self) -> &str;

    fn draft(&self, inquiry: &Inquiry<'_>) -> Result<String, DraftError>;
}

/// Keyword-classified template replies, signed by the site owner.
#[derive(Debug, Clone)]
pub struct TemplateDrafter {
    owner: String,
}

impl TemplateDrafter {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl ReplyDrafter for TemplateDrafter {
    fn model(&self) -> &str {
        "template-v1"
    }

    fn draft(&self, inquiry: &Inquiry<'_>) -> Result<String, DraftError> {
        let name = inquiry.name.trim();
        let owner = &self.owner;
        let body = match MessageKind::classify(inquiry.message) {
            MessageKind::JobInquiry => format!(
                "Hi {name},\n\n\
                 Thank you for reaching out about potential opportunities! I appreciate your interest.\n\n\
                 I'd love to learn more about the role and discuss how my background could contribute \
                 to your team. I'm available for a call or video chat at your convenience. \
                 Please let me know what next steps work best for you.\n\n\
                 Best regards,\n{owner}"
            ),
            MessageKind::Collaboration => format!(
                "Hi {name},\n\n\
                 Thanks for reaching out about a potential collaboration! I'm always interested in \
                 working on new projects.\n\n\
                 Could you share more about the project scope, timeline, and how you envision \
                 working together?\n\n\
                 Looking forward to discussing this further!\n\n\
                 Best,\n{owner}"
            ),
            MessageKind::General => format!(
                "Hi {name},\n\n\
                 Thank you for your message! I appreciate you taking the time to reach out.\n\n\
                 I'll review it carefully and get back to you soon. In the meantime, feel free to \
                 browse the projects on this site.\n\n\
                 Best regards,\n{owner}"
            ),
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry(message: &str) -> Inquiry<'_> {
        Inquiry {
            name: " Ada ",
            email: "ada@example.com",
            message,
        }
    }

    #[test]
    fn classification() {
        assert_eq!(
            MessageKind::classify("We have an open INTERNSHIP"),
            MessageKind::JobInquiry
        );
        assert_eq!(
            MessageKind::classify("Want to team up on something?"),
            MessageKind::Collaboration
        );
        assert_eq!(
            MessageKind::classify("A project role for you"),
            MessageKind::JobInquiry
        );
        assert_eq!(MessageKind::classify("Loved the site!"), MessageKind::General);
    }

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(MessageKind::JobInquiry.to_string(), "job_inquiry");
        assert_eq!(
            serde_json::to_value(MessageKind::Collaboration).unwrap(),
            "collaboration"
        );
    }

    #[test]
    fn template_addresses_sender_and_signs() {
        let drafter = TemplateDrafter::new("Sam Owner");
        let reply = drafter.draft(&inquiry("Is there a position open?")).unwrap();
        assert!(reply.starts_with("Hi Ada,"));
        assert!(reply.contains("opportunities"));
        assert!(reply.ends_with("Sam Owner"));
    }

    #[test]
    fn general_template_for_unclassified() {
        let reply = TemplateDrafter::new("Sam")
            .draft(&inquiry("Just saying hello there"))
            .unwrap();
        assert!(reply.contains("Thank you for your message"));
    }
}
