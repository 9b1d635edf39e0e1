//! Keyword rule tables
//!
//! A table is an ordered list of keyword rules plus a fallback reply. Input
//! is lower-cased and the first rule with a keyword contained in it wins.
//! There is no scoring: priority order is the tie-break, with personal
//! topics (experience, skills, results) ahead of generic domain topics.
//!
//! Two tables exist and are kept apart on purpose. [`CHAT_RULES`] answers
//! the chat box and quick actions; [`TRIGGER_RULES`] is the smaller table
//! tuned for questions injected by service cards elsewhere on the page.

pub mod replies;

use crate::markup::{self, MarkupError};
use serde::Serialize;

/// What a canned reply is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Experience,
    Skills,
    Projects,
    SeoExpertise,
    TechnicalSeo,
    LinkBuilding,
    /// Nothing matched
    Fallback,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Experience => "experience",
            Topic::Skills => "skills",
            Topic::Projects => "projects",
            Topic::SeoExpertise => "seo_expertise",
            Topic::TechnicalSeo => "technical_seo",
            Topic::LinkBuilding => "link_building",
            Topic::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canned reply selected by rule match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub topic: Topic,
    pub text: &'static str,
}

/// Keywords are lower-case substrings
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub reply: Reply,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

#[derive(Debug)]
pub struct RuleTable {
    pub name: &'static str,
    pub rules: &'static [Rule],
    pub fallback: Reply,
}

const EXPERIENCE: Reply = Reply {
    topic: Topic::Experience,
    text: replies::EXPERIENCE,
};
const SKILLS: Reply = Reply {
    topic: Topic::Skills,
    text: replies::SKILLS,
};
const PROJECTS: Reply = Reply {
    topic: Topic::Projects,
    text: replies::PROJECTS,
};
const SEO_EXPERTISE: Reply = Reply {
    topic: Topic::SeoExpertise,
    text: replies::SEO_EXPERTISE,
};
const TECHNICAL_SEO: Reply = Reply {
    topic: Topic::TechnicalSeo,
    text: replies::TECHNICAL_SEO,
};
const LINK_BUILDING: Reply = Reply {
    topic: Topic::LinkBuilding,
    text: replies::LINK_BUILDING,
};

/// Rules for the chat box and quick-action buttons
pub static CHAT_RULES: RuleTable = RuleTable {
    name: "chat",
    rules: &[
        Rule {
            keywords: &["experience", "years"],
            reply: EXPERIENCE,
        },
        Rule {
            keywords: &["skill", "expertise", "can you do", "what do you do"],
            reply: SKILLS,
        },
        Rule {
            keywords: &["project", "case", "result"],
            reply: PROJECTS,
        },
        Rule {
            keywords: &["seo", "ranking", "traffic"],
            reply: SEO_EXPERTISE,
        },
        Rule {
            keywords: &["speed", "pagespeed", "core web vitals", "performance"],
            reply: TECHNICAL_SEO,
        },
        Rule {
            keywords: &["link", "backlink", "authority"],
            reply: LINK_BUILDING,
        },
    ],
    fallback: Reply {
        topic: Topic::Fallback,
        text: replies::CHAT_FALLBACK,
    },
};

/// Rules for questions injected by service cards.
///
/// `"seo "` keeps its trailing space, so a question ending in "SEO" falls
/// through to the technical or link-building rules.
pub static TRIGGER_RULES: RuleTable = RuleTable {
    name: "service_trigger",
    rules: &[
        Rule {
            keywords: &["seo ", "ranking", "traffic"],
            reply: SEO_EXPERTISE,
        },
        Rule {
            keywords: &["technical", "pagespeed", "core web", "speed"],
            reply: TECHNICAL_SEO,
        },
        Rule {
            keywords: &["link building", "backlinks", "authority"],
            reply: LINK_BUILDING,
        },
    ],
    fallback: Reply {
        topic: Topic::Fallback,
        text: replies::TRIGGER_FALLBACK,
    },
};

impl RuleTable {
    /// Pick the reply for `text`. Never fails; unmatched input gets the
    /// fallback.
    pub fn resolve(&self, text: &str) -> Reply {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.fallback, |rule| rule.reply)
    }

    /// Every reply this table can produce, fallback last
    pub fn replies(&self) -> impl Iterator<Item = Reply> + '_ {
        self.rules
            .iter()
            .map(|rule| rule.reply)
            .chain(std::iter::once(self.fallback))
    }

    /// Check that every reply is well-formed markup.
    pub fn validate(&self) -> Result<(), MarkupError> {
        for reply in self.replies() {
            markup::parse(reply.text)?;
        }
        Ok(())
    }
}

/// Quick-action buttons under the chat box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Experience,
    Skills,
    ResultsAndProjects,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::Experience,
        Preset::Skills,
        Preset::ResultsAndProjects,
    ];

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Preset::Experience => "Experience",
            Preset::Skills => "Skills",
            Preset::ResultsAndProjects => "Results & Projects",
        }
    }

    /// Text submitted when the button is pressed
    pub fn phrase(self) -> &'static str {
        match self {
            Preset::Experience => "Tell me about Waqas's SEO experience",
            Preset::Skills => "What are Waqas's main skills?",
            Preset::ResultsAndProjects => "Show me real SEO results and projects",
        }
    }

    /// Look up a preset by a short name such as `skills` or `results`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "experience" => Some(Preset::Experience),
            "skills" => Some(Preset::Skills),
            "results" | "projects" | "results_and_projects" => Some(Preset::ResultsAndProjects),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_topic(text: &str) -> Topic {
        CHAT_RULES.resolve(text).topic
    }

    fn trigger_topic(text: &str) -> Topic {
        TRIGGER_RULES.resolve(text).topic
    }

    #[test]
    fn test_chat_rules_cover_every_topic() {
        assert_eq!(chat_topic("How many years have you worked?"), Topic::Experience);
        assert_eq!(chat_topic("What is your expertise"), Topic::Skills);
        assert_eq!(chat_topic("So what can you do for me"), Topic::Skills);
        assert_eq!(chat_topic("any case study?"), Topic::Projects);
        assert_eq!(chat_topic("improve my rankings"), Topic::SeoExpertise);
        assert_eq!(chat_topic("my site performance is bad"), Topic::TechnicalSeo);
        assert_eq!(chat_topic("I need backlinks"), Topic::LinkBuilding);
        assert_eq!(chat_topic("hello there"), Topic::Fallback);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(chat_topic("EXPERIENCE"), Topic::Experience);
        assert_eq!(chat_topic("Core Web Vitals"), Topic::TechnicalSeo);
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        assert_eq!(chat_topic("experience and skills"), Topic::Experience);
        assert_eq!(chat_topic("what seo experience do you have"), Topic::Experience);
        assert_eq!(chat_topic("skills for link building"), Topic::Skills);
        assert_eq!(chat_topic("seo results"), Topic::Projects);
        assert_eq!(chat_topic("seo speed"), Topic::SeoExpertise);
    }

    #[test]
    fn test_presets_resolve_to_their_topics() {
        assert_eq!(chat_topic(Preset::Experience.phrase()), Topic::Experience);
        assert_eq!(chat_topic(Preset::Skills.phrase()), Topic::Skills);
        assert_eq!(
            chat_topic(Preset::ResultsAndProjects.phrase()),
            Topic::Projects
        );
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_name("Skills"), Some(Preset::Skills));
        assert_eq!(Preset::from_name("results"), Some(Preset::ResultsAndProjects));
        assert_eq!(Preset::from_name("gallery"), None);
        assert_eq!(Preset::ResultsAndProjects.label(), "Results & Projects");
    }

    #[test]
    fn test_tables_diverge_on_technical_seo() {
        let text = "Tell me about technical SEO";
        assert_eq!(trigger_topic(text), Topic::TechnicalSeo);
        assert_eq!(chat_topic(text), Topic::SeoExpertise);
    }

    #[test]
    fn test_trigger_rules() {
        assert_eq!(trigger_topic("Can you grow my traffic?"), Topic::SeoExpertise);
        assert_eq!(trigger_topic("seo audit please"), Topic::SeoExpertise);
        assert_eq!(trigger_topic("Is my PageSpeed ok"), Topic::TechnicalSeo);
        assert_eq!(trigger_topic("How does your link building work?"), Topic::LinkBuilding);
        // "link" alone is a chat-table keyword only
        assert_eq!(trigger_topic("a link"), Topic::Fallback);
        assert_eq!(TRIGGER_RULES.resolve("hi").text, replies::TRIGGER_FALLBACK);
        assert_eq!(CHAT_RULES.resolve("hi").text, replies::CHAT_FALLBACK);
    }

    #[test]
    fn test_canned_replies_are_well_formed() {
        CHAT_RULES.validate().unwrap();
        TRIGGER_RULES.validate().unwrap();
        markup::parse(replies::GREETING).unwrap();
    }

    #[test]
    fn test_canned_reply_structure() {
        let experience = markup::parse(replies::EXPERIENCE).unwrap();
        assert_eq!(experience.list_item_count(), 7);
        assert!(experience.to_html().contains("<strong>5+ years of proven SEO"));

        let skills = markup::parse(replies::SKILLS).unwrap();
        assert_eq!(skills.list_item_count(), 14);

        let projects = markup::parse(replies::PROJECTS).unwrap();
        assert_eq!(projects.list_item_count(), 0);
    }

    #[test]
    fn test_replies_lists_fallback_last() {
        let replies: Vec<Reply> = TRIGGER_RULES.replies().collect();
        assert_eq!(replies.len(), 4);
        assert_eq!(replies[3].topic, Topic::Fallback);
    }

    #[test]
    fn test_topic_display_matches_serialized_name() {
        for reply in CHAT_RULES.replies().chain(TRIGGER_RULES.replies()) {
            let serialized = serde_json::to_value(reply.topic).unwrap();
            assert_eq!(serialized, reply.topic.to_string());
        }
    }
}
