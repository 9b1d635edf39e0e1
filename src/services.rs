//! Service cards that ask the chat responder a question

use crate::bus::SignalBus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    /// Question sent to the chat when the card is clicked
    pub prompt: &'static str,
}

pub static SERVICE_CARDS: [ServiceCard; 3] = [
    ServiceCard {
        id: "seo",
        title: "SEO Expertise & Growth",
        summary: "Keyword research, on-page optimization and content strategy for sustained organic growth",
        prompt: "Can you help with SEO rankings and traffic?",
    },
    ServiceCard {
        id: "technical",
        title: "Technical SEO & PageSpeed",
        summary: "Website infrastructure, Core Web Vitals and crawlability fixes",
        prompt: "Tell me about technical SEO",
    },
    ServiceCard {
        id: "links",
        title: "Link Building",
        summary: "White-hat backlink and authority building",
        prompt: "How does your link building work?",
    },
];

impl ServiceCard {
    /// Look up a card by id, case-insensitively
    pub fn find(id: &str) -> Option<&'static ServiceCard> {
        let id = id.trim();
        SERVICE_CARDS
            .iter()
            .find(|card| card.id.eq_ignore_ascii_case(id))
    }

    /// Emit this card's question on the bus. Returns how many listeners
    /// received it.
    pub fn ask(&self, bus: &SignalBus) -> usize {
        tracing::info!(card = self.id, "Service card asked the chat");
        bus.emit(self.prompt)
    }
}
