//! Keyword-driven assistant with canned answers.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const GREETING: &str =
    "Hello! I'm your AI assistant for water well prediction. How can I help you today?";

const FALLBACK: &str = "I understand you're asking about water well prediction. While I can provide general guidance, I recommend using our prediction tool for specific analysis. You can also explore our soil data, weather insights, and map features for comprehensive information. Is there a specific aspect of groundwater prediction you'd like to know more about?";

// First match wins, so order matters ("hi" is a substring of many words).
const RULES: &[(&[&str], &str)] = &[
    (
        &["groundwater", "water level"],
        "Groundwater levels vary based on local geology, rainfall, and seasonal patterns. For your specific location, I recommend using our prediction tool with your soil type, rock formation, and depth requirements. Would you like me to guide you through the prediction process?",
    ),
    (
        &["soil", "clay", "sand"],
        "Different soil types have varying water retention capabilities:\n\n• Clay soil: High water retention, medium drilling difficulty\n• Sandy soil: Low retention but easy drilling\n• Loamy soil: Balanced properties, good for wells\n\nWhat type of soil are you working with?",
    ),
    (
        &["rock", "stone"],
        "Rock formations significantly impact groundwater:\n\n• Sedimentary rocks (limestone, sandstone): Excellent for groundwater\n• Igneous rocks: Generally poor water storage\n• Metamorphic rocks: Variable, depends on fractures\n\nLimestone and sandstone are typically the best for water wells.",
    ),
    (
        &["depth", "drill"],
        "Drilling depth recommendations:\n\n• Shallow wells (10-30m): Suitable for areas with high water tables\n• Medium depth (30-100m): Most common for residential use\n• Deep wells (100m+): Required in arid regions or areas with deep aquifers\n\nThe optimal depth depends on your local water table and geological conditions.",
    ),
    (
        &["weather", "rain"],
        "Weather significantly affects groundwater:\n\n• Rainfall recharges aquifers\n• Dry seasons lower water tables\n• Temperature affects evaporation rates\n• Humidity indicates local water availability\n\nCheck our Weather section for current conditions and their impact on groundwater levels.",
    ),
    (
        &["location", "gps", "map"],
        "Location is crucial for groundwater prediction:\n\n• Valleys and low-lying areas typically have better groundwater\n• Areas near rivers or lakes have higher water tables\n• Mountainous regions may have deeper water tables\n• Coastal areas may have saltwater intrusion issues\n\nUse our GPS & Map feature to mark potential drilling sites and analyze their suitability.",
    ),
    (
        &["cost", "price"],
        "Well drilling costs vary by:\n\n• Depth required (deeper = more expensive)\n• Soil/rock type (harder materials cost more)\n• Location accessibility\n• Equipment needed\n• Local labor rates\n\nTypically ranges from $3,000-$15,000 for residential wells. Get quotes from local drilling contractors for accurate estimates.",
    ),
    (
        &["hello", "hi", "help"],
        "Hello! I'm here to help with your water well questions. I can assist with:\n\n• Groundwater prediction analysis\n• Soil and rock type information\n• Optimal drilling locations\n• Weather impact on water levels\n• Best practices for well drilling\n\nWhat would you like to know?",
    ),
];

/// A canned question and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

const FAQ: [FaqEntry; 4] = [
    FaqEntry {
        question: "What factors affect groundwater prediction?",
        answer: "Groundwater prediction depends on several key factors: soil type (clay retains more water than sand), rock formation (sedimentary rocks are generally better), depth of drilling, local topography, rainfall patterns, and geological history of the area.",
    },
    FaqEntry {
        question: "How accurate are the predictions?",
        answer: "Our AI model achieves 85-90% accuracy based on the input parameters. However, actual results may vary due to local geological variations. We recommend conducting a geological survey for critical projects.",
    },
    FaqEntry {
        question: "What is the best time to drill?",
        answer: "The optimal drilling time is typically during the early monsoon season (June-July) when groundwater levels are replenished but before heavy rains make access difficult. Avoid drilling during extreme weather conditions.",
    },
    FaqEntry {
        question: "How do I interpret the location data?",
        answer: "Location coordinates help determine regional geological patterns. Areas near water bodies, in valleys, or with historical water sources typically have better groundwater potential. Elevation and proximity to recharge areas are also important factors.",
    },
];

/// Stateless responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advisor;

impl Advisor {
    pub fn new() -> Self {
        Self
    }

    /// Answer a free-form message. Blank messages get no reply.
    pub fn reply(&self, message: &str) -> Option<&'static str> {
        if message.trim().is_empty() {
            return None;
        }
        let message = message.to_lowercase();

        let answer = RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
            .map(|(_, answer)| *answer)
            .unwrap_or(FALLBACK);
        Some(answer)
    }

    pub fn faq(&self) -> &'static [FaqEntry] {
        &FAQ
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered chat transcript, opened with the greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    advisor: Advisor,
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            advisor: Advisor::new(),
            messages: vec![ChatMessage::new(Speaker::Bot, GREETING)],
        }
    }

    /// Record a user message and the reply. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let answer = self.advisor.reply(text)?;
        self.messages.push(ChatMessage::new(Speaker::User, text));
        self.messages.push(ChatMessage::new(Speaker::Bot, answer));
        self.messages.last()
    }

    /// Record a FAQ question and its canned answer.
    pub fn ask_faq(&mut self, index: usize) -> Option<&ChatMessage> {
        let entry = self.advisor.faq().get(index)?;
        self.messages
            .push(ChatMessage::new(Speaker::User, entry.question));
        self.messages.push(ChatMessage::new(Speaker::Bot, entry.answer));
        self.messages.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let advisor = Advisor::new();
        // "groundwater" comes before "soil".
        let answer = advisor.reply("Does soil affect GROUNDWATER?").unwrap();
        assert!(answer.starts_with("Groundwater levels vary"));

        let answer = advisor.reply("what about limestone").unwrap();
        assert!(answer.starts_with("Rock formations"));

        let answer = advisor.reply("how much does it cost").unwrap();
        assert!(answer.starts_with("Well drilling costs"));
    }

    #[test]
    fn substring_matching_is_literal() {
        // "this" contains "hi".
        let answer = Advisor::new().reply("this one").unwrap();
        assert!(answer.starts_with("Hello! I'm here to help"));
    }

    #[test]
    fn unmatched_gets_fallback_and_blank_gets_nothing() {
        let advisor = Advisor::new();
        assert_eq!(advisor.reply("xyz"), Some(FALLBACK));
        assert_eq!(advisor.reply("   "), None);
    }

    #[test]
    fn conversation_transcript() {
        let mut chat = Conversation::new();
        assert_eq!(chat.messages()[0].content, GREETING);

        assert!(chat.send("").is_none());
        assert_eq!(chat.messages().len(), 1);

        let reply = chat.send("When should I drill?").unwrap();
        assert_eq!(reply.speaker, Speaker::Bot);
        assert!(reply.content.starts_with("Drilling depth"));

        let reply = chat.ask_faq(2).unwrap();
        assert!(reply.content.contains("June-July"));
        assert!(chat.ask_faq(9).is_none());

        let speakers: Vec<_> = chat.messages().iter().map(|m| m.speaker).collect();
        assert_eq!(
            speakers,
            [Speaker::Bot, Speaker::User, Speaker::Bot, Speaker::User, Speaker::Bot]
        );
    }
}
