//! Questionnaire data models: questions, answers, and the transcript.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::prompts::question_prompt;

/// The fixed questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Destination,
    Duration,
    Budget,
    Interests,
    Accommodation,
    Dietary,
    SpecificInterests,
    Mobility,
    AdditionalReqs,
}

impl Question {
    /// Every question, in asking order.
    pub const ALL: [Question; 9] = [
        Question::Destination,
        Question::Duration,
        Question::Budget,
        Question::Interests,
        Question::Accommodation,
        Question::Dietary,
        Question::SpecificInterests,
        Question::Mobility,
        Question::AdditionalReqs,
    ];

    /// Number of questions in the form.
    pub const COUNT: usize = Self::ALL.len();

    /// The question at `index`, if any.
    pub fn at(index: usize) -> Option<Question> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position in the form.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The question that follows this one, if any.
    pub fn next(self) -> Option<Question> {
        Self::at(self.index() + 1)
    }

    /// Profile field name this question fills.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Duration => "duration",
            Self::Budget => "budget",
            Self::Interests => "interests",
            Self::Accommodation => "accommodation",
            Self::Dietary => "dietary",
            Self::SpecificInterests => "specific_interests",
            Self::Mobility => "mobility",
            Self::AdditionalReqs => "additional_reqs",
        }
    }

    /// Text shown to the user.
    pub fn prompt(self) -> &'static str {
        question_prompt(self)
    }

    /// Whether the answer is normalized to lowercase.
    pub fn is_lowercased(self) -> bool {
        matches!(self, Self::Budget | Self::Accommodation | Self::Dietary)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// First code point of each run of ten Unicode decimal digits (category Nd).
const DECIMAL_DIGIT_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit in any script, e.g. '7' or '٣'.
///
/// Superscripts and circled digits are not decimal digits and yield `None`.
pub fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let code = c as u32;
    DECIMAL_DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|zero| code - zero)
}

/// Coerce a free-text duration answer into a day count.
///
/// Keeps only decimal digits (any script). No digits (or a zero) means one
/// day; values past `u32::MAX` saturate.
pub fn coerce_duration(raw: &str) -> NonZeroU32 {
    let digits: String = raw
        .chars()
        .filter_map(decimal_digit_value)
        .filter_map(|d| char::from_digit(d, 10))
        .collect();
    if digits.is_empty() {
        return NonZeroU32::MIN;
    }
    // Only overflow can fail once the string is all digits.
    let days = digits.parse::<u32>().unwrap_or(u32::MAX);
    NonZeroU32::new(days).unwrap_or(NonZeroU32::MIN)
}

/// Coerce a free-text answer for a text question.
pub fn coerce_text(question: Question, raw: &str) -> String {
    if question.is_lowercased() {
        raw.to_lowercase()
    } else {
        raw.to_string()
    }
}

/// Answers collected so far. A field is `Some` only once its question has
/// been answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<NonZeroU32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_reqs: Option<String>,
}

impl ProfileDraft {
    /// Coerce `raw` for `question` and store it.
    pub fn record(&mut self, question: Question, raw: &str) {
        let text = || coerce_text(question, raw);
        match question {
            Question::Destination => self.destination = Some(text()),
            Question::Duration => self.duration = Some(coerce_duration(raw)),
            Question::Budget => self.budget = Some(text()),
            Question::Interests => self.interests = Some(text()),
            Question::Accommodation => self.accommodation = Some(text()),
            Question::Dietary => self.dietary = Some(text()),
            Question::SpecificInterests => self.specific_interests = Some(text()),
            Question::Mobility => self.mobility = Some(text()),
            Question::AdditionalReqs => self.additional_reqs = Some(text()),
        }
    }

    /// Whether `question` has an answer.
    pub fn is_answered(&self, question: Question) -> bool {
        match question {
            Question::Destination => self.destination.is_some(),
            Question::Duration => self.duration.is_some(),
            Question::Budget => self.budget.is_some(),
            Question::Interests => self.interests.is_some(),
            Question::Accommodation => self.accommodation.is_some(),
            Question::Dietary => self.dietary.is_some(),
            Question::SpecificInterests => self.specific_interests.is_some(),
            Question::Mobility => self.mobility.is_some(),
            Question::AdditionalReqs => self.additional_reqs.is_some(),
        }
    }

    /// Number of answered questions.
    pub fn answered_count(&self) -> usize {
        Question::ALL
            .iter()
            .filter(|q| self.is_answered(**q))
            .count()
    }

    /// The finished profile, once every question has an answer.
    pub fn complete(&self) -> Option<AnswerProfile> {
        Some(AnswerProfile {
            destination: self.destination.clone()?,
            duration: self.duration?,
            budget: self.budget.clone()?,
            interests: self.interests.clone()?,
            accommodation: self.accommodation.clone()?,
            dietary: self.dietary.clone()?,
            specific_interests: self.specific_interests.clone()?,
            mobility: self.mobility.clone()?,
            additional_reqs: self.additional_reqs.clone()?,
        })
    }
}

/// A fully answered questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerProfile {
    pub destination: String,
    /// Trip length in days.
    pub duration: NonZeroU32,
    /// Lowercased.
    pub budget: String,
    pub interests: String,
    /// Lowercased.
    pub accommodation: String,
    /// Lowercased.
    pub dietary: String,
    pub specific_interests: String,
    pub mobility: String,
    pub additional_reqs: String,
}

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
}

impl ChatEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only conversation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<ChatEntry>);

impl Transcript {
    pub fn push(&mut self, entry: ChatEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.0.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_keeps_digits() {
        assert_eq!(coerce_duration("10 days").get(), 10);
        assert_eq!(coerce_duration("1 week and 2 days").get(), 12);
        assert_eq!(coerce_duration("  7").get(), 7);
    }

    #[test]
    fn duration_defaults_to_one() {
        assert_eq!(coerce_duration("a week").get(), 1);
        assert_eq!(coerce_duration("").get(), 1);
        assert_eq!(coerce_duration("0").get(), 1);
        assert_eq!(coerce_duration("000 days").get(), 1);
    }

    #[test]
    fn duration_accepts_digits_from_any_script() {
        assert_eq!(coerce_duration("٣ days").get(), 3);
        assert_eq!(coerce_duration("१२ दिन").get(), 12);
        assert_eq!(coerce_duration("１０日").get(), 10);
        assert_eq!(coerce_duration("1٥ nights").get(), 15);
    }

    #[test]
    fn duration_ignores_non_decimal_numerals() {
        assert_eq!(coerce_duration("x²").get(), 1);
        assert_eq!(coerce_duration("③ days").get(), 1);
        assert_eq!(coerce_duration("Ⅻ").get(), 1);
    }

    #[test]
    fn decimal_digit_values() {
        assert_eq!(decimal_digit_value('0'), Some(0));
        assert_eq!(decimal_digit_value('٩'), Some(9));
        assert_eq!(decimal_digit_value('𝟘'), Some(0));
        assert_eq!(decimal_digit_value('a'), None);
        assert_eq!(decimal_digit_value('²'), None);
    }

    #[test]
    fn duration_saturates_on_overflow() {
        assert_eq!(coerce_duration("99999999999999999999").get(), u32::MAX);
    }

    #[test]
    fn only_budget_accommodation_dietary_are_lowercased() {
        let lowered: Vec<Question> = Question::ALL
            .into_iter()
            .filter(|q| q.is_lowercased())
            .collect();
        assert_eq!(
            lowered,
            vec![Question::Budget, Question::Accommodation, Question::Dietary]
        );
        assert_eq!(coerce_text(Question::Budget, "LUXURY"), "luxury");
        assert_eq!(coerce_text(Question::Destination, "Kyoto, JAPAN"), "Kyoto, JAPAN");
    }

    #[test]
    fn question_order_and_indices() {
        for (i, q) in Question::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
            assert_eq!(Question::at(i), Some(*q));
        }
        assert_eq!(Question::COUNT, 9);
        assert_eq!(Question::at(9), None);
        assert_eq!(Question::Destination.next(), Some(Question::Duration));
        assert_eq!(Question::AdditionalReqs.next(), None);
    }

    #[test]
    fn display_matches_serde() {
        for q in Question::ALL {
            let json = serde_json::to_string(&q).unwrap();
            assert_eq!(format!("\"{q}\""), json);
        }
    }

    #[test]
    fn draft_completes_only_when_all_answered() {
        let mut draft = ProfileDraft::default();
        for (i, q) in Question::ALL.into_iter().enumerate() {
            assert!(draft.complete().is_none());
            assert_eq!(draft.answered_count(), i);
            draft.record(q, "Answer");
            assert!(draft.is_answered(q));
        }

        let profile = draft.complete().unwrap();
        assert_eq!(profile.destination, "Answer");
        assert_eq!(profile.duration.get(), 1);
        assert_eq!(profile.budget, "answer");
        assert_eq!(profile.interests, "Answer");
        assert_eq!(profile.accommodation, "answer");
        assert_eq!(profile.dietary, "answer");
        assert_eq!(profile.additional_reqs, "Answer");
    }

    #[test]
    fn empty_answers_are_accepted() {
        let mut draft = ProfileDraft::default();
        draft.record(Question::Mobility, "");
        assert_eq!(draft.mobility.as_deref(), Some(""));
    }

    #[test]
    fn draft_serializes_only_answered_fields() {
        let mut draft = ProfileDraft::default();
        draft.record(Question::Destination, "Lisbon");
        draft.record(Question::Duration, "4 days");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"destination": "Lisbon", "duration": 4})
        );
    }

    #[test]
    fn roles_serialize_lowercase() {
        let entry = ChatEntry::assistant("hi");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({"role": "assistant", "content": "hi"})
        );
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
