//! User-facing copy and the itinerary instruction template.

use super::model::{AnswerProfile, Question};

/// Title shown by interactive surfaces.
pub const TITLE: &str = "🗺️ AI Travel Chatbot";

/// Subtitle shown under the title.
pub const SUBTITLE: &str = "Plan your trip through a friendly chatbot! Answer step-by-step questions.";

/// Greeting shown before the first question.
pub const GREETING: &str = "Hello! I'm your friendly travel assistant. Ready to plan your next \
adventure? Let's get started by exploring where you'd like to go!";

/// Header appended right before the generated itinerary.
pub const ITINERARY_HEADER: &str = "🎉 Here is your personalized travel itinerary:";

/// Status shown while the generation call is in flight.
pub const GENERATING_STATUS: &str = "🔍 Generating your itinerary...";

/// Prompt text for each question.
pub fn question_prompt(question: Question) -> &'static str {
    match question {
        Question::Destination => "📍 Where are you traveling to?",
        Question::Duration => "📅 How many days will you stay?",
        Question::Budget => "💰 What is your budget? (low, moderate, luxury)",
        Question::Interests => "🎭 What are your interests? (e.g., sightseeing, adventure, food)",
        Question::Accommodation => {
            "🏨 What type of accommodation do you prefer? (luxury, budget, central location, etc.)"
        }
        Question::Dietary => {
            "🍽️ Any dietary preferences or restrictions? (e.g., vegetarian, halal, none)"
        }
        Question::SpecificInterests => {
            "🔍 Do you have any specific interests within your preferences? \
(e.g., art, local cuisine, historical sites)"
        }
        Question::Mobility => {
            "🚶‍♂️ Do you have any walking tolerance or mobility concerns? \
(e.g., limited walking, wheelchair accessible, none)"
        }
        Question::AdditionalReqs => "✏️ Do you have any additional specific requirements?",
    }
}

/// Build the single instruction sent to the model.
pub fn itinerary_prompt(profile: &AnswerProfile) -> String {
    format!(
        "Plan a detailed {duration}-day itinerary for {destination}. \
The traveler has a {budget} budget, prefers {accommodation} accommodation, \
and is interested in {interests}. Their dietary preference is {dietary}. \
They are specifically interested in {specific_interests}. \
They have mobility concerns: {mobility}. \
Additional requirements: {additional_reqs}. \
Include morning, afternoon, and evening activities for each day.",
        duration = profile.duration,
        destination = profile.destination,
        budget = profile.budget,
        accommodation = profile.accommodation,
        interests = profile.interests,
        dietary = profile.dietary,
        specific_interests = profile.specific_interests,
        mobility = profile.mobility,
        additional_reqs = profile.additional_reqs,
    )
}
