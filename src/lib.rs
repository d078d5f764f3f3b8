//! Trip Planner — a step-by-step travel questionnaire that ends in one
//! generated itinerary.

pub mod channels;
pub mod config;
pub mod error;
pub mod llm;
pub mod planner;
