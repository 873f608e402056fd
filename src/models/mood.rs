// src/models/mood.rs
use serde::Serialize;
use crate::models::MenuItem;

#[derive(Debug, Clone, Serialize)]
pub struct Mood {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub menu_item_id: &'static str,
    pub reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MoodRecommendation {
    #[serde(flatten)]
    pub mood: Mood,
    pub recommendation: MenuItem,
}
