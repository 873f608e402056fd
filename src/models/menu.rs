// src/models/menu.rs
use serde::{Deserialize, Serialize};
use crate::enums::CoffeeLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in rupiah
    pub price: u64,
    pub image: String,
    pub level: CoffeeLevel,
    pub rating: f32,
    #[serde(default)]
    pub signature: bool,
}

/// Menu card as shown on the menu page
#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    #[serde(flatten)]
    pub item: MenuItem,
    pub level_label: &'static str,
    pub level_description: &'static str,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        let level_label = match item.level {
            CoffeeLevel::Soft => "Soft",
            CoffeeLevel::Medium => "Medium",
            CoffeeLevel::Strong => "Strong",
        };
        Self {
            level_label,
            level_description: item.level.description(),
            item,
        }
    }
}
