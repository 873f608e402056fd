// src/models/stock.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::enums::{AdjustmentDirection, StockStatus};

/// Critical once stock falls to this share of the minimum
pub const CRITICAL_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: f64,
    pub last_updated: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StockItem {
    pub fn status(&self) -> StockStatus {
        stock_status(self.quantity, self.min_stock)
    }

    /// Fill level of the progress bar, where 100% means twice the minimum
    pub fn fill_percent(&self) -> f64 {
        if self.min_stock <= 0.0 {
            return 100.0;
        }
        (self.quantity / (self.min_stock * 2.0) * 100.0).min(100.0)
    }
}

/// Single threshold policy for every stock view
pub fn stock_status(quantity: f64, min_stock: f64) -> StockStatus {
    if quantity <= min_stock * CRITICAL_RATIO {
        StockStatus::Critical
    } else if quantity <= min_stock {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StockItemResponse {
    #[serde(flatten)]
    pub item: StockItem,
    pub status: StockStatus,
    pub status_label: &'static str,
    pub fill_percent: f64,
}

impl From<&StockItem> for StockItemResponse {
    fn from(item: &StockItem) -> Self {
        let status = item.status();
        Self {
            item: item.clone(),
            status,
            status_label: status.label(),
            fill_percent: item.fill_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockHistoryEntry {
    pub item: String,
    pub action: AdjustmentDirection,
    pub amount: f64,
    pub unit: String,
    pub time: String,
    pub user: String,
}

/// Amount as typed into the form: a JSON number or a raw string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Positive finite amount, or None for anything else
    pub fn parse_positive(&self) -> Option<f64> {
        let value = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub direction: AdjustmentDirection,
    pub amount: AmountInput,
}

#[derive(Debug, Serialize)]
pub struct StockOverview {
    pub items: Vec<StockItemResponse>,
    pub low_stock: Vec<String>,
}
