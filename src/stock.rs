// src/stock.rs
//! In-memory stock ledger for the admin stock page

use chrono::Utc;
use crate::catalog;
use crate::enums::AdjustmentDirection;
use crate::error::{ApiError, ApiResult};
use crate::models::{AmountInput, StockHistoryEntry, StockItem, StockItemResponse};

/// Label stamped on an item right after an adjustment
pub const JUST_NOW: &str = "Baru saja";

#[derive(Debug, Clone)]
pub struct StockLedger {
    items: Vec<StockItem>,
    history: Vec<StockHistoryEntry>,
}

impl Default for StockLedger {
    fn default() -> Self {
        Self {
            items: catalog::seed_stock(),
            history: catalog::seed_stock_history(),
        }
    }
}

impl StockLedger {
    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    /// Newest first
    pub fn history(&self) -> &[StockHistoryEntry] {
        &self.history
    }

    pub fn responses(&self) -> Vec<StockItemResponse> {
        self.items().iter().map(StockItemResponse::from).collect()
    }

    /// Names of items at or below their minimum
    pub fn low_stock_names(&self) -> Vec<String> {
        self.items()
            .iter()
            .filter(|item| item.status().needs_restock())
            .map(|item| item.name.clone())
            .collect()
    }

    /// Validates the amount first, so a rejected request changes nothing.
    /// Subtraction clamps at zero.
    pub fn adjust(
        &mut self,
        id: &str,
        direction: AdjustmentDirection,
        amount: &AmountInput,
        user: &str,
    ) -> ApiResult<StockItem> {
        let amount = amount.parse_positive().ok_or_else(ApiError::invalid_amount)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ApiError::stock_item_not_found(id))?;

        item.quantity = match direction {
            AdjustmentDirection::Add => item.quantity + amount,
            AdjustmentDirection::Subtract => (item.quantity - amount).max(0.0),
        };
        item.last_updated = JUST_NOW.to_string();
        item.updated_at = Some(Utc::now());

        self.history.insert(0, StockHistoryEntry {
            item: item.name.clone(),
            action: direction,
            amount,
            unit: item.unit.clone(),
            time: JUST_NOW.to_string(),
            user: user.to_string(),
        });

        Ok(item.clone())
    }
}
