// src/models/dashboard.rs
use serde::Serialize;
use crate::models::StockItemResponse;

#[derive(Debug, Clone, Serialize)]
pub struct SalesStats {
    pub today_sales: u64,
    pub total_orders: u32,
    pub total_customers: u32,
    pub revenue: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub name: &'static str,
    pub sales: u32,
    pub revenue: u64,
    pub trend: &'static str,
}

/// Share of orders per coffee level, in percent
#[derive(Debug, Clone, Serialize)]
pub struct LevelPreferences {
    pub soft: u8,
    pub medium: u8,
    pub strong: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentSale {
    pub id: &'static str,
    pub customer: &'static str,
    pub items: u32,
    pub total: u64,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: SalesStats,
    pub top_products: Vec<TopProduct>,
    pub preferences: LevelPreferences,
    pub recent_sales: Vec<RecentSale>,
    pub stock: Vec<StockItemResponse>,
    pub stock_warnings: Vec<String>,
}
