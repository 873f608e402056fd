// src/catalog.rs
//! Constant shop data: menu, moods, dashboard figures and the seed values for
//! the locally mutable stock ledger and review list.

use lazy_static::lazy_static;
use crate::enums::{AdjustmentDirection, CoffeeLevel};
use crate::models::*;

const IMAGE_STRONG: &str = "https://images.unsplash.com/photo-1608032797645-8e9ceb991b2b?fit=max&w=1080";
const IMAGE_MEDIUM: &str = "https://images.unsplash.com/photo-1631155989916-4aabcabcce8d?fit=max&w=1080";
const IMAGE_SOFT: &str = "https://images.unsplash.com/photo-1586558284840-c5d6d3dc2259?fit=max&w=1080";
const IMAGE_GULA_AREN: &str = "https://images.unsplash.com/photo-1658043186384-7add63d278fd?fit=max&w=1080";
const IMAGE_SANTAI: &str = "https://images.unsplash.com/photo-1736813133035-6baf4762fd3d?fit=max&w=1080";
const IMAGE_CUSTOM: &str = "https://images.unsplash.com/photo-1648880689952-4d76f2a10c3b?fit=max&w=1080";

/// Id of the blank item opened by the "custom" page
pub const CUSTOM_ITEM_ID: &str = "custom";

fn menu_item(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    image: &str,
    level: CoffeeLevel,
    rating: f32,
    signature: bool,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image: image.to_string(),
        level,
        rating,
        signature,
    }
}

lazy_static! {
    static ref MENU: Vec<MenuItem> = vec![
        menu_item("1", "Kopi Susu Strong", "Kopi hitam + susu sedikit (rasa kopi dominan)",
            15000, IMAGE_STRONG, CoffeeLevel::Strong, 4.7, false),
        menu_item("2", "Kopi Susu Medium", "Seimbang antara kopi & susu",
            13000, IMAGE_MEDIUM, CoffeeLevel::Medium, 4.8, false),
        menu_item("3", "Kopi Susu Soft", "Lebih creamy, cocok pemula",
            12000, IMAGE_SOFT, CoffeeLevel::Soft, 4.6, false),
        menu_item("4", "Kopi Susu Gula Aren", "Manis alami, favorit lokal",
            14000, IMAGE_GULA_AREN, CoffeeLevel::Medium, 4.9, false),
        menu_item("5", "Kopi Susu Santai", "Blend khusus, rasa smooth (Signature House Blend)",
            16000, IMAGE_SANTAI, CoffeeLevel::Medium, 5.0, true),
    ];

    static ref CUSTOM_ITEM: MenuItem = menu_item(CUSTOM_ITEM_ID, "Kopi Custom", "Buat kopi sesuai seleramu",
        15000, IMAGE_CUSTOM, CoffeeLevel::Medium, 5.0, false);
}

static MOODS: &[Mood] = &[
    Mood {
        key: "happy",
        emoji: "😊",
        label: "Happy & Chill",
        description: "Lagi senang dan ingin bersantai",
        menu_item_id: "3",
        reason: "Rasa creamy yang smooth cocok untuk menemani momen santaimu",
    },
    Mood {
        key: "energy",
        emoji: "💪",
        label: "Need Energy",
        description: "Butuh dorongan semangat",
        menu_item_id: "1",
        reason: "Rasa kopi yang kuat akan memberi energi ekstra untuk aktivitasmu",
    },
    Mood {
        key: "zen",
        emoji: "🧘",
        label: "Zen & Focus",
        description: "Ingin fokus dan tenang",
        menu_item_id: "5",
        reason: "Blend signature kami dengan rasa balanced, sempurna untuk meditasi atau bekerja",
    },
    Mood {
        key: "sweet",
        emoji: "❤️",
        label: "Sweet Mood",
        description: "Ingin sesuatu yang manis",
        menu_item_id: "4",
        reason: "Gula aren memberikan rasa manis alami yang menenangkan",
    },
    Mood {
        key: "balanced",
        emoji: "🎯",
        label: "Balanced",
        description: "Ingin yang seimbang",
        menu_item_id: "2",
        reason: "Perpaduan sempurna kopi dan susu untuk pengalaman yang seimbang",
    },
];

// ==================== MENU ====================

pub fn menu_items() -> &'static [MenuItem] {
    &MENU
}

pub fn find_menu_item(id: &str) -> Option<MenuItem> {
    MENU.iter().find(|item| item.id == id).cloned()
}

/// Looks in the menu first, then falls back to the blank custom item
pub fn find_orderable_item(id: &str) -> Option<MenuItem> {
    find_menu_item(id).or_else(|| (id == CUSTOM_ITEM_ID).then(default_custom_item))
}

pub fn default_custom_item() -> MenuItem {
    CUSTOM_ITEM.clone()
}

// ==================== MOODS ====================

pub fn moods() -> &'static [Mood] {
    MOODS
}

pub fn find_mood(key: &str) -> Option<&'static Mood> {
    moods().iter().find(|mood| mood.key.eq_ignore_ascii_case(key))
}

pub fn recommend(mood: &Mood) -> Option<MoodRecommendation> {
    find_menu_item(mood.menu_item_id).map(|recommendation| MoodRecommendation {
        mood: mood.clone(),
        recommendation,
    })
}

pub fn mood_recommendations() -> Vec<MoodRecommendation> {
    moods().iter().filter_map(recommend).collect()
}

// ==================== ADMIN FIGURES ====================

pub fn sales_stats() -> SalesStats {
    SalesStats {
        today_sales: 2_450_000,
        total_orders: 87,
        total_customers: 156,
        revenue: 15_780_000,
    }
}

pub fn top_products() -> Vec<TopProduct> {
    vec![
        TopProduct { name: "Kopi Susu Santai", sales: 45, revenue: 720_000, trend: "+12%" },
        TopProduct { name: "Kopi Susu Gula Aren", sales: 38, revenue: 532_000, trend: "+8%" },
        TopProduct { name: "Kopi Susu Strong", sales: 32, revenue: 480_000, trend: "+5%" },
        TopProduct { name: "Kopi Susu Medium", sales: 28, revenue: 364_000, trend: "+3%" },
        TopProduct { name: "Kopi Susu Soft", sales: 24, revenue: 288_000, trend: "+2%" },
    ]
}

pub fn level_preferences() -> LevelPreferences {
    LevelPreferences { soft: 28, medium: 42, strong: 30 }
}

pub fn recent_sales() -> Vec<RecentSale> {
    vec![
        RecentSale { id: "#001", customer: "Budi Santoso", items: 2, total: 28_000, time: "10 menit lalu", status: "Selesai" },
        RecentSale { id: "#002", customer: "Siti Rahma", items: 1, total: 16_000, time: "25 menit lalu", status: "Selesai" },
        RecentSale { id: "#003", customer: "Andi Wijaya", items: 3, total: 42_000, time: "1 jam lalu", status: "Diproses" },
        RecentSale { id: "#004", customer: "Dewi Lestari", items: 1, total: 14_000, time: "2 jam lalu", status: "Selesai" },
        RecentSale { id: "#005", customer: "Rudi Hartono", items: 2, total: 30_000, time: "3 jam lalu", status: "Selesai" },
    ]
}

// ==================== SEED DATA ====================

fn stock_item(id: &str, name: &str, quantity: f64, unit: &str, min_stock: f64, last_updated: &str) -> StockItem {
    StockItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        min_stock,
        last_updated: last_updated.to_string(),
        updated_at: None,
    }
}

pub fn seed_stock() -> Vec<StockItem> {
    vec![
        stock_item("1", "Biji Kopi", 45.0, "kg", 20.0, "1 jam lalu"),
        stock_item("2", "Susu", 12.0, "liter", 15.0, "2 jam lalu"),
        stock_item("3", "Gula Aren", 8.0, "kg", 10.0, "3 jam lalu"),
        stock_item("4", "Gula Pasir", 25.0, "kg", 10.0, "4 jam lalu"),
        stock_item("5", "Es Batu", 50.0, "kg", 20.0, "30 menit lalu"),
    ]
}

fn history(item: &str, action: AdjustmentDirection, amount: f64, unit: &str, time: &str) -> StockHistoryEntry {
    StockHistoryEntry {
        item: item.to_string(),
        action,
        amount,
        unit: unit.to_string(),
        time: time.to_string(),
        user: "Admin".to_string(),
    }
}

pub fn seed_stock_history() -> Vec<StockHistoryEntry> {
    vec![
        history("Biji Kopi", AdjustmentDirection::Add, 10.0, "kg", "1 jam lalu"),
        history("Susu", AdjustmentDirection::Subtract, 5.0, "liter", "2 jam lalu"),
        history("Gula Aren", AdjustmentDirection::Add, 3.0, "kg", "3 jam lalu"),
        history("Es Batu", AdjustmentDirection::Subtract, 15.0, "kg", "4 jam lalu"),
    ]
}

fn review(id: &str, user_name: &str, rating: u8, comment: &str, date: &str, product: &str) -> Review {
    Review {
        id: id.to_string(),
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
        date: date.to_string(),
        product: product.to_string(),
    }
}

pub fn seed_reviews() -> Vec<Review> {
    vec![
        review("1", "Andi Wijaya", 5, "Kopi Susu Santai-nya enak banget! Signature blend memang beda!",
            "2 hari lalu", "Kopi Susu Santai"),
        review("2", "Siti Rahma", 4, "Suka banget sama fitur custom-nya. Bisa atur sesuai selera!",
            "5 hari lalu", "Kopi Susu Medium (Custom)"),
        review("3", "Budi Santoso", 5, "Kopi Susu Gula Aren favorit! Manisnya pas dan aromanya harum.",
            "1 minggu lalu", "Kopi Susu Gula Aren"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lookup() {
        assert_eq!(menu_items().len(), 5);
        assert_eq!(find_menu_item("2").unwrap().price, 13000);
        assert!(find_menu_item("custom").is_none());
        assert_eq!(find_orderable_item("custom").unwrap().name, "Kopi Custom");
        assert!(find_orderable_item("99").is_none());
    }

    #[test]
    fn test_only_house_blend_is_signature() {
        let signatures: Vec<_> = menu_items().iter().filter(|i| i.signature).collect();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].name, "Kopi Susu Santai");
    }

    #[test]
    fn test_every_mood_resolves_to_menu_item() {
        let recommendations = mood_recommendations();
        assert_eq!(recommendations.len(), moods().len());

        let energy = find_mood("ENERGY").unwrap();
        assert_eq!(recommend(energy).unwrap().recommendation.level, CoffeeLevel::Strong);
        assert!(find_mood("sleepy").is_none());
    }

    #[test]
    fn test_level_preferences_sum_to_hundred() {
        let p = level_preferences();
        assert_eq!(u32::from(p.soft) + u32::from(p.medium) + u32::from(p.strong), 100);
    }

    #[test]
    fn test_seed_data() {
        assert_eq!(seed_stock().len(), 5);
        assert_eq!(seed_stock_history().len(), 4);
        assert_eq!(seed_reviews()[0].user_name, "Andi Wijaya");
    }
}
