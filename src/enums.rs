// src/enums.rs
//! Storefront vocabularies, all generated by `define_status_enum!`

use serde::{Serialize, Deserialize};

/// Generates a string-backed enum with as_str, from_str, is_valid, all_values and Display
macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $str_val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        $vis enum $name {
            $( #[serde(rename = $str_val)] $variant ),+
        }

        #[allow(dead_code)]
        impl $name {
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $str_val ),+
                }
            }

            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_lowercase().as_str() {
                    $( $str_val => Some($name::$variant), )+
                    _ => None,
                }
            }

            #[inline]
            pub fn is_valid(s: &str) -> bool {
                Self::from_str(s).is_some()
            }

            pub const fn all_values() -> &'static [&'static str] {
                &[ $( $str_val ),+ ]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_str(s).ok_or_else(|| format!("Invalid {}: '{}'", stringify!($name), s))
            }
        }
    };
}

define_status_enum! {
    /// Coffee intensity, both as a menu item's default and as a customization
    pub enum CoffeeLevel {
        Soft => "soft",
        Medium => "medium",
        Strong => "strong",
    }
}

impl Default for CoffeeLevel {
    fn default() -> Self { Self::Medium }
}

impl CoffeeLevel {
    pub fn description(&self) -> &'static str {
        match self {
            CoffeeLevel::Soft => "Lebih banyak susu, rasa kopi ringan",
            CoffeeLevel::Medium => "Seimbang antara kopi dan susu",
            CoffeeLevel::Strong => "Rasa kopi lebih dominan, susu sedikit",
        }
    }
}

define_status_enum! {
    pub enum Temperature {
        Hot => "hot",
        Ice => "ice",
    }
}

impl Default for Temperature {
    fn default() -> Self { Self::Ice }
}

define_status_enum! {
    /// Views the storefront can route to
    pub enum Page {
        Home => "home",
        Menu => "menu",
        Custom => "custom",
        Cart => "cart",
        Mood => "mood",
        Login => "login",
        Reviews => "reviews",
        Admin => "admin",
        StockManagement => "stock-management",
    }
}

impl Default for Page {
    fn default() -> Self { Self::Home }
}

impl Page {
    pub fn requires_admin(&self) -> bool {
        matches!(self, Page::Admin | Page::StockManagement)
    }
}

define_status_enum! {
    pub enum PaymentMethod {
        Ewallet => "ewallet",
        Cash => "cash",
    }
}

impl Default for PaymentMethod {
    fn default() -> Self { Self::Ewallet }
}

impl PaymentMethod {
    pub fn hint(&self) -> &'static str {
        match self {
            PaymentMethod::Ewallet => "Pastikan saldo e-wallet Anda mencukupi",
            PaymentMethod::Cash => "Siapkan uang pas untuk mempercepat transaksi",
        }
    }
}

define_status_enum! {
    /// Payment simulator phases: idle -> processing -> success -> idle
    pub enum PaymentState {
        Idle => "idle",
        Processing => "processing",
        Success => "success",
    }
}

impl Default for PaymentState {
    fn default() -> Self { Self::Idle }
}

define_status_enum! {
    pub enum StockStatus {
        Normal => "normal",
        Low => "low",
        Critical => "critical",
    }
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Normal => "Aman",
            StockStatus::Low => "Menipis",
            StockStatus::Critical => "Kritis",
        }
    }

    /// Low and critical both need reordering
    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::Normal)
    }
}

define_status_enum! {
    pub enum AdjustmentDirection {
        Add => "add",
        Subtract => "subtract",
    }
}
