// src/storefront.rs
//! The application root: one owner for navigation, session, cart, the two
//! modals and the locally mutable catalogs. Every user intent is a method
//! here; handlers only lock, call and serialize.

use std::sync::{Arc, Mutex, MutexGuard};
use serde::Serialize;
use crate::auth::{self, LoginRequest, RegisterRequest, Session, UserRole};
use crate::cart::{Cart, CartTotals, CustomOrderRequest, LineItem, QuantityChange};
use crate::catalog;
use crate::checkout::{PaymentFlow, PaymentView};
use crate::enums::{Page, PaymentMethod};
use crate::error::{ApiError, ApiResult};
use crate::models::*;
use crate::stock::StockLedger;

pub type SharedStorefront = Arc<Mutex<Storefront>>;

pub fn lock_store(store: &SharedStorefront) -> ApiResult<MutexGuard<'_, Storefront>> {
    store.lock().map_err(|_| ApiError::state_unavailable())
}

/// Label for reviews written in this session
const REVIEW_DATE_LABEL: &str = "Baru saja";
const REVIEW_PRODUCT_LABEL: &str = "Pesanan Terakhir";
const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Default)]
pub struct Storefront {
    page: Page,
    user: Option<Session>,
    cart: Cart,
    custom_order: Option<MenuItem>,
    payment: PaymentFlow,
    reviews: Vec<Review>,
    stock: StockLedger,
}

#[derive(Debug, Serialize)]
pub struct StoreView {
    pub page: Page,
    pub user: Option<Session>,
    pub cart_item_count: usize,
    pub totals: CartTotals,
    pub custom_order: Option<MenuItem>,
    pub payment: PaymentView,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub item_count: usize,
    pub totals: CartTotals,
}

impl Storefront {
    pub fn new() -> Self {
        Self {
            reviews: catalog::seed_reviews(),
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedStorefront {
        Arc::new(Mutex::new(self))
    }

    // ==================== READS ====================

    pub fn user(&self) -> Option<&Session> {
        self.user.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn payment(&self) -> &PaymentFlow {
        &self.payment
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn view(&self) -> StoreView {
        let totals = self.cart.totals();
        StoreView {
            page: self.page,
            user: self.user.clone(),
            cart_item_count: self.cart.item_count(),
            totals,
            custom_order: self.custom_order.clone(),
            payment: self.payment.view(totals.grand_total),
        }
    }

    pub fn cart_view(&self) -> CartView {
        CartView {
            items: self.cart.items().to_vec(),
            item_count: self.cart.item_count(),
            totals: self.cart.totals(),
        }
    }

    pub fn payment_view(&self) -> PaymentView {
        self.payment.view(self.cart.totals().grand_total)
    }

    fn ensure_input_unblocked(&self) -> ApiResult<()> {
        if self.payment.is_busy() {
            return Err(ApiError::payment_in_progress());
        }
        Ok(())
    }

    /// On denial the view falls back to home
    fn require_role<F>(&mut self, check: F) -> ApiResult<Session>
    where
        F: Fn(&UserRole) -> bool,
    {
        match auth::check_permission(self.user.as_ref(), check) {
            Ok(session) => Ok(session.clone()),
            Err(err) => {
                self.page = Page::Home;
                Err(err)
            }
        }
    }

    // ==================== NAVIGATION ====================

    /// Admin pages bounce non-admins home; "custom" opens the blank custom item
    pub fn navigate(&mut self, page: Page) -> ApiResult<Page> {
        self.ensure_input_unblocked()?;

        if page.requires_admin() {
            self.require_role(UserRole::can_view_dashboard)?;
        }

        if page == Page::Custom {
            self.custom_order = Some(catalog::default_custom_item());
            self.page = Page::Home;
            return Ok(self.page);
        }

        self.page = page;
        Ok(self.page)
    }

    // ==================== SESSION ====================

    pub fn login(&mut self, request: &LoginRequest) -> ApiResult<Session> {
        self.ensure_input_unblocked()?;
        let session = auth::authenticate(&request.email, &request.password)?;
        self.start_session(session.clone());
        Ok(session)
    }

    pub fn register(&mut self, request: RegisterRequest) -> ApiResult<Session> {
        self.ensure_input_unblocked()?;
        let session = auth::register(request)?;
        self.start_session(session.clone());
        Ok(session)
    }

    fn start_session(&mut self, session: Session) {
        self.user = Some(session);
        self.page = Page::Home;
    }

    /// Also closes an idle payment modal
    pub fn logout(&mut self) -> ApiResult<Option<Session>> {
        self.ensure_input_unblocked()?;
        if self.payment.is_open() {
            self.payment.cancel()?;
        }
        self.page = Page::Home;
        Ok(self.user.take())
    }

    // ==================== CART ====================

    pub fn add_to_cart(&mut self, menu_item_id: &str, quantity: u32) -> ApiResult<String> {
        self.ensure_input_unblocked()?;
        let item = catalog::find_orderable_item(menu_item_id)
            .ok_or_else(|| ApiError::menu_item_not_found(menu_item_id))?;
        Ok(self.cart.add(LineItem::from_menu_item(&item, quantity)))
    }

    pub fn add_mood_recommendation(&mut self, mood_key: &str) -> ApiResult<MoodRecommendation> {
        self.ensure_input_unblocked()?;
        let recommendation = catalog::find_mood(mood_key)
            .and_then(catalog::recommend)
            .ok_or_else(|| ApiError::mood_not_found(mood_key))?;
        self.cart.add(LineItem::from_menu_item(&recommendation.recommendation, 1));
        Ok(recommendation)
    }

    pub fn change_quantity(&mut self, line_id: &str, delta: i64) -> ApiResult<QuantityChange> {
        self.ensure_input_unblocked()?;
        match self.cart.change_quantity(line_id, delta) {
            QuantityChange::NotFound => Err(ApiError::line_item_not_found(line_id)),
            QuantityChange::OutOfRange => Err(ApiError::ValidationError(
                "Quantity is out of range".to_string(),
            )),
            change => Ok(change),
        }
    }

    pub fn remove_from_cart(&mut self, line_id: &str) -> ApiResult<bool> {
        self.ensure_input_unblocked()?;
        Ok(self.cart.remove(line_id))
    }

    // ==================== CUSTOM ORDER ====================

    pub fn open_custom_order(&mut self, menu_item_id: Option<&str>) -> ApiResult<MenuItem> {
        self.ensure_input_unblocked()?;
        let item = match menu_item_id {
            Some(id) => catalog::find_orderable_item(id).ok_or_else(|| ApiError::menu_item_not_found(id))?,
            None => catalog::default_custom_item(),
        };
        self.custom_order = Some(item.clone());
        Ok(item)
    }

    pub fn close_custom_order(&mut self) -> ApiResult<()> {
        self.ensure_input_unblocked()?;
        self.custom_order = None;
        Ok(())
    }

    /// Adds the customized item as its own line and closes the modal
    pub fn add_custom_order(&mut self, request: CustomOrderRequest) -> ApiResult<String> {
        self.ensure_input_unblocked()?;
        let item = self
            .custom_order
            .take()
            .ok_or_else(|| ApiError::bad_request("No item selected for customization"))?;
        let line = LineItem::customized(&item, request.quantity, request.customization);
        Ok(self.cart.add(line))
    }

    // ==================== CHECKOUT ====================

    /// Opens the payment modal; without a session the view switches to login
    pub fn checkout(&mut self) -> ApiResult<PaymentView> {
        self.ensure_input_unblocked()?;
        if self.user.is_none() {
            self.page = Page::Login;
            return Err(ApiError::login_required());
        }
        if self.cart.is_empty() {
            return Err(ApiError::bad_request("Cart is empty"));
        }
        self.payment.open()?;
        Ok(self.payment_view())
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> ApiResult<PaymentView> {
        self.payment.select_method(method)?;
        Ok(self.payment_view())
    }

    /// idle -> processing; the caller schedules the timers
    pub fn begin_payment(&mut self) -> ApiResult<PaymentView> {
        let Some(session) = self.user.as_ref() else {
            self.page = Page::Login;
            return Err(ApiError::login_required());
        };
        if !session.role.can_checkout() {
            return Err(ApiError::Forbidden("This account cannot place orders".to_string()));
        }
        if self.cart.is_empty() {
            return Err(ApiError::bad_request("Cart is empty"));
        }
        self.payment.begin()?;
        Ok(self.payment_view())
    }

    pub fn cancel_payment(&mut self) -> ApiResult<PaymentView> {
        self.payment.cancel()?;
        Ok(self.payment_view())
    }

    /// First timer: processing -> success
    pub fn payment_succeeded(&mut self) -> bool {
        self.payment.mark_success()
    }

    /// Second timer: success -> idle, cart cleared, back to home
    pub fn complete_payment(&mut self) -> bool {
        if !self.payment.finish() {
            return false;
        }
        self.cart.clear();
        self.page = Page::Home;
        true
    }

    // ==================== REVIEWS ====================

    pub fn submit_review(&mut self, request: CreateReviewRequest) -> ApiResult<Review> {
        self.ensure_input_unblocked()?;
        let review = Review {
            id: uuid::Uuid::new_v4().to_string(),
            user_name: self
                .user
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| ANONYMOUS.to_string()),
            rating: request.rating,
            comment: request.comment.trim().to_string(),
            date: REVIEW_DATE_LABEL.to_string(),
            product: REVIEW_PRODUCT_LABEL.to_string(),
        };
        self.reviews.insert(0, review.clone());
        Ok(review)
    }

    // ==================== ADMIN ====================

    pub fn dashboard(&mut self) -> ApiResult<DashboardResponse> {
        self.require_role(UserRole::can_view_dashboard)?;
        Ok(DashboardResponse {
            stats: catalog::sales_stats(),
            top_products: catalog::top_products(),
            preferences: catalog::level_preferences(),
            recent_sales: catalog::recent_sales(),
            stock: self.stock.responses(),
            stock_warnings: self.stock.low_stock_names(),
        })
    }

    pub fn stock_overview(&mut self) -> ApiResult<StockOverview> {
        self.require_role(UserRole::can_manage_stock)?;
        Ok(StockOverview {
            items: self.stock.responses(),
            low_stock: self.stock.low_stock_names(),
        })
    }

    pub fn stock_history(&mut self) -> ApiResult<Vec<StockHistoryEntry>> {
        self.require_role(UserRole::can_manage_stock)?;
        Ok(self.stock.history().to_vec())
    }

    pub fn adjust_stock(&mut self, id: &str, request: &AdjustStockRequest) -> ApiResult<StockItemResponse> {
        self.ensure_input_unblocked()?;
        let admin = self.require_role(UserRole::can_manage_stock)?;
        let item = self.stock.adjust(id, request.direction, &request.amount, &admin.name)?;
        Ok(StockItemResponse::from(&item))
    }
}
