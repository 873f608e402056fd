// src/checkout.rs
//! Payment simulator: idle -> processing -> success -> idle.
//!
//! Both transitions after `pay` are driven by fixed-delay timers. There is no
//! failure path, no cancellation once processing, and no retry.

use std::time::Duration;
use serde::Serialize;
use tracing::Instrument;
use crate::config::CheckoutConfig;
use crate::enums::{PaymentMethod, PaymentState};
use crate::error::{ApiError, ApiResult};
use crate::storefront::{lock_store, SharedStorefront, Storefront};

#[derive(Debug, Clone, Default)]
pub struct PaymentFlow {
    modal_open: bool,
    state: PaymentState,
    method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub modal_open: bool,
    pub state: PaymentState,
    pub method: PaymentMethod,
    pub hint: &'static str,
    pub total: f64,
}

impl PaymentFlow {
    pub fn state(&self) -> PaymentState {
        self.state
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    /// True while the modal blocks all other input
    pub fn is_busy(&self) -> bool {
        self.state != PaymentState::Idle
    }

    pub fn view(&self, total: f64) -> PaymentView {
        PaymentView {
            modal_open: self.modal_open,
            state: self.state,
            method: self.method,
            hint: self.method.hint(),
            total,
        }
    }

    pub fn open(&mut self) -> ApiResult<()> {
        self.ensure_idle()?;
        self.modal_open = true;
        Ok(())
    }

    pub fn select_method(&mut self, method: PaymentMethod) -> ApiResult<()> {
        self.ensure_open()?;
        self.ensure_idle()?;
        self.method = method;
        Ok(())
    }

    /// idle -> processing
    pub fn begin(&mut self) -> ApiResult<()> {
        self.ensure_open()?;
        self.ensure_idle()?;
        self.state = PaymentState::Processing;
        Ok(())
    }

    /// processing -> success; false if the flow was not processing
    pub fn mark_success(&mut self) -> bool {
        if self.state != PaymentState::Processing {
            return false;
        }
        self.state = PaymentState::Success;
        true
    }

    /// success -> idle, closing the modal and resetting the method
    pub fn finish(&mut self) -> bool {
        if self.state != PaymentState::Success {
            return false;
        }
        *self = PaymentFlow::default();
        true
    }

    pub fn cancel(&mut self) -> ApiResult<()> {
        self.ensure_idle()?;
        self.modal_open = false;
        Ok(())
    }

    fn ensure_idle(&self) -> ApiResult<()> {
        if self.is_busy() {
            return Err(ApiError::payment_in_progress());
        }
        Ok(())
    }

    fn ensure_open(&self) -> ApiResult<()> {
        if !self.is_open() {
            return Err(ApiError::bad_request("Payment is not open, check out first"));
        }
        Ok(())
    }
}

// ==================== TIMERS ====================

#[derive(Debug, Clone, Copy)]
pub struct PaymentDelays {
    pub processing: Duration,
    pub confirmation: Duration,
}

impl From<&CheckoutConfig> for PaymentDelays {
    fn from(config: &CheckoutConfig) -> Self {
        Self {
            processing: Duration::from_millis(config.processing_delay_ms),
            confirmation: Duration::from_millis(config.confirmation_delay_ms),
        }
    }
}

impl Default for PaymentDelays {
    fn default() -> Self {
        Self::from(&CheckoutConfig::default())
    }
}

/// Fire-and-forget timer task for a payment that just entered `processing`
pub fn spawn_payment_timers(store: SharedStorefront, delays: PaymentDelays) {
    let span = tracing::info_span!(
        "payment_timers",
        processing_ms = delays.processing.as_millis() as u64,
        confirmation_ms = delays.confirmation.as_millis() as u64
    );
    actix_web::rt::spawn(run_payment_timers(store, delays).instrument(span));
}

pub async fn run_payment_timers(store: SharedStorefront, delays: PaymentDelays) {
    tokio::time::sleep(delays.processing).await;
    if !advance(&store, |storefront| storefront.payment_succeeded()) {
        return;
    }
    log::info!("Payment confirmed, closing in {:?}", delays.confirmation);

    tokio::time::sleep(delays.confirmation).await;
    if advance(&store, |storefront| storefront.complete_payment()) {
        log::info!("Order completed, cart cleared");
    }
}

fn advance<F>(store: &SharedStorefront, step: F) -> bool
where
    F: FnOnce(&mut Storefront) -> bool,
{
    match lock_store(store) {
        Ok(mut storefront) => {
            let advanced = step(&mut *storefront);
            if !advanced {
                log::warn!("Payment timer fired in unexpected state {}", storefront.payment().state());
            }
            advanced
        }
        Err(err) => {
            log::error!("Payment timer could not reach the storefront: {}", err);
            false
        }
    }
}
