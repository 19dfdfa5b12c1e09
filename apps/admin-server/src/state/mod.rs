//! # State Module
//!
//! Shared state handed to every axum handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState (Clone, all fields Arc'd)                                    │
//! │  ├── store      Store         repositories (RwLock tables)             │
//! │  ├── config     ServerConfig  read-only after startup                  │
//! │  ├── cart       CartState     Arc<Mutex<Cart>>                         │
//! │  ├── checkout   CheckoutState Arc<Mutex<SaleFlow>>                     │
//! │  ├── sessions   SessionStore  Arc<RwLock<HashMap<token, session>>>     │
//! │  └── clock      Clock         system time, or fixed in tests          │
//! │                                                                         │
//! │  LOCK ORDER: checkout → cart → store tables                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod session;

pub use cart::CartState;
pub use checkout::CheckoutState;
pub use session::{AdminSession, SessionStore, SESSION_HEADER};

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use workshop_store::Store;

use crate::config::ServerConfig;

/// Source of "now" for ids, invoice dates and date windows.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// Local wall clock.
    System,
    /// Always the same instant.
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::System => Local::now().fixed_offset(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<ServerConfig>,
    pub cart: CartState,
    pub checkout: CheckoutState,
    pub sessions: SessionStore,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig, clock: Clock) -> Self {
        AppState {
            store,
            config: Arc::new(config),
            cart: CartState::new(),
            checkout: CheckoutState::new(),
            sessions: SessionStore::new(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.config.inventory.low_stock_threshold
    }
}
