//! Finance engine for a small road-transport company.
//!
//! The [`Engine`] owns the transaction store, the driver registry and the
//! clock. Every financial figure is recomputed from the raw collections on
//! each call: there is no cache and therefore nothing to invalidate.

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{NewExpense, NewRevenue, NewSalary};
pub use drivers::{Driver, DriverRegistry};
pub use error::EngineError;
pub use expense_kind::ExpenseKind;
pub use financials::{CompanyFinancials, DriverFinancials};
pub use money::Money;
pub use ops::{HistoryEntry, HistoryFilter};
pub use periods::{Interval, PeriodBounds};
pub use store::{Collections, JsonFileStore, MemoryStore, TransactionStore};
pub use transactions::{Entry, Expense, Revenue, Salary, TransactionKind};

mod clock;
mod commands;
mod drivers;
mod error;
mod expense_kind;
mod financials;
mod money;
mod ops;
mod periods;
mod store;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    drivers: DriverRegistry,
    store: Box<dyn TransactionStore>,
    clock: Box<dyn Clock>,
    strict_drivers: bool,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn drivers(&self) -> &DriverRegistry {
        &self.drivers
    }

    pub fn revenues(&self) -> &[Revenue] {
        self.store.revenues()
    }

    pub fn expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    pub fn salaries(&self) -> &[Salary] {
        self.store.salaries()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    drivers: Option<DriverRegistry>,
    store: Option<Box<dyn TransactionStore>>,
    clock: Option<Box<dyn Clock>>,
    strict_drivers: bool,
}

impl EngineBuilder {
    /// Replace the default three-driver registry.
    pub fn drivers(mut self, drivers: DriverRegistry) -> EngineBuilder {
        self.drivers = Some(drivers);
        self
    }

    /// Pass the backing store. Defaults to an empty [`MemoryStore`].
    pub fn store(mut self, store: impl TransactionStore + 'static) -> EngineBuilder {
        self.store = Some(Box::new(store));
        self
    }

    /// Pass the clock. Defaults to [`SystemClock::local`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> EngineBuilder {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Reject writes that reference drivers outside the registry.
    pub fn strict_drivers(mut self, strict: bool) -> EngineBuilder {
        self.strict_drivers = strict;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            drivers: self.drivers.unwrap_or_default(),
            store: self
                .store
                .unwrap_or_else(|| Box::new(MemoryStore::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::local())),
            strict_drivers: self.strict_drivers,
        }
    }
}
