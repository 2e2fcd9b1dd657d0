use chrono::Utc;
use uuid::Uuid;

use crate::{
    Engine, EngineError, Expense, Money, NewExpense, NewRevenue, NewSalary, ResultEngine,
    Revenue, Salary, TransactionKind, util::normalize_optional_text,
};

impl Engine {
    /// Records a revenue and returns its id.
    pub fn add_revenue(&mut self, cmd: NewRevenue) -> ResultEngine<Uuid> {
        let driver_id = self.checked_driver(&cmd.driver_id)?;
        let amount = ensure_positive(cmd.amount)?;
        let revenue = Revenue {
            id: Uuid::new_v4(),
            driver_id,
            amount,
            date: cmd.date.unwrap_or_else(|| self.clock.today()),
            created_at: Utc::now(),
        };
        let id = revenue.id;
        tracing::info!("revenue {id}: {} for {}", revenue.amount, revenue.driver_id);
        self.store.insert_revenue(revenue)?;
        Ok(id)
    }

    /// Records an expense and returns its id.
    pub fn add_expense(&mut self, cmd: NewExpense) -> ResultEngine<Uuid> {
        let driver_id = self.checked_driver(&cmd.driver_id)?;
        let amount = ensure_positive(cmd.amount)?;
        let expense = Expense {
            id: Uuid::new_v4(),
            driver_id,
            kind: cmd.kind,
            amount,
            date: cmd.date.unwrap_or_else(|| self.clock.today()),
            description: normalize_optional_text(cmd.description.as_deref()),
            created_at: Utc::now(),
        };
        let id = expense.id;
        tracing::info!(
            "expense {id}: {} ({}) for {}",
            expense.amount,
            expense.kind.as_str(),
            expense.driver_id
        );
        self.store.insert_expense(expense)?;
        Ok(id)
    }

    /// Records a salary payment and returns its id.
    pub fn add_salary(&mut self, cmd: NewSalary) -> ResultEngine<Uuid> {
        let driver_id = self.checked_driver(&cmd.driver_id)?;
        let amount = ensure_positive(cmd.amount)?;
        let salary = Salary {
            id: Uuid::new_v4(),
            driver_id,
            amount,
            date: cmd.date.unwrap_or_else(|| self.clock.today()),
            created_at: Utc::now(),
        };
        let id = salary.id;
        tracing::info!("salary {id}: {} for {}", salary.amount, salary.driver_id);
        self.store.insert_salary(salary)?;
        Ok(id)
    }

    /// Deletes a record by id from the collection of `kind`.
    ///
    /// Ids are never reused, so a deleted id stays unknown forever.
    pub fn delete(&mut self, kind: TransactionKind, id: Uuid) -> ResultEngine<()> {
        let removed = match kind {
            TransactionKind::Revenue => self.store.remove_revenue(id)?.is_some(),
            TransactionKind::Expense => self.store.remove_expense(id)?.is_some(),
            TransactionKind::Salary => self.store.remove_salary(id)?.is_some(),
        };
        if !removed {
            return Err(EngineError::KeyNotFound(id.to_string()));
        }
        tracing::info!("{} {id} deleted", kind.as_str());
        Ok(())
    }

    pub fn delete_revenue(&mut self, id: Uuid) -> ResultEngine<()> {
        self.delete(TransactionKind::Revenue, id)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> ResultEngine<()> {
        self.delete(TransactionKind::Expense, id)
    }

    pub fn delete_salary(&mut self, id: Uuid) -> ResultEngine<()> {
        self.delete(TransactionKind::Salary, id)
    }

    /// Resolves the driver reference (id or name, any case) to its registry id
    /// and, in strict mode, rejects anything the registry does not know.
    /// Lenient engines keep unknown references lower-cased.
    fn checked_driver(&self, driver_id: &str) -> ResultEngine<String> {
        let Some(id) = self.drivers.canonical_id(driver_id) else {
            return Err(EngineError::UnknownDriver("driver must not be empty".to_string()));
        };
        if self.strict_drivers && self.drivers.get(&id).is_none() {
            return Err(EngineError::UnknownDriver(driver_id.trim().to_string()));
        }
        Ok(id)
    }
}

fn ensure_positive(amount: Money) -> ResultEngine<Money> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
    }
    if amount > Money::MAX_ENTRY {
        return Err(EngineError::InvalidAmount(format!(
            "amount must not exceed {}",
            Money::MAX_ENTRY
        )));
    }
    Ok(amount)
}
