use chrono::NaiveDateTime;

use crate::{
    CompanyFinancials, DriverFinancials, Engine, Entry, Interval, Money, PeriodBounds,
};

impl Engine {
    /// Figures for one registered driver, or `None` if the id is not in the
    /// registry.
    pub fn driver_financials(&self, driver_id: &str) -> Option<DriverFinancials> {
        self.driver_financials_at(driver_id, self.clock.now())
    }

    pub fn driver_financials_at(
        &self,
        driver_id: &str,
        now: NaiveDateTime,
    ) -> Option<DriverFinancials> {
        let driver = self.drivers.get(driver_id)?;
        let bounds = PeriodBounds::at(now);

        let revenues = self.store.revenues();
        let expenses = self.store.expenses();
        let salaries = self.store.salaries();

        let total_revenue = sum_for(revenues, driver_id, None);
        let total_expenses = sum_for(expenses, driver_id, None);
        let total_salary = sum_for(salaries, driver_id, None);

        let daily_revenue = sum_for(revenues, driver_id, Some(&bounds.day));
        let weekly_revenue = sum_for(revenues, driver_id, Some(&bounds.week));
        let monthly_revenue = sum_for(revenues, driver_id, Some(&bounds.month));

        let daily_expenses = sum_for(expenses, driver_id, Some(&bounds.day));
        let weekly_expenses = sum_for(expenses, driver_id, Some(&bounds.week));
        let monthly_expenses = sum_for(expenses, driver_id, Some(&bounds.month));
        let monthly_salary = sum_for(salaries, driver_id, Some(&bounds.month));

        Some(DriverFinancials {
            driver: driver.clone(),
            total_revenue,
            total_expenses,
            total_salary,
            profit: total_revenue - total_expenses - total_salary,
            daily_revenue,
            weekly_revenue,
            monthly_revenue,
            // Salary is paid monthly; only the month and lifetime views carry it.
            daily_profit: daily_revenue - daily_expenses,
            weekly_profit: weekly_revenue - weekly_expenses,
            monthly_profit: monthly_revenue - monthly_expenses - monthly_salary,
        })
    }

    /// Company-wide totals over every record, including records whose driver
    /// is not registered.
    pub fn company_financials(&self) -> CompanyFinancials {
        self.company_financials_at(self.clock.now())
    }

    pub fn company_financials_at(&self, now: NaiveDateTime) -> CompanyFinancials {
        let bounds = PeriodBounds::at(now);
        let revenues = self.store.revenues();

        let total_revenue = sum_all(revenues, None);
        let total_expenses = sum_all(self.store.expenses(), None);
        let total_salaries = sum_all(self.store.salaries(), None);

        CompanyFinancials {
            total_revenue,
            total_expenses,
            total_salaries,
            total_profit: total_revenue - total_expenses - total_salaries,
            daily_revenue: sum_all(revenues, Some(&bounds.day)),
            weekly_revenue: sum_all(revenues, Some(&bounds.week)),
            monthly_revenue: sum_all(revenues, Some(&bounds.month)),
        }
    }

    /// One entry per registered driver, in registry order.
    pub fn all_drivers_financials(&self) -> Vec<DriverFinancials> {
        self.all_drivers_financials_at(self.clock.now())
    }

    pub fn all_drivers_financials_at(&self, now: NaiveDateTime) -> Vec<DriverFinancials> {
        self.drivers
            .all()
            .iter()
            .filter_map(|d| self.driver_financials_at(&d.id, now))
            .collect()
    }
}

fn sum_for<E: Entry>(items: &[E], driver_id: &str, within: Option<&Interval>) -> Money {
    items
        .iter()
        .filter(|e| e.driver_id() == driver_id)
        .filter(|e| within.is_none_or(|i| i.contains(e.date())))
        .map(Entry::amount)
        .sum()
}

fn sum_all<E: Entry>(items: &[E], within: Option<&Interval>) -> Money {
    items
        .iter()
        .filter(|e| within.is_none_or(|i| i.contains(e.date())))
        .map(Entry::amount)
        .sum()
}
