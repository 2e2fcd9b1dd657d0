//! Transaction storage.
//!
//! The store owns the three collections and nothing else: no aggregation, no
//! validation. Collections are append/delete only and keep insertion order,
//! which is also the summation order used by the aggregation engine.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Expense, ResultEngine, Revenue, Salary};

/// Backing storage for the three transaction collections.
pub trait TransactionStore: Send + Sync + fmt::Debug {
    fn revenues(&self) -> &[Revenue];
    fn expenses(&self) -> &[Expense];
    fn salaries(&self) -> &[Salary];

    fn insert_revenue(&mut self, revenue: Revenue) -> ResultEngine<()>;
    fn insert_expense(&mut self, expense: Expense) -> ResultEngine<()>;
    fn insert_salary(&mut self, salary: Salary) -> ResultEngine<()>;

    /// Removes a revenue by id, returning it if it was present.
    fn remove_revenue(&mut self, id: Uuid) -> ResultEngine<Option<Revenue>>;
    fn remove_expense(&mut self, id: Uuid) -> ResultEngine<Option<Expense>>;
    fn remove_salary(&mut self, id: Uuid) -> ResultEngine<Option<Salary>>;
}

/// The three collections, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub revenues: Vec<Revenue>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub salaries: Vec<Salary>,
}

fn take_by_id<T, F>(items: &mut Vec<T>, id: Uuid, id_of: F) -> Option<T>
where
    F: Fn(&T) -> Uuid,
{
    let idx = items.iter().position(|item| id_of(item) == id)?;
    Some(items.remove(idx))
}

/// Session-lifetime store. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Collections,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn revenues(&self) -> &[Revenue] {
        &self.data.revenues
    }

    fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    fn salaries(&self) -> &[Salary] {
        &self.data.salaries
    }

    fn insert_revenue(&mut self, revenue: Revenue) -> ResultEngine<()> {
        self.data.revenues.push(revenue);
        Ok(())
    }

    fn insert_expense(&mut self, expense: Expense) -> ResultEngine<()> {
        self.data.expenses.push(expense);
        Ok(())
    }

    fn insert_salary(&mut self, salary: Salary) -> ResultEngine<()> {
        self.data.salaries.push(salary);
        Ok(())
    }

    fn remove_revenue(&mut self, id: Uuid) -> ResultEngine<Option<Revenue>> {
        Ok(take_by_id(&mut self.data.revenues, id, |r| r.id))
    }

    fn remove_expense(&mut self, id: Uuid) -> ResultEngine<Option<Expense>> {
        Ok(take_by_id(&mut self.data.expenses, id, |e| e.id))
    }

    fn remove_salary(&mut self, id: Uuid) -> ResultEngine<Option<Salary>> {
        Ok(take_by_id(&mut self.data.salaries, id, |s| s.id))
    }
}

/// Keeps the collections in memory and rewrites a JSON file after every
/// mutation.
///
/// Writes go to a temporary sibling first and are then renamed over the
/// target, so a crash leaves either the old or the new file. A failed write
/// rolls the in-memory mutation back.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Collections,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> ResultEngine<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                EngineError::Storage(format!("invalid store file {}: {err}", path.display()))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Collections::default(),
            Err(err) => {
                return Err(EngineError::Storage(format!(
                    "failed to read {}: {err}",
                    path.display()
                )));
            }
        };
        tracing::debug!(
            "loaded {} revenues, {} expenses, {} salaries from {}",
            data.revenues.len(),
            data.expenses.len(),
            data.salaries.len(),
            path.display()
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> ResultEngine<()> {
        write_json_file(&self.path, &self.data).map_err(|err| {
            tracing::error!("failed to persist store to {}: {err}", self.path.display());
            EngineError::Storage(format!("state save failed: {err}"))
        })
    }

    /// Applies `apply`, persists, and undoes the change when persisting
    /// fails.
    fn mutate<R>(&mut self, apply: impl FnOnce(&mut Collections) -> R) -> ResultEngine<R> {
        let before = self.data.clone();
        let result = apply(&mut self.data);
        if let Err(err) = self.persist() {
            self.data = before;
            return Err(err);
        }
        Ok(result)
    }
}

impl TransactionStore for JsonFileStore {
    fn revenues(&self) -> &[Revenue] {
        &self.data.revenues
    }

    fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    fn salaries(&self) -> &[Salary] {
        &self.data.salaries
    }

    fn insert_revenue(&mut self, revenue: Revenue) -> ResultEngine<()> {
        self.mutate(|data| data.revenues.push(revenue))
    }

    fn insert_expense(&mut self, expense: Expense) -> ResultEngine<()> {
        self.mutate(|data| data.expenses.push(expense))
    }

    fn insert_salary(&mut self, salary: Salary) -> ResultEngine<()> {
        self.mutate(|data| data.salaries.push(salary))
    }

    fn remove_revenue(&mut self, id: Uuid) -> ResultEngine<Option<Revenue>> {
        if !self.data.revenues.iter().any(|r| r.id == id) {
            return Ok(None);
        }
        self.mutate(|data| take_by_id(&mut data.revenues, id, |r| r.id))
    }

    fn remove_expense(&mut self, id: Uuid) -> ResultEngine<Option<Expense>> {
        if !self.data.expenses.iter().any(|e| e.id == id) {
            return Ok(None);
        }
        self.mutate(|data| take_by_id(&mut data.expenses, id, |e| e.id))
    }

    fn remove_salary(&mut self, id: Uuid) -> ResultEngine<Option<Salary>> {
        if !self.data.salaries.iter().any(|s| s.id == id) {
            return Ok(None);
        }
        self.mutate(|data| take_by_id(&mut data.salaries, id, |s| s.id))
    }
}

fn write_json_file(path: &Path, data: &Collections) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
