use crate::{Engine, EngineError, HistoryFilter, ResultEngine, TransactionKind};

const HEADER: [&str; 5] = ["Data", "Tipo", "Motorista", "Descrição", "Valor (MZN)"];

impl Engine {
    /// Renders the filtered history as CSV, newest first.
    pub fn export_csv(&self, filter: &HistoryFilter) -> ResultEngine<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(HEADER)?;

        for entry in self.history(filter) {
            let description = match (entry.kind, entry.expense_kind) {
                (TransactionKind::Expense, Some(kind)) => match entry.description.as_deref() {
                    Some(text) => format!("{} - {text}", kind.label()),
                    None => kind.label().to_string(),
                },
                _ => "-".to_string(),
            };
            writer.write_record([
                entry.date.format("%d/%m/%Y").to_string(),
                entry.kind.label().to_string(),
                self.drivers.display_name(&entry.driver_id).to_string(),
                description,
                entry.amount.to_decimal_string(),
            ])?;
        }

        writer.into_inner().map_err(|err| {
            tracing::error!("failed to finalize export: {err}");
            EngineError::Export(csv::Error::from(err.into_error()))
        })
    }
}
