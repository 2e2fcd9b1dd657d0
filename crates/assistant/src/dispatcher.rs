//! Applies a classified reply to the engine and renders the answer.

use api_types::classifier::ClassifierReply;
use engine::{Engine, EngineError, NewExpense, NewRevenue, NewSalary, TransactionKind};

use crate::{
    intent::{Draft, Intent},
    ui,
};

/// Records shown by the list commands.
const RECENT_LIMIT: usize = 5;

/// Dispatches one reply. Always produces exactly one text and performs at
/// most one store mutation; engine failures are folded into the text.
pub fn dispatch(engine: &mut Engine, reply: &ClassifierReply) -> String {
    let intent = Intent::from_reply(reply, engine.drivers());
    tracing::debug!("dispatching {intent:?}");
    let response = reply.response.as_str();

    match intent {
        Intent::AddRevenue(Some(draft)) => {
            let result = engine.add_revenue(NewRevenue::new(&draft.driver_id, draft.amount));
            added(engine, response, TransactionKind::Revenue, &draft, result)
        }
        Intent::AddExpense {
            draft: Some(draft),
            kind,
            description,
        } => {
            let cmd =
                NewExpense::new(&draft.driver_id, kind, draft.amount).description(description);
            let result = engine.add_expense(cmd);
            added(engine, response, TransactionKind::Expense, &draft, result)
        }
        Intent::AddSalary(Some(draft)) => {
            let result = engine.add_salary(NewSalary::new(&draft.driver_id, draft.amount));
            added(engine, response, TransactionKind::Salary, &draft, result)
        }
        Intent::AddRevenue(None)
        | Intent::AddExpense { draft: None, .. }
        | Intent::AddSalary(None)
        | Intent::Greeting
        | Intent::Unrecognized => response.to_string(),
        Intent::ListDrivers => ui::render_drivers(&engine.all_drivers_financials()),
        Intent::ListRevenues => list(engine, TransactionKind::Revenue),
        Intent::ListExpenses => list(engine, TransactionKind::Expense),
        Intent::ListSalaries => list(engine, TransactionKind::Salary),
        Intent::Summary => ui::render_summary(
            &engine.company_financials(),
            &engine.all_drivers_financials(),
        ),
        Intent::Help => ui::HELP.to_string(),
        Intent::Question => format!(
            "{response}\n\n{}",
            ui::render_company_short(&engine.company_financials())
        ),
    }
}

fn added<T>(
    engine: &Engine,
    response: &str,
    kind: TransactionKind,
    draft: &Draft,
    result: Result<T, EngineError>,
) -> String {
    let note = match result {
        Ok(_) => ui::render_added(
            kind,
            draft.amount,
            engine.drivers().display_name(&draft.driver_id),
        ),
        Err(EngineError::UnknownDriver(id)) => ui::render_unknown_driver(&id),
        Err(err) => {
            tracing::error!("failed to record {}: {err}", kind.as_str());
            return response.to_string();
        }
    };
    format!("{response}\n\n{note}")
}

fn list(engine: &Engine, kind: TransactionKind) -> String {
    ui::render_recent(
        kind,
        &engine.recent(kind, RECENT_LIMIT),
        engine.lifetime_total(kind),
        engine.drivers(),
    )
}

#[cfg(test)]
mod tests {
    use api_types::classifier::CommandData;
    use chrono::NaiveDate;
    use engine::{ExpenseKind, FixedClock, Money};
    use serde_json::json;

    use super::*;

    fn engine() -> Engine {
        let now = NaiveDate::from_ymd_opt(2026, 10, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Engine::builder().clock(FixedClock(now)).build()
    }

    fn reply(kind: &str, data: Option<CommandData>) -> ClassifierReply {
        ClassifierReply {
            kind: kind.to_string(),
            data,
            response: "Entendido.".to_string(),
            understood: true,
        }
    }

    fn data(driver: &str, amount: serde_json::Value) -> Option<CommandData> {
        Some(CommandData {
            driver: Some(driver.to_string()),
            amount: Some(amount),
            ..CommandData::default()
        })
    }

    #[test]
    fn expense_is_recorded_with_defaults() {
        let mut engine = engine();
        let mut payload = data("Tito", json!(1500));
        if let Some(d) = payload.as_mut() {
            d.expense_type = Some("combustível".to_string());
        }
        let text = dispatch(&mut engine, &reply("expense", payload));

        assert_eq!(
            text,
            "Entendido.\n\n✅ Despesa de 1.500,00 MT registrada para Tito!"
        );
        let expense = &engine.expenses()[0];
        assert_eq!(expense.driver_id, "tito");
        assert_eq!(expense.kind, ExpenseKind::Fuel);
        assert_eq!(expense.description.as_deref(), Some("Via chat"));
        assert_eq!(engine.driver_financials("tito").unwrap().daily_profit, Money::new(-150_000));
    }

    #[test]
    fn invalid_add_is_a_silent_no_op() {
        let mut engine = engine();
        let text = dispatch(&mut engine, &reply("revenue", data("pompilio", json!(-3))));
        assert_eq!(text, "Entendido.");
        assert!(engine.revenues().is_empty());
    }

    #[test]
    fn understood_flag_does_not_block_action() {
        let mut engine = engine();
        let mut r = reply("salary", data("john", json!("8000")));
        r.understood = false;
        dispatch(&mut engine, &r);
        assert_eq!(engine.salaries().len(), 1);
    }

    #[test]
    fn strict_engine_notes_unknown_driver() {
        let mut engine = Engine::builder().strict_drivers(true).build();
        let text = dispatch(&mut engine, &reply("revenue", data("maria", json!(10))));
        assert!(text.ends_with("⚠️ Motorista desconhecido: maria. Nada foi registrado."));
        assert!(engine.revenues().is_empty());
    }

    #[test]
    fn list_shows_five_most_recent_and_lifetime_total() {
        let mut engine = engine();
        for amount in 1..=6 {
            dispatch(&mut engine, &reply("revenue", data("john", json!(amount))));
        }
        let text = dispatch(&mut engine, &reply("list_revenues", None));
        assert_eq!(text.matches("• ").count(), 5);
        assert!(text.ends_with("Total: 21,00 MT"));
        assert!(!text.contains("· 1,00 MT"));
    }

    #[test]
    fn empty_lists_say_none_yet() {
        let mut engine = engine();
        let text = dispatch(&mut engine, &reply("list_expenses", None));
        assert_eq!(text, "Ainda não há despesas registradas.");
    }

    #[test]
    fn summary_classifies_profit() {
        let mut engine = engine();
        dispatch(&mut engine, &reply("revenue", data("pompilio", json!(100))));
        let text = dispatch(&mut engine, &reply("summary", None));
        assert!(text.contains("• Pompilio: lucro 100,00 MT (lucrativo ✅)"));
        assert!(text.contains("• John: lucro 0,00 MT (precisa de atenção ⚠️)"));
    }

    #[test]
    fn question_appends_company_totals() {
        let mut engine = engine();
        let text = dispatch(&mut engine, &reply("question", None));
        assert!(text.starts_with("Entendido.\n\n📊 Resumo atual:"));
    }

    #[test]
    fn help_and_greeting_do_not_touch_the_store() {
        let mut engine = engine();
        assert!(dispatch(&mut engine, &reply("help", None)).starts_with("📖"));
        assert_eq!(dispatch(&mut engine, &reply("greeting", None)), "Entendido.");
        assert_eq!(dispatch(&mut engine, &reply("weather", None)), "Entendido.");
        assert!(engine.history(&Default::default()).is_empty());
    }
}
