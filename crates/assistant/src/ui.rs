//! Chat reply rendering.

use std::fmt::Write;

use engine::{
    CompanyFinancials, DriverFinancials, DriverRegistry, HistoryEntry, Money, TransactionKind,
};

pub(crate) const HELP: &str = "📖 Comandos disponíveis:\n\
• \"receita 5000 Pompilio\" para registar uma receita\n\
• \"despesa combustível 1500 Tito\" para registar uma despesa (combustível, manutenção, multas, outros)\n\
• \"salário John 8000\" para registar um salário\n\
• \"mostrar receitas\", \"mostrar despesas\" ou \"mostrar salários\" para ver os últimos registos\n\
• \"motoristas\" para ver a lista de motoristas\n\
• \"resumo\" para ver o resumo financeiro";

pub(crate) const WAIT_MESSAGE: &str =
    "Aguarde, ainda estou a processar a mensagem anterior.";

pub(crate) fn render_added(kind: TransactionKind, amount: Money, driver: &str) -> String {
    match kind {
        TransactionKind::Revenue => format!("✅ Receita de {amount} registrada para {driver}!"),
        TransactionKind::Expense => format!("✅ Despesa de {amount} registrada para {driver}!"),
        TransactionKind::Salary => format!("✅ Salário de {amount} registrado para {driver}!"),
    }
}

pub(crate) fn render_unknown_driver(driver_id: &str) -> String {
    format!("⚠️ Motorista desconhecido: {driver_id}. Nada foi registrado.")
}

pub(crate) fn render_recent(
    kind: TransactionKind,
    entries: &[HistoryEntry],
    total: Money,
    drivers: &DriverRegistry,
) -> String {
    let (title, none_yet) = match kind {
        TransactionKind::Revenue => ("💰 Últimas receitas", "Ainda não há receitas registradas."),
        TransactionKind::Expense => ("🧾 Últimas despesas", "Ainda não há despesas registradas."),
        TransactionKind::Salary => ("👷 Últimos salários", "Ainda não há salários registrados."),
    };
    if entries.is_empty() {
        return none_yet.to_string();
    }

    let mut out = format!("{title}:\n");
    for entry in entries {
        let _ = write!(
            out,
            "• {} · {} · {}",
            entry.date.format("%d/%m/%Y"),
            drivers.display_name(&entry.driver_id),
            entry.amount
        );
        if let Some(expense_kind) = entry.expense_kind {
            let _ = write!(out, " · {}", expense_kind.label());
        }
        out.push('\n');
    }
    let _ = write!(out, "\nTotal: {total}");
    out
}

pub(crate) fn render_drivers(financials: &[DriverFinancials]) -> String {
    if financials.is_empty() {
        return "Ainda não há motoristas registrados.".to_string();
    }
    let mut out = "🚚 Motoristas:".to_string();
    for f in financials {
        let _ = write!(
            out,
            "\n• {} ({}): receita {}, lucro {}",
            f.driver.name, f.driver.vehicle, f.total_revenue, f.profit
        );
    }
    out
}

/// Short totals block appended to free-form answers.
pub(crate) fn render_company_short(company: &CompanyFinancials) -> String {
    format!(
        "📊 Resumo atual:\n• Receitas: {}\n• Despesas: {}\n• Salários: {}\n• Lucro: {}",
        company.total_revenue,
        company.total_expenses,
        company.total_salaries,
        company.total_profit
    )
}

pub(crate) fn render_summary(company: &CompanyFinancials, drivers: &[DriverFinancials]) -> String {
    let mut out = format!(
        "{}\n• Receita hoje: {}\n• Receita da semana: {}\n• Receita do mês: {}",
        render_company_short(company),
        company.daily_revenue,
        company.weekly_revenue,
        company.monthly_revenue
    );
    if !drivers.is_empty() {
        out.push_str("\n\n🚚 Por motorista:");
        for f in drivers {
            let _ = write!(
                out,
                "\n• {}: lucro {} ({})",
                f.driver.name,
                f.profit,
                profit_status(f.profit)
            );
        }
    }
    out
}

fn profit_status(profit: Money) -> &'static str {
    if profit.is_positive() {
        "lucrativo ✅"
    } else {
        "precisa de atenção ⚠️"
    }
}
