use chrono::{NaiveDate, NaiveDateTime};

use engine::{
    Engine, EngineError, ExpenseKind, FixedClock, HistoryFilter, Money, NewExpense, NewRevenue,
    NewSalary, TransactionKind,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn mt(major: i64) -> Money {
    Money::new(major * 100)
}

/// 2026-10-21 (Wednesday) at noon.
fn engine() -> Engine {
    Engine::builder()
        .clock(FixedClock(at(2026, 10, 21, 12, 0)))
        .build()
}

#[test]
fn expense_today_feeds_every_period() {
    let mut engine = engine();
    engine
        .add_expense(NewExpense::new("tito", ExpenseKind::Fuel, mt(1500)))
        .unwrap();

    let tito = engine.driver_financials("tito").unwrap();
    assert_eq!(tito.total_expenses, mt(1500));
    assert_eq!(tito.daily_profit, mt(-1500));
    assert_eq!(tito.weekly_profit, mt(-1500));
    assert_eq!(tito.monthly_profit, mt(-1500));
    assert_eq!(tito.profit, mt(-1500));
    assert_eq!(engine.expenses()[0].date, at(2026, 10, 21, 0, 0));
}

#[test]
fn salary_hits_monthly_and_lifetime_profit_only() {
    let mut engine = engine();
    engine.add_revenue(NewRevenue::new("john", mt(5000))).unwrap();
    engine.add_salary(NewSalary::new("john", mt(8000))).unwrap();

    let john = engine.driver_financials("john").unwrap();
    assert_eq!(john.daily_profit, mt(5000));
    assert_eq!(john.weekly_profit, mt(5000));
    assert_eq!(john.monthly_profit, mt(-3000));
    assert_eq!(john.profit, mt(-3000));

    let company = engine.company_financials();
    assert_eq!(company.total_revenue, mt(5000));
    assert_eq!(company.total_salaries, mt(8000));
    assert_eq!(company.total_profit, mt(-3000));
    assert_eq!(company.daily_revenue, mt(5000));
}

#[test]
fn period_boundaries_are_inclusive() {
    let mut engine = engine();
    // Monday 00:00 of the current week and the last minute of Sunday.
    engine
        .add_revenue(NewRevenue::new("pompilio", mt(100)).date(at(2026, 10, 19, 0, 0)))
        .unwrap();
    engine
        .add_revenue(NewRevenue::new("pompilio", mt(10)).date(at(2026, 10, 25, 23, 59)))
        .unwrap();
    // Previous Sunday: outside the week, inside the month.
    engine
        .add_revenue(NewRevenue::new("pompilio", mt(1)).date(at(2026, 10, 18, 23, 59)))
        .unwrap();
    // First instant of next month: lifetime only.
    engine
        .add_revenue(NewRevenue::new("pompilio", mt(1000)).date(at(2026, 11, 1, 0, 0)))
        .unwrap();

    let p = engine.driver_financials("pompilio").unwrap();
    assert_eq!(p.daily_revenue, Money::ZERO);
    assert_eq!(p.weekly_revenue, mt(110));
    assert_eq!(p.monthly_revenue, mt(111));
    assert_eq!(p.total_revenue, mt(1111));
}

#[test]
fn sunday_reference_still_uses_monday_week() {
    let mut engine = Engine::builder()
        .clock(FixedClock(at(2026, 10, 25, 18, 0)))
        .build();
    engine
        .add_revenue(NewRevenue::new("john", mt(300)).date(at(2026, 10, 19, 8, 0)))
        .unwrap();
    engine
        .add_revenue(NewRevenue::new("john", mt(7)).date(at(2026, 10, 26, 8, 0)))
        .unwrap();

    let john = engine.driver_financials("john").unwrap();
    assert_eq!(john.weekly_revenue, mt(300));
}

#[test]
fn explicit_reference_instant_overrides_clock() {
    let mut engine = engine();
    engine
        .add_revenue(NewRevenue::new("tito", mt(50)).date(at(2026, 9, 30, 10, 0)))
        .unwrap();

    assert_eq!(engine.company_financials().monthly_revenue, Money::ZERO);
    let september = engine.company_financials_at(at(2026, 9, 30, 23, 0));
    assert_eq!(september.daily_revenue, mt(50));
    assert_eq!(september.monthly_revenue, mt(50));
}

#[test]
fn repeated_queries_are_identical() {
    let mut engine = engine();
    engine.add_revenue(NewRevenue::new("tito", mt(42))).unwrap();
    assert_eq!(engine.all_drivers_financials(), engine.all_drivers_financials());
    assert_eq!(engine.company_financials(), engine.company_financials());
}

#[test]
fn add_then_delete_restores_figures() {
    let mut engine = engine();
    engine.add_revenue(NewRevenue::new("tito", mt(900))).unwrap();
    let before = engine.driver_financials("tito").unwrap();

    let id = engine
        .add_expense(NewExpense::new("tito", ExpenseKind::Maintenance, mt(200)))
        .unwrap();
    assert_ne!(engine.driver_financials("tito").unwrap(), before);

    engine.delete_expense(id).unwrap();
    assert_eq!(engine.driver_financials("tito").unwrap(), before);
    assert_eq!(
        engine.delete_expense(id),
        Err(EngineError::KeyNotFound(id.to_string()))
    );
}

#[test]
fn unknown_driver_is_none_but_counts_for_company() {
    let mut engine = engine();
    engine.add_revenue(NewRevenue::new("maria", mt(70))).unwrap();

    assert!(engine.driver_financials("maria").is_none());
    assert_eq!(engine.all_drivers_financials().len(), 3);
    assert_eq!(engine.company_financials().total_revenue, mt(70));
}

#[test]
fn strict_engine_rejects_unknown_driver() {
    let mut engine = Engine::builder()
        .clock(FixedClock(at(2026, 10, 21, 12, 0)))
        .strict_drivers(true)
        .build();
    let err = engine
        .add_revenue(NewRevenue::new("maria", mt(70)))
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownDriver("maria".to_string()));
    assert!(engine.revenues().is_empty());
}

#[test]
fn strict_engine_accepts_driver_names_in_any_case() {
    let mut engine = Engine::builder()
        .clock(FixedClock(at(2026, 10, 21, 12, 0)))
        .strict_drivers(true)
        .build();
    engine.add_revenue(NewRevenue::new(" Tito ", mt(100))).unwrap();
    engine.add_salary(NewSalary::new("POMPILIO", mt(50))).unwrap();

    assert_eq!(engine.revenues()[0].driver_id, "tito");
    assert_eq!(engine.salaries()[0].driver_id, "pompilio");
}

#[test]
fn driver_reference_is_stored_canonical() {
    let mut engine = engine();
    engine.add_revenue(NewRevenue::new("Tito", mt(100))).unwrap();
    engine.add_revenue(NewRevenue::new("Maria", mt(7))).unwrap();

    assert_eq!(engine.revenues()[0].driver_id, "tito");
    assert_eq!(engine.revenues()[1].driver_id, "maria");
    assert_eq!(engine.driver_financials("tito").unwrap().total_revenue, mt(100));
    assert_eq!(engine.company_financials().total_revenue, mt(107));
}

#[test]
fn amounts_above_entry_cap_are_rejected() {
    let mut engine = engine();
    assert!(matches!(
        engine.add_revenue(NewRevenue::new("tito", Money::new(i64::MAX))),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(Money::from_major(5e16).is_err());
    assert!(engine.revenues().is_empty());
}

#[test]
fn large_amounts_aggregate_without_overflow() {
    let mut engine = engine();
    for _ in 0..2 {
        engine
            .add_revenue(NewRevenue::new("tito", Money::MAX_ENTRY))
            .unwrap();
        engine
            .add_salary(NewSalary::new("john", Money::MAX_ENTRY))
            .unwrap();
    }

    let company = engine.company_financials();
    assert_eq!(company.total_revenue, Money::new(2 * Money::MAX_ENTRY.minor()));
    assert_eq!(company.total_salaries, Money::new(2 * Money::MAX_ENTRY.minor()));
    assert_eq!(company.total_profit, Money::ZERO);
    assert_eq!(
        engine.driver_financials("john").unwrap().profit,
        Money::new(-2 * Money::MAX_ENTRY.minor())
    );
}

#[test]
fn non_positive_amounts_are_rejected() {
    let mut engine = engine();
    assert!(matches!(
        engine.add_salary(NewSalary::new("john", Money::ZERO)),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.add_revenue(NewRevenue::new("john", mt(-5))),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(engine.salaries().is_empty());
}

#[test]
fn history_is_newest_first_and_filterable() {
    let mut engine = engine();
    engine
        .add_revenue(NewRevenue::new("tito", mt(1)).date(at(2026, 10, 1, 0, 0)))
        .unwrap();
    engine
        .add_expense(
            NewExpense::new("john", ExpenseKind::Fines, mt(2)).date(at(2026, 10, 5, 0, 0)),
        )
        .unwrap();
    engine
        .add_revenue(NewRevenue::new("tito", mt(3)).date(at(2026, 10, 3, 0, 0)))
        .unwrap();

    let all: Vec<Money> = engine
        .history(&HistoryFilter::default())
        .iter()
        .map(|h| h.amount)
        .collect();
    assert_eq!(all, [mt(2), mt(3), mt(1)]);

    let tito_revenues = engine.history(
        &HistoryFilter::default()
            .kind(TransactionKind::Revenue)
            .driver("tito"),
    );
    assert_eq!(tito_revenues.len(), 2);

    assert_eq!(engine.recent(TransactionKind::Revenue, 1)[0].amount, mt(3));
    assert_eq!(engine.lifetime_total(TransactionKind::Revenue), mt(4));
}

#[test]
fn same_date_ties_prefer_later_insertion() {
    let mut engine = engine();
    let first = engine.add_revenue(NewRevenue::new("tito", mt(1))).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = engine.add_revenue(NewRevenue::new("tito", mt(2))).unwrap();

    let ids: Vec<_> = engine
        .recent(TransactionKind::Revenue, 5)
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, [second, first]);
}

#[test]
fn csv_export_uses_portuguese_layout() {
    let mut engine = engine();
    engine
        .add_expense(
            NewExpense::new("tito", ExpenseKind::Fuel, Money::new(150_050))
                .date(at(2026, 10, 2, 0, 0))
                .description("Via chat"),
        )
        .unwrap();
    engine
        .add_revenue(NewRevenue::new("ghost", mt(10)).date(at(2026, 10, 1, 0, 0)))
        .unwrap();

    let csv = String::from_utf8(engine.export_csv(&HistoryFilter::default()).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Data,Tipo,Motorista,Descrição,Valor (MZN)");
    assert_eq!(lines[1], "02/10/2026,Despesa,Tito,Combustível - Via chat,1500.50");
    assert_eq!(lines[2], "01/10/2026,Receita,Desconhecido,-,10.00");
}
