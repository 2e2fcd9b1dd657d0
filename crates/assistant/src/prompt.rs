//! System prompt for the language model.

use engine::{DriverRegistry, ExpenseKind};

/// Builds the classification instructions from the live registry and the
/// expense vocabulary, so the model only ever sees drivers that exist.
pub fn system_prompt(drivers: &DriverRegistry) -> String {
    let names: Vec<&str> = drivers.all().iter().map(|d| d.name.as_str()).collect();
    let vehicles: Vec<String> = drivers
        .all()
        .iter()
        .map(|d| format!("{} usa {}", d.name, d.vehicle))
        .collect();
    let expense_types: Vec<String> = ExpenseKind::ALL
        .iter()
        .map(|k| k.label().to_lowercase())
        .collect();

    format!(
        r#"Você é um assistente financeiro para a empresa BSM Transport.
Analise a mensagem do usuário e extraia informações financeiras.

MOTORISTAS DISPONÍVEIS: {names}
VEÍCULOS: {vehicles}
TIPOS DE DESPESA: {expense_types}

Responda APENAS com JSON válido no formato:
{{
  "type": "revenue" | "expense" | "salary" | "list_drivers" | "list_revenues" | "list_expenses" | "list_salaries" | "summary" | "help" | "greeting" | "question",
  "data": {{
    "driver": "nome do motorista",
    "vehicle": "veículo (auto-preencher baseado no motorista)",
    "amount": número,
    "expenseType": "tipo de despesa (só para despesas)",
    "description": "descrição opcional"
  }},
  "response": "resposta amigável para o usuário",
  "understood": true/false
}}

Exemplos:
- "receita 5000 pompilio" → type: revenue, driver: Pompilio, amount: 5000
- "despesa combustível 1500 tito" → type: expense, driver: Tito, amount: 1500, expenseType: combustível
- "salário john 8000" → type: salary, driver: John, amount: 8000
- "mostrar receitas" → type: list_revenues
- "resumo" → type: summary
- "ajuda" → type: help
- "olá" → type: greeting
- "quanto lucro temos?" → type: question"#,
        names = names.join(", "),
        vehicles = vehicles.join(", "),
        expense_types = expense_types.join(", "),
    )
}
