// Header aliases for each logical delivery field, most specific spelling first.
// Keys are in `normalize_header` form.
use super::sheet_row::HeaderTokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PurchaseOrder,
    Document,
    Value,
    Client,
    State,
    DepartureDate,
    Driver,
    Vehicle,
    TransportType,
    Status,
    AssemblyRequired,
    AssemblyDate,
    DeliveryExpense,
    AssemblyExpense,
    Productivity,
    ErrorTag,
    ErrorDescription,
    ExpensePercentage,
    // Generic notes column, merged into the error description when that is unset.
    Description,
}

impl Field {
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::PurchaseOrder => &["pv_foco", "pv", "n_pv", "numero_pv", "pedido", "pedido_venda", "foco"],
            Field::Document => &["nf", "nota_fiscal", "n_nf", "numero_nf", "nota", "documento", "declaracao"],
            Field::Value => &["valor", "valor_total", "valor_nf", "valor_da_nota", "vlr", "vlr_total"],
            Field::Client => &["cliente", "nome_cliente", "nome_do_cliente", "destinatario", "razao_social"],
            Field::State => &["uf", "estado"],
            Field::DepartureDate => &["data_saida", "data_de_saida", "dt_saida", "saida"],
            Field::Driver => &["motorista", "nome_motorista", "condutor"],
            Field::Vehicle => &["carro", "veiculo", "placa", "caminhao"],
            Field::TransportType => &["tipo_transporte", "tipo_de_transporte", "tipo", "modalidade"],
            Field::Status => &["status", "situacao", "status_entrega"],
            Field::AssemblyRequired => &["precisa_montagem", "montagem", "tem_montagem", "requer_montagem"],
            Field::AssemblyDate => &["data_montagem", "data_da_montagem", "dt_montagem"],
            Field::DeliveryExpense => &["gastos_entrega", "gasto_entrega", "gastos_de_entrega", "custo_entrega", "despesa_entrega", "frete"],
            Field::AssemblyExpense => &["gastos_montagem", "gasto_montagem", "gastos_de_montagem", "custo_montagem", "despesa_montagem"],
            Field::Productivity => &["produtividade", "prod"],
            Field::ErrorTag => &["erros", "erro", "tipo_erro", "tipo_de_erro"],
            Field::ErrorDescription => &["descricao_erros", "descricao_erro", "descricao_dos_erros", "descricao_do_erro"],
            Field::ExpensePercentage => &["percentual_gastos", "percentual_de_gastos", "perc_gastos", "_gastos", "percentual"],
            Field::Description => &["descricao", "observacao", "observacoes", "obs"],
        }
    }

    /// Substring fallback used when no alias matches a header exactly.
    pub fn header_tokens(&self) -> Option<HeaderTokens> {
        let tokens = match self {
            Field::Value => HeaderTokens { all: &["valor"], none: &["unit"] },
            Field::Client => HeaderTokens { all: &["cliente"], none: &[] },
            Field::DepartureDate => HeaderTokens { all: &["data", "saida"], none: &[] },
            Field::Driver => HeaderTokens { all: &["motorista"], none: &[] },
            Field::Vehicle => HeaderTokens { all: &["veic"], none: &[] },
            Field::TransportType => HeaderTokens { all: &["tipo"], none: &["erro"] },
            Field::Status => HeaderTokens { all: &["status"], none: &[] },
            Field::AssemblyRequired => HeaderTokens { all: &["montagem"], none: &["data", "gasto", "custo", "despesa"] },
            Field::AssemblyDate => HeaderTokens { all: &["data", "montagem"], none: &[] },
            _ => return None,
        };
        Some(tokens)
    }
}

/// Header variations for the n-th numbered assignee column (1-based).
pub fn assignee_aliases(n: usize) -> Vec<String> {
    let mut aliases = vec![
        format!("montador_{}", n),
        format!("montador{}", n),
        format!("montador_{:02}", n),
    ];
    if n == 1 {
        aliases.push("montador".to_string());
    }
    aliases
}
