// src/services/report_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::department::Department,
    models::orders::OrderStatus,
    models::rbac::VisibilityScope,
    models::reports::{OrderRow, OrdersSummary},
};

/// Agrega as linhas visíveis: contagem total, pendentes e valor somado.
pub fn summarize(rows: &[OrderRow]) -> OrdersSummary {
    OrdersSummary {
        total: rows.len(),
        pendentes: rows
            .iter()
            .filter(|r| r.status == OrderStatus::Pendente)
            .count(),
        valor_total: rows.iter().map(|r| r.total).sum::<Decimal>(),
    }
}

// Escapa um campo conforme a RFC 4180: aspas dobradas e o campo entre
// aspas quando contém vírgula, aspas ou quebra de linha.
fn escape_csv(campo: &str) -> String {
    if campo.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", campo.replace('"', "\"\""))
    } else {
        campo.to_string()
    }
}

/// Serializa as linhas para CSV com cabeçalho fixo. Lista vazia produz
/// um arquivo só com o cabeçalho, nunca um erro.
pub fn to_csv(rows: &[OrderRow]) -> String {
    let mut out = String::from("Data,Cliente,Departamento,Status,Total\r\n");

    for row in rows {
        let data = row.created_at.format("%Y-%m-%d %H:%M").to_string();
        let cliente = row.customer_name.as_deref().unwrap_or("");
        let estado = match row.status {
            OrderStatus::Pendente => "pendente",
            OrderStatus::Aprovada => "aprovada",
            OrderStatus::Rejeitada => "rejeitada",
            OrderStatus::Entregue => "entregue",
        };

        out.push_str(&escape_csv(&data));
        out.push(',');
        out.push_str(&escape_csv(cliente));
        out.push(',');
        out.push_str(&escape_csv(row.department.theme().nome));
        out.push(',');
        out.push_str(estado);
        out.push(',');
        out.push_str(&row.total.to_string());
        out.push_str("\r\n");
    }
    out
}

/// Nome do arquivo de exportação: o slug do departamento filtrado, ou
/// "todas" quando a exportação cruza departamentos.
pub fn nome_arquivo_csv(department: Option<Department>, data: NaiveDate) -> String {
    let recorte = match department {
        Some(dep) => dep.slug(),
        None => "todas",
    };
    format!("encomendas_{}_{}.csv", recorte, data.format("%Y-%m-%d"))
}

#[derive(Clone)]
pub struct ReportService {
    order_repo: OrderRepository,
    pool: PgPool,
}

impl ReportService {
    pub fn new(order_repo: OrderRepository, pool: PgPool) -> Self {
        Self { order_repo, pool }
    }

    /// Linhas visíveis ao usuário, com filtro opcional de departamento por
    /// cima do recorte de visibilidade (o filtro nunca alarga o recorte).
    pub async fn visible_rows(
        &self,
        scope: VisibilityScope,
        department: Option<Department>,
    ) -> Result<Vec<OrderRow>, AppError> {
        let mut rows = self.order_repo.list_rows(&self.pool, scope).await?;
        if let Some(dep) = department {
            rows.retain(|r| r.department == dep);
        }
        Ok(rows)
    }

    pub async fn summary(
        &self,
        scope: VisibilityScope,
        department: Option<Department>,
    ) -> Result<OrdersSummary, AppError> {
        let rows = self.visible_rows(scope, department).await?;
        Ok(summarize(&rows))
    }

    pub async fn export_csv(
        &self,
        scope: VisibilityScope,
        department: Option<Department>,
    ) -> Result<(String, String), AppError> {
        let rows = self.visible_rows(scope, department).await?;
        let csv = to_csv(&rows);
        let nome = nome_arquivo_csv(department, chrono::Utc::now().date_naive());
        Ok((nome, csv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn linha(cliente: Option<&str>, status: OrderStatus, total: Decimal) -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0).unwrap(),
            customer_name: cliente.map(str::to_string),
            department: Department::Alimentacao,
            status,
            total,
        }
    }

    #[test]
    fn resumo_conta_pendentes_e_soma_valores() {
        let rows = vec![
            linha(Some("Amélia"), OrderStatus::Pendente, dec!(100.00)),
            linha(Some("Carlos"), OrderStatus::Aprovada, dec!(250.50)),
            linha(None, OrderStatus::Pendente, dec!(49.50)),
        ];

        let resumo = summarize(&rows);
        assert_eq!(resumo.total, 3);
        assert_eq!(resumo.pendentes, 2);
        assert_eq!(resumo.valor_total, dec!(400.00));
    }

    #[test]
    fn resumo_de_lista_vazia_e_zerado() {
        let resumo = summarize(&[]);
        assert_eq!(resumo.total, 0);
        assert_eq!(resumo.pendentes, 0);
        assert_eq!(resumo.valor_total, Decimal::ZERO);
    }

    #[test]
    fn csv_escapa_virgulas_e_aspas() {
        let rows = vec![linha(
            Some(r#"Mercearia "Boa Sorte", Lda"#),
            OrderStatus::Pendente,
            dec!(75.00),
        )];

        let csv = to_csv(&rows);
        let mut linhas = csv.lines();
        assert_eq!(linhas.next(), Some("Data,Cliente,Departamento,Status,Total"));
        assert_eq!(
            linhas.next(),
            Some(
                r#"2026-03-15 10:30,"Mercearia ""Boa Sorte"", Lda",Alimentação,pendente,75.00"#
            )
        );
    }

    #[test]
    fn csv_sem_linhas_tem_apenas_o_cabecalho() {
        assert_eq!(to_csv(&[]), "Data,Cliente,Departamento,Status,Total\r\n");
    }

    #[test]
    fn cliente_ausente_vira_campo_vazio() {
        let csv = to_csv(&[linha(None, OrderStatus::Entregue, dec!(10.00))]);
        assert!(csv.contains("2026-03-15 10:30,,Alimentação,entregue,10.00"));
    }

    #[test]
    fn nome_do_arquivo_reflete_o_recorte() {
        let data = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(
            nome_arquivo_csv(Some(Department::Cosmeticos), data),
            "encomendas_cosmeticos_2026-03-15.csv"
        );
        assert_eq!(nome_arquivo_csv(None, data), "encomendas_todas_2026-03-15.csv");
    }
}
