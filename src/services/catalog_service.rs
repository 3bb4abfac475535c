// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{
        CreateProductPayload, CreateWarehousePayload, ImportReport, ImportRowError, Product,
        UpdateProductPayload, Warehouse,
    },
    models::department::Department,
};

// Cabeçalho esperado na planilha de importação. A coluna de armazém é
// resolvida pelo nome, dentro do departamento da linha.
const IMPORT_HEADER: &str = "nome,codigo,descricao,preco,departamento,armazem,pecas_por_caixa";

/// Filtro textual do catálogo: casa por nome ou código, sem distinguir
/// maiúsculas. Projeção pura sobre a lista já carregada.
pub fn filter_products(products: Vec<Product>, search: &str) -> Vec<Product> {
    let term = search.trim().to_lowercase();
    if term.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term)
                || p.code
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&term))
        })
        .collect()
}

// Divide uma linha CSV respeitando aspas duplas (RFC 4180). Suficiente
// para as planilhas de importação; não trata quebra de linha dentro de
// campo, que a importação rejeita por construção (parse linha a linha).
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // Aspas só abrem campo entre aspas no início do campo; no meio de um
    // campo sem aspas são texto literal.
    let mut inicio_de_campo = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if inicio_de_campo => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                inicio_de_campo = true;
                continue;
            }
            _ => current.push(c),
        }
        inicio_de_campo = false;
    }
    fields.push(current);
    fields
}

// Uma linha da planilha já validada, pronta para inserção.
#[derive(Debug)]
struct ImportRow {
    name: String,
    code: Option<String>,
    description: Option<String>,
    price: Decimal,
    department: Department,
    warehouse_name: Option<String>,
    pecas_por_caixa: i32,
}

fn parse_import_row(line: &str) -> Result<ImportRow, String> {
    let fields = split_csv_line(line);
    if fields.len() != 7 {
        return Err(format!("Esperava 7 colunas, encontrou {}.", fields.len()));
    }

    let name = fields[0].trim();
    if name.is_empty() {
        return Err("O nome do produto é obrigatório.".to_string());
    }

    let price: Decimal = fields[3]
        .trim()
        .parse()
        .map_err(|_| format!("Preço inválido: '{}'", fields[3].trim()))?;
    if price < Decimal::ZERO {
        return Err("O preço não pode ser negativo.".to_string());
    }

    let department = Department::parse(&fields[4])
        .ok_or_else(|| format!("Departamento desconhecido: '{}'", fields[4].trim()))?;

    let pecas_por_caixa = match fields[6].trim() {
        "" => 1,
        raw => raw
            .parse::<i32>()
            .ok()
            .filter(|v| *v >= 1)
            .ok_or_else(|| format!("Fator de conversão inválido: '{}'", raw))?,
    };

    let opcional = |campo: &str| {
        let v = campo.trim();
        (!v.is_empty()).then(|| v.to_string())
    };

    Ok(ImportRow {
        name: name.to_string(),
        code: opcional(&fields[1]),
        description: opcional(&fields[2]),
        price,
        department,
        warehouse_name: opcional(&fields[5]),
        pecas_por_caixa,
    })
}

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_products(
        &self,
        department: Option<Department>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let products = self.repo.list_active_products(&self.pool, department).await?;
        Ok(match search {
            Some(term) => filter_products(products, term),
            None => products,
        })
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_product_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    pub async fn create_product(&self, payload: CreateProductPayload) -> Result<Product, AppError> {
        payload.validate()?;
        self.repo
            .create_product(
                &self.pool,
                &payload.name,
                payload.code.as_deref(),
                payload.description.as_deref(),
                payload.price,
                payload.department,
                payload.warehouse_id,
                payload.pecas_por_caixa,
            )
            .await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        payload: UpdateProductPayload,
    ) -> Result<Product, AppError> {
        payload.validate()?;
        self.repo
            .update_product(
                &self.pool,
                id,
                &payload.name,
                payload.code.as_deref(),
                payload.description.as_deref(),
                payload.price,
                payload.warehouse_id,
                payload.pecas_por_caixa,
            )
            .await
    }

    pub async fn deactivate_product(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.deactivate_product(&self.pool, id).await
    }

    pub async fn list_warehouses(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<Warehouse>, AppError> {
        self.repo.list_warehouses(&self.pool, department).await
    }

    pub async fn create_warehouse(
        &self,
        payload: CreateWarehousePayload,
    ) -> Result<Warehouse, AppError> {
        payload.validate()?;
        self.repo
            .create_warehouse(
                &self.pool,
                &payload.name,
                payload.department,
                payload.address.as_deref(),
            )
            .await
    }

    /// Modelo de planilha oferecido para download: o cabeçalho e uma linha
    /// de exemplo por departamento.
    pub fn csv_template(&self) -> String {
        let mut out = String::from(IMPORT_HEADER);
        out.push_str("\r\n");
        out.push_str("Geladeira 400L,EL001,Frost free,28500.00,eletrodomesticos,Armazém Central,1\r\n");
        out.push_str("Arroz 25kg,AL010,,1450.00,alimentacao,Armazém Central,1\r\n");
        out.push_str("Batom Matte,CO231,Vermelho,350.00,cosmeticos,,12\r\n");
        out
    }

    /// Importação em massa do catálogo. Cada linha é independente: as boas
    /// são inseridas e as ruins voltam no relatório com o número da linha.
    /// Não há rollback do lote por causa de uma linha ruim.
    pub async fn import_csv(&self, content: &str) -> Result<ImportReport, AppError> {
        let mut lines = content.lines().enumerate();

        let header = lines
            .next()
            .map(|(_, l)| l.trim().trim_start_matches('\u{feff}').to_lowercase());
        if header.as_deref() != Some(IMPORT_HEADER) {
            return Err(AppError::InvalidInput(format!(
                "Cabeçalho inválido. Esperava: {}",
                IMPORT_HEADER
            )));
        }

        let mut report = ImportReport {
            criados: 0,
            erros: Vec::new(),
        };

        for (idx, line) in lines {
            let numero_linha = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let row = match parse_import_row(line) {
                Ok(row) => row,
                Err(erro) => {
                    report.erros.push(ImportRowError {
                        linha: numero_linha,
                        erro,
                    });
                    continue;
                }
            };

            let warehouse_id = match &row.warehouse_name {
                Some(name) => {
                    match self
                        .repo
                        .find_warehouse_by_name(&self.pool, name, row.department)
                        .await?
                    {
                        Some(w) => Some(w.id),
                        None => {
                            report.erros.push(ImportRowError {
                                linha: numero_linha,
                                erro: format!("Armazém desconhecido: '{}'", name),
                            });
                            continue;
                        }
                    }
                }
                None => None,
            };

            match self
                .repo
                .create_product(
                    &self.pool,
                    &row.name,
                    row.code.as_deref(),
                    row.description.as_deref(),
                    row.price,
                    row.department,
                    warehouse_id,
                    row.pecas_por_caixa,
                )
                .await
            {
                Ok(_) => report.criados += 1,
                Err(e) => report.erros.push(ImportRowError {
                    linha: numero_linha,
                    erro: e.to_string(),
                }),
            }
        }

        tracing::info!(
            "📦 Importação de catálogo: {} criados, {} erros",
            report.criados,
            report.erros.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn produto(name: &str, code: Option<&str>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.map(str::to_string),
            description: None,
            price: dec!(10.00),
            department: Department::Alimentacao,
            warehouse_id: None,
            pecas_por_caixa: 1,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filtro_casa_nome_e_codigo_sem_caixa() {
        let lista = vec![
            produto("Arroz 25kg", Some("AL010")),
            produto("Óleo 5L", Some("AL020")),
            produto("Farinha", None),
        ];

        let por_nome = filter_products(lista.clone(), "arroz");
        assert_eq!(por_nome.len(), 1);
        assert_eq!(por_nome[0].name, "Arroz 25kg");

        let por_codigo = filter_products(lista.clone(), "al02");
        assert_eq!(por_codigo.len(), 1);
        assert_eq!(por_codigo[0].name, "Óleo 5L");

        // Termo vazio devolve tudo
        assert_eq!(filter_products(lista, "  ").len(), 3);
    }

    #[test]
    fn split_csv_respeita_aspas() {
        assert_eq!(
            split_csv_line(r#"Arroz "Extra",AL010,"Saco, 25kg",1450.00"#),
            vec!["Arroz \"Extra\"", "AL010", "Saco, 25kg", "1450.00"]
        );
        assert_eq!(split_csv_line("a,,c"), vec!["a", "", "c"]);
    }

    #[test]
    fn split_csv_preserva_aspas_no_meio_de_campo_sem_aspas() {
        // Aspas interiores não abrem campo entre aspas
        assert_eq!(
            split_csv_line(r#"Óleo 5L "Premium",AL020"#),
            vec!["Óleo 5L \"Premium\"", "AL020"]
        );
        assert_eq!(split_csv_line(r#"tam 5"x7",x"#), vec!["tam 5\"x7\"", "x"]);
    }

    #[test]
    fn linha_valida_e_convertida() {
        let row =
            parse_import_row("Sumo de Laranja,AL030,Caixa 1L,85.50,Alimentação,,12").unwrap();
        assert_eq!(row.name, "Sumo de Laranja");
        assert_eq!(row.price, dec!(85.50));
        assert_eq!(row.department, Department::Alimentacao);
        assert_eq!(row.warehouse_name, None);
        assert_eq!(row.pecas_por_caixa, 12);
    }

    #[test]
    fn linha_com_preco_invalido_e_rejeitada() {
        let erro = parse_import_row("Sumo,AL030,,abc,alimentacao,,1").unwrap_err();
        assert!(erro.contains("Preço inválido"));
    }

    #[test]
    fn linha_com_departamento_desconhecido_e_rejeitada() {
        let erro = parse_import_row("Sumo,AL030,,10.00,ferragens,,1").unwrap_err();
        assert!(erro.contains("Departamento desconhecido"));
    }

    #[test]
    fn linha_com_colunas_a_menos_e_rejeitada() {
        let erro = parse_import_row("Sumo,AL030,10.00").unwrap_err();
        assert!(erro.contains("7 colunas"));
    }

    #[test]
    fn fator_vazio_cai_para_um() {
        let row = parse_import_row("Sumo,,,10.00,alimentacao,,").unwrap();
        assert_eq!(row.pecas_por_caixa, 1);

        let erro = parse_import_row("Sumo,,,10.00,alimentacao,,0").unwrap_err();
        assert!(erro.contains("Fator de conversão inválido"));
    }
}
