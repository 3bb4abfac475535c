// src/services/document_service.rs

use chrono::NaiveDate;
use genpdf::{Element, elements, style};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::orders::{OrderDetail, Quantidade},
};

/// Trunca o nome para caber na coluna da tabela, com reticência.
pub fn truncar(nome: &str, max: usize) -> String {
    if nome.chars().count() <= max {
        return nome.to_string();
    }
    let mut cortado: String = nome.chars().take(max.saturating_sub(1)).collect();
    cortado.push('…');
    cortado
}

/// Nome do arquivo da fatura: o nome do cliente sem acentos problemáticos
/// para cabeçalho HTTP (espaços viram sublinhado, resto não alfanumérico cai).
pub fn nome_arquivo_fatura(customer_name: &str, data: NaiveDate) -> String {
    let nome: String = customer_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    let nome = if nome.is_empty() { "cliente".to_string() } else { nome };
    format!("fatura_{}_{}.pdf", nome, data.format("%Y-%m-%d"))
}

#[derive(Clone)]
pub struct DocumentService {
    order_repo: OrderRepository,
}

impl DocumentService {
    pub fn new(order_repo: OrderRepository) -> Self {
        Self { order_repo }
    }

    /// Gera a fatura em PDF, em memória, junto com o nome de arquivo
    /// sugerido para o download.
    pub async fn generate_fatura_pdf(
        &self,
        order_id: Uuid,
    ) -> Result<(String, Vec<u8>), AppError> {
        let detail = self.order_repo.get_detail(order_id).await?;
        let nome_arquivo = nome_arquivo_fatura(
            &detail.customer.name,
            detail.header.created_at.date_naive(),
        );
        let buffer = render_fatura(&detail)?;
        Ok((nome_arquivo, buffer))
    }
}

fn render_fatura(detail: &OrderDetail) -> Result<Vec<u8>, AppError> {
    // Carrega a fonte da pasta 'fonts/'
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
        .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Fatura {}", detail.header.id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    let tema = detail.header.department.theme();
    doc.push(
        elements::Paragraph::new("CASA COMERCIAL NWETI")
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(
        elements::Paragraph::new(format!("Departamento: {}", tema.nome))
            .styled(style::Style::new().with_font_size(10)),
    );

    doc.push(elements::Break::new(1.5));

    doc.push(
        elements::Paragraph::new("FATURA / ENCOMENDA")
            .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Paragraph::new(format!(
        "Data: {}",
        detail.header.created_at.format("%d/%m/%Y")
    )));

    // --- CLIENTE E LEVANTAMENTO ---
    doc.push(elements::Paragraph::new(format!(
        "Cliente: {}",
        detail.customer.name
    )));
    doc.push(elements::Paragraph::new(format!(
        "Telefone: {}",
        detail.customer.phone
    )));
    doc.push(elements::Paragraph::new(format!(
        "Localização: {}",
        detail.customer.location
    )));
    doc.push(elements::Paragraph::new(format!(
        "Vendedor: {}",
        detail.vendor_name
    )));
    if let Some(armazem) = &detail.warehouse_name {
        doc.push(elements::Paragraph::new(format!(
            "Levantamento: {}",
            armazem
        )));
    }

    doc.push(elements::Break::new(2));

    // --- TABELA DE ITENS ---
    // Pesos das colunas: Produto (4), Caixas (1), Peças (1), Unitário (2), Total (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Produto").styled(style_bold))
        .element(elements::Paragraph::new("Caixas").styled(style_bold))
        .element(elements::Paragraph::new("Peças").styled(style_bold))
        .element(elements::Paragraph::new("Unitário").styled(style_bold))
        .element(elements::Paragraph::new("Total").styled(style_bold))
        .push()
        .expect("Table error");

    for item in &detail.items {
        let quantidade = Quantidade::new(item.caixas, item.pecas);
        let total_linha = item.unit_price
            * rust_decimal::Decimal::from(quantidade.total_pecas(item.pecas_por_caixa));

        table
            .row()
            .element(elements::Paragraph::new(truncar(&item.product_name, 25)))
            .element(elements::Paragraph::new(format!("{}", item.caixas)))
            .element(elements::Paragraph::new(format!("{}", item.pecas)))
            .element(elements::Paragraph::new(format!("MT {:.2}", item.unit_price)))
            .element(elements::Paragraph::new(format!("MT {:.2}", total_linha)))
            .push()
            .expect("Table row error");
    }

    doc.push(table);
    doc.push(elements::Break::new(2));

    // --- TOTAL ---
    let mut total_paragraph =
        elements::Paragraph::new(format!("TOTAL GERAL: MT {:.2}", detail.header.total));
    total_paragraph.set_alignment(genpdf::Alignment::Right);
    doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

    doc.push(elements::Break::new(2));
    doc.push(
        elements::Paragraph::new("Documento gerado eletronicamente, válido sem assinatura.")
            .styled(style::Style::new().italic().with_font_size(8)),
    );

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncar_respeita_o_limite() {
        assert_eq!(truncar("Arroz", 25), "Arroz");
        assert_eq!(
            truncar("Geladeira Frost Free Duplex 400 Litros Inox", 25),
            "Geladeira Frost Free Dup…"
        );
        assert_eq!(truncar("Geladeira Frost Free Dup…", 25).chars().count(), 25);
    }

    #[test]
    fn nome_do_arquivo_sanitiza_o_cliente() {
        let data = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(
            nome_arquivo_fatura("Amelia Cossa", data),
            "fatura_amelia_cossa_2026-03-15.pdf"
        );
        // Acentos e pontuação caem; espaços viram sublinhado
        assert_eq!(
            nome_arquivo_fatura("Mercearia \"Boa Sorte\", Lda", data),
            "fatura_mercearia_boa_sorte_lda_2026-03-15.pdf"
        );
        // Nome inteiramente não-ASCII não deixa o arquivo sem nome
        assert_eq!(nome_arquivo_fatura("冷蔵庫", data), "fatura_cliente_2026-03-15.pdf");
    }
}
