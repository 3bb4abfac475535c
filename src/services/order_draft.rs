// src/services/order_draft.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::orders::Quantidade;

// Resumo de produto que o rascunho carrega. Congela nome e preço no
// momento em que o item entra: o catálogo pode mudar depois sem afetar
// uma composição em andamento.
#[derive(Debug, Clone, PartialEq)]
pub struct ProdutoResumo {
    pub id: Uuid,
    pub nome: String,
    pub preco: Decimal,
    pub pecas_por_caixa: i32,
}

#[derive(Debug, Clone)]
pub struct DraftItem {
    pub produto: ProdutoResumo,
    pub quantidade: Quantidade,
}

impl DraftItem {
    pub fn valor(&self) -> Decimal {
        let pecas = self.quantidade.total_pecas(self.produto.pecas_por_caixa);
        self.produto.preco * Decimal::from(pecas)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTotals {
    pub linhas: usize,
    pub caixas: i64,
    pub pecas: i64,
    pub valor: Decimal,
}

// O rascunho de uma encomenda em composição. Uma linha por produto, na
// ordem em que cada produto entrou pela primeira vez; adicionar um
// produto repetido soma na linha existente em vez de criar outra.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    itens: Vec<DraftItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn itens(&self) -> &[DraftItem] {
        &self.itens
    }

    pub fn is_empty(&self) -> bool {
        self.itens.is_empty()
    }

    /// Adiciona o produto ou, se já está no rascunho, soma a quantidade na
    /// linha existente (mantendo a posição original). Quantidade resultante
    /// zero não cria linha.
    pub fn add_or_increment(&mut self, produto: ProdutoResumo, quantidade: Quantidade) {
        let quantidade = quantidade.clamped();

        if let Some(item) = self.itens.iter_mut().find(|i| i.produto.id == produto.id) {
            item.quantidade = item.quantidade.somar(quantidade);
            return;
        }

        if quantidade.is_zero() {
            return;
        }
        self.itens.push(DraftItem { produto, quantidade });
    }

    /// Substitui a quantidade da linha. Zerar (ou valores negativos, que
    /// são tratados como zero) remove a linha. Produto ausente é ignorado.
    pub fn set_quantity(&mut self, produto_id: Uuid, quantidade: Quantidade) {
        let quantidade = quantidade.clamped();

        if quantidade.is_zero() {
            self.remove(produto_id);
            return;
        }

        if let Some(item) = self.itens.iter_mut().find(|i| i.produto.id == produto_id) {
            item.quantidade = quantidade;
        }
    }

    /// Remove a linha por completo. A memória da quantidade vai junto: se o
    /// produto voltar depois, começa do zero.
    pub fn remove(&mut self, produto_id: Uuid) {
        self.itens.retain(|i| i.produto.id != produto_id);
    }

    pub fn totals(&self) -> DraftTotals {
        let mut totals = DraftTotals {
            linhas: self.itens.len(),
            caixas: 0,
            pecas: 0,
            valor: Decimal::ZERO,
        };

        for item in &self.itens {
            totals.caixas += i64::from(item.quantidade.caixas);
            totals.pecas += i64::from(item.quantidade.pecas);
            totals.valor += item.valor();
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn produto(nome: &str, preco: Decimal, fator: i32) -> ProdutoResumo {
        ProdutoResumo {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            preco,
            pecas_por_caixa: fator,
        }
    }

    #[test]
    fn adicionar_repetido_soma_na_linha_existente() {
        let arroz = produto("Arroz 25kg", dec!(50.00), 1);
        let oleo = produto("Óleo 5L", dec!(30.00), 1);

        let mut draft = OrderDraft::new();
        draft.add_or_increment(arroz.clone(), Quantidade::new(1, 0));
        draft.add_or_increment(oleo.clone(), Quantidade::new(0, 2));
        draft.add_or_increment(arroz.clone(), Quantidade::new(2, 3));

        assert_eq!(draft.itens().len(), 2);
        // A linha do arroz continua na primeira posição
        assert_eq!(draft.itens()[0].produto.id, arroz.id);
        assert_eq!(draft.itens()[0].quantidade, Quantidade::new(3, 3));
    }

    #[test]
    fn zerar_quantidade_remove_a_linha() {
        let p = produto("Creme", dec!(12.50), 1);
        let mut draft = OrderDraft::new();
        draft.add_or_increment(p.clone(), Quantidade::new(0, 4));

        draft.set_quantity(p.id, Quantidade::new(0, 0));
        assert!(draft.is_empty());

        // Valores negativos contam como zero
        draft.add_or_increment(p.clone(), Quantidade::new(0, 4));
        draft.set_quantity(p.id, Quantidade::new(-1, -2));
        assert!(draft.is_empty());
    }

    #[test]
    fn readicionar_depois_de_remover_comeca_do_zero() {
        let p = produto("Fogão 4 bocas", dec!(800.00), 1);
        let mut draft = OrderDraft::new();

        draft.add_or_increment(p.clone(), Quantidade::new(0, 2));
        draft.remove(p.id);
        draft.add_or_increment(p.clone(), Quantidade::new(0, 5));

        // 5, não 7: a remoção apaga a memória da quantidade anterior
        assert_eq!(draft.itens()[0].quantidade, Quantidade::new(0, 5));
    }

    #[test]
    fn set_quantity_de_produto_ausente_nao_cria_linha() {
        let mut draft = OrderDraft::new();
        draft.set_quantity(Uuid::new_v4(), Quantidade::new(1, 1));
        assert!(draft.is_empty());
    }

    #[test]
    fn totais_agregam_linhas_caixas_pecas_e_valor() {
        // 2 caixas de 12 + 3 peças a 1.00 = 27.00
        let sumo = produto("Sumo", dec!(1.00), 12);
        // 4 peças a 2.00 = 8.00
        let sabonete = produto("Sabonete", dec!(2.00), 1);

        let mut draft = OrderDraft::new();
        draft.add_or_increment(sumo, Quantidade::new(2, 3));
        draft.add_or_increment(sabonete, Quantidade::new(0, 4));

        let totals = draft.totals();
        assert_eq!(totals.linhas, 2);
        assert_eq!(totals.caixas, 2);
        assert_eq!(totals.pecas, 7);
        assert_eq!(totals.valor, dec!(35.00));
    }

    #[test]
    fn rascunho_vazio_tem_totais_zerados() {
        let totals = OrderDraft::new().totals();
        assert_eq!(totals.linhas, 0);
        assert_eq!(totals.valor, Decimal::ZERO);
    }
}
