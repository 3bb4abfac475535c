// src/models/department.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Os três departamentos do negócio. O valor é fixo: produtos, armazéns,
// usuários e encomendas são sempre particionados por um destes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "department", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Eletrodomesticos,
    Alimentacao,
    Cosmeticos,
}

// Metadados de exibição de um departamento (nome amigável, ícone, cor do tema).
// Tabela estática, sem comportamento.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DepartmentTheme {
    pub nome: &'static str,
    pub icone: &'static str,
    pub cor: &'static str,
}

impl Department {
    pub const TODOS: [Department; 3] = [
        Department::Eletrodomesticos,
        Department::Alimentacao,
        Department::Cosmeticos,
    ];

    /// Identificador usado em URLs, filtros e nomes de arquivo.
    pub fn slug(&self) -> &'static str {
        match self {
            Department::Eletrodomesticos => "eletrodomesticos",
            Department::Alimentacao => "alimentacao",
            Department::Cosmeticos => "cosmeticos",
        }
    }

    pub fn theme(&self) -> DepartmentTheme {
        match self {
            Department::Eletrodomesticos => DepartmentTheme {
                nome: "Eletrodomésticos",
                icone: "🏠",
                cor: "#2980b9",
            },
            Department::Alimentacao => DepartmentTheme {
                nome: "Alimentação",
                icone: "🛒",
                cor: "#27ae60",
            },
            Department::Cosmeticos => DepartmentTheme {
                nome: "Cosméticos",
                icone: "💄",
                cor: "#8e44ad",
            },
        }
    }

    /// Aceita o slug ou o nome com acentos, em qualquer caixa.
    /// Usado na importação em massa, onde a planilha vem de fora.
    pub fn parse(valor: &str) -> Option<Department> {
        match valor.trim().to_lowercase().as_str() {
            "eletrodomesticos" | "eletrodomésticos" => Some(Department::Eletrodomesticos),
            "alimentacao" | "alimentação" => Some(Department::Alimentacao),
            "cosmeticos" | "cosméticos" => Some(Department::Cosmeticos),
            _ => None,
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aceita_slug_e_nome_acentuado() {
        assert_eq!(
            Department::parse("alimentacao"),
            Some(Department::Alimentacao)
        );
        assert_eq!(
            Department::parse("  Eletrodomésticos "),
            Some(Department::Eletrodomesticos)
        );
        assert_eq!(Department::parse("COSMETICOS"), Some(Department::Cosmeticos));
        assert_eq!(Department::parse("ferragens"), None);
    }

    #[test]
    fn theme_devolve_metadados_fixos() {
        let tema = Department::Cosmeticos.theme();
        assert_eq!(tema.nome, "Cosméticos");
        assert_eq!(tema.icone, "💄");
    }

    #[test]
    fn slug_e_display_coincidem() {
        for dep in Department::TODOS {
            assert_eq!(dep.slug(), dep.to_string());
        }
    }
}
