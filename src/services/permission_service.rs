// src/services/permission_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PermissionRepository,
    models::auth::{Role, User},
    models::department::Department,
    models::rbac::{Permission, PermissionGrant, VisibilityScope},
};

/// Permissões implícitas do papel, válidas sem concessão alguma: admin
/// pode tudo, e registrar encomendas faz parte do trabalho de qualquer
/// usuário autenticado (a submissão restringe o vendedor ao departamento
/// dele).
pub fn implied_by_role(role: Role, permission: Permission) -> bool {
    match role {
        Role::Admin => true,
        Role::Supervisor | Role::Vendedor => permission == Permission::CreateOrders,
    }
}

/// Resolve se o usuário pode executar a ação, dado o conjunto de
/// concessões dele. Permissões implícitas do papel passam sem consultar
/// concessão alguma. Concessão com departamento nulo vale para qualquer
/// departamento; uma verificação sem contexto de departamento aceita
/// qualquer concessão da permissão pedida.
pub fn has_permission(
    user: &User,
    grants: &[PermissionGrant],
    permission: Permission,
    department: Option<Department>,
) -> bool {
    if implied_by_role(user.role, permission) {
        return true;
    }

    grants.iter().any(|g| {
        g.permission == permission
            && (g.department.is_none() || department.is_none() || g.department == department)
    })
}

/// O recorte de visibilidade de dados vem do papel, não das concessões:
/// admin vê tudo, supervisor vê o departamento dele, vendedor vê o que
/// criou. Supervisor sem departamento cai no recorte mais restrito.
pub fn visibility_scope(user: &User) -> VisibilityScope {
    match user.role {
        Role::Admin => VisibilityScope::Todas,
        Role::Supervisor => match user.department {
            Some(dep) => VisibilityScope::Departamento(dep),
            None => VisibilityScope::Proprias(user.id),
        },
        Role::Vendedor => VisibilityScope::Proprias(user.id),
    }
}

#[derive(Clone)]
pub struct PermissionService {
    repo: PermissionRepository,
}

impl PermissionService {
    pub fn new(repo: PermissionRepository) -> Self {
        Self { repo }
    }

    pub async fn grants_for(&self, user_id: Uuid) -> Result<Vec<PermissionGrant>, AppError> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn check(
        &self,
        user: &User,
        permission: Permission,
        department: Option<Department>,
    ) -> Result<bool, AppError> {
        // Permissão implícita do papel evita a ida ao banco
        if implied_by_role(user.role, permission) {
            return Ok(true);
        }
        let grants = self.repo.list_for_user(user.id).await?;
        Ok(has_permission(user, &grants, permission, department))
    }

    pub async fn require(
        &self,
        user: &User,
        permission: Permission,
        department: Option<Department>,
    ) -> Result<(), AppError> {
        if self.check(user, permission, department).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Você não tem permissão para esta ação.".to_string(),
            ))
        }
    }

    pub async fn grant(
        &self,
        user_id: Uuid,
        permission: Permission,
        department: Option<Department>,
    ) -> Result<PermissionGrant, AppError> {
        self.repo.grant(user_id, permission, department).await
    }

    pub async fn revoke(&self, grant_id: Uuid) -> Result<(), AppError> {
        self.repo.revoke(grant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn usuario(role: Role, department: Option<Department>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "teste@loja.co.mz".to_string(),
            password_hash: String::new(),
            name: "Teste".to_string(),
            role,
            department,
            supervisor_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn concessao(
        user_id: Uuid,
        permission: Permission,
        department: Option<Department>,
    ) -> PermissionGrant {
        PermissionGrant {
            id: Uuid::new_v4(),
            user_id,
            permission,
            department,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admin_passa_sem_concessao_alguma() {
        let admin = usuario(Role::Admin, None);
        assert!(has_permission(
            &admin,
            &[],
            Permission::ManagePermissions,
            Some(Department::Cosmeticos)
        ));
    }

    #[test]
    fn vendedor_recem_registrado_pode_criar_encomendas() {
        // Sem concessão alguma, como qualquer conta sai do registro
        let vendedor = usuario(Role::Vendedor, Some(Department::Alimentacao));
        assert!(has_permission(
            &vendedor,
            &[],
            Permission::CreateOrders,
            Some(Department::Alimentacao)
        ));

        // O restante continua dependendo de concessão
        assert!(!has_permission(
            &vendedor,
            &[],
            Permission::ApproveOrders,
            Some(Department::Alimentacao)
        ));
        assert!(!has_permission(&vendedor, &[], Permission::ViewReports, None));
    }

    #[test]
    fn concessao_sem_departamento_vale_para_todos() {
        let vendedor = usuario(Role::Vendedor, Some(Department::Alimentacao));
        let grants = vec![concessao(vendedor.id, Permission::ViewReports, None)];

        for dep in Department::TODOS {
            assert!(has_permission(
                &vendedor,
                &grants,
                Permission::ViewReports,
                Some(dep)
            ));
        }
    }

    #[test]
    fn concessao_com_departamento_nao_vaza_para_outro() {
        let sup = usuario(Role::Supervisor, Some(Department::Eletrodomesticos));
        let grants = vec![concessao(
            sup.id,
            Permission::ApproveOrders,
            Some(Department::Eletrodomesticos),
        )];

        assert!(has_permission(
            &sup,
            &grants,
            Permission::ApproveOrders,
            Some(Department::Eletrodomesticos)
        ));
        assert!(!has_permission(
            &sup,
            &grants,
            Permission::ApproveOrders,
            Some(Department::Alimentacao)
        ));
        // Permissão diferente nunca casa
        assert!(!has_permission(
            &sup,
            &grants,
            Permission::RejectOrders,
            Some(Department::Eletrodomesticos)
        ));
    }

    #[test]
    fn edicao_de_catalogo_decide_pelo_departamento_do_produto() {
        let sup = usuario(Role::Supervisor, Some(Department::Alimentacao));
        let grants = vec![concessao(
            sup.id,
            Permission::EditProducts,
            Some(Department::Alimentacao),
        )];

        // Produto do departamento concedido
        assert!(has_permission(
            &sup,
            &grants,
            Permission::EditProducts,
            Some(Department::Alimentacao)
        ));
        // Produto de outro departamento não passa, ainda que o usuário
        // pertença ao departamento da concessão
        assert!(!has_permission(
            &sup,
            &grants,
            Permission::EditProducts,
            Some(Department::Cosmeticos)
        ));
        assert!(!has_permission(
            &sup,
            &grants,
            Permission::DeleteProducts,
            Some(Department::Alimentacao)
        ));
    }

    #[test]
    fn verificacao_sem_contexto_aceita_concessao_departamental() {
        let vendedor = usuario(Role::Vendedor, Some(Department::Cosmeticos));
        let grants = vec![concessao(
            vendedor.id,
            Permission::ExportData,
            Some(Department::Cosmeticos),
        )];

        assert!(has_permission(&vendedor, &grants, Permission::ExportData, None));
    }

    #[test]
    fn recorte_de_visibilidade_por_papel() {
        let admin = usuario(Role::Admin, None);
        assert_eq!(visibility_scope(&admin), VisibilityScope::Todas);

        let sup = usuario(Role::Supervisor, Some(Department::Alimentacao));
        assert_eq!(
            visibility_scope(&sup),
            VisibilityScope::Departamento(Department::Alimentacao)
        );

        let vendedor = usuario(Role::Vendedor, Some(Department::Alimentacao));
        assert_eq!(visibility_scope(&vendedor), VisibilityScope::Proprias(vendedor.id));

        // Supervisor sem departamento cai no recorte mais restrito
        let sup_sem_dep = usuario(Role::Supervisor, None);
        assert_eq!(
            visibility_scope(&sup_sem_dep),
            VisibilityScope::Proprias(sup_sem_dep.id)
        );
    }
}
