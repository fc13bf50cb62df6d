use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dto::client_dto::{CreateClientPayload, UpdateClientPayload},
    error::{Error, Result},
    models::client::{resolve_patch_status, Client, STATUS_ACTIVE},
    models::user::User,
    utils::authz::{authorize, Action},
};

const LIST_CAP: i64 = 10_000;

const CLIENT_COLUMNS: &str = "id, legal_name, tax_id, municipal_registration, tax_regime, \
     legal_nature, company_size, responsible_name, phones, emails, status, \
     start_date, departure_date, created_at, updated_at";

#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateClientPayload, caller: &User) -> Result<Client> {
        require(caller, Action::Create)?;

        let status = payload
            .status
            .unwrap_or_else(|| STATUS_ACTIVE.to_string());

        let client = sqlx::query_as::<_, Client>(&format!(
            "INSERT INTO clients (id, legal_name, tax_id, municipal_registration,
                                  tax_regime, legal_nature, company_size, responsible_name,
                                  phones, emails, status, start_date, departure_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.legal_name)
        .bind(&payload.tax_id)
        .bind(&payload.municipal_registration)
        .bind(&payload.tax_regime)
        .bind(&payload.legal_nature)
        .bind(&payload.company_size)
        .bind(&payload.responsible_name)
        .bind(&payload.phones)
        .bind(&payload.emails)
        .bind(&status)
        .bind(&payload.start_date)
        .bind(&payload.departure_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Current clients: no departure date on record, whatever their status
    /// (PROBONO clients are current too).
    pub async fn list_current(&self, caller: &User) -> Result<Vec<Client>> {
        require(caller, Action::View)?;

        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients
             WHERE departure_date IS NULL OR departure_date = ''
             ORDER BY legal_name LIMIT $1"
        ))
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    pub async fn list_former(&self, caller: &User) -> Result<Vec<Client>> {
        require(caller, Action::View)?;

        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients
             WHERE departure_date IS NOT NULL AND departure_date <> ''
             ORDER BY legal_name LIMIT $1"
        ))
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    pub async fn get_by_id(&self, id: Uuid, caller: &User) -> Result<Client> {
        require(caller, Action::View)?;

        sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".to_string()))
    }

    /// Patch update: only supplied fields overwrite, `updated_at` always
    /// advances, and the departure-date rule is applied inside the same
    /// atomic UPDATE.
    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateClientPayload,
        caller: &User,
    ) -> Result<Client> {
        require(caller, Action::Edit)?;

        // Recording a departure forces INACTIVE, overriding any status
        // supplied in the same patch.
        let status = resolve_patch_status(payload.status, payload.departure_date.as_deref());

        let client = sqlx::query_as::<_, Client>(&format!(
            "UPDATE clients
             SET legal_name = COALESCE($2, legal_name),
                 tax_id = COALESCE($3, tax_id),
                 municipal_registration = COALESCE($4, municipal_registration),
                 tax_regime = COALESCE($5, tax_regime),
                 legal_nature = COALESCE($6, legal_nature),
                 company_size = COALESCE($7, company_size),
                 responsible_name = COALESCE($8, responsible_name),
                 phones = COALESCE($9, phones),
                 emails = COALESCE($10, emails),
                 status = COALESCE($11, status),
                 start_date = COALESCE($12, start_date),
                 departure_date = COALESCE($13, departure_date),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.legal_name)
        .bind(&payload.tax_id)
        .bind(&payload.municipal_registration)
        .bind(&payload.tax_regime)
        .bind(&payload.legal_nature)
        .bind(&payload.company_size)
        .bind(&payload.responsible_name)
        .bind(&payload.phones)
        .bind(&payload.emails)
        .bind(&status)
        .bind(&payload.start_date)
        .bind(&payload.departure_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".to_string()))?;

        Ok(client)
    }

    pub async fn delete(&self, id: Uuid, caller: &User) -> Result<()> {
        require(caller, Action::Delete)?;

        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Client not found".to_string()));
        }
        Ok(())
    }
}

fn require(caller: &User, action: Action) -> Result<()> {
    if authorize(caller, action) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "You do not have permission for this operation on clients".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Permissions, ROLE_ACCOUNTING};
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://unused@127.0.0.1:1/unused")
            .expect("lazy pool")
    }

    fn view_only_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Viewer".to_string(),
            login: "viewer".to_string(),
            password_hash: String::new(),
            role: ROLE_ACCOUNTING.to_string(),
            permissions: Permissions::default(),
            active: true,
            created_at: Utc::now(),
        }
    }

    fn empty_patch() -> UpdateClientPayload {
        serde_json::from_str("{}").unwrap()
    }

    #[tokio::test]
    async fn create_requires_the_create_flag() {
        let service = ClientService::new(unreachable_pool());
        let payload: CreateClientPayload = serde_json::from_str(
            r#"{"legal_name":"Acme Ltda","tax_id":"1","municipal_registration":"1",
                "tax_regime":"Simples Nacional","legal_nature":"LTDA",
                "company_size":"Small","responsible_name":"Maria"}"#,
        )
        .unwrap();

        let err = service.create(payload, &view_only_user()).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn update_requires_the_edit_flag() {
        let service = ClientService::new(unreachable_pool());
        let err = service
            .update(Uuid::new_v4(), empty_patch(), &view_only_user())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_requires_the_delete_flag() {
        let service = ClientService::new(unreachable_pool());
        let err = service
            .delete(Uuid::new_v4(), &view_only_user())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }
}
