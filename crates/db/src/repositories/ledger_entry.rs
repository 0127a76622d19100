//! Ledger entry repository for account master record operations.
//!
//! Soft-deleted rows (`isActive = false`) are excluded from every read and
//! mutation path; they are logically gone but physically retained.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::ledger_entries;

/// Input for creating a ledger entry.
///
/// All defaulting has already been applied by the caller; every field here
/// is the value that gets persisted.
#[derive(Debug, Clone)]
pub struct CreateLedgerEntryInput {
    /// Account name.
    pub ledger_name: String,
    /// Name used on printed documents.
    pub print_name: String,
    /// Free-form account classification.
    pub ledger_type: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2.
    pub address2: String,
    /// Address line 3.
    pub address3: String,
    /// State / region.
    pub state: String,
    /// Postal code.
    pub pin_code: String,
    /// GST registration number.
    pub gst_number: String,
    /// Contact person.
    pub contact: String,
    /// Mobile number.
    pub mobile_number: String,
    /// Landline number.
    pub phone_number: String,
    /// Email address.
    pub email: String,
    /// Opening balance (always a concrete number, never null).
    pub opening_balance: Decimal,
    /// Debit ("Dr") or credit ("Cr") designation of the opening balance.
    pub balance_type: String,
}

impl CreateLedgerEntryInput {
    fn into_active_model(self) -> ledger_entries::ActiveModel {
        ledger_entries::ActiveModel {
            id: NotSet,
            ledger_name: Set(self.ledger_name),
            print_name: Set(self.print_name),
            ledger_type: Set(self.ledger_type),
            address1: Set(self.address1),
            address2: Set(self.address2),
            address3: Set(self.address3),
            state: Set(self.state),
            pin_code: Set(self.pin_code),
            gst_number: Set(self.gst_number),
            contact: Set(self.contact),
            mobile_number: Set(self.mobile_number),
            phone_number: Set(self.phone_number),
            email: Set(self.email),
            opening_balance: Set(self.opening_balance),
            balance_type: Set(self.balance_type),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Input for partially updating a ledger entry.
///
/// Explicit allow-list of updatable fields: `id`, `isActive` and `createdAt`
/// have no slot here and cannot be touched through an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateLedgerEntryInput {
    /// Account name.
    pub ledger_name: Option<String>,
    /// Name used on printed documents.
    pub print_name: Option<String>,
    /// Free-form account classification.
    pub ledger_type: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// Address line 3.
    pub address3: Option<String>,
    /// State / region.
    pub state: Option<String>,
    /// Postal code.
    pub pin_code: Option<String>,
    /// GST registration number.
    pub gst_number: Option<String>,
    /// Contact person.
    pub contact: Option<String>,
    /// Mobile number.
    pub mobile_number: Option<String>,
    /// Landline number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Opening balance (coerced to a number before it gets here).
    pub opening_balance: Option<Decimal>,
    /// Debit ("Dr") or credit ("Cr") designation.
    pub balance_type: Option<String>,
}

impl UpdateLedgerEntryInput {
    /// Returns true when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ledger_name.is_none()
            && self.print_name.is_none()
            && self.ledger_type.is_none()
            && self.address1.is_none()
            && self.address2.is_none()
            && self.address3.is_none()
            && self.state.is_none()
            && self.pin_code.is_none()
            && self.gst_number.is_none()
            && self.contact.is_none()
            && self.mobile_number.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.opening_balance.is_none()
            && self.balance_type.is_none()
    }

    fn into_active_model(self) -> ledger_entries::ActiveModel {
        // Qualified call: `ActiveModelTrait` carries its own `default()`
        let mut model = <ledger_entries::ActiveModel as Default>::default();
        if let Some(v) = self.ledger_name {
            model.ledger_name = Set(v);
        }
        if let Some(v) = self.print_name {
            model.print_name = Set(v);
        }
        if let Some(v) = self.ledger_type {
            model.ledger_type = Set(v);
        }
        if let Some(v) = self.address1 {
            model.address1 = Set(v);
        }
        if let Some(v) = self.address2 {
            model.address2 = Set(v);
        }
        if let Some(v) = self.address3 {
            model.address3 = Set(v);
        }
        if let Some(v) = self.state {
            model.state = Set(v);
        }
        if let Some(v) = self.pin_code {
            model.pin_code = Set(v);
        }
        if let Some(v) = self.gst_number {
            model.gst_number = Set(v);
        }
        if let Some(v) = self.contact {
            model.contact = Set(v);
        }
        if let Some(v) = self.mobile_number {
            model.mobile_number = Set(v);
        }
        if let Some(v) = self.phone_number {
            model.phone_number = Set(v);
        }
        if let Some(v) = self.email {
            model.email = Set(v);
        }
        if let Some(v) = self.opening_balance {
            model.opening_balance = Set(v);
        }
        if let Some(v) = self.balance_type {
            model.balance_type = Set(v);
        }
        model
    }
}

/// Ledger entry repository for CRUD operations.
///
/// Holds a shared handle to the connection pool; cloning the repository
/// clones the handle, not the pool.
#[derive(Debug, Clone)]
pub struct LedgerEntryRepository {
    db: Arc<DatabaseConnection>,
}

impl LedgerEntryRepository {
    /// Creates a new ledger entry repository.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists active entries, newest first.
    ///
    /// Ordered by `createdAt` descending with id as tiebreaker. Unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<ledger_entries::Model>, DbErr> {
        ledger_entries::Entity::find()
            .filter(ledger_entries::Column::IsActive.eq(true))
            .order_by_desc(ledger_entries::Column::CreatedAt)
            .order_by_desc(ledger_entries::Column::Id)
            .all(self.db.as_ref())
            .await
    }

    /// Finds an active entry by id.
    ///
    /// Soft-deleted entries are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_by_id(
        &self,
        id: i32,
    ) -> Result<Option<ledger_entries::Model>, DbErr> {
        ledger_entries::Entity::find_by_id(id)
            .filter(ledger_entries::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await
    }

    /// Persists a new entry with `isActive = true` and `createdAt = now`.
    ///
    /// Returns the inserted row, generated id included.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateLedgerEntryInput,
    ) -> Result<ledger_entries::Model, DbErr> {
        input.into_active_model().insert(self.db.as_ref()).await
    }

    /// Applies the supplied fields to the matching active entry.
    ///
    /// Returns the number of rows affected: 0 when the entry vanished between
    /// the caller's existence check and this statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_by_id(
        &self,
        id: i32,
        input: UpdateLedgerEntryInput,
    ) -> Result<u64, DbErr> {
        let result = ledger_entries::Entity::update_many()
            .set(input.into_active_model())
            .filter(ledger_entries::Column::Id.eq(id))
            .filter(ledger_entries::Column::IsActive.eq(true))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    /// Soft-deletes the matching active entry by flipping `isActive` to false.
    ///
    /// Returns the number of rows affected. The row is retained physically
    /// and its id is never reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn soft_delete_by_id(&self, id: i32) -> Result<u64, DbErr> {
        let result = ledger_entries::Entity::update_many()
            .col_expr(ledger_entries::Column::IsActive, Expr::value(false))
            .filter(ledger_entries::Column::Id.eq(id))
            .filter(ledger_entries::Column::IsActive.eq(true))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    fn sample_model(id: i32) -> ledger_entries::Model {
        ledger_entries::Model {
            id,
            ledger_name: "Acme Corp".to_string(),
            print_name: "Acme Corp".to_string(),
            ledger_type: String::new(),
            address1: String::new(),
            address2: String::new(),
            address3: String::new(),
            state: String::new(),
            pin_code: String::new(),
            gst_number: String::new(),
            contact: String::new(),
            mobile_number: String::new(),
            phone_number: String::new(),
            email: String::new(),
            opening_balance: dec!(0),
            balance_type: "Dr".to_string(),
            is_active: true,
            created_at: chrono::Utc::now().into(),
        }
    }

    fn sample_input() -> CreateLedgerEntryInput {
        CreateLedgerEntryInput {
            ledger_name: "Acme Corp".to_string(),
            print_name: "Acme Corp".to_string(),
            ledger_type: String::new(),
            address1: String::new(),
            address2: String::new(),
            address3: String::new(),
            state: String::new(),
            pin_code: String::new(),
            gst_number: String::new(),
            contact: String::new(),
            mobile_number: String::new(),
            phone_number: String::new(),
            email: String::new(),
            opening_balance: dec!(0),
            balance_type: "Dr".to_string(),
        }
    }

    #[test]
    fn test_create_input_active_model() {
        let model = sample_input().into_active_model();

        assert!(model.id.is_not_set());
        assert_eq!(model.ledger_name, Set("Acme Corp".to_string()));
        assert_eq!(model.opening_balance, Set(dec!(0)));
        assert_eq!(model.balance_type, Set("Dr".to_string()));
        assert_eq!(model.is_active, Set(true));
        assert!(model.created_at.is_set());
    }

    #[test]
    fn test_update_input_empty() {
        assert!(UpdateLedgerEntryInput::default().is_empty());

        let input = UpdateLedgerEntryInput {
            email: Some("office@acme.example".to_string()),
            ..Default::default()
        };
        assert!(!input.is_empty());
    }

    #[test]
    fn test_update_input_sets_only_supplied_fields() {
        let input = UpdateLedgerEntryInput {
            ledger_name: Some("Acme Corp Pvt Ltd".to_string()),
            opening_balance: Some(dec!(1500.50)),
            ..Default::default()
        };

        let model = input.into_active_model();

        assert_eq!(model.ledger_name, Set("Acme Corp Pvt Ltd".to_string()));
        assert_eq!(model.opening_balance, Set(dec!(1500.50)));
        assert!(model.print_name.is_not_set());
        assert!(model.balance_type.is_not_set());
        // System-managed columns have no update slot at all
        assert!(model.id.is_not_set());
        assert!(model.is_active.is_not_set());
        assert!(model.created_at.is_not_set());
    }

    #[tokio::test]
    async fn test_find_active_by_id_absent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<ledger_entries::Model>::new()])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db.clone());
        let found = repo.find_active_by_id(42).await.unwrap();
        assert!(found.is_none());

        let sql = logged_sql(db, repo);
        assert!(sql.contains("isActive"));
    }

    #[tokio::test]
    async fn test_find_active_by_id_present() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![sample_model(1)]])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db);
        let found = repo.find_active_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.ledger_name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_repository_clone_shares_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![sample_model(1)]])
                .append_query_results([vec![sample_model(2)]])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db);
        let other = repo.clone();
        assert_eq!(repo.find_active_by_id(1).await.unwrap().unwrap().id, 1);
        assert_eq!(other.find_active_by_id(2).await.unwrap().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_list_active_filters_and_orders() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![sample_model(3), sample_model(2), sample_model(1)]])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db.clone());
        let entries = repo.list_active().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, 3);

        // The statement itself must exclude soft-deleted rows and sort
        // newest-first with id as tiebreaker
        let sql = logged_sql(db, repo);
        assert!(sql.contains("isActive"));
        assert!(sql.contains(r#"\"createdAt\" DESC"#));
        assert!(sql.contains(r#"\"id\" DESC"#));
    }

    #[tokio::test]
    async fn test_update_by_id_touches_only_supplied_columns() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db.clone());
        let input = UpdateLedgerEntryInput {
            state: Some("Karnataka".to_string()),
            ..Default::default()
        };
        let rows = repo.update_by_id(1, input).await.unwrap();
        assert_eq!(rows, 1);

        let sql = logged_sql(db, repo);
        assert!(sql.contains(r#"UPDATE \"ledger_entries\""#));
        assert!(sql.contains("state"));
        // Only the active row may be touched; untouched columns stay out
        // of the SET clause
        assert!(sql.contains("isActive"));
        assert!(!sql.contains("printName"));
        assert!(!sql.contains("createdAt"));
    }

    #[tokio::test]
    async fn test_soft_delete_by_id_flips_is_active() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LedgerEntryRepository::new(db.clone());
        let rows = repo.soft_delete_by_id(1).await.unwrap();
        assert_eq!(rows, 1);

        let sql = logged_sql(db, repo);
        assert!(sql.contains(r#"UPDATE \"ledger_entries\""#));
        assert!(sql.contains("isActive"));
    }

    /// Drains the mock transaction log once the repository handle is gone.
    fn logged_sql(db: Arc<DatabaseConnection>, repo: LedgerEntryRepository) -> String {
        drop(repo);
        let conn = Arc::try_unwrap(db).expect("no other connection handles");
        format!("{:?}", conn.into_transaction_log())
    }
}
