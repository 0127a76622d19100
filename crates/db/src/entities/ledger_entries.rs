//! `SeaORM` Entity for the ledger_entries table.
//!
//! Column names are camelCase to match the persisted schema.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "ledgerName")]
    pub ledger_name: String,
    #[sea_orm(column_name = "printName")]
    pub print_name: String,
    #[sea_orm(column_name = "ledgerType")]
    pub ledger_type: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub state: String,
    #[sea_orm(column_name = "pinCode")]
    pub pin_code: String,
    #[sea_orm(column_name = "gstNumber")]
    pub gst_number: String,
    pub contact: String,
    #[sea_orm(column_name = "mobileNumber")]
    pub mobile_number: String,
    #[sea_orm(column_name = "phoneNumber")]
    pub phone_number: String,
    pub email: String,
    // Wire format is a JSON number, not rust_decimal's default string
    #[sea_orm(column_name = "openingBalance")]
    #[serde(with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    #[sea_orm(column_name = "balanceType")]
    pub balance_type: String,
    #[sea_orm(column_name = "isActive")]
    pub is_active: bool,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
