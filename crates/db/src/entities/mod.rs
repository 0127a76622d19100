//! `SeaORM` entity definitions.

pub mod ledger_entries;
