pub mod create_transaction;
pub mod get_transaction;
pub mod list_transactions;
pub mod path_not_found;
