pub mod audit_logs;
pub mod cart_entries;
pub mod catalog_items;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use cart_entries::Entity as CartEntries;
pub use catalog_items::Entity as CatalogItems;
pub use users::Entity as Users;
