pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryClinicianDirectory, MemoryPracticeStore};
pub use postgres::{PgClinicianResolver, PgPracticeStore};
pub use store::{ClinicianResolver, PracticeStore, StoreError};
