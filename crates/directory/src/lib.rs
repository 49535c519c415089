//! `staffdir-directory`: employee/user records and the operations over them.
//!
//! Every protected operation runs the credential gate before touching a store.

pub mod employee;
pub mod error;
pub mod service;
pub mod store;
pub mod user;

pub use employee::{Employee, EmployeePatch, NewEmployee};
pub use error::DirectoryError;
pub use service::DirectoryService;
pub use store::{EmployeeStore, InMemoryEmployeeStore, InMemoryUserStore, RecordTable, UserStore};
pub use user::UserAccount;
