pub mod actions;
pub mod builder;
pub mod db_pool;
pub mod error;
pub mod executor;
pub mod request;
pub mod response;
pub mod utils;

pub use builder::{
    BindValue, DeleteBuilder, InsertBuilder, SelectBuilder, SqlStatement, UpdateBuilder,
};
pub use db_pool::{DbDriver, DbPool};
pub use error::{DynApiError, Result};
pub use request::{Action, ActionRequest};
pub use response::{ResponseEnvelope, Status};
