pub mod db_url;
pub mod figment;
pub mod validator;

pub use db_url::DatabaseUrl;
