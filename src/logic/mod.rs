pub mod editor;
pub mod export;
pub mod history;
pub mod store;
pub mod validator;
pub mod wizard;
pub mod zone;
