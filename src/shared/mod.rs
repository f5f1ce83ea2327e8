pub mod env_var;
pub mod token;
