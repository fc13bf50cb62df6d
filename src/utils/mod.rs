pub mod authz;
pub mod crypto;
pub mod token;
