pub mod rest;

pub use rest::CasablancaClient;
