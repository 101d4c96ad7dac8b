pub mod app;
pub mod deserializers;
pub mod errors;
pub mod extract;
pub mod pagination;
mod routes;
