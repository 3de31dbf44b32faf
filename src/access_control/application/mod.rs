pub mod audit;
pub mod enforcement;
pub mod query_services;
pub mod resolvers;
