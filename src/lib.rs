// Library for tests to access modules

pub mod config;
pub mod models;
pub mod poller;
pub mod portainer_client;
pub mod routes;
pub mod sensors;
pub mod setup;
pub mod version;
