pub mod audience;
pub mod configuration;
pub mod cors;
pub mod domain;
pub mod email_client;
pub mod email_templates;
pub mod notifier;
pub mod pipelines;
pub mod routes;
pub mod startup;
pub mod telemetry;
