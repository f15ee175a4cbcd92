// Adapters layer: record writers for the remote table. Storage backends live
// next to their entrypoint config (config::cli, config::lambda).

pub mod airtable;
pub mod dry_run;

pub use airtable::AirtableClient;
pub use dry_run::DryRunWriter;
