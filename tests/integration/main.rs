//! Integration tests for splunk-orm, driven by the in-memory transport.

mod atom_documents;
mod collections;
mod config_loading;
mod entity_lifecycle;
mod inputs;
mod support;
