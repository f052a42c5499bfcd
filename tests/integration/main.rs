//! HTTP-level tests for the partner endpoints and PostgreSQL store tests.

mod partner_limit_test;
mod partner_store_test;
