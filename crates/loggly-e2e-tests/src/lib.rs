//! Test-only crate. The suites live under `tests/` and drive `loggly-api`
//! through `ReqwestTransport` against a `wiremock` server.
