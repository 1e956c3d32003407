pub mod errors;
pub mod helpers;
pub mod inflight;
pub mod query_params;
