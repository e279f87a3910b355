// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the ShiftPay attendance and payroll engine.
//!
//! The engine is consumed and driven entirely through programmatic calls
//! from the surrounding CRUD layer; this crate is that boundary. It
//! exposes clock-in/clock-out validation-and-execution, the scheduled
//! sweep and generation entry points, and the period transition request,
//! each translating engine errors into stable reason codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    approve_pending_payments, clock_in, clock_out, run_period_generation, run_sweep,
    set_period_status,
};
pub use request_response::{
    AutoClosedRecord, ClockInRequest, ClockInResponse, ClockOutRequest, ClockOutResponse,
    GeneratedPeriodInfo, GenerationReport, SetPeriodStatusRequest, SetPeriodStatusResponse,
    SweepReport,
};
