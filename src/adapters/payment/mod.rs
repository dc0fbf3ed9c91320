//! Payment adapters. Implement PaymentPort.

pub mod simulated;

pub use simulated::SimulatedPayment;
