//! Result verification

pub mod correctness;

pub use self::correctness::{CertificateViolation, CorrectnessValidator};
