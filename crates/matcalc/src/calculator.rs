//! Public entry points: decode both operands, compute, encode the result.
//!
//! Every entry point returns either a complete result or a [`MatrixError`].
//! A panic raised anywhere below is caught here and reported as
//! [`MatrixError::Internal`] instead of unwinding into the caller.
use std::any::Any;
use std::panic::{self, UnwindSafe};

use crate::boundary::{decode, encode, ExternalMatrix, WireMatrix};
use crate::error::MatrixError;
use crate::ops::{self, Operation};

pub fn add(a: &ExternalMatrix, b: &ExternalMatrix) -> Result<ExternalMatrix, MatrixError> {
    calculate(Operation::Add, a, b)
}

pub fn subtract(a: &ExternalMatrix, b: &ExternalMatrix) -> Result<ExternalMatrix, MatrixError> {
    calculate(Operation::Subtract, a, b)
}

pub fn multiply(a: &ExternalMatrix, b: &ExternalMatrix) -> Result<ExternalMatrix, MatrixError> {
    calculate(Operation::Multiply, a, b)
}

pub fn calculate(
    op: Operation,
    a: &ExternalMatrix,
    b: &ExternalMatrix,
) -> Result<ExternalMatrix, MatrixError> {
    guarded(op, || {
        let lhs = decode(a)?;
        let rhs = decode(b)?;
        let result = ops::apply(op, &lhs, &rhs)?;
        log::debug!("{} successful: {}", op.noun(), result.shape());
        encode(&result)
    })
}

/// Same as [`calculate`], for operands that may contain `null`s.
pub fn calculate_wire(
    op: Operation,
    a: WireMatrix,
    b: WireMatrix,
) -> Result<ExternalMatrix, MatrixError> {
    let a = ExternalMatrix::try_from(a).map_err(|e| report(op, e))?;
    let b = ExternalMatrix::try_from(b).map_err(|e| report(op, e))?;
    calculate(op, &a, &b)
}

/// Run `f`, converting a panic into [`MatrixError::Internal`] and logging
/// any failure.
pub(crate) fn guarded<F>(op: Operation, f: F) -> Result<ExternalMatrix, MatrixError>
where
    F: FnOnce() -> Result<ExternalMatrix, MatrixError> + UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(report(op, e)),
        Err(payload) => Err(report(
            op,
            MatrixError::internal(format!(
                "unexpected failure during matrix {}: {}",
                op.noun(),
                panic_message(payload.as_ref())
            )),
        )),
    }
}

fn report(op: Operation, err: MatrixError) -> MatrixError {
    log::error!("Error in {}: {}", op, err);
    err
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
