//! C FFI bindings for embedding the solver

use core::slice;

use crate::predicate::meets_threshold;
use crate::solver::Solver;

/// Call succeeded (for `powsolve_verify`: the nonce is valid)
pub const POWSOLVE_OK: i32 = 0;
/// Target is not valid even-length hex (or not UTF-8)
pub const POWSOLVE_MALFORMED_TARGET: i32 = 1;
/// A required pointer was null
pub const POWSOLVE_NULL_ARGUMENT: i32 = 2;
/// The search space holds no satisfying nonce
pub const POWSOLVE_NO_SOLUTION: i32 = 3;
/// The nonce does not meet the target
pub const POWSOLVE_INVALID_NONCE: i32 = 4;

/// Borrow a byte buffer from C; a null pointer is only allowed for length 0
unsafe fn bytes_from_raw<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return (len == 0).then_some(&[][..]);
    }
    Some(unsafe { slice::from_raw_parts(ptr, len) })
}

unsafe fn solver_from_raw(
    prefix: *const u8,
    prefix_len: usize,
    target_hex: *const u8,
    target_hex_len: usize,
) -> Result<Solver, i32> {
    let prefix = unsafe { bytes_from_raw(prefix, prefix_len) }.ok_or(POWSOLVE_NULL_ARGUMENT)?;
    let target_hex =
        unsafe { bytes_from_raw(target_hex, target_hex_len) }.ok_or(POWSOLVE_NULL_ARGUMENT)?;
    let target_hex = core::str::from_utf8(target_hex).map_err(|_| POWSOLVE_MALFORMED_TARGET)?;

    Solver::from_hex(prefix, target_hex).map_err(|_| POWSOLVE_MALFORMED_TARGET)
}

/// Find the smallest nonce for a challenge
/// - prefix / prefix_len: challenge prefix bytes
/// - target_hex / target_hex_len: ASCII hex target
/// - nonce_out: receives the nonce on success
///
/// Returns one of the `POWSOLVE_*` status codes.
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_solve(
    prefix: *const u8,
    prefix_len: usize,
    target_hex: *const u8,
    target_hex_len: usize,
    nonce_out: *mut u64,
) -> i32 {
    if nonce_out.is_null() {
        return POWSOLVE_NULL_ARGUMENT;
    }

    let solver = match unsafe { solver_from_raw(prefix, prefix_len, target_hex, target_hex_len) } {
        Ok(solver) => solver,
        Err(status) => return status,
    };

    match solver.solve() {
        Ok(solution) => {
            unsafe { *nonce_out = solution.nonce };
            POWSOLVE_OK
        }
        Err(_) => POWSOLVE_NO_SOLUTION,
    }
}

/// Check a claimed nonce
///
/// Returns `POWSOLVE_OK` if it meets the target, `POWSOLVE_INVALID_NONCE` if
/// not, or an argument error code.
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_verify(
    prefix: *const u8,
    prefix_len: usize,
    target_hex: *const u8,
    target_hex_len: usize,
    nonce: u64,
) -> i32 {
    match unsafe { solver_from_raw(prefix, prefix_len, target_hex, target_hex_len) } {
        Ok(solver) if solver.verify(nonce) => POWSOLVE_OK,
        Ok(_) => POWSOLVE_INVALID_NONCE,
        Err(status) => status,
    }
}

/// Apply the threshold predicate to raw digest and threshold bytes
#[unsafe(no_mangle)]
pub extern "C" fn powsolve_meets_target(
    digest: *const u8,
    digest_len: usize,
    threshold: *const u8,
    threshold_len: usize,
) -> bool {
    let digest = unsafe { bytes_from_raw(digest, digest_len) };
    let threshold = unsafe { bytes_from_raw(threshold, threshold_len) };
    let (Some(digest), Some(threshold)) = (digest, threshold) else {
        return false;
    };
    meets_threshold(digest, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_solve() {
        let prefix = b"abc";
        let target = b"0fff";
        let mut nonce = 0u64;

        let status = powsolve_solve(
            prefix.as_ptr(),
            prefix.len(),
            target.as_ptr(),
            target.len(),
            &mut nonce,
        );

        assert_eq!(status, POWSOLVE_OK);
        assert_eq!(nonce, 26);
    }

    #[test]
    fn test_ffi_malformed_target() {
        let prefix = b"x";
        let mut nonce = 0u64;

        for target in [&b"zz"[..], &b"abc"[..], &[0xff, 0xfe][..]] {
            let status = powsolve_solve(
                prefix.as_ptr(),
                prefix.len(),
                target.as_ptr(),
                target.len(),
                &mut nonce,
            );
            assert_eq!(status, POWSOLVE_MALFORMED_TARGET);
        }
    }

    #[test]
    fn test_ffi_null_arguments() {
        let target = b"ff";
        let status = powsolve_solve(
            core::ptr::null(),
            3,
            target.as_ptr(),
            target.len(),
            core::ptr::null_mut(),
        );
        assert_eq!(status, POWSOLVE_NULL_ARGUMENT);

        // Empty prefix may be passed as null
        let mut nonce = 7u64;
        let status = powsolve_solve(
            core::ptr::null(),
            0,
            target.as_ptr(),
            target.len(),
            &mut nonce,
        );
        assert_eq!(status, POWSOLVE_OK);
        assert_eq!(nonce, 0);
    }

    #[test]
    fn test_ffi_verify() {
        let prefix = b"abc";
        let target = b"0fff";
        let verify = |nonce| {
            powsolve_verify(
                prefix.as_ptr(),
                prefix.len(),
                target.as_ptr(),
                target.len(),
                nonce,
            )
        };

        assert_eq!(verify(26), POWSOLVE_OK);
        assert_eq!(verify(25), POWSOLVE_INVALID_NONCE);
    }

    #[test]
    fn test_ffi_meets_target() {
        let digest = [0x00, 0x10, 0xff];
        let threshold = [0x00, 0x20];
        assert!(powsolve_meets_target(
            digest.as_ptr(),
            digest.len(),
            threshold.as_ptr(),
            threshold.len()
        ));
        assert!(!powsolve_meets_target(
            threshold.as_ptr(),
            threshold.len(),
            digest.as_ptr(),
            2
        ));
        assert!(!powsolve_meets_target(
            core::ptr::null(),
            4,
            threshold.as_ptr(),
            threshold.len()
        ));
    }
}
