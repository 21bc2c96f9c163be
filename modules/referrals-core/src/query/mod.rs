//! Hand-written SQL, one function per statement. Each takes the pool it should
//! run on; the stores decide whether that is the read or the write handle.

pub(crate) mod campaign;
pub(crate) mod signup;
