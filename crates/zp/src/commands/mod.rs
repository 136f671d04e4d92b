//! CLI command implementations.

pub(crate) mod classify;
pub(crate) mod convert;

pub(crate) use classify::ClassifyArgs;
pub(crate) use convert::ConvertArgs;
