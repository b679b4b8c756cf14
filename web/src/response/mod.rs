//! Typed response bodies assembled from one or more domain results.

pub(crate) mod review;
