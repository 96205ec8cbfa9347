// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io;
use thiserror::Error;

/// An error that occurs while rendering a [`Bench`](crate::Bench) report.
///
/// Returned by [`Bench::render`](crate::Bench::render).
#[derive(Debug, Error)]
#[error("error rendering bench report")]
pub struct RenderError {
    #[from]
    inner: io::Error,
}
