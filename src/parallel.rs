//! Batch decoding of independent buffers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{decode_with_options, DecodeOptions, Document, Result};

/// Decodes every buffer on its own, across the rayon pool when the
/// `parallel` feature is enabled. Results keep the input order.
#[cfg(feature = "parallel")]
pub fn decode_many<'a, B>(buffers: &'a [B], options: &DecodeOptions) -> Vec<Result<Document<'a>>>
where
    B: AsRef<[u8]> + Sync,
{
    buffers
        .par_iter()
        .map(|buffer| decode_with_options(buffer.as_ref(), options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn decode_many<'a, B>(buffers: &'a [B], options: &DecodeOptions) -> Vec<Result<Document<'a>>>
where
    B: AsRef<[u8]>,
{
    buffers
        .iter()
        .map(|buffer| decode_with_options(buffer.as_ref(), options))
        .collect()
}
