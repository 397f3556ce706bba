pub mod scanner;
pub mod validation;

use crate::constants::MAX_BUFFER_LEN;
use crate::node::Document;
use crate::{DecodeError, DecodeOptions, ErrorKind, Result};

pub fn decode(buffer: &[u8]) -> Result<Document<'_>> {
    decode_with_options(buffer, &DecodeOptions::default())
}

pub fn decode_with_options<'a>(buffer: &'a [u8], options: &DecodeOptions) -> Result<Document<'a>> {
    let mut document = Document::new();
    document.decode_into(buffer, options)?;
    Ok(document)
}

/// Decodes `buffer` and keeps whatever was parsed before a failure.
///
/// The returned document is always well formed; on failure its containers
/// end at the error offset.
pub fn decode_partial<'a>(
    buffer: &'a [u8],
    options: &DecodeOptions,
) -> (Document<'a>, Option<DecodeError>) {
    let mut document = Document::new();
    let error = document.decode_into(buffer, options).err();
    (document, error)
}

pub(crate) fn check_buffer_len(buffer: &[u8]) -> Result<()> {
    if buffer.len() > MAX_BUFFER_LEN {
        return Err(DecodeError::new(ErrorKind::Overflow, 0));
    }
    Ok(())
}
