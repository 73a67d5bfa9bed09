//! Prefix classification against a signature registry

use super::signature::SignatureRegistry;

/// Return every type name whose prefix equals the leading bytes of `prefix_buffer`.
///
/// Matches are reported in registry order. `prefix_buffer` holds only the
/// bytes actually read from the file, so a short file simply fails the
/// longer signatures.
pub fn classify<'r>(registry: &'r SignatureRegistry, prefix_buffer: &[u8]) -> Vec<&'r str> {
    registry
        .signatures()
        .iter()
        .filter(|signature| signature.matches(prefix_buffer))
        .map(|signature| signature.type_name())
        .collect()
}
