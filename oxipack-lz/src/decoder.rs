//! Token stream reconstruction.

use crate::token::LzToken;
use oxipack_core::{OxiPackError, Result};

/// Default cap on reconstructed output, in symbols.
pub const DEFAULT_MAX_OUTPUT: usize = 1 << 26;

/// Rebuild the symbol sequence described by `tokens`.
///
/// Copies run forward one symbol at a time, so a copy may read symbols it
/// wrote itself (`offset < length`).
///
/// Fails with `MalformedStream` before any token would grow the output past
/// `max_output` symbols.
pub fn reconstruct(tokens: &[LzToken], max_output: usize) -> Result<Vec<u32>> {
    let mut output = Vec::with_capacity(tokens.len().min(max_output));

    for (index, token) in tokens.iter().enumerate() {
        let needed = output.len().saturating_add(token.length).saturating_add(1);
        if needed > max_output {
            return Err(OxiPackError::malformed(
                index as u64,
                format!(
                    "token expands output to {} symbols, limit is {}",
                    needed, max_output
                ),
            ));
        }

        if token.length > 0 {
            if token.offset == 0 {
                return Err(OxiPackError::malformed(
                    index as u64,
                    format!("token copies {} symbols from offset 0", token.length),
                ));
            }
            if token.offset > output.len() {
                return Err(OxiPackError::malformed(
                    index as u64,
                    format!(
                        "offset {} reaches before start of output ({} symbols)",
                        token.offset,
                        output.len()
                    ),
                ));
            }

            let start = output.len() - token.offset;
            if token.offset >= token.length {
                output.extend_from_within(start..start + token.length);
            } else {
                for k in 0..token.length {
                    let symbol = output[start + k];
                    output.push(symbol);
                }
            }
        }
        output.push(token.literal);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_only() {
        let tokens = [LzToken::literal(1), LzToken::literal(0)];
        assert_eq!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_overlapping_copy() {
        let tokens = [LzToken::literal(65), LzToken::new(1, 3, 65)];
        assert_eq!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).unwrap(), vec![65; 5]);

        let tokens = [LzToken::literal(1), LzToken::literal(0), LzToken::new(2, 5, 9)];
        assert_eq!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).unwrap(), vec![1, 0, 1, 0, 1, 0, 1, 9]);
    }

    #[test]
    fn test_disjoint_copy() {
        let tokens = [
            LzToken::literal(1),
            LzToken::literal(2),
            LzToken::literal(3),
            LzToken::new(3, 2, 4),
        ];
        assert_eq!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).unwrap(), vec![1, 2, 3, 1, 2, 4]);
    }

    #[test]
    fn test_zero_offset_rejected() {
        let tokens = [LzToken::literal(1), LzToken::new(0, 2, 1)];
        assert!(matches!(
            reconstruct(&tokens, DEFAULT_MAX_OUTPUT),
            Err(OxiPackError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_offset_past_start_rejected() {
        let tokens = [LzToken::literal(1), LzToken::new(5, 1, 1)];
        assert!(matches!(
            reconstruct(&tokens, DEFAULT_MAX_OUTPUT),
            Err(OxiPackError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_zero_length_ignores_offset() {
        // Offset is meaningless without a copy.
        let tokens = [LzToken::new(7, 0, 3)];
        assert_eq!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).unwrap(), vec![3]);
    }

    #[test]
    fn test_output_limit() {
        let tokens = [LzToken::literal(1), LzToken::new(1, 20_000_000, 2)];
        assert!(matches!(
            reconstruct(&tokens, DEFAULT_MAX_OUTPUT),
            Err(OxiPackError::MalformedStream { .. })
        ));

        let tokens = [LzToken::literal(1), LzToken::new(1, usize::MAX, 2)];
        assert!(reconstruct(&tokens, DEFAULT_MAX_OUTPUT).is_err());
    }

    #[test]
    fn test_output_limit_is_inclusive() {
        let tokens = [LzToken::literal(7), LzToken::new(1, 2, 7)];
        assert_eq!(reconstruct(&tokens, 4).unwrap(), vec![7; 4]);
        assert!(reconstruct(&tokens, 3).is_err());
    }
}
