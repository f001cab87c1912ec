use crate::error::{EvalError, Result};

/// Alphabet admitted in source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    /// ASCII letters, digits, the space and `. + - * / ( )`.
    #[default]
    Standard,
    /// `Standard` plus `% ^ & | , = _`.
    Extended,
}

const STANDARD_SYMBOLS: &str = " .+-*/()";
const EXTENDED_SYMBOLS: &str = "%^&|,=_";

impl CharacterSet {
    pub fn allows(self, c: char) -> bool {
        if c.is_ascii_alphanumeric() || STANDARD_SYMBOLS.contains(c) {
            return true;
        }
        match self {
            CharacterSet::Standard => false,
            CharacterSet::Extended => EXTENDED_SYMBOLS.contains(c),
        }
    }

    /// Rejects the source if any character falls outside the alphabet.
    pub fn validate(self, source: &str) -> Result<()> {
        match source.chars().enumerate().find(|(_, c)| !self.allows(*c)) {
            Some((position, character)) => Err(EvalError::InvalidCharacter {
                character,
                position,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_alphabet() {
        assert!(CharacterSet::Standard.validate("t*32/88 + 220").is_ok());
        assert!(CharacterSet::Standard.validate("cos(theta)*r").is_ok());
        assert!(CharacterSet::Standard.validate("2**3 // 4.5e1").is_ok());
        assert!(CharacterSet::Standard.validate("").is_ok());
    }

    #[test]
    fn test_rejects_first_offending_character() {
        assert_eq!(
            CharacterSet::Standard.validate("a + b; c[0]"),
            Err(EvalError::InvalidCharacter {
                character: ';',
                position: 5,
            })
        );
    }

    #[test]
    fn test_only_the_space_counts_as_whitespace() {
        assert_eq!(
            CharacterSet::Standard.validate("1\t+ 2"),
            Err(EvalError::InvalidCharacter {
                character: '\t',
                position: 1,
            })
        );
        assert_eq!(
            CharacterSet::Standard.validate("1\u{a0}+ 2"),
            Err(EvalError::InvalidCharacter {
                character: '\u{a0}',
                position: 1,
            })
        );
        for c in ['\n', '\r', '\u{3000}'] {
            assert!(!CharacterSet::Standard.allows(c));
            assert!(!CharacterSet::Extended.allows(c));
        }
        assert!(CharacterSet::Standard.allows(' '));
    }

    #[test]
    fn test_standard_rejects_extended_symbols() {
        for source in ["a % b", "a ^ b", "a & b", "a | b", "f(a, b)", "f(k=1)", "_x"] {
            assert!(
                matches!(
                    CharacterSet::Standard.validate(source),
                    Err(EvalError::InvalidCharacter { .. })
                ),
                "{} should be rejected",
                source
            );
            assert!(CharacterSet::Extended.validate(source).is_ok());
        }
    }

    #[test]
    fn test_non_ascii_letters_are_rejected() {
        assert!(matches!(
            CharacterSet::Extended.validate("π * r"),
            Err(EvalError::InvalidCharacter { character: 'π', position: 0 })
        ));
    }

    #[test]
    fn test_never_admitted() {
        for c in ['[', ']', '{', '}', '"', '\'', ';', ':', '<', '>', '!', '@', '#', '$', '\\', '~', '`'] {
            assert!(!CharacterSet::Extended.allows(c), "{:?}", c);
        }
    }
}
