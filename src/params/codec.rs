//! Codecs mapping native values to and from raw bag strings.

use super::errors::ParamError;
use std::fmt;

/// Encodes a native value into a bag string and decodes it back.
///
/// `encode` returning `None` means the value is the codec's "unset" form and
/// the key must be removed rather than stored.
pub trait Codec {
    /// Native value type
    type Value;

    /// Encodes `value`, or returns `None` if it must not be stored
    fn encode(&self, value: &Self::Value) -> Option<String>;

    /// Decodes the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] if `raw` is not a value this codec produces.
    fn decode(&self, key: &str, raw: &str) -> Result<Self::Value, ParamError>;
}

/// Identity codec for plain string parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn encode(&self, value: &String) -> Option<String> {
        Some(value.clone())
    }

    fn decode(&self, _key: &str, raw: &str) -> Result<String, ParamError> {
        Ok(raw.to_string())
    }
}

/// Boolean codec with configurable literals.
///
/// Several parameters use an empty string as their false literal. Since an
/// empty false value is indistinguishable from "not configured" on the server,
/// writing `false` to such a field removes the key, and reading it back yields
/// `None` instead of `Some(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolCodec {
    true_value: &'static str,
    false_value: &'static str,
}

impl BoolCodec {
    /// `"true"` / `"false"`
    pub const STANDARD: Self = Self::new("true", "false");

    /// `"true"` / empty: false is stored as an absent key
    pub const TRUE_OR_EMPTY: Self = Self::new("true", "");

    /// Creates a codec with the given literals
    #[must_use]
    pub const fn new(true_value: &'static str, false_value: &'static str) -> Self {
        Self {
            true_value,
            false_value,
        }
    }

    /// Literal stored for `true`
    #[must_use]
    pub fn true_value(&self) -> &'static str {
        self.true_value
    }

    /// Literal stored for `false`
    #[must_use]
    pub fn false_value(&self) -> &'static str {
        self.false_value
    }
}

impl Default for BoolCodec {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Codec for BoolCodec {
    type Value = bool;

    fn encode(&self, value: &bool) -> Option<String> {
        if *value {
            Some(self.true_value.to_string())
        } else if self.false_value.is_empty() {
            None
        } else {
            Some(self.false_value.to_string())
        }
    }

    fn decode(&self, key: &str, raw: &str) -> Result<bool, ParamError> {
        if raw == self.true_value {
            Ok(true)
        } else if raw == self.false_value {
            Ok(false)
        } else {
            Err(ParamError::malformed(
                key,
                raw,
                format!("'{}' or '{}'", self.true_value, self.false_value),
            ))
        }
    }
}

/// Decimal integer codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntCodec;

impl Codec for IntCodec {
    type Value = i64;

    fn encode(&self, value: &i64) -> Option<String> {
        Some(value.to_string())
    }

    fn decode(&self, key: &str, raw: &str) -> Result<i64, ParamError> {
        raw.parse()
            .map_err(|_| ParamError::malformed(key, raw, "an integer"))
    }
}

/// An enum whose variants are stored as explicit string tokens.
///
/// `VARIANTS` and `TOKENS` are parallel tables. Use the
/// [`param_enum!`](crate::param_enum) macro to declare one.
pub trait ParamEnum: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// All variants, in declaration order
    const VARIANTS: &'static [Self];
    /// Token stored for the variant at the same index
    const TOKENS: &'static [&'static str];
}

/// Codec for enum parameters backed by a per-field token table
pub struct EnumCodec<E: 'static> {
    variants: &'static [E],
    tokens: &'static [&'static str],
}

impl<E: ParamEnum> EnumCodec<E> {
    /// Codec using the enum's own token table
    #[must_use]
    pub const fn of() -> Self {
        Self::with_tokens(E::VARIANTS, E::TOKENS)
    }

    /// Codec using a field-specific token table
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if the tables differ
    /// in length.
    #[must_use]
    pub const fn with_tokens(variants: &'static [E], tokens: &'static [&'static str]) -> Self {
        assert!(
            variants.len() == tokens.len(),
            "enum variant and token tables must have the same length"
        );
        Self { variants, tokens }
    }

    /// Token stored for `value`
    #[must_use]
    pub fn token(&self, value: E) -> Option<&'static str> {
        self.variants
            .iter()
            .position(|v| *v == value)
            .map(|i| self.tokens[i])
    }

    /// Variant for a stored token
    #[must_use]
    pub fn variant(&self, token: &str) -> Option<E> {
        self.tokens
            .iter()
            .position(|t| *t == token)
            .map(|i| self.variants[i])
    }

    /// All accepted tokens
    #[must_use]
    pub const fn tokens(&self) -> &'static [&'static str] {
        self.tokens
    }
}

impl<E: 'static> Clone for EnumCodec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: 'static> Copy for EnumCodec<E> {}

impl<E: 'static> fmt::Debug for EnumCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumCodec")
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl<E: ParamEnum> Codec for EnumCodec<E> {
    type Value = E;

    fn encode(&self, value: &E) -> Option<String> {
        let token = self.token(*value);
        if token.is_none() {
            tracing::warn!(?value, "enum value has no token in this field's table");
        }
        token.map(str::to_string)
    }

    fn decode(&self, key: &str, raw: &str) -> Result<E, ParamError> {
        self.variant(raw).ok_or_else(|| ParamError::UnknownEnumToken {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    crate::param_enum! {
        enum Policy {
            AlwaysMerge => "alwaysMerge",
            FastForward => "fastForward",
        }
    }

    #[test]
    fn test_bool_empty_false_is_unset() {
        let codec = BoolCodec::TRUE_OR_EMPTY;
        assert_eq!(codec.encode(&true), Some("true".to_string()));
        assert_eq!(codec.encode(&false), None);
    }

    #[test]
    fn test_bool_standard_false_is_stored() {
        assert_eq!(BoolCodec::STANDARD.encode(&false), Some("false".to_string()));
        assert!(!BoolCodec::STANDARD.decode("k", "false").unwrap());
    }

    #[rstest]
    #[case(BoolCodec::STANDARD, "yes")]
    #[case(BoolCodec::STANDARD, "")]
    #[case(BoolCodec::TRUE_OR_EMPTY, "false")]
    fn test_bool_unknown_literal_is_malformed(#[case] codec: BoolCodec, #[case] raw: &str) {
        let err = codec.decode("flag", raw).unwrap_err();
        assert!(matches!(err, ParamError::Malformed { .. }));
    }

    #[rstest]
    #[case("12", 12)]
    #[case("-3", -3)]
    #[case("0", 0)]
    fn test_int_decode(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(IntCodec.decode("n", raw).unwrap(), expected);
    }

    #[rstest]
    #[case("ten")]
    #[case("")]
    #[case("1.5")]
    fn test_int_decode_malformed(#[case] raw: &str) {
        assert_eq!(
            IntCodec.decode("n", raw).unwrap_err(),
            ParamError::malformed("n", raw, "an integer")
        );
    }

    #[test]
    fn test_enum_explicit_tokens() {
        let codec = EnumCodec::<Policy>::of();
        assert_eq!(codec.decode("p", "fastForward").unwrap(), Policy::FastForward);
        assert_eq!(codec.encode(&Policy::AlwaysMerge), Some("alwaysMerge".to_string()));
    }

    #[test]
    fn test_enum_unknown_token_fails() {
        let codec = EnumCodec::<Policy>::of();
        assert_eq!(
            codec.decode("p", "bogus").unwrap_err(),
            ParamError::UnknownEnumToken {
                key: "p".to_string(),
                value: "bogus".to_string()
            }
        );
        // Variant names are not accepted in place of tokens
        assert!(codec.decode("p", "FastForward").is_err());
    }

    #[test]
    fn test_enum_field_specific_table() {
        const CODEC: EnumCodec<Policy> =
            EnumCodec::with_tokens(&[Policy::FastForward], &["ff"]);
        assert_eq!(CODEC.token(Policy::FastForward), Some("ff"));
        assert_eq!(CODEC.encode(&Policy::AlwaysMerge), None);
        assert_eq!(CODEC.tokens(), &["ff"]);
    }

    proptest! {
        #[test]
        fn prop_string_round_trip(value in ".*") {
            let encoded = StringCodec.encode(&value).unwrap();
            prop_assert_eq!(StringCodec.decode("k", &encoded).unwrap(), value);
        }

        #[test]
        fn prop_int_round_trip(value in any::<i64>()) {
            let encoded = IntCodec.encode(&value).unwrap();
            prop_assert_eq!(IntCodec.decode("k", &encoded).unwrap(), value);
        }

        #[test]
        fn prop_standard_bool_round_trip(value in any::<bool>()) {
            let encoded = BoolCodec::STANDARD.encode(&value).unwrap();
            prop_assert_eq!(BoolCodec::STANDARD.decode("k", &encoded).unwrap(), value);
        }

        #[test]
        fn prop_enum_round_trip(index in 0..Policy::VARIANTS.len()) {
            let codec = EnumCodec::<Policy>::of();
            let value = Policy::VARIANTS[index];
            let encoded = codec.encode(&value).unwrap();
            prop_assert_eq!(codec.decode("k", &encoded).unwrap(), value);
        }
    }
}
