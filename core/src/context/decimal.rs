//! Decimal-format facts and the numeric rounding policy.

use core::num::NonZeroU64;

use bigdecimal::{BigDecimal, RoundingMode};

/// Locale facts consumed by BigDecimal operations and by text↔number
/// conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalNumberContext {
    currency_symbol: String,
    decimal_point: char,
    grouping_separator: char,
    exponent_symbol: char,
    negative_sign: char,
    positive_sign: char,
    locale: String,
}

impl DecimalNumberContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency_symbol: impl Into<String>,
        decimal_point: char,
        grouping_separator: char,
        exponent_symbol: char,
        negative_sign: char,
        positive_sign: char,
        locale: impl Into<String>,
    ) -> Self {
        DecimalNumberContext {
            currency_symbol: currency_symbol.into(),
            decimal_point,
            grouping_separator,
            exponent_symbol,
            negative_sign,
            positive_sign,
            locale: locale.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    pub fn exponent_symbol(&self) -> char {
        self.exponent_symbol
    }

    pub fn negative_sign(&self) -> char {
        self.negative_sign
    }

    pub fn positive_sign(&self) -> char {
        self.positive_sign
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Rewrites a number in this context's notation into the plain form the
    /// numeric parsers expect: grouping separators dropped, locale signs,
    /// decimal point and exponent symbol mapped to `-`/`+`/`.`/`e`.
    pub fn normalize_number(&self, text: &str) -> String {
        text.trim()
            .chars()
            .filter(|&c| c != self.grouping_separator)
            .map(|c| {
                if c == self.negative_sign {
                    '-'
                } else if c == self.positive_sign {
                    '+'
                } else if c == self.decimal_point {
                    '.'
                } else if c == self.exponent_symbol {
                    'e'
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Default for DecimalNumberContext {
    /// en-US style facts.
    fn default() -> Self {
        DecimalNumberContext::new("$", '.', ',', 'e', '-', '+', "en-US")
    }
}

/// Precision and rounding policy applied to BigDecimal arithmetic.
///
/// A precision of zero means unlimited: results are kept exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathContext {
    pub precision: u64,
    pub rounding_mode: RoundingMode,
}

impl MathContext {
    /// 7 significant digits, half-even rounding.
    pub const DECIMAL32: MathContext = MathContext {
        precision: 7,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// 16 significant digits, half-even rounding.
    pub const DECIMAL64: MathContext = MathContext {
        precision: 16,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// 34 significant digits, half-even rounding.
    pub const DECIMAL128: MathContext = MathContext {
        precision: 34,
        rounding_mode: RoundingMode::HalfEven,
    };

    /// Exact, unrounded arithmetic.
    pub const UNLIMITED: MathContext = MathContext {
        precision: 0,
        rounding_mode: RoundingMode::HalfEven,
    };

    pub fn new(precision: u64, rounding_mode: RoundingMode) -> Self {
        MathContext {
            precision,
            rounding_mode,
        }
    }

    /// Rounds `value` to this context's precision.
    pub fn round(&self, value: BigDecimal) -> BigDecimal {
        match NonZeroU64::new(self.precision) {
            Some(precision) => value.with_precision_round(precision, self.rounding_mode),
            None => value,
        }
    }
}

impl Default for MathContext {
    fn default() -> Self {
        MathContext::DECIMAL64
    }
}
