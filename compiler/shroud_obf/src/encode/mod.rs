//! Value encoders.
//!
//! Every encoder returns expression text that evaluates to the original
//! value under the target runtime. Integers are built from two boolean
//! idioms and nothing else:
//!
//! - `(not())` is `True`: an empty tuple is falsy.
//! - `(not[()])` is `False`: a list holding an empty tuple is truthy.
//!
//! Their sums give the base values 0 and 1, which live in the header under
//! the aliases of `Int(0)` and `Int(1)`. Everything else is shifts and sums
//! of those aliases.

mod text;

use num_bigint::{BigInt, BigUint, Sign};
use rustc_hash::FxHashMap;

use crate::config::StringMode;
use crate::ObfuscateError;

pub use text::{encode_float, escape_literal};

/// `True` without naming it.
pub const TRUE_IDIOM: &str = "(not())";
/// `False` without naming it.
pub const FALSE_IDIOM: &str = "(not[()])";
/// Header value of the 0 alias.
pub const ZERO_EXPR: &str = "((not[()])+(not[()]))";
/// Header value of the 1 alias.
pub const ONE_EXPR: &str = "((not())+(not[()]))";

/// Largest shift still spelled by repeated doubling. Runtimes cap nested
/// groups (CPython at 200), so larger shifts encode the shift amount.
const DOUBLING_LIMIT: u64 = 8;

/// Header value for a boolean constant.
pub fn bool_idiom(value: bool) -> &'static str {
    if value {
        TRUE_IDIOM
    } else {
        FALSE_IDIOM
    }
}

/// Per-run encoding context.
///
/// The memo maps decimal text to synthesized expression text and is seeded
/// with the 0 and 1 aliases, so it never outlives one obfuscation.
#[derive(Debug)]
pub struct Encoder {
    zero: String,
    one: String,
    mode: StringMode,
    memo: FxHashMap<String, String>,
}

impl Encoder {
    pub fn new(zero: impl Into<String>, one: impl Into<String>, mode: StringMode) -> Self {
        let zero = zero.into();
        let one = one.into();
        let mut memo = FxHashMap::default();
        memo.insert("0".to_string(), zero.clone());
        memo.insert("1".to_string(), one.clone());
        Encoder {
            zero,
            one,
            mode,
            memo,
        }
    }

    pub fn zero(&self) -> &str {
        &self.zero
    }

    pub fn one(&self) -> &str {
        &self.one
    }

    pub fn mode(&self) -> StringMode {
        self.mode
    }

    /// Expression text for `n` built from the base aliases.
    ///
    /// ```
    /// use shroud_obf::encode::Encoder;
    /// use shroud_obf::StringMode;
    ///
    /// let mut encoder = Encoder::new("z", "o", StringMode::Direct);
    /// assert_eq!(encoder.encode_int(&5.into()).unwrap(), "(o+((o<<o)<<o))");
    /// assert_eq!(encoder.encode_int(&(-1).into()).unwrap(), "((~z)*o)");
    /// ```
    pub fn encode_int(&mut self, n: &BigInt) -> Result<String, ObfuscateError> {
        if let Some(text) = self.memo.get(&n.to_string()) {
            return Ok(text.clone());
        }
        let limit = n.bits() + 1;
        let magnitude = self.encode_magnitude(n.magnitude(), 0, limit)?;
        if n.sign() != Sign::Minus {
            return Ok(magnitude);
        }
        let text = format!("((~{})*{magnitude})", self.zero);
        self.memo.insert(n.to_string(), text.clone());
        Ok(text)
    }

    fn encode_magnitude(
        &mut self,
        n: &BigUint,
        depth: u64,
        limit: u64,
    ) -> Result<String, ObfuscateError> {
        let key = n.to_string();
        if let Some(text) = self.memo.get(&key) {
            return Ok(text.clone());
        }
        if depth > limit {
            return Err(ObfuscateError::EncodingRecursionExhausted {
                value: key,
                depth: usize::try_from(depth).unwrap_or(usize::MAX),
            });
        }

        shroud_stack::ensure_sufficient_stack(|| {
            let mut terms = Vec::new();
            for shift in (0..n.bits()).filter(|&bit| n.bit(bit)) {
                let term = self.power_of_two(shift, depth, limit)?;
                terms.push(term);
            }
            let text = match terms.as_slice() {
                [single] => single.clone(),
                _ => format!("({})", terms.join("+")),
            };
            self.memo.insert(key, text.clone());
            Ok(text)
        })
    }

    /// Term for `2^shift`.
    fn power_of_two(
        &mut self,
        shift: u64,
        depth: u64,
        limit: u64,
    ) -> Result<String, ObfuscateError> {
        if shift == 0 {
            return Ok(self.one.clone());
        }
        let power = BigUint::from(1u8) << shift;
        let key = power.to_string();
        if let Some(text) = self.memo.get(&key) {
            return Ok(text.clone());
        }
        let term = if let Some(amount) = self.memo.get(&shift.to_string()) {
            format!("({}<<{amount})", self.one)
        } else if shift <= DOUBLING_LIMIT {
            let half = BigUint::from(1u8) << (shift - 1);
            let inner = self.encode_magnitude(&half, depth + 1, limit)?;
            format!("({inner}<<{})", self.one)
        } else {
            // Doubling nests one group per bit; past the limit the shift
            // amount is encoded instead, which nests logarithmically.
            let amount = self.encode_magnitude(&BigUint::from(shift), depth + 1, limit)?;
            format!("({}<<{amount})", self.one)
        };
        self.memo.insert(key, term.clone());
        Ok(term)
    }

    /// String literal text in the configured mode.
    ///
    /// Reduced mode asks `codepoint` for the alias of each character's
    /// header entry; a space is always spelled inline as 32.
    pub fn encode_string(
        &mut self,
        value: &str,
        mut codepoint: impl FnMut(&mut Self, char) -> Result<String, ObfuscateError>,
    ) -> Result<String, ObfuscateError> {
        match self.mode {
            StringMode::Direct => Ok(escape_literal(value)),
            StringMode::Reduced => {
                if value.is_empty() {
                    return Ok("str()".to_string());
                }
                let mut items = Vec::with_capacity(value.len());
                for c in value.chars() {
                    let item = if c == ' ' {
                        self.encode_int(&BigInt::from(32))?
                    } else {
                        codepoint(self, c)?
                    };
                    items.push(item);
                }
                Ok(format!("str().join(map(chr,[{}]))", items.join(",")))
            }
        }
    }
}
