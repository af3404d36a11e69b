use std::fmt::Write;

/// `"..."` with every character spelled as an escape sequence.
///
/// ```
/// assert_eq!(shroud_obf::encode::escape_literal("hi"), r#""\x68\x69""#);
/// ```
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 4 + 2);
    out.push('"');
    for c in value.chars() {
        let code = u32::from(c);
        // Writing to a String cannot fail.
        let _ = if code < 0x100 {
            write!(out, "\\x{code:02x}")
        } else if code < 0x1_0000 {
            write!(out, "\\u{code:04x}")
        } else {
            write!(out, "\\U{code:08x}")
        };
    }
    out.push('"');
    out
}

/// `float("...")` over the shortest decimal that reads back as `value`.
pub fn encode_float(value: f64) -> String {
    let decimal = if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{value:?}")
    };
    format!("float({})", escape_literal(&decimal))
}
