//! Search-key normalization.

use std::fmt::Write;

/// Normalizes a raw identifier into the table's token form.
///
/// ASCII letters and digits are lowercased. Every other ASCII byte, `_`
/// included, is written as `_` plus two lowercase hex digits, so `operator=`
/// becomes `operator_3d`. Non-ASCII characters pass through lowercased.
pub fn normalize(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            token.push(c.to_ascii_lowercase());
        } else if c.is_ascii() {
            // Writing into a String cannot fail
            let _ = write!(token, "_{:02x}", c as u32);
        } else {
            token.extend(c.to_lowercase());
        }
    }
    token
}

/// Whether `token` is already in normalized form.
pub fn is_normalized(token: &str) -> bool {
    !token.is_empty() && normalize(&decode(token)) == token
}

/// Reverses [`normalize`]'s escapes. Letter case is not recoverable.
pub fn decode(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(at) = rest.find('_') {
        out.push_str(&rest[..at]);
        let escaped = rest
            .get(at + 1..at + 3)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .filter(u8::is_ascii);
        match escaped {
            Some(byte) => {
                out.push(char::from(byte));
                rest = &rest[at + 3..];
            }
            None => {
                out.push('_');
                rest = &rest[at + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("onConnected", "onconnected")]
    #[case("operator=", "operator_3d")]
    #[case("operator==", "operator_3d_3d")]
    #[case("~TCPClient", "_7etcpclient")]
    #[case("my_name", "my_5fname")]
    #[case("Größe", "größe")]
    #[case("", "")]
    fn test_normalize(#[case] name: &str, #[case] expected: &str) {
        check!(normalize(name) == expected);
    }

    #[rstest]
    #[case("operator_3d", "operator=")]
    #[case("_7etcpclient", "~tcpclient")]
    #[case("plain", "plain")]
    #[case("trailing_", "trailing_")]
    #[case("bad_zz", "bad_zz")]
    fn test_decode(#[case] token: &str, #[case] expected: &str) {
        check!(decode(token) == expected);
    }

    #[rstest]
    #[case("onidle", true)]
    #[case("operator_3d", true)]
    #[case("onIdle", false)]
    #[case("operator=", false)]
    #[case("", false)]
    fn test_is_normalized(#[case] token: &str, #[case] expected: bool) {
        check!(is_normalized(token) == expected);
    }
}
