//! Raw invocation token parsing.

use interwiki_shared::{ExtractFormat, InvocationParams, ParamValue};

/// Parse an ordered sequence of raw `"name=value"` / bare-flag tokens into
/// an [`InvocationParams`] map.
///
/// Each token is split on the first `=`, both halves trimmed. Tokens with
/// no `=` become bare flags. Later duplicates overwrite earlier ones. Key
/// names are not validated; any string is accepted.
pub fn parse_params<I, S>(tokens: I) -> InvocationParams
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut params = InvocationParams::new();
    for token in tokens {
        let token = token.as_ref();
        match token.split_once('=') {
            Some((name, value)) => {
                params.insert(
                    name.trim().to_string(),
                    ParamValue::Str(value.trim().to_string()),
                );
            }
            None => {
                params.insert(token.trim().to_string(), ParamValue::Flag);
            }
        }
    }
    params
}

/// Consume the reserved `format` key and select the output format.
///
/// Selection is case-insensitive; an unrecognized or flag-only value is
/// ignored and the default stays in effect.
pub fn take_format(params: &mut InvocationParams) -> ExtractFormat {
    match params.remove("format") {
        Some(ParamValue::Str(value)) => {
            ExtractFormat::parse(&value).unwrap_or_default()
        }
        _ => ExtractFormat::default(),
    }
}
