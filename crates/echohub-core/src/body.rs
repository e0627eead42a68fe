//! Request body decoding by declared content type.
//!
//! The decoder produces exactly one representation per request: a parsed
//! JSON value, a flattened form mapping, or the raw payload. Dispatch is
//! driven solely by the declared `Content-Type` header; there is no content
//! sniffing. A declared-JSON body that fails to parse is a client error,
//! never silently downgraded to raw data.
//!
//! The multipart parser is synchronous and works on the already-collected
//! body bytes.

use echohub_model::{EchoError, FlatMap, flatten, group_pairs};

/// Tagged representation of a decoded request body.
///
/// The variants are mutually exclusive; the response builder maps each to
/// its own field in the echo document.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// No body bytes were present.
    Empty,
    /// Parsed `application/json` value.
    Json(serde_json::Value),
    /// Flattened form fields (`application/x-www-form-urlencoded` or
    /// `multipart/form-data`).
    Form(FlatMap),
    /// Raw payload for any other content type, as a lossy UTF-8 string.
    Raw(String),
}

/// Decode body bytes according to the declared content type.
///
/// # Errors
///
/// Returns a `BadRequest` error if a declared-JSON body fails to parse or
/// a multipart body carries no usable boundary.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<DecodedBody, EchoError> {
    if body.is_empty() {
        return Ok(DecodedBody::Empty);
    }

    let Some(media_type) = content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) else {
        return Ok(DecodedBody::Raw(lossy_string(body)));
    };

    if media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::JSON {
        let value = serde_json::from_slice(body)
            .map_err(|e| EchoError::bad_request(format!("malformed JSON body: {e}")))?;
        return Ok(DecodedBody::Json(value));
    }

    if media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::WWW_FORM_URLENCODED {
        let pairs = form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned()));
        return Ok(DecodedBody::Form(flatten(group_pairs(pairs))));
    }

    if media_type.type_() == mime::MULTIPART && media_type.subtype() == mime::FORM_DATA {
        let boundary = media_type
            .get_param(mime::BOUNDARY)
            .ok_or_else(|| EchoError::bad_request("missing boundary in multipart content type"))?;
        let fields = parse_multipart_fields(body, boundary.as_str())?;
        return Ok(DecodedBody::Form(flatten(group_pairs(fields))));
    }

    Ok(DecodedBody::Raw(lossy_string(body)))
}

fn lossy_string(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Parse a multipart/form-data body into named text fields, in order.
///
/// Parts without a `Content-Disposition` name are skipped; file parts are
/// treated like any other field, with their content read as a lossy string.
fn parse_multipart_fields(body: &[u8], boundary: &str) -> Result<Vec<(String, String)>, EchoError> {
    if boundary.is_empty() {
        return Err(EchoError::bad_request(
            "empty boundary in multipart content type",
        ));
    }

    let delimiter = format!("--{boundary}");
    let end_delimiter = format!("--{boundary}--");

    let mut fields = Vec::new();
    for part in split_multipart_parts(body, delimiter.as_bytes(), end_delimiter.as_bytes()) {
        let Some((headers_section, part_body)) = split_headers_body(part) else {
            continue;
        };
        let Some(name) = parse_disposition_name(headers_section) else {
            continue;
        };
        fields.push((name, lossy_string(part_body)));
    }

    Ok(fields)
}

/// Split the multipart body into individual parts by boundary.
fn split_multipart_parts<'a>(
    body: &'a [u8],
    delimiter: &[u8],
    end_delimiter: &[u8],
) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut remaining = body;

    // Skip the preamble (everything before the first delimiter).
    if let Some(pos) = find_bytes(remaining, delimiter) {
        remaining = &remaining[pos + delimiter.len()..];
        remaining = skip_crlf(remaining);
    } else {
        return parts;
    }

    loop {
        if remaining.starts_with(end_delimiter)
            || remaining
                .strip_prefix(b"\r\n")
                .is_some_and(|r| r.starts_with(end_delimiter))
        {
            break;
        }

        if let Some(pos) = find_bytes(remaining, delimiter) {
            let part = strip_trailing_crlf(&remaining[..pos]);
            parts.push(part);
            remaining = &remaining[pos + delimiter.len()..];
            remaining = skip_crlf(remaining);
        } else {
            // No more delimiters, treat the rest as the last part.
            let part = strip_trailing_crlf(remaining);
            if !part.is_empty() {
                parts.push(part);
            }
            break;
        }
    }

    parts
}

/// Split a part into headers section and body at the first `\r\n\r\n`.
fn split_headers_body(part: &[u8]) -> Option<(&[u8], &[u8])> {
    let separator = b"\r\n\r\n";
    find_bytes(part, separator).map(|pos| (&part[..pos], &part[pos + separator.len()..]))
}

/// Extract the `name="..."` parameter of a part's Content-Disposition header.
fn parse_disposition_name(headers: &[u8]) -> Option<String> {
    let headers_str = String::from_utf8_lossy(headers);
    for line in headers_str.split("\r\n") {
        if !line
            .to_ascii_lowercase()
            .starts_with("content-disposition:")
        {
            continue;
        }
        if let Some(name) = extract_quoted_param(line, "name") {
            return Some(name);
        }
    }
    None
}

/// Extract a quoted (or unquoted) parameter value from a header line.
fn extract_quoted_param(header_line: &str, param_name: &str) -> Option<String> {
    let quoted_pattern = format!("{param_name}=\"");
    let unquoted_pattern = format!("{param_name}=");

    let lower_line = header_line.to_ascii_lowercase();

    if let Some(pos) = lower_line.find(&quoted_pattern) {
        let start = pos + quoted_pattern.len();
        let rest = &header_line[start..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_owned());
        }
    }

    if let Some(pos) = lower_line.find(&unquoted_pattern) {
        let start = pos + unquoted_pattern.len();
        let rest = &header_line[start..];
        let end = rest.find(';').unwrap_or(rest.len());
        let val = rest[..end].trim().to_owned();
        if !val.is_empty() {
            return Some(val);
        }
    }

    None
}

/// Find the position of a needle in a haystack.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Skip leading `\r\n`.
fn skip_crlf(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\r\n").unwrap_or(data)
}

/// Strip a trailing `\r\n`.
fn strip_trailing_crlf(data: &[u8]) -> &[u8] {
    data.strip_suffix(b"\r\n").unwrap_or(data)
}
