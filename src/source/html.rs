use crate::error::{DashboardError, Result};

/// Pulls the JSON payload out of the dataset document.
///
/// The endpoint serves an HTML page whose first `<pre>` block holds the
/// records. A document that is already a bare JSON array is returned as is.
pub fn extract_payload(document: &str) -> Result<String> {
    let trimmed = document.trim_start();
    if trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }

    let lower = document.to_ascii_lowercase();
    let open = find_pre_open(&lower).ok_or(DashboardError::MissingPayload)?;
    let body_start = lower[open..]
        .find('>')
        .map(|i| open + i + 1)
        .ok_or(DashboardError::MissingPayload)?;
    let body_end = lower[body_start..]
        .find("</pre")
        .map(|i| body_start + i)
        .ok_or(DashboardError::MissingPayload)?;

    let payload = decode_entities(document[body_start..body_end].trim());
    if payload.is_empty() {
        return Err(DashboardError::MissingPayload);
    }
    Ok(payload)
}

// "<pre" must not match "<preload" and friends
fn find_pre_open(lower: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = lower[from..].find("<pre") {
        let at = from + i;
        match lower.as_bytes().get(at + 4) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => return Some(at),
            _ => from = at + 4,
        }
    }
    None
}

/// Decodes the named and numeric character references a `<pre>` body may carry
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "quot" => Some('"'),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            c.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
