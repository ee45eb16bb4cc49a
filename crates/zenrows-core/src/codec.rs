//! Flattening of [`ParameterSet`] into query parameters and back
//!
//! One static table maps each wire key to a getter and a setter. Encoding
//! walks the table in order; decoding looks each incoming key up in it.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Result, ZenrowsError};
use crate::params::{ParameterSet, keys};

type Getter = fn(&ParameterSet) -> Option<String>;
type Setter = fn(&mut ParameterSet, &str) -> std::result::Result<(), String>;

/// One row of the field table
struct Field {
    key: &'static str,
    get: Getter,
    set: Setter,
}

static FIELDS: &[Field] = &[
    Field {
        key: keys::PREMIUM_PROXY,
        get: |p| flag(p.use_premium_proxies),
        set: |p, v| {
            p.use_premium_proxies = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::PROXY_COUNTRY,
        get: |p| p.proxy_country.clone(),
        set: |p, v| {
            p.proxy_country = Some(v.to_string());
            Ok(())
        },
    },
    Field {
        key: keys::AUTOPARSE,
        get: |p| flag(p.auto_parse),
        set: |p, v| {
            p.auto_parse = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::CSS_EXTRACTOR,
        get: |p| p.css_extractor.clone(),
        set: |p, v| {
            p.css_extractor = Some(v.to_string());
            Ok(())
        },
    },
    Field {
        key: keys::JSON_RESPONSE,
        get: |p| flag(p.json_response),
        set: |p, v| {
            p.json_response = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::RESPONSE_TYPE,
        get: |p| display(&p.response_type),
        set: |p, v| {
            p.response_type = parse_token(v);
            Ok(())
        },
    },
    Field {
        key: keys::OUTPUTS,
        get: |p| joined(&p.outputs),
        set: |p, v| {
            p.outputs = split(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::JS_RENDER,
        get: |p| flag(p.js_render),
        set: |p, v| {
            p.js_render = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::JS_INSTRUCTIONS,
        get: |p| p.js_instructions.clone(),
        set: |p, v| {
            p.js_instructions = Some(v.to_string());
            Ok(())
        },
    },
    Field {
        key: keys::WAIT,
        get: |p| display(&p.wait_ms),
        set: |p, v| {
            p.wait_ms = Some(parse_value(v)?);
            Ok(())
        },
    },
    Field {
        key: keys::WAIT_FOR,
        get: |p| p.wait_for_selector.clone(),
        set: |p, v| {
            p.wait_for_selector = Some(v.to_string());
            Ok(())
        },
    },
    Field {
        key: keys::SCREENSHOT,
        get: |p| flag(p.screenshot),
        set: |p, v| {
            p.screenshot = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::SCREENSHOT_FULLPAGE,
        get: |p| flag(p.screenshot_full_page),
        set: |p, v| {
            p.screenshot_full_page = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::SCREENSHOT_SELECTOR,
        get: |p| p.screenshot_selector.clone(),
        set: |p, v| {
            p.screenshot_selector = Some(v.to_string());
            Ok(())
        },
    },
    Field {
        key: keys::SCREENSHOT_FORMAT,
        get: |p| display(&p.screenshot_format),
        set: |p, v| {
            p.screenshot_format = parse_token(v);
            Ok(())
        },
    },
    Field {
        key: keys::SCREENSHOT_QUALITY,
        get: |p| display(&p.screenshot_quality),
        set: |p, v| {
            p.screenshot_quality = Some(parse_value(v)?);
            Ok(())
        },
    },
    Field {
        key: keys::ORIGINAL_STATUS,
        get: |p| flag(p.return_original_status),
        set: |p, v| {
            p.return_original_status = parse_bool(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::SESSION_ID,
        get: |p| display(&p.session_id),
        set: |p, v| {
            p.session_id = Some(parse_value(v)?);
            Ok(())
        },
    },
    Field {
        key: keys::ALLOWED_STATUS_CODES,
        get: |p| joined(&p.allowed_status_codes),
        set: |p, v| {
            p.allowed_status_codes = split(v)?;
            Ok(())
        },
    },
    Field {
        key: keys::BLOCK_RESOURCES,
        get: |p| joined(&p.block_resources),
        set: |p, v| {
            p.block_resources = split(v)?;
            Ok(())
        },
    },
    // Header values travel as HTTP headers; only the marker goes in the query
    Field {
        key: keys::CUSTOM_HEADERS,
        get: |p| flag(!p.custom_headers.is_empty()),
        set: |_, v| parse_bool(v).map(drop),
    },
];

fn flag(value: bool) -> Option<String> {
    value.then(|| "true".to_string())
}

fn display<T: Display>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

fn joined<T: Display>(items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    Some(parts.join(","))
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    value
        .parse()
        .map_err(|_| format!("expected `true` or `false`, got `{}`", value))
}

fn parse_value<T>(value: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value `{}`: {}", value, e))
}

/// Empty means unset; anything else keeps its token, known or not
fn parse_token<T: for<'a> From<&'a str>>(value: &str) -> Option<T> {
    (!value.is_empty()).then(|| T::from(value))
}

fn split<T>(value: &str) -> std::result::Result<Vec<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value.split(',').map(parse_value).collect()
}

impl ParameterSet {
    /// Flatten the set into ordered `(key, value)` query parameters
    ///
    /// Only fields holding a value are emitted: booleans when `true`,
    /// options when `Some`, sequences when non-empty (comma joined, in
    /// order). Non-empty `custom_headers` adds a `custom_headers=true`
    /// marker; the header values themselves are not part of the output.
    ///
    /// Does not validate; call [`ParameterSet::validate`] first.
    ///
    /// # Example
    /// ```
    /// use zenrows_core::{OutputType, ParameterSet, ResourceType};
    ///
    /// let params = ParameterSet::new()
    ///     .with_js_render()
    ///     .with_outputs([OutputType::Emails, OutputType::Links])
    ///     .with_block_resources([ResourceType::Image, ResourceType::Font]);
    ///
    /// let pairs = params.encode();
    /// assert!(pairs.contains(&("outputs".to_string(), "emails,links".to_string())));
    /// assert!(pairs.contains(&("block_resources".to_string(), "image,font".to_string())));
    /// ```
    pub fn encode(&self) -> Vec<(String, String)> {
        FIELDS
            .iter()
            .filter_map(|field| (field.get)(self).map(|value| (field.key.to_string(), value)))
            .collect()
    }

    /// Rebuild a parameter set from flattened query parameters
    ///
    /// Later pairs overwrite earlier ones with the same key. Enumeration
    /// tokens are kept even when unknown so that [`ParameterSet::validate`]
    /// can report them; custom header values cannot be recovered.
    ///
    /// # Errors
    /// `DecodeError` for an unrecognised key or a value that does not
    /// convert to the field's type
    pub fn decode<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = ParameterSet::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let field = FIELDS
                .iter()
                .find(|field| field.key == key)
                .ok_or_else(|| ZenrowsError::decode(key, "unknown parameter"))?;

            (field.set)(&mut params, value.as_ref())
                .map_err(|reason| ZenrowsError::decode(key, reason))?;
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutputType, ResourceType, ResponseType, ScreenshotFormat};

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_encode_empty() {
        assert!(ParameterSet::new().encode().is_empty());
    }

    #[test]
    fn test_encode_jpeg_screenshot() {
        let params = ParameterSet::new()
            .with_js_render()
            .with_screenshot()
            .with_screenshot_format(ScreenshotFormat::Jpeg)
            .with_screenshot_quality(80);

        assert_eq!(
            params.encode(),
            vec![
                pair("js_render", "true"),
                pair("screenshot", "true"),
                pair("screenshot_format", "jpeg"),
                pair("screenshot_quality", "80"),
            ]
        );
    }

    #[test]
    fn test_encode_sequences_comma_joined() {
        let params = ParameterSet::new()
            .with_js_render()
            .with_outputs([OutputType::Emails, OutputType::Links])
            .with_block_resources([ResourceType::Image, ResourceType::Font])
            .with_allowed_status_codes([404, 500]);

        assert_eq!(
            params.encode(),
            vec![
                pair("outputs", "emails,links"),
                pair("js_render", "true"),
                pair("allowed_status_codes", "404,500"),
                pair("block_resources", "image,font"),
            ]
        );
    }

    #[test]
    fn test_encode_keeps_explicit_zero() {
        let params = ParameterSet::new().with_session_id(0).with_wait_ms(0);
        assert_eq!(params.encode(), vec![pair("wait", "0"), pair("session_id", "0")]);
    }

    #[test]
    fn test_encode_sends_zero_screenshot_quality() {
        // Valid as "not provided", but still sent so decoding restores Some(0)
        let params = ParameterSet::new().with_screenshot_quality(0);
        assert!(params.validate().is_ok());
        assert_eq!(params.encode(), vec![pair("screenshot_quality", "0")]);
        assert_eq!(ParameterSet::decode(params.encode()).unwrap(), params);
    }

    #[test]
    fn test_encode_custom_headers_marker_only() {
        let params = ParameterSet::new().with_custom_header("Referer", "https://google.com");
        assert_eq!(params.encode(), vec![pair("custom_headers", "true")]);
    }

    #[test]
    fn test_encode_all_wire_keys() {
        let params = ParameterSet {
            use_premium_proxies: true,
            proxy_country: Some("de".to_string()),
            auto_parse: true,
            css_extractor: Some(r#"{"title":"h1"}"#.to_string()),
            json_response: true,
            response_type: Some(ResponseType::Markdown),
            outputs: vec![OutputType::All],
            js_render: true,
            js_instructions: Some("[]".to_string()),
            wait_ms: Some(10),
            wait_for_selector: Some(".ready".to_string()),
            screenshot: true,
            screenshot_full_page: true,
            screenshot_selector: Some("#hero".to_string()),
            screenshot_format: Some(ScreenshotFormat::Png),
            screenshot_quality: None,
            return_original_status: true,
            session_id: Some(7),
            allowed_status_codes: vec![403],
            block_resources: vec![ResourceType::Stylesheet],
            custom_headers: Default::default(),
        };

        let keys: Vec<String> = params.encode().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "premium_proxy",
                "proxy_country",
                "autoparse",
                "css_extractor",
                "json_response",
                "response_type",
                "outputs",
                "js_render",
                "js_instructions",
                "wait",
                "wait_for",
                "screenshot",
                "screenshot_fullpage",
                "screenshot_selector",
                "screenshot_format",
                "original_status",
                "session_id",
                "allowed_status_codes",
                "block_resources",
            ]
        );
    }

    #[test]
    fn test_decode_roundtrip() {
        let params = ParameterSet::new()
            .with_premium_proxies()
            .with_proxy_country("fr")
            .with_js_render()
            .with_wait_for_selector("div.price")
            .with_outputs([OutputType::Tables, OutputType::Metadata])
            .with_block_resources([ResourceType::Media])
            .with_session_id(123);

        let decoded = ParameterSet::decode(params.encode()).expect("decode should succeed");
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_decode_str_pairs() {
        let decoded = ParameterSet::decode([("js_render", "true"), ("wait", "2500")])
            .expect("decode should succeed");
        assert!(decoded.js_render);
        assert_eq!(decoded.wait_ms, Some(2500));
    }

    #[test]
    fn test_decode_unknown_key() {
        let err = ParameterSet::decode([("premium", "true")]).unwrap_err();
        match err {
            ZenrowsError::DecodeError { field, reason } => {
                assert_eq!(field, "premium");
                assert_eq!(reason, "unknown parameter");
            }
            other => panic!("Expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_bad_bool() {
        let err = ParameterSet::decode([("js_render", "yes")]).unwrap_err();
        assert!(matches!(err, ZenrowsError::DecodeError { ref field, .. } if field == "js_render"));
    }

    #[test]
    fn test_decode_bad_integer() {
        let err = ParameterSet::decode([("session_id", "abc")]).unwrap_err();
        assert!(matches!(
            err,
            ZenrowsError::DecodeError { ref field, .. } if field == "session_id"
        ));

        let err = ParameterSet::decode([("allowed_status_codes", "404,nope")]).unwrap_err();
        assert!(matches!(
            err,
            ZenrowsError::DecodeError { ref field, .. } if field == "allowed_status_codes"
        ));
    }

    #[test]
    fn test_decode_keeps_unknown_tokens_for_validation() {
        let decoded =
            ParameterSet::decode([("outputs", "emails,bogus")]).expect("decode should succeed");
        assert_eq!(
            decoded.outputs,
            vec![OutputType::Emails, OutputType::Unknown("bogus".to_string())]
        );
        assert_eq!(decoded.validate().unwrap_err().to_string(), "invalid output type");
    }

    #[test]
    fn test_decode_empty_values() {
        let decoded = ParameterSet::decode([
            ("outputs", ""),
            ("response_type", ""),
            ("css_extractor", ""),
        ])
        .expect("decode should succeed");

        assert!(decoded.outputs.is_empty());
        assert_eq!(decoded.response_type, None);
        assert_eq!(decoded.css_extractor, Some(String::new()));
    }

    #[test]
    fn test_decode_custom_headers_marker() {
        let decoded =
            ParameterSet::decode([("custom_headers", "true")]).expect("decode should succeed");
        assert!(decoded.custom_headers.is_empty());

        assert!(ParameterSet::decode([("custom_headers", "maybe")]).is_err());
    }

    #[test]
    fn test_decode_last_value_wins() {
        let decoded = ParameterSet::decode([("wait", "100"), ("wait", "200")])
            .expect("decode should succeed");
        assert_eq!(decoded.wait_ms, Some(200));
    }
}
