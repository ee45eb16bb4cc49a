//! Enumeration tokens accepted by the ZenRows Scraper API
//!
//! Every token is transmitted verbatim to the service, so the string forms
//! below are part of the wire contract. Each enum carries an `Unknown` variant
//! for tokens this client does not recognise; those survive decoding and are
//! rejected by [`ParameterSet::validate`](crate::ParameterSet::validate).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! wire_tokens {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Token not known to this client
            Unknown(String),
        }

        impl $name {
            /// Every token the service accepts
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The wire token
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $token, )+
                    $name::Unknown(token) => token.as_str(),
                }
            }

            /// Whether the token belongs to the accepted set
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(token: &str) -> Self {
                match token {
                    $( $token => $name::$variant, )+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let token = String::deserialize(deserializer)?;
                Ok($name::from(token.as_str()))
            }
        }
    };
}

wire_tokens! {
    /// Body format the service should return instead of raw HTML
    pub enum ResponseType {
        Markdown => "markdown",
        PlainText => "plaintext",
        Pdf => "pdf",
    }
}

wire_tokens! {
    /// Data categories the service can extract from the page
    pub enum OutputType {
        Emails => "emails",
        PhoneNumbers => "phone_numbers",
        Headings => "headings",
        Images => "images",
        Audios => "audios",
        Videos => "videos",
        Links => "links",
        Tables => "tables",
        Menus => "menus",
        Hashtags => "hashtags",
        Metadata => "metadata",
        Favicon => "favicon",
        /// Every category at once
        All => "*",
    }
}

wire_tokens! {
    /// Image format of a rendered screenshot
    pub enum ScreenshotFormat {
        Png => "png",
        Jpeg => "jpeg",
    }
}

wire_tokens! {
    /// Browser resource categories that can be blocked while rendering
    pub enum ResourceType {
        EventSource => "eventsource",
        Fetch => "fetch",
        Font => "font",
        Image => "image",
        Manifest => "manifest",
        Media => "media",
        Other => "other",
        Script => "script",
        Stylesheet => "stylesheet",
        TextTrack => "texttrack",
        WebSocket => "websocket",
        Xhr => "xhr",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_type_tokens() {
        let tokens: Vec<&str> = ResponseType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(tokens, vec!["markdown", "plaintext", "pdf"]);
    }

    #[test]
    fn test_output_type_tokens() {
        let tokens: Vec<&str> = OutputType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            tokens,
            vec![
                "emails",
                "phone_numbers",
                "headings",
                "images",
                "audios",
                "videos",
                "links",
                "tables",
                "menus",
                "hashtags",
                "metadata",
                "favicon",
                "*",
            ]
        );
    }

    #[test]
    fn test_resource_type_tokens() {
        assert_eq!(ResourceType::ALL.len(), 12);
        assert_eq!(ResourceType::from("other"), ResourceType::Other);
        assert_eq!(ResourceType::from("xhr"), ResourceType::Xhr);
        assert!(ResourceType::ALL.iter().all(ResourceType::is_known));
    }

    #[test]
    fn test_from_str_known_token() {
        assert_eq!(ScreenshotFormat::from("jpeg"), ScreenshotFormat::Jpeg);
        assert_eq!(OutputType::from("*"), OutputType::All);
        assert_eq!("pdf".parse::<ResponseType>(), Ok(ResponseType::Pdf));
    }

    #[test]
    fn test_from_str_unknown_token() {
        let output = OutputType::from("bogus");
        assert_eq!(output, OutputType::Unknown("bogus".to_string()));
        assert!(!output.is_known());
        assert_eq!(output.as_str(), "bogus");
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!(!ScreenshotFormat::from("JPEG").is_known());
    }

    #[test]
    fn test_display_matches_wire_token() {
        assert_eq!(OutputType::PhoneNumbers.to_string(), "phone_numbers");
        assert_eq!(ResourceType::TextTrack.to_string(), "texttrack");
    }

    #[test]
    fn test_serde_uses_wire_token() {
        let json =
            serde_json::to_string(&ResourceType::WebSocket).expect("Serialization should succeed");
        assert_eq!(json, "\"websocket\"");

        let parsed: OutputType =
            serde_json::from_str("\"tables\"").expect("Deserialization should succeed");
        assert_eq!(parsed, OutputType::Tables);

        let unknown: ScreenshotFormat =
            serde_json::from_str("\"gif\"").expect("Deserialization should succeed");
        assert_eq!(unknown, ScreenshotFormat::Unknown("gif".to_string()));
    }
}
