use strum::{AsRefStr, EnumString};

/// Output formats accepted by the transcription endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Json,
    VerboseJson,
    Text,
    Srt,
    Vtt,
}

impl ResponseFormat {
    /// Whether the response body is a JSON object carrying a `text` field
    pub fn is_json(self) -> bool {
        matches!(self, ResponseFormat::Json | ResponseFormat::VerboseJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_response_format() {
        let test_cases = vec![
            ("json", Some(ResponseFormat::Json), true),
            ("verbose_json", Some(ResponseFormat::VerboseJson), true),
            ("text", Some(ResponseFormat::Text), false),
            ("srt", Some(ResponseFormat::Srt), false),
            ("vtt", Some(ResponseFormat::Vtt), false),
            ("xml", None, false),
        ];

        for (raw, expected, is_json) in test_cases {
            let parsed = ResponseFormat::from_str(raw).ok();
            assert_eq!(parsed, expected, "Unexpected parse result for '{}'", raw);
            if let Some(format) = parsed {
                assert_eq!(format.is_json(), is_json, "is_json mismatch for '{}'", raw);
                assert_eq!(format.as_ref(), raw);
            }
        }
    }
}
