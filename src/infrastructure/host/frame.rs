//! Newline-delimited JSON frames exchanged with a host process

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Call sent to the host
#[derive(Debug, Serialize)]
pub struct RequestFrame<'a> {
    pub id: u64,
    pub method: &'a str,
    pub args: &'a Value,
}

/// Reply to a call, correlated by `id`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseFrame {
    pub id: u64,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// Notification pushed by the host outside any call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Anything the host may write
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InboundFrame {
    Response(ResponseFrame),
    Event(EventFrame),
}

impl InboundFrame {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Encode a request as one line, including the trailing newline
pub fn encode_request(id: u64, method: &str, args: &Value) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(&RequestFrame { id, method, args })?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_line() {
        let line = encode_request(3, "is_paused", &json!({})).unwrap();
        assert_eq!(line, "{\"id\":3,\"method\":\"is_paused\",\"args\":{}}\n");
    }

    #[test]
    fn parse_result_response() {
        let frame = InboundFrame::parse(r#"{"id":1,"result":true}"#).unwrap();
        assert_eq!(
            frame,
            InboundFrame::Response(ResponseFrame {
                id: 1,
                result: json!(true),
                error: None,
            })
        );
    }

    #[test]
    fn parse_error_response() {
        let frame = InboundFrame::parse(r#"{"id":2,"error":"denied"}"#).unwrap();
        match frame {
            InboundFrame::Response(r) => {
                assert_eq!(r.error.as_deref(), Some("denied"));
                assert_eq!(r.result, Value::Null);
            }
            other => panic!("expected response, got {:?}", other),
        }
    }

    #[test]
    fn parse_event() {
        let frame = InboundFrame::parse(r#"{"event":"state_changed","data":"paused"}"#).unwrap();
        assert_eq!(
            frame,
            InboundFrame::Event(EventFrame {
                event: "state_changed".to_string(),
                data: json!("paused"),
            })
        );
    }

    #[test]
    fn parse_garbage_fails() {
        assert!(InboundFrame::parse("not json").is_err());
        assert!(InboundFrame::parse(r#"{"hello":1}"#).is_err());
    }
}
