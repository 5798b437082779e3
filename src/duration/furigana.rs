//! Remote transliteration through a furigana (reading) web service.
//!
//! Speaks the JSON-RPC 2.0 protocol of the Yahoo! JAPAN furigana API:
//!
//! ```text
//! POST {base_url}
//! User-Agent: Yahoo AppID: {app_id}
//! {"id": "...", "jsonrpc": "2.0", "method": "jlp.furiganaservice.furigana",
//!  "params": {"q": "今日は、晴れ", "grade": 1}}
//!
//! {"result": {"word": [{"surface": "今日", "furigana": "きょう"},
//!                      {"surface": "は"}, {"surface": "、"}, ...]}}
//! ```
//!
//! Words without a `furigana` field are already phonetic (kana, punctuation)
//! and contribute their surface form.  All connection details come from
//! [`TransliterationConfig`].

use std::time::Duration;

use serde::Deserialize;

use super::{PhoneticTranscription, TransliterationError, Transliterator};
use crate::config::TransliterationConfig;

const METHOD: &str = "jlp.furiganaservice.furigana";
/// Grade 1 asks for readings of every kanji, not only advanced ones.
const GRADE_ALL_KANJI: u8 = 1;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<RpcResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    #[serde(default)]
    word: Vec<Word>,
}

#[derive(Debug, Deserialize)]
struct Word {
    surface: String,
    furigana: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// FuriganaTransliterator
// ---------------------------------------------------------------------------

/// Blocking client for the furigana service.
pub struct FuriganaTransliterator {
    client: reqwest::blocking::Client,
    config: TransliterationConfig,
}

impl FuriganaTransliterator {
    /// Build a client from config.  The per-request timeout comes from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn from_config(config: &TransliterationConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

impl Transliterator for FuriganaTransliterator {
    fn transliterate(&self, text: &str) -> Result<PhoneticTranscription, TransliterationError> {
        if text.is_empty() {
            return Ok(PhoneticTranscription::empty());
        }

        let body = serde_json::json!({
            "id":      "caption-voice",
            "jsonrpc": "2.0",
            "method":  METHOD,
            "params":  { "q": text, "grade": GRADE_ALL_KANJI }
        });

        let mut req = self.client.post(&self.config.base_url).json(&body);

        let app_id = self.config.app_id.as_deref().unwrap_or("");
        if !app_id.is_empty() {
            req = req.header(reqwest::header::USER_AGENT, format!("Yahoo AppID: {app_id}"));
        }

        let response = req.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransliterationError::Unavailable(format!("HTTP {status}")));
        }

        let parsed: RpcResponse = response
            .json()
            .map_err(|e| TransliterationError::Malformed(e.to_string()))?;

        reading_of(parsed)
    }
}

/// Concatenate the reading of every word in the response.
fn reading_of(response: RpcResponse) -> Result<PhoneticTranscription, TransliterationError> {
    if let Some(err) = response.error {
        return Err(TransliterationError::Unavailable(format!(
            "error {}: {}",
            err.code, err.message
        )));
    }
    let result = response
        .result
        .ok_or_else(|| TransliterationError::Malformed("missing result".into()))?;

    let reading: String = result
        .word
        .into_iter()
        .map(|w| w.furigana.unwrap_or(w.surface))
        .collect();
    Ok(PhoneticTranscription::new(reading))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;

    fn parse(json: &str) -> Result<PhoneticTranscription, TransliterationError> {
        let response: RpcResponse = serde_json::from_str(json).expect("valid json");
        reading_of(response)
    }

    #[test]
    fn concatenates_furigana_and_surfaces() {
        let reading = parse(
            r#"{"id":"1","jsonrpc":"2.0","result":{"word":[
                {"surface":"今日","furigana":"きょう","roman":"kyou"},
                {"surface":"は"},
                {"surface":"、"},
                {"surface":"晴れ","furigana":"はれ"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(reading.as_str(), "きょうは、はれ");
    }

    #[test]
    fn empty_word_list_is_empty_reading() {
        let reading = parse(r#"{"result":{"word":[]}}"#).unwrap();
        assert!(reading.is_empty());
    }

    #[test]
    fn rpc_error_is_unavailable() {
        let err = parse(r#"{"error":{"code":-32602,"message":"Invalid params"}}"#).unwrap_err();
        assert!(matches!(err, TransliterationError::Unavailable(ref m) if m.contains("Invalid params")));
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = parse(r#"{"id":"1"}"#).unwrap_err();
        assert!(matches!(err, TransliterationError::Malformed(_)));
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _t = FuriganaTransliterator::from_config(&TransliterationConfig::default());
    }

    #[test]
    fn empty_text_skips_the_request() {
        let config = TransliterationConfig {
            base_url: "http://127.0.0.1:9/unreachable".into(),
            ..TransliterationConfig::default()
        };
        let t = FuriganaTransliterator::from_config(&config);
        assert!(t.transliterate("").unwrap().is_empty());
    }

    // -- HTTP round trips against a one-shot local server --------------------

    /// Client for `base_url` that ignores any proxy set in the environment.
    fn local(base_url: String) -> FuriganaTransliterator {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client");
        FuriganaTransliterator {
            client,
            config: TransliterationConfig {
                base_url,
                app_id: Some("test-app".into()),
                ..TransliterationConfig::default()
            },
        }
    }

    /// `true` once the headers and the whole `Content-Length` body arrived.
    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + length
    }

    /// Answer exactly one request with `status` and `body`; returns the URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&request) {
                let n = stream.read(&mut buf).expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write");
        });
        format!("http://{addr}/furigana")
    }

    #[test]
    fn refused_connection_is_unavailable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let t = local(format!("http://127.0.0.1:{port}/furigana"));
        assert!(matches!(
            t.transliterate("今日"),
            Err(TransliterationError::Unavailable(_))
        ));
    }

    #[test]
    fn error_status_is_unavailable() {
        let t = local(serve_once("503 Service Unavailable", ""));
        let err = t.transliterate("今日").unwrap_err();
        assert!(matches!(err, TransliterationError::Unavailable(ref m) if m.contains("503")));
    }

    #[test]
    fn successful_response_yields_reading() {
        let t = local(serve_once(
            "200 OK",
            r#"{"id":"caption-voice","jsonrpc":"2.0","result":{"word":[
                {"surface":"今日","furigana":"きょう"},{"surface":"は"}]}}"#,
        ));
        assert_eq!(t.transliterate("今日は").unwrap().as_str(), "きょうは");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let t = local(serve_once("200 OK", "<html>maintenance</html>"));
        assert!(matches!(
            t.transliterate("今日"),
            Err(TransliterationError::Malformed(_))
        ));
    }

    #[test]
    fn is_object_safe() {
        let t: Box<dyn Transliterator> = Box::new(FuriganaTransliterator::from_config(
            &TransliterationConfig::default(),
        ));
        drop(t);
    }
}
