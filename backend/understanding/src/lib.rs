pub mod intent;
pub mod mime;
pub mod prompts;
pub mod transport;
pub mod vision;
pub mod wire;

pub use intent::{first_json_object, parse_intent_analysis, IntentParseError};
pub use mime::{data_uri, image_mime_type};
pub use prompts::{requests_json, DEFAULT_OCR_PROMPT, INTENT_ANALYSIS_PROMPT, JSON_OUTPUT_MARKER};
pub use transport::{ChatTransport, HttpReply, ReqwestTransport, TransportError};
pub use vision::{classify_status, VisionClient, DEFAULT_BASE_URL, DEFAULT_MODEL, MAX_TOKENS};
