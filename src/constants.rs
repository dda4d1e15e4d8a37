//! Application constants
//!
//! Centralized location for endpoint paths, display strings and defaults.

/// Default server base URL (the Flask app listens on port 5000)
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Model-listing endpoint
pub const MODELS_PATH: &str = "/api/models";

/// PDF upload endpoint
pub const UPLOAD_PATH: &str = "/api/upload";

/// Question endpoint
pub const ASK_PATH: &str = "/api/ask";

/// Multipart field name carrying the PDF
pub const UPLOAD_FIELD: &str = "file";

/// Content type sent with the uploaded file part
pub const PDF_MIME: &str = "application/pdf";

// Display text

pub const UPLOADING: &str = "Uploading...";
pub const UPLOAD_COMPLETE: &str = "Upload complete.";
pub const THINKING: &str = "Thinking...";
pub const NO_ANSWER: &str = "No answer.";

pub const ALERT_NO_FILE: &str = "Please select a PDF file first.";
pub const ALERT_NO_QUESTION: &str = "Please enter a question.";

/// Temperature used when nothing else is configured (matches the server default)
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "pdfqa.log";

/// Application name
pub const APP_NAME: &str = "PDF Q&A";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
