//! Network messages - communication between App and Network layers

use std::fmt;
use std::path::PathBuf;

use crate::models::{AnswerResult, AskPayload, ModelDescriptor, UploadResult};

/// The three server round trips
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    LoadModels,
    Upload,
    Ask,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::LoadModels => "load models",
            Operation::Upload => "upload",
            Operation::Ask => "ask",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// GET the model list
    LoadModels { id: u64 },
    /// POST a PDF as multipart form data
    UploadPdf { id: u64, path: PathBuf },
    /// POST a question
    AskQuestion { id: u64, payload: AskPayload },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Request id and operation, `None` for `Shutdown`
    pub fn request(&self) -> Option<(u64, Operation)> {
        match self {
            NetworkCommand::LoadModels { id } => Some((*id, Operation::LoadModels)),
            NetworkCommand::UploadPdf { id, .. } => Some((*id, Operation::Upload)),
            NetworkCommand::AskQuestion { id, .. } => Some((*id, Operation::Ask)),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    ModelsLoaded {
        id: u64,
        models: Vec<ModelDescriptor>,
    },
    UploadFinished {
        id: u64,
        result: UploadResult,
    },
    AnswerReceived {
        id: u64,
        result: AnswerResult,
    },
    /// Any failure: transport, HTTP status, decoding or file access
    Failed {
        id: u64,
        operation: Operation,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::ModelsLoaded { id, .. } => *id,
            NetworkResponse::UploadFinished { id, .. } => *id,
            NetworkResponse::AnswerReceived { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            NetworkResponse::ModelsLoaded { .. } => Operation::LoadModels,
            NetworkResponse::UploadFinished { .. } => Operation::Upload,
            NetworkResponse::AnswerReceived { .. } => Operation::Ask,
            NetworkResponse::Failed { operation, .. } => *operation,
        }
    }
}
