//! Dataset records
//!
//! Questions to classify, labelled few-shot examples, and the rows written
//! to the submission file.

use serde::Serialize;

use super::descriptor::{CallDescriptor, HttpMethod};

/// A question to classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub uid: String,
    pub question: String,
}

impl Question {
    pub fn new(uid: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            question: question.into(),
        }
    }
}

/// A labelled question shown to the model as a worked example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub question: String,
    pub method: HttpMethod,
    pub path: String,
}

impl Example {
    pub fn new(question: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            method,
            path: path.into(),
        }
    }

    pub fn answer(&self) -> CallDescriptor {
        CallDescriptor::new(self.method, self.path.clone())
    }
}

/// One row of the submission file (`uid;type;request`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub uid: String,
    #[serde(rename = "type")]
    pub method: HttpMethod,
    #[serde(rename = "request")]
    pub path: String,
}

impl ResultRecord {
    pub fn new(question: &Question, descriptor: CallDescriptor) -> Self {
        Self {
            uid: question.uid.clone(),
            method: descriptor.method,
            path: descriptor.path,
        }
    }

    pub fn descriptor(&self) -> CallDescriptor {
        CallDescriptor::new(self.method, self.path.clone())
    }
}
