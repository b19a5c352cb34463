use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("object not found (Bucket: {bucket}, Key: {key})")]
    ObjectNotFound { bucket: String, key: String },

    #[error("object is not valid UTF-8 (Bucket: {bucket}, Key: {key}): {source}")]
    Decode {
        bucket: String,
        key: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("error reading S3 object (Bucket: {bucket}, Key: {key}): {message}")]
    Storage {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("error listing S3 bucket {bucket}: {message}")]
    Listing { bucket: String, message: String },

    #[error("can't invoke '{model_id}'. Reason: {message}")]
    ModelInvocation { model_id: String, message: String },

    #[error("'{model_id}' returned no text content")]
    EmptyResponse { model_id: String },

    #[error("record {index} has no {field}")]
    MalformedRecord { index: usize, field: &'static str },
}

impl Error {
    /// Model failures abort the whole run rather than a single record.
    pub fn is_model_failure(&self) -> bool {
        matches!(
            self,
            Error::ModelInvocation { .. } | Error::EmptyResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_are_fail_fast() {
        let invoke = Error::ModelInvocation {
            model_id: "m".to_string(),
            message: "throttled".to_string(),
        };
        let empty = Error::EmptyResponse {
            model_id: "m".to_string(),
        };
        let missing = Error::ObjectNotFound {
            bucket: "b".to_string(),
            key: "k".to_string(),
        };

        assert!(invoke.is_model_failure());
        assert!(empty.is_model_failure());
        assert!(!missing.is_model_failure());
    }

    #[test]
    fn messages_carry_context() {
        let err = Error::ObjectNotFound {
            bucket: "bucket-a".to_string(),
            key: "notes.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "object not found (Bucket: bucket-a, Key: notes.txt)"
        );

        let err = Error::ModelInvocation {
            model_id: "anthropic.claude".to_string(),
            message: "denied".to_string(),
        };
        assert_eq!(err.to_string(), "can't invoke 'anthropic.claude'. Reason: denied");
    }
}
