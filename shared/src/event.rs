use crate::error::{Error, Result};
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use percent_encoding::percent_decode_str;

/// A (bucket, key) pair naming one object to evaluate.
pub type Target = (String, String);

/// Extracts the bucket name and object key of every record, in record order.
pub fn targets(event: &S3Event) -> Result<Vec<Target>> {
    event
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| target(index, record))
        .collect()
}

fn target(index: usize, record: &S3EventRecord) -> Result<Target> {
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or(Error::MalformedRecord {
            index,
            field: "bucket name",
        })?;
    let key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .and_then(decode_key)
        .ok_or(Error::MalformedRecord {
            index,
            field: "object key",
        })?;

    Ok((bucket, key))
}

/// Notification keys are form-encoded: `+` is a space and everything else is percent-escaped.
fn decode_key(key: &str) -> Option<String> {
    percent_decode_str(&key.replace('+', " "))
        .decode_utf8()
        .ok()
        .map(|key| key.into_owned())
}
