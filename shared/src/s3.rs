use crate::error::{Error, Result};
use crate::store::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::Object;
use tracing::error;

pub async fn get_text(s3: &aws_sdk_s3::Client, bucket_name: &str, object_key: &str) -> Result<String> {
    let result = read_utf8(s3, bucket_name, object_key).await;

    if let Err(err) = &result {
        error!(
            bucket = bucket_name,
            key = object_key,
            error = %err,
            "Error reading S3 object"
        );
    }

    result
}

async fn read_utf8(s3: &aws_sdk_s3::Client, bucket_name: &str, object_key: &str) -> Result<String> {
    let object = s3
        .get_object()
        .bucket(bucket_name)
        .key(object_key)
        .send()
        .await
        .map_err(|err| {
            if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                Error::ObjectNotFound {
                    bucket: bucket_name.to_owned(),
                    key: object_key.to_owned(),
                }
            } else {
                Error::Storage {
                    bucket: bucket_name.to_owned(),
                    key: object_key.to_owned(),
                    message: DisplayErrorContext(&err).to_string(),
                }
            }
        })?;

    let bytes = object
        .body
        .collect()
        .await
        .map_err(|err| Error::Storage {
            bucket: bucket_name.to_owned(),
            key: object_key.to_owned(),
            message: err.to_string(),
        })?
        .into_bytes();

    String::from_utf8(bytes.to_vec()).map_err(|source| Error::Decode {
        bucket: bucket_name.to_owned(),
        key: object_key.to_owned(),
        source,
    })
}

/// One `ListObjectsV2` page. Buckets larger than a page are not fully covered.
pub async fn list(s3: &aws_sdk_s3::Client, bucket_name: &str) -> Result<Vec<Object>> {
    let response = s3
        .list_objects_v2()
        .bucket(bucket_name)
        .send()
        .await
        .map_err(|err| listing_error(bucket_name, DisplayErrorContext(&err)))?;

    Ok(response.contents.unwrap_or_default())
}

pub async fn list_all(s3: &aws_sdk_s3::Client, bucket_name: &str) -> Result<Vec<Object>> {
    let mut continuation_token = None;
    let mut objects = Vec::new();

    loop {
        let mut request = s3.list_objects_v2().bucket(bucket_name);

        if let Some(token) = &continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| listing_error(bucket_name, DisplayErrorContext(&err)))?;

        if let Some(contents) = response.contents {
            objects.extend(contents);
        }

        if response.is_truncated.unwrap_or(false) && response.next_continuation_token.is_some() {
            continuation_token = response.next_continuation_token;
        } else {
            break;
        }
    }

    Ok(objects)
}

fn listing_error(bucket_name: &str, err: impl std::fmt::Display) -> Error {
    let err = Error::Listing {
        bucket: bucket_name.to_owned(),
        message: err.to_string(),
    };
    error!(bucket = bucket_name, error = %err, "Error listing S3 bucket");
    err
}

fn keys(objects: Vec<Object>) -> Vec<String> {
    objects.into_iter().filter_map(|obj| obj.key).collect()
}

/// [`ObjectStore`] backed by a long-lived S3 client.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn read(&self, bucket: &str, key: &str) -> Result<String> {
        get_text(&self.client, bucket, key).await
    }

    async fn list_keys(&self, bucket: &str) -> Result<Vec<String>> {
        Ok(keys(list(&self.client, bucket).await?))
    }

    async fn list_all_keys(&self, bucket: &str) -> Result<Vec<String>> {
        Ok(keys(list_all(&self.client, bucket).await?))
    }
}
