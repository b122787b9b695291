use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::collaborators::PhotoStore;
use crate::config::{PhotoConfig, StorageConfig};
use crate::photo::prepare_photo;

/// Photo hosting on a Google Cloud Storage bucket.
#[derive(Clone)]
pub struct GcsPhotoStore {
    gcs_client: Client,
    storage: StorageConfig,
    photo: PhotoConfig,
}

impl GcsPhotoStore {
    pub async fn new(storage: StorageConfig, photo: PhotoConfig) -> Result<Self> {
        let config = ClientConfig::default().with_auth().await?;
        let gcs_client = Client::new(config);
        Ok(Self {
            gcs_client,
            storage,
            photo,
        })
    }

    /// Upload a file to the storage bucket.
    async fn upload_file(&self, object: &str, content: Vec<u8>) -> Result<()> {
        let mut media = Media::new(object.to_string());
        media.content_type = "image/webp".into();
        let request = UploadObjectRequest {
            bucket: self.storage.bucket.clone(),
            ..Default::default()
        };
        self.gcs_client
            .upload_object(&request, content, &UploadType::Simple(media))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for GcsPhotoStore {
    async fn upload_photo(&self, local: &Path, owner_id: &str, category: &str) -> Result<String> {
        let bytes = tokio::fs::read(local)
            .await
            .with_context(|| format!("Reading photo {}", local.display()))?;
        let webp = prepare_photo(&bytes, &self.photo).context("Preparing photo")?;
        let object = object_name(&self.storage.prefix, category, owner_id);
        self.upload_file(&object, webp)
            .await
            .with_context(|| format!("Uploading {}", object))?;
        tracing::info!("Uploaded photo to {}", object);
        Ok(public_url(&self.storage, &object))
    }

    async fn delete_photo(&self, url: &str) -> Result<()> {
        let object = object_from_url(&self.storage, url)
            .ok_or_else(|| anyhow!("{} is not in bucket {}", url, self.storage.bucket))?;
        self.gcs_client
            .delete_object(&DeleteObjectRequest {
                bucket: self.storage.bucket.clone(),
                object: object.to_string(),
                ..Default::default()
            })
            .await
            .with_context(|| format!("Deleting {}", object))?;
        tracing::info!("Deleted photo {}", object);
        Ok(())
    }
}

fn object_name(prefix: &str, category: &str, owner_id: &str) -> String {
    let name = format!("{}/{}/{}.webp", category, owner_id, uuid::Uuid::new_v4());
    if prefix.is_empty() {
        name
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), name)
    }
}

fn public_url(storage: &StorageConfig, object: &str) -> String {
    format!(
        "{}/{}/{}",
        storage.public_base_url.trim_end_matches('/'),
        storage.bucket,
        object
    )
}

fn object_from_url<'u>(storage: &StorageConfig, url: &'u str) -> Option<&'u str> {
    url.strip_prefix(storage.public_base_url.trim_end_matches('/'))?
        .strip_prefix('/')?
        .strip_prefix(storage.bucket.as_str())?
        .strip_prefix('/')
        .filter(|object| !object.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> StorageConfig {
        StorageConfig {
            bucket: "kitchen-photos".into(),
            prefix: "gallagher-kitchen/".into(),
            public_base_url: "https://storage.googleapis.com/".into(),
            category: "cooked".into(),
        }
    }

    #[test]
    fn objects_are_grouped_by_category_and_owner() {
        let name = object_name("gallagher-kitchen/", "cooked", "u7");
        assert!(name.starts_with("gallagher-kitchen/cooked/u7/"));
        assert!(name.ends_with(".webp"));
        assert_ne!(name, object_name("gallagher-kitchen", "cooked", "u7"));
        assert!(object_name("", "cooked", "u7").starts_with("cooked/u7/"));
    }

    #[test]
    fn urls_map_back_to_objects() {
        let storage = storage();
        let url = public_url(&storage, "gallagher-kitchen/cooked/u7/a.webp");
        assert_eq!(
            url,
            "https://storage.googleapis.com/kitchen-photos/gallagher-kitchen/cooked/u7/a.webp"
        );
        assert_eq!(
            object_from_url(&storage, &url),
            Some("gallagher-kitchen/cooked/u7/a.webp")
        );
    }

    #[test]
    fn foreign_urls_are_not_objects() {
        let storage = storage();
        assert_eq!(object_from_url(&storage, "https://example.com/a.webp"), None);
        assert_eq!(
            object_from_url(&storage, "https://storage.googleapis.com/other/a.webp"),
            None
        );
        assert_eq!(
            object_from_url(&storage, "https://storage.googleapis.com/kitchen-photos/"),
            None
        );
    }
}
