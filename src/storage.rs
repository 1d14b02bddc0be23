use bytes::Bytes;
use google_cloud_storage::client::Client as GcsClient;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use uuid::Uuid;

pub struct UploadedVideo {
    pub url: String,
    /// Object name inside the bucket, recorded as the asset's public id.
    pub object_name: String,
}

/// Uploads one background video into the `backgrounds/` prefix and returns
/// its public URL. Object names are UUID-based so repeated uploads of the
/// same file never collide.
pub async fn upload_background_video(
    gcs: &GcsClient,
    bucket: &str,
    file_name: &str,
    content_type: &str,
    data: Bytes,
) -> Result<UploadedVideo, google_cloud_storage::http::Error> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("mp4");
    let object_name = format!("backgrounds/{}.{}", Uuid::new_v4(), ext);

    let upload_type = UploadType::Simple(Media {
        name: object_name.clone().into(),
        content_type: content_type.to_string().into(),
        content_length: Some(data.len() as u64),
    });

    gcs.upload_object(
        &UploadObjectRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        },
        data,
        &upload_type,
    )
    .await?;

    Ok(UploadedVideo {
        url: format!("https://storage.googleapis.com/{}/{}", bucket, object_name),
        object_name,
    })
}
