/// Object key for a recording: `/<office>/<recording_file>`
///
/// Depends only on its inputs, so re-syncing a recording overwrites the
/// same object instead of creating a new one.
pub fn build_object_key(office: &str, recording_file: &str) -> String {
    format!("/{}/{}", office, recording_file)
}

/// Regional S3 endpoint host, e.g. `s3.eu-central-1.amazonaws.com`
pub fn regional_endpoint(region: &str) -> String {
    format!("s3.{}.amazonaws.com", region)
}

/// Path-style public URL: `https://s3.<region>.amazonaws.com/<bucket>/<office>/<file>`
pub fn build_public_url(bucket: &str, region: &str, object_key: &str) -> String {
    format!(
        "https://{}/{}/{}",
        regional_endpoint(region),
        bucket,
        object_key.trim_start_matches('/')
    )
}
