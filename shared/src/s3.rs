use anyhow::Result;

pub async fn client() -> aws_sdk_s3::Client {
    let aws_config = aws_config::load_from_env().await;
    aws_sdk_s3::Client::new(&aws_config)
}

pub async fn get_bytes(
    s3: &aws_sdk_s3::Client,
    bucket_name: &str,
    object_key: &str,
) -> Result<Vec<u8>> {
    let object = s3
        .get_object()
        .bucket(bucket_name)
        .key(object_key)
        .send()
        .await?;

    let bytes = object.body.collect().await?.into_bytes();

    Ok(bytes.to_vec())
}

pub async fn get_string(
    s3: &aws_sdk_s3::Client,
    bucket_name: &str,
    object_key: &str,
) -> Result<String> {
    let bytes = get_bytes(s3, bucket_name, object_key).await?;
    let text = String::from_utf8(bytes)?;

    Ok(text)
}
