// Uploads a local file once to public blob storage and prints its URL.
//
// Usage: upload-asset [FILE] [KEY] [CONTENT_TYPE]
// Defaults: public/avatar-1.mp4, avatar-1.mp4, video/mp4
// BLOB_READ_WRITE_TOKEN is read from the environment or .env.local

use anyhow::Context;
use mydouble_backend::{
    app_config::{load_env_file, BlobConfig, LOCAL_ENV_FILE},
    services::{BlobStore, VercelBlobClient},
};

const DEFAULT_FILE: &str = "public/avatar-1.mp4";
const DEFAULT_KEY: &str = "avatar-1.mp4";
const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables already in the environment win over the file
    let env_loaded = load_env_file(LOCAL_ENV_FILE).is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mydouble_backend=info".into()),
        )
        .init();

    if !env_loaded {
        tracing::warn!("{} not found, using the process environment only", LOCAL_ENV_FILE);
    }

    let mut args = std::env::args().skip(1);
    let file = args.next().unwrap_or_else(|| DEFAULT_FILE.to_string());
    let key = args.next().unwrap_or_else(|| DEFAULT_KEY.to_string());
    let content_type = args.next().unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    // DATABASE_URL may be absent here
    let client = VercelBlobClient::new(&BlobConfig::from_env())?;

    println!("Lecture du fichier: {}", file);
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("Failed to read {}", file))?;

    println!("Upload vers le stockage blob...");
    let blob = client.put(&key, bytes, &content_type).await?;

    println!("\nUpload réussi !");
    println!("\nAjoute cette ligne dans .env.local:");
    println!("AVATAR_VIDEO_URL={}", blob.url);
    Ok(())
}
