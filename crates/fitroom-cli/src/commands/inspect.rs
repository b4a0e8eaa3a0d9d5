//! `fitroom inspect` - encode a file and print its payload summary.
//!
//! A debugging aid for the encoder boundary; nothing is sent anywhere.

use anyhow::Result;
use fitroom_core::encoder::{self, ImageFile};
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> Result<()> {
    let encoded = encoder::encode(&ImageFile::new(&path)).await?;

    let preview_prefix: String = encoded.preview_reference.chars().take(64).collect();
    println!("media type:      {}", encoded.media_type);
    println!("payload length:  {} base64 chars", encoded.encoded_data.len());
    println!("preview prefix:  {preview_prefix}...");
    Ok(())
}
